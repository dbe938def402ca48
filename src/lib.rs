pub mod context;
pub mod diff;
pub mod model;
pub mod refs;
pub mod remote;
pub mod store;
pub mod tail;
pub mod workspace;
