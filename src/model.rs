mod config;
mod ids;
mod record;
mod render;

pub use self::config::*;
pub use self::ids::*;
pub use self::record::*;
pub use self::render::*;
