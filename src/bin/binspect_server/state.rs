use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use binspect::model::RequestRecord;
use binspect::remote::Bin;

pub(crate) type SharedState = Arc<AppState>;

pub(crate) struct AppState {
    pub(crate) api_key: Option<String>,
    pub(crate) bins: RwLock<HashMap<String, BinState>>,
}

pub(crate) struct BinState {
    pub(crate) bin: Bin,
    /// Arrival order; handlers sort on the way out.
    pub(crate) requests: Vec<RequestRecord>,
}

pub(crate) fn new_id() -> String {
    let mut buf = [0u8; 16];
    getrandom::getrandom(&mut buf).expect("os rng");
    buf.iter().map(|b| format!("{:02x}", b)).collect()
}

pub(crate) fn now_ms() -> i64 {
    binspect::tail::now_ms()
}
