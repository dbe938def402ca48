use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One captured HTTP request, as stored by the backend. Never mutated by the
/// client; commands only order, filter and index copies of these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub id: String,

    pub method: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,

    /// Raw body text; may be JSON but is not parsed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Arrival time, epoch milliseconds.
    pub timestamp: i64,

    /// Body size in bytes.
    #[serde(default)]
    pub size: u64,
}
