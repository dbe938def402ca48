use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// The persisted client context. Field names are camelCase on disk so the
/// document stays readable by older clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDoc {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Single-slot selection predating workspace scoping. Workspace-scoped
    /// writes keep this in step so older clients still see a sane value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_bin_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_active_bin_id: Option<String>,

    /// Workspace key (absolute path) -> active bin id.
    #[serde(default)]
    pub active_bins_by_workspace: HashMap<String, String>,

    /// Workspace key -> most-recently-used bin ids, front first, capped.
    #[serde(default)]
    pub recent_bins_by_workspace: HashMap<String, Vec<String>>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ContextDoc {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            active_bin_id: None,
            global_active_bin_id: None,
            active_bins_by_workspace: HashMap::new(),
            recent_bins_by_workspace: HashMap::new(),
        }
    }
}
