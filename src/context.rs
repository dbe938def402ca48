//! Bin selection scoped to a workspace, with a legacy single slot and a
//! global slot as fallbacks, plus per-workspace recency tracking.

use std::path::Path;

use crate::model::ContextDoc;

/// Most-recently-used list cap per workspace.
pub const RECENT_CAP: usize = 10;

/// Workspace key for a directory, as stored in the context document.
pub fn key_for(dir: &Path) -> String {
    crate::workspace::workspace_key(dir)
        .to_string_lossy()
        .into_owned()
}

/// The bin a command should operate on. Workspace scope falls back to the
/// legacy single slot, then to the global slot, so configs written before
/// workspace scoping still produce a usable answer.
pub fn active_bin(doc: &ContextDoc, key: &str, global: bool) -> Option<String> {
    if global {
        return doc.global_active_bin_id.clone();
    }
    doc.active_bins_by_workspace
        .get(key)
        .cloned()
        .or_else(|| doc.active_bin_id.clone())
        .or_else(|| doc.global_active_bin_id.clone())
}

pub fn set_active_bin(doc: &mut ContextDoc, key: &str, id: &str, global: bool) {
    if global {
        doc.global_active_bin_id = Some(id.to_string());
        return;
    }
    doc.active_bins_by_workspace
        .insert(key.to_string(), id.to_string());
    // Keep the legacy slot in step for clients unaware of workspace scoping.
    doc.active_bin_id = Some(id.to_string());
}

/// Global scope never touches the workspace map; workspace scope also drops
/// the legacy slot but leaves the global slot alone.
pub fn clear_active_bin(doc: &mut ContextDoc, key: &str, global: bool) {
    if global {
        doc.global_active_bin_id = None;
        return;
    }
    doc.active_bins_by_workspace.remove(key);
    doc.active_bin_id = None;
}

/// Recency tracking is workspace-only; the global slot has nothing to rank,
/// so a global push is a no-op.
pub fn push_recent(doc: &mut ContextDoc, key: &str, id: &str, global: bool) {
    if global {
        return;
    }
    let entries = doc
        .recent_bins_by_workspace
        .entry(key.to_string())
        .or_default();
    entries.retain(|existing| existing != id);
    entries.insert(0, id.to_string());
    entries.truncate(RECENT_CAP);
}

/// For the global scope this is a single-element view of the global slot,
/// not a true MRU list.
pub fn recent_bins(doc: &ContextDoc, key: &str, global: bool) -> Vec<String> {
    if global {
        return doc.global_active_bin_id.clone().into_iter().collect();
    }
    doc.recent_bins_by_workspace
        .get(key)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
