//! Structured comparison of two captured requests.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{RequestRecord, human_size};

/// At most this many header entries are emitted; the rest are silently
/// truncated.
pub const HEADER_ENTRY_CAP: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Change {
    Method { from: String, to: String },
    Path { from: String, to: String },
    /// Compared on the human rendering, not raw bytes: two byte counts that
    /// print the same are unchanged for this entry.
    Size { from: String, to: String },
    HeaderAdded { name: String, value: String },
    HeaderRemoved { name: String, value: String },
    HeaderChanged { name: String, from: String, to: String },
}

#[derive(Debug)]
pub struct DiffReport {
    pub changes: Vec<Change>,
    core_equal: bool,
}

impl DiffReport {
    /// True only when the change list is empty and method, normalized path,
    /// raw size and body are all exactly equal. Note raw size: a pair whose
    /// sizes render the same but differ in bytes produces no Size entry yet
    /// still fails this check.
    pub fn no_material_differences(&self) -> bool {
        self.changes.is_empty() && self.core_equal
    }
}

fn normalized_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

pub fn diff(left: &RequestRecord, right: &RequestRecord) -> DiffReport {
    let mut changes = Vec::new();

    if left.method != right.method {
        changes.push(Change::Method {
            from: left.method.clone(),
            to: right.method.clone(),
        });
    }

    let left_path = normalized_path(&left.path);
    let right_path = normalized_path(&right.path);
    if left_path != right_path {
        changes.push(Change::Path {
            from: left_path.to_string(),
            to: right_path.to_string(),
        });
    }

    let left_size = human_size(left.size);
    let right_size = human_size(right.size);
    if left_size != right_size {
        changes.push(Change::Size {
            from: left_size,
            to: right_size,
        });
    }

    let keys: BTreeSet<&String> = left.headers.keys().chain(right.headers.keys()).collect();
    let mut header_entries = 0;
    for key in keys {
        if header_entries == HEADER_ENTRY_CAP {
            break;
        }
        let entry = match (left.headers.get(key), right.headers.get(key)) {
            (None, Some(value)) => Change::HeaderAdded {
                name: key.clone(),
                value: value.clone(),
            },
            (Some(value), None) => Change::HeaderRemoved {
                name: key.clone(),
                value: value.clone(),
            },
            (Some(from), Some(to)) if from != to => Change::HeaderChanged {
                name: key.clone(),
                from: from.clone(),
                to: to.clone(),
            },
            _ => continue,
        };
        changes.push(entry);
        header_entries += 1;
    }

    let core_equal = left.method == right.method
        && left_path == right_path
        && left.size == right.size
        && left.body == right.body;

    DiffReport { changes, core_equal }
}

#[cfg(test)]
#[path = "tests/diff_tests.rs"]
mod tests;
