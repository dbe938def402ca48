/// Length of the human-typeable short form of a request or bin id.
pub const SHORT_ID_LEN: usize = 8;

/// Canonical short form of a full id: a fixed-length prefix.
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}
