//! Mapping a user-typed token to one captured request out of a snapshot.

use thiserror::Error;

use crate::model::{RequestRecord, short_id};

/// How many records an interactive picker should offer.
pub const PICKER_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum RefError {
    /// Soft: nothing matched. Callers may print a gentle hint instead of
    /// failing hard (an empty bin is not an error).
    #[error("no request matching `{0}`")]
    NotFound(String),

    /// Hard: several records share the prefix; never silently pick one.
    #[error("`{0}` matches more than one request (pass a longer prefix)")]
    Ambiguous(String),

    /// Hard: no token given in a non-interactive context.
    #[error("no request specified (pass an index like `1` or a request id)")]
    MissingRef,
}

/// Resolve `token` against a newest-first snapshot. Digits are a 1-based
/// index; anything else matches on full id, id prefix, or the canonical
/// short form.
pub fn resolve<'a>(
    token: Option<&str>,
    snapshot: &'a [RequestRecord],
) -> Result<&'a RequestRecord, RefError> {
    let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => return Err(RefError::MissingRef),
    };

    if token.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = token
            .parse()
            .map_err(|_| RefError::NotFound(token.to_string()))?;
        return index
            .checked_sub(1)
            .and_then(|i| snapshot.get(i))
            .ok_or_else(|| RefError::NotFound(token.to_string()));
    }

    let matches: Vec<&RequestRecord> = snapshot
        .iter()
        .filter(|record| {
            record.id == token || record.id.starts_with(token) || short_id(&record.id) == token
        })
        .collect();

    match matches.as_slice() {
        [] => Err(RefError::NotFound(token.to_string())),
        [only] => Ok(only),
        _ => Err(RefError::Ambiguous(token.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/refs_tests.rs"]
mod tests;
