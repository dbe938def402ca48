//! Turning a possibly-overlapping, out-of-order backend feed into a
//! deduplicated, strictly-ordered stream of new requests.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use crate::model::RequestRecord;

/// Shortcut buffer cap ("latest"/"previous" lookups).
pub const BUFFER_CAP: usize = 10;

/// Fixed delay between polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1200);

pub fn now_ms() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Per-invocation tail state. A new `listen` run starts fresh; there is no
/// cross-invocation ordering guarantee.
pub struct TailState {
    watermark: i64,
    seen: HashSet<String>,
    display_index: u64,
    buffer: VecDeque<RequestRecord>,
}

impl TailState {
    pub fn new(now_ms: i64, look_back: Option<Duration>) -> Self {
        let back = look_back.map(|d| d.as_millis() as i64).unwrap_or(0);
        Self {
            watermark: now_ms - back,
            seen: HashSet::new(),
            display_index: 0,
            buffer: VecDeque::new(),
        }
    }

    /// Timestamp boundary for the next fetch. The backend filter is a
    /// superset: it may re-return boundary records already ingested.
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Fold one polled batch into the stream: sort ascending by timestamp,
    /// drop already-seen ids, number and buffer the rest, and advance the
    /// watermark past each emitted record. Returns the new records in
    /// display order with their display indexes.
    pub fn ingest(&mut self, mut batch: Vec<RequestRecord>) -> Vec<(u64, RequestRecord)> {
        batch.sort_by_key(|record| record.timestamp);
        let mut fresh = Vec::new();
        for record in batch {
            if !self.seen.insert(record.id.clone()) {
                continue;
            }
            self.display_index += 1;
            self.buffer.push_front(record.clone());
            self.buffer.truncate(BUFFER_CAP);
            // ts + 1: an equal-timestamp boundary record must not be
            // re-fetched on the next tick.
            self.watermark = self.watermark.max(record.timestamp + 1);
            fresh.push((self.display_index, record));
        }
        fresh
    }

    pub fn latest(&self) -> Option<&RequestRecord> {
        self.buffer.front()
    }

    pub fn previous(&self) -> Option<&RequestRecord> {
        self.buffer.get(1)
    }
}

/// Look-back grammar: `<integer>(ms|s|m|h)?`, case-insensitive, default
/// unit milliseconds. Anything else means no look-back.
pub fn parse_look_back(input: &str) -> Option<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);
    let value: u64 = digits.parse().ok()?;
    let millis = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" => value,
        "s" => value.checked_mul(1_000)?,
        "m" => value.checked_mul(60_000)?,
        "h" => value.checked_mul(3_600_000)?,
        _ => return None,
    };
    Some(Duration::from_millis(millis))
}

#[cfg(test)]
#[path = "tests/tail_tests.rs"]
mod tests;
