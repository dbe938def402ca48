use super::*;

use std::collections::BTreeMap;

fn record(id: &str, timestamp: i64) -> RequestRecord {
    RequestRecord {
        id: id.to_string(),
        method: "POST".to_string(),
        path: "/hook".to_string(),
        headers: BTreeMap::new(),
        query: None,
        body: None,
        content_type: None,
        ip: None,
        timestamp,
        size: 0,
    }
}

#[test]
fn look_back_shifts_the_initial_watermark() {
    let state = TailState::new(10_000, None);
    assert_eq!(state.watermark(), 10_000);

    let state = TailState::new(10_000, parse_look_back("5s"));
    assert_eq!(state.watermark(), 5_000);
}

#[test]
fn out_of_order_batch_is_emitted_ascending_by_timestamp() {
    let mut state = TailState::new(0, None);
    let emitted = state.ingest(vec![record("c", 300), record("a", 100), record("b", 200)]);

    let order: Vec<(u64, i64)> = emitted.iter().map(|(i, r)| (*i, r.timestamp)).collect();
    assert_eq!(order, vec![(1, 100), (2, 200), (3, 300)]);
    assert_eq!(state.watermark(), 301);
}

#[test]
fn boundary_redelivery_is_rendered_exactly_once() {
    let mut state = TailState::new(0, None);
    let first = state.ingest(vec![record("a", 100), record("b", 150)]);
    assert_eq!(first.len(), 2);

    // The backend filter is >= watermark, so tick 2 re-returns record "b".
    let second = state.ingest(vec![record("b", 150), record("c", 151)]);
    let ids: Vec<&str> = second.iter().map(|(_, r)| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c"]);
    // Indexes keep counting across ticks.
    assert_eq!(second[0].0, 3);
}

#[test]
fn failed_tick_leaves_state_untouched() {
    let mut state = TailState::new(500, None);
    state.ingest(vec![record("a", 600)]);
    let watermark = state.watermark();

    // A fetch failure never reaches ingest; nothing moved, and the next
    // tick picks up where this one left off.
    assert_eq!(state.watermark(), watermark);
    let next = state.ingest(vec![record("a", 600), record("b", 700)]);
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].1.id, "b");
}

#[test]
fn buffer_serves_latest_and_previous() {
    let mut state = TailState::new(0, None);
    assert!(state.latest().is_none());
    assert!(state.previous().is_none());

    state.ingest(vec![record("a", 100)]);
    assert_eq!(state.latest().map(|r| r.id.as_str()), Some("a"));
    assert!(state.previous().is_none());

    state.ingest(vec![record("b", 200)]);
    assert_eq!(state.latest().map(|r| r.id.as_str()), Some("b"));
    assert_eq!(state.previous().map(|r| r.id.as_str()), Some("a"));
}

#[test]
fn buffer_is_capped_and_evicts_oldest() {
    let mut state = TailState::new(0, None);
    let batch: Vec<RequestRecord> = (0..12)
        .map(|i| record(&format!("r{}", i), 100 + i as i64))
        .collect();
    state.ingest(batch);

    assert_eq!(state.latest().map(|r| r.id.as_str()), Some("r11"));
    assert_eq!(state.previous().map(|r| r.id.as_str()), Some("r10"));
}

#[test]
fn look_back_grammar() {
    use std::time::Duration;

    assert_eq!(parse_look_back("250"), Some(Duration::from_millis(250)));
    assert_eq!(parse_look_back("250ms"), Some(Duration::from_millis(250)));
    assert_eq!(parse_look_back("5s"), Some(Duration::from_secs(5)));
    assert_eq!(parse_look_back("5m"), Some(Duration::from_secs(300)));
    assert_eq!(parse_look_back("2h"), Some(Duration::from_secs(7200)));
    // Case-insensitive units.
    assert_eq!(parse_look_back("2H"), Some(Duration::from_secs(7200)));
    assert_eq!(parse_look_back("10MS"), Some(Duration::from_millis(10)));

    // Invalid syntax means no look-back, not an error.
    assert_eq!(parse_look_back(""), None);
    assert_eq!(parse_look_back("ms"), None);
    assert_eq!(parse_look_back("10x"), None);
    assert_eq!(parse_look_back("ten"), None);
    assert_eq!(parse_look_back("-5s"), None);
}
