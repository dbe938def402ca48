use std::thread;
use std::time::Duration;

use binspect::remote::RemoteClient;
use binspect::tail::{TailState, parse_look_back};

mod common;

fn tick(client: &RemoteClient, bin_id: &str, state: &mut TailState) -> Vec<(u64, String)> {
    let batch = client.get_requests(bin_id, Some(state.watermark())).unwrap();
    state
        .ingest(batch)
        .into_iter()
        .map(|(index, record)| (index, record.path))
        .collect()
}

#[test]
fn look_back_replays_history_exactly_once_in_ascending_order() {
    let server = common::spawn_server().unwrap();
    let client =
        RemoteClient::new(server.base_url.clone(), Some(server.api_key.clone())).unwrap();
    let bin = client.create_bin(Some("tailed")).unwrap();

    for path in ["/one", "/two", "/three"] {
        common::capture(&server, &bin.public_id, path, "").unwrap();
        thread::sleep(Duration::from_millis(5));
    }

    let mut state = TailState::new(binspect::tail::now_ms(), parse_look_back("5m"));
    let emitted = tick(&client, &bin.id, &mut state);
    assert_eq!(
        emitted,
        vec![
            (1, "/one".to_string()),
            (2, "/two".to_string()),
            (3, "/three".to_string()),
        ]
    );

    // Nothing new: the advanced watermark filters everything out, and the
    // seen-set suppresses any boundary re-delivery.
    assert!(tick(&client, &bin.id, &mut state).is_empty());
}

#[test]
fn new_arrivals_continue_the_display_numbering() {
    let server = common::spawn_server().unwrap();
    let client =
        RemoteClient::new(server.base_url.clone(), Some(server.api_key.clone())).unwrap();
    let bin = client.create_bin(Some("live")).unwrap();

    common::capture(&server, &bin.public_id, "/a", "").unwrap();
    let mut state = TailState::new(binspect::tail::now_ms(), parse_look_back("1h"));
    assert_eq!(tick(&client, &bin.id, &mut state).len(), 1);

    common::capture(&server, &bin.public_id, "/b", "").unwrap();
    common::capture(&server, &bin.public_id, "/c", "").unwrap();
    let emitted = tick(&client, &bin.id, &mut state);
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].0, 2);
    assert_eq!(emitted[1].0, 3);
}

#[test]
fn a_stale_fetch_window_is_deduplicated_by_the_seen_set() {
    let server = common::spawn_server().unwrap();
    let client =
        RemoteClient::new(server.base_url.clone(), Some(server.api_key.clone())).unwrap();
    let bin = client.create_bin(Some("dedup")).unwrap();

    common::capture(&server, &bin.public_id, "/only", "").unwrap();

    let start = binspect::tail::now_ms();
    let mut state = TailState::new(start, parse_look_back("1h"));
    assert_eq!(tick(&client, &bin.id, &mut state).len(), 1);

    // Re-fetch with the original pre-ingest window: the backend re-returns
    // the record, ingest must drop it.
    let stale_batch = client
        .get_requests(&bin.id, Some(start - 3_600_000))
        .unwrap();
    assert_eq!(stale_batch.len(), 1);
    assert!(state.ingest(stale_batch).is_empty());
}

#[test]
fn without_look_back_only_future_arrivals_are_streamed() {
    let server = common::spawn_server().unwrap();
    let client =
        RemoteClient::new(server.base_url.clone(), Some(server.api_key.clone())).unwrap();
    let bin = client.create_bin(Some("fresh")).unwrap();

    common::capture(&server, &bin.public_id, "/old", "").unwrap();
    thread::sleep(Duration::from_millis(5));

    let mut state = TailState::new(binspect::tail::now_ms(), None);
    assert!(tick(&client, &bin.id, &mut state).is_empty());

    thread::sleep(Duration::from_millis(5));
    common::capture(&server, &bin.public_id, "/new", "").unwrap();
    let emitted = tick(&client, &bin.id, &mut state);
    assert_eq!(emitted, vec![(1, "/new".to_string())]);
}
