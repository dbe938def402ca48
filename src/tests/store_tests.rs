use super::*;

#[test]
fn missing_file_reads_as_the_default_document() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ContextStore::at(tmp.path().join("config.json"));

    let doc = store.read().unwrap();
    assert_eq!(doc.base_url, crate::model::DEFAULT_BASE_URL);
    assert!(doc.active_bins_by_workspace.is_empty());
}

#[test]
fn write_then_read_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ContextStore::at(tmp.path().join("nested").join("config.json"));

    let mut doc = ContextDoc::default();
    doc.api_key = Some("secret".to_string());
    crate::context::set_active_bin(&mut doc, "/ws", "bin-1", false);
    crate::context::push_recent(&mut doc, "/ws", "bin-1", false);
    store.write(&doc).unwrap();

    let read = store.read().unwrap();
    assert_eq!(read.api_key.as_deref(), Some("secret"));
    assert_eq!(
        read.active_bins_by_workspace.get("/ws").map(String::as_str),
        Some("bin-1")
    );
    assert_eq!(read.recent_bins_by_workspace["/ws"], vec!["bin-1"]);
}

#[test]
fn persisted_keys_are_camel_case() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ContextStore::at(tmp.path().join("config.json"));

    let mut doc = ContextDoc::default();
    doc.global_active_bin_id = Some("g".to_string());
    store.write(&doc).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"baseUrl\""));
    assert!(raw.contains("\"globalActiveBinId\""));
    assert!(raw.contains("\"activeBinsByWorkspace\""));
}

#[test]
fn scheme_less_urls_get_http_prefixed() {
    assert_eq!(ensure_scheme("localhost:8787"), "http://localhost:8787");
    assert_eq!(ensure_scheme("https://bins.example.com"), "https://bins.example.com");
    assert_eq!(ensure_scheme("http://x/"), "http://x");
}
