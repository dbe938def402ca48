use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};

use binspect::model::RequestRecord;

use super::state::*;

pub(crate) async fn capture_root(
    State(state): State<SharedState>,
    Path(public_id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    capture(state, public_id, "/".to_string(), query, addr, method, headers, body).await
}

pub(crate) async fn capture_path(
    State(state): State<SharedState>,
    Path((public_id, path)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    let path = format!("/{}", path.trim_start_matches('/'));
    capture(state, public_id, path, query, addr, method, headers, body).await
}

#[allow(clippy::too_many_arguments)]
async fn capture(
    state: SharedState,
    public_id: String,
    path: String,
    query: BTreeMap<String, String>,
    addr: SocketAddr,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    let header_map: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let content_type = header_map.get("content-type").cloned();

    let record = RequestRecord {
        id: new_id(),
        method: method.as_str().to_string(),
        path,
        headers: header_map,
        query: if query.is_empty() { None } else { Some(query) },
        body: if body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&body).into_owned())
        },
        content_type,
        ip: Some(addr.ip().to_string()),
        timestamp: now_ms(),
        size: body.len() as u64,
    };

    let mut bins = state.bins.write().await;
    let entry = bins
        .values_mut()
        .find(|entry| entry.bin.public_id == public_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    entry.requests.push(record);
    Ok("ok")
}
