use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use binspect::model::RequestRecord;
use binspect::remote::{Bin, CreateBinRequest, WhoAmI};

use super::state::*;

pub(crate) async fn whoami() -> Json<WhoAmI> {
    Json(WhoAmI {
        email: Some("dev@localhost".to_string()),
        name: Some("dev".to_string()),
        plan: Some("local".to_string()),
    })
}

pub(crate) async fn create_bin(
    State(state): State<SharedState>,
    Json(req): Json<CreateBinRequest>,
) -> Json<Bin> {
    let id = new_id();
    let is_temporary = req.name.is_none();
    let name = req
        .name
        .unwrap_or_else(|| format!("bin-{}", &id[..6]));
    let bin = Bin {
        public_id: id[..12].to_string(),
        id: id.clone(),
        name,
        is_temporary,
        request_count: Some(0),
    };
    state.bins.write().await.insert(
        id,
        BinState {
            bin: bin.clone(),
            requests: Vec::new(),
        },
    );
    Json(bin)
}

pub(crate) async fn list_bins(State(state): State<SharedState>) -> Json<Vec<Bin>> {
    let bins = state.bins.read().await;
    let mut out: Vec<Bin> = bins
        .values()
        .map(|entry| {
            let mut bin = entry.bin.clone();
            bin.request_count = Some(entry.requests.len() as u64);
            bin
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Json(out)
}

/// Full id or an unambiguous prefix; anything else is NotFound.
fn find_bin_id(
    bins: &std::collections::HashMap<String, BinState>,
    id_or_prefix: &str,
) -> Option<String> {
    if bins.contains_key(id_or_prefix) {
        return Some(id_or_prefix.to_string());
    }
    let mut matches = bins.keys().filter(|id| id.starts_with(id_or_prefix));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.clone())
}

pub(crate) async fn get_bin(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Bin>, StatusCode> {
    let bins = state.bins.read().await;
    let id = find_bin_id(&bins, &id).ok_or(StatusCode::NOT_FOUND)?;
    let entry = bins.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let mut bin = entry.bin.clone();
    bin.request_count = Some(entry.requests.len() as u64);
    Ok(Json(bin))
}

pub(crate) async fn delete_bin(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut bins = state.bins.write().await;
    let resolved = find_bin_id(&bins, &id);
    match resolved {
        Some(key) => {
            bins.remove(&key);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

#[derive(Deserialize)]
pub(crate) struct RequestsQuery {
    since: Option<i64>,
}

pub(crate) async fn list_requests(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<RequestsQuery>,
) -> Result<Json<Vec<RequestRecord>>, StatusCode> {
    let bins = state.bins.read().await;
    let id = find_bin_id(&bins, &id).ok_or(StatusCode::NOT_FOUND)?;
    let entry = bins.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let mut records: Vec<RequestRecord> = entry
        .requests
        .iter()
        .filter(|record| query.since.map(|since| record.timestamp >= since).unwrap_or(true))
        .cloned()
        .collect();
    // Newest first; clients that need ascending order sort for themselves.
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(Json(records))
}

#[derive(Deserialize)]
pub(crate) struct ExportQuery {
    format: Option<String>,
}

pub(crate) async fn export_bin(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<String, StatusCode> {
    let bins = state.bins.read().await;
    let id = find_bin_id(&bins, &id).ok_or(StatusCode::NOT_FOUND)?;
    let entry = bins.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let mut records = entry.requests.clone();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    match query.format.as_deref().unwrap_or("json") {
        "json" => serde_json::to_string_pretty(&records)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR),
        "curl" => Ok(records.iter().map(as_curl).collect::<Vec<_>>().join("\n")),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

fn as_curl(record: &RequestRecord) -> String {
    let mut parts = vec![format!("curl -X {}", record.method)];
    for (name, value) in &record.headers {
        parts.push(format!("-H '{}: {}'", name, value));
    }
    if let Some(body) = &record.body {
        if !body.is_empty() {
            parts.push(format!("--data '{}'", body.replace('\'', "'\\''")));
        }
    }
    let path = if record.path.is_empty() {
        "/"
    } else {
        record.path.as_str()
    };
    parts.push(format!("'$TARGET{}'", path));
    parts.join(" ")
}
