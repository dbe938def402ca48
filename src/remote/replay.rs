use super::*;
use crate::model::RequestRecord;

/// Headers describing the original hop rather than the payload; re-sending
/// them confuses the target.
const SKIP_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "connection",
    "accept-encoding",
    "transfer-encoding",
];

#[derive(Debug)]
pub struct ReplayOutcome {
    pub status: u16,
    pub body_preview: String,
}

impl RemoteClient {
    /// Re-send a captured request against `target_base`: same method, path,
    /// query, payload headers and body.
    pub fn replay(&self, record: &RequestRecord, target_base: &str) -> ApiResult<ReplayOutcome> {
        let method = reqwest::Method::from_bytes(record.method.as_bytes())
            .map_err(|_| ApiError::Other(anyhow::anyhow!("invalid method {:?}", record.method)))?;
        let path = if record.path.is_empty() {
            "/"
        } else {
            record.path.as_str()
        };
        let url = format!("{}{}", target_base.trim_end_matches('/'), path);

        let mut req = self.client.request(method, url);
        if let Some(query) = &record.query {
            let pairs: Vec<(&str, &str)> = query
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            req = req.query(&pairs);
        }
        for (name, value) in &record.headers {
            let lower = name.to_ascii_lowercase();
            if SKIP_HEADERS.contains(&lower.as_str()) {
                continue;
            }
            req = req.header(name, value);
        }
        if let Some(body) = &record.body {
            req = req.body(body.clone());
        }

        let resp = req.send().context("replay request")?;
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        Ok(ReplayOutcome {
            status,
            body_preview: body.chars().take(200).collect(),
        })
    }
}
