use super::*;

pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> ApiResult<T>) -> ApiResult<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<ApiError> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(value) => return Ok(value),
            // Definitive answers; retrying cannot change them.
            Err(err @ (ApiError::NotFound | ApiError::AuthRequired)) => return Err(err),
            Err(err) => {
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(match last {
        Some(ApiError::Other(err)) => ApiError::Other(err.context(label.to_string())),
        Some(err) => err,
        None => ApiError::Other(anyhow::anyhow!("unknown error").context(label.to_string())),
    })
}

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::blocking::RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(key) = &self.api_key {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key));
        }
        req
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> ApiResult<reqwest::blocking::Response> {
        match resp.status() {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(ApiError::AuthRequired)
            }
            reqwest::StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => resp
                .error_for_status()
                .with_context(|| format!("{} status", label))
                .map_err(ApiError::Other),
        }
    }
}
