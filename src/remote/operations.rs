use super::*;
use crate::model::RequestRecord;

impl RemoteClient {
    pub fn create_bin(&self, name: Option<&str>) -> ApiResult<Bin> {
        with_retries("create bin", || {
            let resp = self
                .request(reqwest::Method::POST, "/bins")
                .json(&CreateBinRequest {
                    name: name.map(str::to_string),
                })
                .send()
                .context("create bin request")?;
            let resp = self.ensure_ok(resp, "create bin")?;
            resp.json().context("parse bin").map_err(ApiError::Other)
        })
    }

    /// Accepts a full id or an unambiguous prefix; NotFound otherwise.
    pub fn get_bin(&self, id_or_prefix: &str) -> ApiResult<Bin> {
        with_retries("get bin", || {
            let resp = self
                .request(reqwest::Method::GET, &format!("/bins/{}", id_or_prefix))
                .send()
                .context("get bin request")?;
            let resp = self.ensure_ok(resp, "get bin")?;
            resp.json().context("parse bin").map_err(ApiError::Other)
        })
    }

    pub fn list_bins(&self) -> ApiResult<Vec<Bin>> {
        with_retries("list bins", || {
            let resp = self
                .request(reqwest::Method::GET, "/bins")
                .send()
                .context("list bins request")?;
            let resp = self.ensure_ok(resp, "list bins")?;
            resp.json().context("parse bins").map_err(ApiError::Other)
        })
    }

    pub fn delete_bin(&self, id: &str) -> ApiResult<()> {
        with_retries("delete bin", || {
            let resp = self
                .request(reqwest::Method::DELETE, &format!("/bins/{}", id))
                .send()
                .context("delete bin request")?;
            self.ensure_ok(resp, "delete bin")?;
            Ok(())
        })
    }

    /// Single attempt by design: snapshot commands fail loudly and the tail
    /// loop owns its own failure policy.
    pub fn get_requests(
        &self,
        bin_id: &str,
        since_ms: Option<i64>,
    ) -> ApiResult<Vec<RequestRecord>> {
        let mut req = self.request(reqwest::Method::GET, &format!("/bins/{}/requests", bin_id));
        if let Some(since) = since_ms {
            req = req.query(&[("since", since.to_string())]);
        }
        let resp = req.send().context("get requests")?;
        let resp = self.ensure_ok(resp, "get requests")?;
        resp.json()
            .context("parse requests")
            .map_err(ApiError::Other)
    }

    pub fn get_export(&self, bin_id: &str, format: ExportFormat) -> ApiResult<String> {
        with_retries("export bin", || {
            let resp = self
                .request(reqwest::Method::GET, &format!("/bins/{}/export", bin_id))
                .query(&[("format", format.as_str())])
                .send()
                .context("export request")?;
            let resp = self.ensure_ok(resp, "export bin")?;
            resp.text()
                .context("read export payload")
                .map_err(ApiError::Other)
        })
    }

    pub fn whoami(&self) -> ApiResult<WhoAmI> {
        with_retries("whoami", || {
            let resp = self
                .request(reqwest::Method::GET, "/whoami")
                .send()
                .context("whoami request")?;
            let resp = self.ensure_ok(resp, "whoami")?;
            resp.json()
                .context("parse whoami")
                .map_err(ApiError::Other)
        })
    }
}
