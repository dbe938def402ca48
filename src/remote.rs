use anyhow::{Context, Result};

mod http_client;
use self::http_client::with_retries;

mod types;
pub use self::types::*;
mod operations;
mod replay;
pub use self::replay::ReplayOutcome;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The bin (or whatever was addressed) does not exist on the backend.
    #[error("not found")]
    NotFound,

    /// Distinct from NotFound: the fix is to authenticate, not to retry.
    #[error("authentication required (run `binspect login --api-key ...`)")]
    AuthRequired,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct RemoteClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("binspect")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
