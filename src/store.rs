use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::ContextDoc;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "BINSPECT_CONFIG";
/// Overrides the stored backend base URL.
pub const URL_ENV: &str = "BINSPECT_URL";

/// Persisted client context: one pretty-printed JSON document, written
/// atomically. Not safe for concurrent mutation from multiple processes;
/// last writer wins.
#[derive(Clone)]
pub struct ContextStore {
    path: PathBuf,
}

impl ContextStore {
    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Ok(Self { path: PathBuf::from(path) });
            }
        }
        let base = dirs::config_dir().context("locate user config directory")?;
        Ok(Self {
            path: base.join("binspect").join("config.json"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as the empty default document.
    pub fn read(&self) -> Result<ContextDoc> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ContextDoc::default()),
            Err(err) => {
                Err(err).with_context(|| format!("read {}", self.path.display()))
            }
        }
    }

    pub fn write(&self, doc: &ContextDoc) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(doc).context("serialize context")?;
        write_atomic(&self.path, &bytes)
    }
}

/// Effective backend base URL: the environment override wins over the stored
/// value; a scheme-less value gets `http://` prefixed.
pub fn base_url(doc: &ContextDoc) -> String {
    let raw = std::env::var(URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| doc.base_url.clone());
    ensure_scheme(raw.trim())
}

fn ensure_scheme(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
