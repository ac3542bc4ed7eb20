//! Snapshot retrieval over HTTP.
//!
//! The data file sits behind an aggressively-caching static host, so
//! every GET carries a fresh `t=` query parameter. Transport and parse
//! failures stay distinct kinds; the refresh loop logs and counts them
//! differently.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::logging;
use crate::model::BudgetSnapshot;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport: {detail}")]
    Transport { detail: String },
    #[error("parse: {detail}")]
    Parse { detail: String },
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Parse { .. } => "parse",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            FetchError::Transport { detail } => detail,
            FetchError::Parse { detail } => detail,
        }
    }
}

/// One successful retrieval: the parsed document plus the raw payload
/// hash used for change detection.
pub struct FetchedSnapshot {
    pub snapshot: BudgetSnapshot,
    pub body_hash: String,
    pub bytes: usize,
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedSnapshot, FetchError>;
    fn describe(&self) -> String;
}

pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(data_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let base = Url::parse(data_url).map_err(|e| FetchError::Transport {
            detail: format!("invalid url {}: {}", data_url, e),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport {
                detail: format!("client build: {}", e),
            })?;
        Ok(Self { client, base })
    }

    fn busted_url(&self) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("t", &logging::ts_epoch_ms().to_string());
        url
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<FetchedSnapshot, FetchError> {
        let url = self.busted_url();
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                detail: format!("GET {}: {}", url, e),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                detail: format!("GET {}: status {}", url, status),
            });
        }

        let body = resp.bytes().await.map_err(|e| FetchError::Transport {
            detail: format!("read body: {}", e),
        })?;

        let snapshot: BudgetSnapshot =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse {
                detail: format!("invalid snapshot json: {}", e),
            })?;

        Ok(FetchedSnapshot {
            snapshot,
            body_hash: logging::data_hash(&body),
            bytes: body.len(),
        })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Parse a snapshot read from somewhere other than HTTP (local file,
/// stdin). Shares the error vocabulary with the live path.
pub fn parse_snapshot_bytes(body: &[u8]) -> Result<FetchedSnapshot, FetchError> {
    let snapshot: BudgetSnapshot =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse {
            detail: format!("invalid snapshot json: {}", e),
        })?;
    Ok(FetchedSnapshot {
        snapshot,
        body_hash: logging::data_hash(body),
        bytes: body.len(),
    })
}
