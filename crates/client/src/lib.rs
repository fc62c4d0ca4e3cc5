// Upstream data access for the InkPilots API

pub mod inkpilots;

use async_trait::async_trait;
use inkpress_core::WorkspaceData;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use inkpilots::{ArticleQuery, InkPilotsClient};

/// Failure fetching data from the upstream API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 402: the workspace has used up its plan quota
    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("InkPilots API error: {status} {code} {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::QuotaExceeded { .. } => "quota_exceeded",
            FetchError::Api { .. } => "api_error",
            FetchError::Unknown(_) => "unknown",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Unknown(err.to_string())
    }
}

/// Anything that can produce the workspace payload
#[async_trait]
pub trait WorkspaceSource: Send + Sync {
    async fn fetch_workspace(&self) -> Result<WorkspaceData, FetchError>;
}

/// Fetch the workspace, logging any failure and treating it as absent.
///
/// This is the boundary past which upstream errors never propagate.
pub async fn load_workspace(source: &dyn WorkspaceSource) -> Option<WorkspaceData> {
    match source.fetch_workspace().await {
        Ok(data) => Some(data),
        Err(err) => {
            match &err {
                FetchError::QuotaExceeded { message } => {
                    tracing::error!(kind = err.kind(), "Quota exceeded: {}", message);
                }
                FetchError::Api {
                    status,
                    code,
                    message,
                } => {
                    tracing::error!(
                        kind = err.kind(),
                        status = *status,
                        code = %code,
                        "InkPilots API error: {}",
                        message
                    );
                }
                FetchError::Unknown(detail) => {
                    tracing::error!(kind = err.kind(), "Unknown error: {}", detail);
                }
            }
            None
        }
    }
}

/// Fixed result, for tests and offline rendering
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: Result<WorkspaceData, FetchError>,
}

impl StaticSource {
    pub fn new(data: WorkspaceData) -> Self {
        Self { result: Ok(data) }
    }

    pub fn failing(err: FetchError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl WorkspaceSource for StaticSource {
    async fn fetch_workspace(&self) -> Result<WorkspaceData, FetchError> {
        self.result.clone()
    }
}

/// Workspace snapshot stored as JSON on disk, re-read on every fetch so
/// edits show up in the preview server without a restart.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WorkspaceSource for SnapshotSource {
    async fn fetch_workspace(&self) -> Result<WorkspaceData, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            FetchError::Unknown(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            FetchError::Unknown(format!("Invalid snapshot {}: {}", self.path.display(), e))
        })
    }
}
