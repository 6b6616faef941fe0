use std::path::PathBuf;

use assembly_core::ApiSpec;
use async_trait::async_trait;

/// Persistent map of service id to parsed specification.
///
/// Entries never expire; an entry stays trusted until it is invalidated.
#[async_trait]
pub trait SpecStore: Send + Sync {
    /// Cached specification for `service_id`.
    ///
    /// Unreadable or undecodable entries are reported as a miss, never as an error, so the
    /// caller falls back to fetching a fresh document.
    async fn get(&self, service_id: &str) -> Option<ApiSpec>;

    /// Writes `spec` under its service id, replacing any previous entry.
    async fn put(&self, spec: &ApiSpec) -> Result<(), StoreError>;

    /// Removes the entry for `service_id`. Absent entries are not an error.
    async fn invalidate(&self, service_id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode specification for {service_id}: {source}")]
    Encode {
        service_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
