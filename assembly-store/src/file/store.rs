use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use assembly_core::ApiSpec;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::store::{SpecStore, StoreError};

/// One JSON document per service id at `<dir>/<service_id>.json`.
#[derive(Debug, Clone)]
pub struct FileSpecStore {
    dir: PathBuf,
}

impl FileSpecStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, service_id: &str) -> PathBuf {
        self.dir.join(format!("{service_id}.json"))
    }
}

#[async_trait]
impl SpecStore for FileSpecStore {
    async fn get(&self, service_id: &str) -> Option<ApiSpec> {
        let path = self.entry_path(service_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(service_id, path = %path.display(), error = %e, "failed to read cached spec, re-downloading");
                return None;
            }
        };

        match serde_json::from_slice::<ApiSpec>(&bytes) {
            Ok(spec) => {
                debug!(service_id, "loaded spec from cache");
                Some(spec)
            }
            Err(e) => {
                warn!(service_id, error = %e, "failed to decode cached spec, re-downloading");
                None
            }
        }
    }

    async fn put(&self, spec: &ApiSpec) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let body = serde_json::to_vec_pretty(spec).map_err(|source| StoreError::Encode {
            service_id: spec.service_id.clone(),
            source,
        })?;
        let path = self.entry_path(&spec.service_id);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!(service_id = %spec.service_id, path = %path.display(), "cached spec");
        Ok(())
    }

    async fn invalidate(&self, service_id: &str) -> Result<(), StoreError> {
        let path = self.entry_path(service_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(service_id, "cleared cached spec");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}
