use std::sync::Arc;

use assembly_core::{parse_rows, ApiSpec, ParseError};
use async_trait::async_trait;

use crate::error::AssemblyError;
use crate::spec::download::SpecDocumentDownloader;
use crate::spec::workbook::read_rows;

/// Produces a freshly parsed specification for a service id, bypassing any cache.
#[async_trait]
pub trait SpecFetcher: Send + Sync {
    async fn fetch(&self, service_id: &str) -> Result<ApiSpec, AssemblyError>;
}

/// Downloads the published workbook and parses it.
pub struct DocumentSpecFetcher {
    downloader: Arc<SpecDocumentDownloader>,
    revision: u32,
}

impl DocumentSpecFetcher {
    pub fn new(downloader: Arc<SpecDocumentDownloader>, revision: u32) -> Self {
        Self {
            downloader,
            revision,
        }
    }
}

#[async_trait]
impl SpecFetcher for DocumentSpecFetcher {
    async fn fetch(&self, service_id: &str) -> Result<ApiSpec, AssemblyError> {
        let bytes = self.downloader.download(service_id, self.revision).await?;

        // Workbook decompression and XML parsing are CPU-bound.
        let id = service_id.to_string();
        let rows = tokio::task::spawn_blocking(move || read_rows(&id, &bytes))
            .await
            .map_err(|e| ParseError::workbook(service_id, e.to_string()))??;

        Ok(parse_rows(service_id, &rows)?)
    }
}
