use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::error::DownloadError;
use crate::http::{HttpClient, HttpRequestParts};

/// Workbooks are ZIP containers: regular, empty, and spanned archive headers.
pub const CONTAINER_MAGIC: [&[u8]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];
/// Anything shorter is an error page, not a workbook.
pub const MIN_DOCUMENT_BYTES: usize = 100;

/// Fetches raw specification workbooks. Failures are returned as-is; retrying is up to the
/// caller.
pub struct SpecDocumentDownloader {
    http: Arc<dyn HttpClient>,
    spec_url: String,
    user_agent: String,
    timeout: Duration,
    max_response_bytes: usize,
}

impl SpecDocumentDownloader {
    pub fn new(
        http: Arc<dyn HttpClient>,
        spec_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Self {
        Self {
            http,
            spec_url: spec_url.into(),
            user_agent: user_agent.into(),
            timeout,
            max_response_bytes,
        }
    }

    pub fn document_url(&self, service_id: &str, revision: u32) -> Result<url::Url, DownloadError> {
        let mut url =
            url::Url::parse(&self.spec_url).map_err(|e| DownloadError::Url(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("infId", service_id)
            .append_pair("infSeq", &revision.to_string());
        Ok(url)
    }

    pub async fn download(&self, service_id: &str, revision: u32) -> Result<Vec<u8>, DownloadError> {
        let url = self.document_url(service_id, revision)?;
        let req = HttpRequestParts::get(url).header("User-Agent", self.user_agent.as_str());

        let resp = self
            .http
            .send(req, self.timeout, self.max_response_bytes)
            .await
            .map_err(|source| DownloadError::Transport {
                service_id: service_id.to_string(),
                source,
            })?;

        validate_document(service_id, resp.status, &resp.body)?;
        info!(service_id, size = resp.body.len(), "downloaded spec");
        Ok(resp.body)
    }
}

/// Checks, in order: success status, minimum size, container magic number.
pub fn validate_document(service_id: &str, status: u16, body: &[u8]) -> Result<(), DownloadError> {
    if !(200..300).contains(&status) {
        return Err(DownloadError::Status {
            service_id: service_id.to_string(),
            status,
        });
    }
    if body.len() < MIN_DOCUMENT_BYTES {
        return Err(DownloadError::TooSmall {
            service_id: service_id.to_string(),
            size: body.len(),
        });
    }
    if !CONTAINER_MAGIC.iter().any(|magic| body.starts_with(magic)) {
        return Err(DownloadError::NotContainer {
            service_id: service_id.to_string(),
        });
    }
    Ok(())
}
