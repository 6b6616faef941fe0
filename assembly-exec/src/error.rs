use std::time::Duration;

use assembly_core::{ApiError, ParseError, ResolutionError};
use assembly_store::StoreError;

use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to download spec for {service_id}: HTTP {status}")]
    Status { service_id: String, status: u16 },
    #[error("downloaded content too small: {size} bytes")]
    TooSmall { service_id: String, size: usize },
    #[error("downloaded content for {service_id} is not a valid specification container")]
    NotContainer { service_id: String },
    #[error("network error downloading spec for {service_id}: {source}")]
    Transport {
        service_id: String,
        #[source]
        source: HttpError,
    },
    #[error("invalid specification URL: {0}")]
    Url(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("invalid request URL: {0}")]
    Url(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Download,
    Parse,
    Resolution,
    Transport,
    Api,
    Cache,
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Cache(#[from] StoreError),
    #[error("call did not complete within {0:?}")]
    Timeout(Duration),
}

impl AssemblyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssemblyError::Download(_) => ErrorKind::Download,
            AssemblyError::Parse(_) => ErrorKind::Parse,
            AssemblyError::Resolution(_) => ErrorKind::Resolution,
            AssemblyError::Transport(_) => ErrorKind::Transport,
            AssemblyError::Api(_) => ErrorKind::Api,
            AssemblyError::Cache(_) => ErrorKind::Cache,
            AssemblyError::Timeout(_) => ErrorKind::Timeout,
        }
    }

    /// Upstream result code or HTTP status, when the failure carries one.
    pub fn code(&self) -> Option<String> {
        match self {
            AssemblyError::Api(e) => Some(e.code.clone()),
            AssemblyError::Resolution(_) => Some(ResolutionError::CODE.to_string()),
            AssemblyError::Transport(TransportError::Status { status, .. }) => {
                Some(status.to_string())
            }
            AssemblyError::Download(DownloadError::Status { status, .. }) => {
                Some(status.to_string())
            }
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AssemblyError::Api(e) => Some(e),
            _ => None,
        }
    }
}
