#![forbid(unsafe_code)]

//! Runtime for the National Assembly open API client.
//!
//! Endpoints are not fixed: each service publishes a specification workbook, and the live path
//! is read from it on first use. [`AssemblyClient`] ties together token resolution, the
//! specification cache, HTTP dispatch with retries, and result-code classification.

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod retry;
pub mod spec;

pub use crate::config::{default_cache_dir, ApiKey, ClientConfig};
pub use crate::error::{AssemblyError, DownloadError, ErrorKind, TransportError};
pub use crate::executor::{ApiResponse, AssemblyClient, ResponseFormat};
pub use crate::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use crate::spec::{DocumentSpecFetcher, SpecDocumentDownloader, SpecFetcher, SpecResolver};
