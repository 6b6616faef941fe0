use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("endpoint not found in specification for {service_id}")]
    EndpointNotFound { service_id: String },
    #[error("failed to read specification workbook for {service_id}: {message}")]
    Workbook { service_id: String, message: String },
}

impl ParseError {
    pub fn workbook(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            service_id: service_id.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not resolve service: {token}")]
pub struct ResolutionError {
    pub token: String,
}

impl ResolutionError {
    /// Upstream-style code reported for unresolvable identifiers.
    pub const CODE: &'static str = "INVALID_ID";

    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

/// How a non-success result code should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request was understood but the service signalled a condition (paging limits,
    /// missing parameters, throttling).
    Benign,
    Fatal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_benign(&self) -> bool {
        self.severity == Severity::Benign
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("service registry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service registry must be a JSON object of id to name")]
    NotAnObject,
    #[error("failed to read service registry {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
