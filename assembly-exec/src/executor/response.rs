use assembly_core::envelope;
use serde_json::Value;

use crate::error::{AssemblyError, TransportError};
use crate::http::HttpResponseParts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    /// XML bodies are returned unparsed and unclassified.
    Xml(String),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(v) => Some(v),
            ApiResponse::Xml(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Json(v) => Some(v),
            ApiResponse::Xml(_) => None,
        }
    }

    pub fn as_xml(&self) -> Option<&str> {
        match self {
            ApiResponse::Xml(s) => Some(s),
            ApiResponse::Json(_) => None,
        }
    }
}

/// Decodes a successful response and, for JSON, classifies its result code.
///
/// The envelope is keyed by the endpoint name; the service id is tried when the endpoint key is
/// absent.
pub fn decode(
    resp: HttpResponseParts,
    format: ResponseFormat,
    endpoint: &str,
    service_id: &str,
) -> Result<ApiResponse, AssemblyError> {
    match format {
        ResponseFormat::Xml => Ok(ApiResponse::Xml(
            String::from_utf8_lossy(&resp.body).into_owned(),
        )),
        ResponseFormat::Json => {
            let body: Value =
                serde_json::from_slice(&resp.body).map_err(|e| TransportError::Decode {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                })?;
            let key = if body.get(endpoint).is_some() {
                endpoint
            } else {
                service_id
            };
            envelope::classify(&body, key)?;
            Ok(ApiResponse::Json(body))
        }
    }
}
