//! Response envelope inspection.
//!
//! JSON responses are wrapped as
//! `{ <key>: [ { "head": [ ..., { "RESULT": { "CODE", "MESSAGE" } } ] }, { "row": [...] } ] }`
//! where `<key>` is normally the endpoint name.

use serde_json::Value;
use tracing::info;

use crate::error::{ApiError, Severity};

pub const SUCCESS_CODE: &str = "INFO-000";
pub const NO_DATA_CODE: &str = "INFO-200";
/// Informational codes that still mean the request produced nothing usable.
pub const BENIGN_CODES: [&str; 3] = ["INFO-290", "INFO-300", "INFO-337"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCode {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `INFO-200`: the query matched no rows.
    Empty,
    /// No `RESULT` object was found, so nothing was classified.
    Unclassified,
}

/// Classifies the result code of `body[key]`.
///
/// Benign and fatal codes come back as [`ApiError`]; an absent envelope is not an error.
pub fn classify(body: &Value, key: &str) -> Result<Outcome, ApiError> {
    let Some(result) = find_result(body, key) else {
        return Ok(Outcome::Unclassified);
    };

    let ResultCode { code, message } = result;
    match code.as_str() {
        SUCCESS_CODE => Ok(Outcome::Success),
        NO_DATA_CODE => {
            info!(code = %code, message = %message, "api returned no data");
            Ok(Outcome::Empty)
        }
        c if BENIGN_CODES.contains(&c) => {
            info!(code = %code, message = %message, "api signalled informational result");
            Err(ApiError::new(code.clone(), message, Severity::Benign))
        }
        _ => Err(ApiError::new(code.clone(), message, Severity::Fatal)),
    }
}

/// First `RESULT` object in the first section that carries a `head` list.
pub fn find_result(body: &Value, key: &str) -> Option<ResultCode> {
    let head = sections(body, key)?
        .iter()
        .find_map(|section| section.get("head").and_then(Value::as_array))?;
    let result = head.iter().find_map(|entry| entry.get("RESULT"))?;

    Some(ResultCode {
        code: string_field(result, "CODE"),
        message: string_field(result, "MESSAGE"),
    })
}

/// Data rows of the envelope.
///
/// When `key` is absent, the first top-level entry shaped like an envelope with rows is used.
pub fn rows<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    let from_key = sections(body, key).and_then(|s| rows_in(s));
    let found = from_key.or_else(|| {
        body.as_object()?
            .values()
            .filter_map(Value::as_array)
            .find_map(|s| rows_in(s))
    });
    found.map(Vec::as_slice).unwrap_or(&[])
}

/// `list_total_count` from the envelope head, when present.
pub fn total_count(body: &Value, key: &str) -> Option<u64> {
    sections(body, key)?
        .iter()
        .filter_map(|section| section.get("head").and_then(Value::as_array))
        .flatten()
        .find_map(|entry| entry.get("list_total_count").and_then(Value::as_u64))
}

fn sections<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    body.get(key).and_then(Value::as_array)
}

fn rows_in(sections: &[Value]) -> Option<&Vec<Value>> {
    sections
        .iter()
        .find_map(|section| section.get("row").and_then(Value::as_array))
}

fn string_field(obj: &Value, name: &str) -> String {
    match obj.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
