//! Sheet grammar for specification documents.
//!
//! A specification sheet is read as plain rows of cell text. Two independent passes run over
//! the rows:
//!
//! - endpoint extraction: within the first [`ENDPOINT_SCAN_ROWS`] rows, the row after the
//!   "request address" marker holds the live URL;
//! - parameter extraction: a three-state machine ([`Section`]) collects parameter rows from the
//!   basic and request sections and stops at the output section.

mod endpoint;
mod rows;

pub use endpoint::{find_endpoint_url, ADDRESS_MARKER, ENDPOINT_SCAN_ROWS};
pub use rows::{classify_row, RowClass, Section, BASIC_MARKER, OUTPUT_MARKERS, REQUEST_MARKER};

use tracing::debug;

use crate::error::ParseError;
use crate::types::{ApiParameter, ApiSpec};

/// Parses a specification sheet into an [`ApiSpec`].
///
/// Fails with [`ParseError::EndpointNotFound`] when no endpoint URL can be located. Missing
/// parameter sections are not an error; the lists are simply empty.
pub fn parse_rows(service_id: &str, rows: &[Vec<String>]) -> Result<ApiSpec, ParseError> {
    let endpoint_url = find_endpoint_url(rows).ok_or_else(|| ParseError::EndpointNotFound {
        service_id: service_id.to_string(),
    })?;

    let mut basic_params = Vec::<ApiParameter>::new();
    let mut request_params = Vec::<ApiParameter>::new();
    let mut section = Section::Outside;

    for row in rows {
        match classify_row(row, section) {
            RowClass::Enter(next) => section = next,
            RowClass::Terminate => break,
            RowClass::Parameter(param) => match section {
                Section::Basic => basic_params.push(param),
                Section::Request => request_params.push(param),
                Section::Outside => {}
            },
            RowClass::Skip => {}
        }
    }

    let spec = ApiSpec::new(service_id, endpoint_url, basic_params, request_params);
    if spec.endpoint.is_empty() {
        return Err(ParseError::EndpointNotFound {
            service_id: service_id.to_string(),
        });
    }

    debug!(
        service_id,
        endpoint = %spec.endpoint,
        basic = spec.basic_params.len(),
        request = spec.request_params.len(),
        "parsed specification sheet"
    );
    Ok(spec)
}
