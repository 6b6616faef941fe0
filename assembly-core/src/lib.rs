#![forbid(unsafe_code)]

//! Specification model and grammar for the National Assembly open API.
//!
//! Every data service publishes its request shape as a spreadsheet. This crate turns the rows of
//! that sheet into an [`ApiSpec`], maps user-facing tokens onto service ids, and classifies the
//! result codes embedded in response envelopes. It performs no I/O; downloading and caching live
//! in `assembly-exec` and `assembly-store`.

pub mod envelope;
pub mod error;
pub mod parser;
pub mod services;
pub mod types;

pub use crate::envelope::{classify, ResultCode, Outcome};
pub use crate::error::{ApiError, ParseError, RegistryError, ResolutionError, Severity};
pub use crate::parser::{classify_row, find_endpoint_url, parse_rows, RowClass, Section};
pub use crate::services::{ServiceMap, ServiceResolver};
pub use crate::types::{ApiParameter, ApiSpec};
