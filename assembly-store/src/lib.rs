#![forbid(unsafe_code)]

pub mod file;
pub mod store;

pub use crate::file::FileSpecStore;
pub use crate::store::{SpecStore, StoreError};
