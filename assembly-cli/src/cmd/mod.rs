pub mod cache;
pub mod config;
pub mod fixtures;
pub mod get;
pub mod resolve;
pub mod search;
pub mod spec;
