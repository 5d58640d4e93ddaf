//! genolr-common — Shared error type and scoring configuration used across all genolr crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::GenotypeConfig;
pub use error::{GenolrError, Result};
