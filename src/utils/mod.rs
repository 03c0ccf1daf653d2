//! Configuration utilities.

/// TOML configuration with environment-resolved credentials.
pub mod config;

pub use config::{ConfigError, IngestionPolicy, RagdocConfig};
