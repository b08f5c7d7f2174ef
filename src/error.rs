//! Error types for configuration loading.
//!
//! The simulation itself never fails; anomalies there are absorbed locally.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::SurfaceConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for a surface config.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value that cannot be silently corrected.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
