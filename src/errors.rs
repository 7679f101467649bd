//! Error types for the two fallible surfaces of the engine: the decision
//! ledger and configuration loading.
//!
//! Threshold computation itself has no error type. Unknown inputs degrade to
//! fallback categories, and the arithmetic is total over the clamped range.
//!
//! # Example
//!
//! ```rust
//! use qualitybar::errors::ConfigError;
//!
//! let err = ConfigError::invalid("thresholds.base.security", "must be within [60, 100]");
//! assert!(err.to_string().contains("thresholds.base.security"));
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence faults raised while reading or writing the ledger file
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error on ledger {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Ledger {path} is not valid JSON: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock ledger {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LedgerError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }

    pub fn lock(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Lock {
            path: path.into(),
            source,
        }
    }

    /// True when the ledger file exists but its contents cannot be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

/// Configuration file faults
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
