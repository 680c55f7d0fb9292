//! Application error types
//!
//! Unified error handling for the binary edge.

use rank_core::DomainError;
use std::fmt;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Telemetry errors
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs and run summaries
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Telemetry(_) => "TELEMETRY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Process exit code (sysexits-style)
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_CONFIG
            Self::Config(_) => 78,
            // EX_IOERR
            Self::Io(_) => 74,
            // EX_DATAERR
            Self::Serialization(_) => 65,
            Self::Domain(e) => {
                if e.is_validation() {
                    78
                } else if e.is_not_found() {
                    66
                } else {
                    1
                }
            }
            // EX_SOFTWARE
            Self::Telemetry(_) | Self::Internal(_) => 70,
        }
    }

    /// Check if the error came from configuration
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Domain(e) => e.is_validation(),
            _ => false,
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(msg: impl fmt::Display) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
