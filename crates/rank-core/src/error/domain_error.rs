//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Corpus Errors
    // =========================================================================
    #[error("Malformed record {}: missing {field}", display_record_id(*.id))]
    MalformedRecord { id: Option<i64>, field: &'static str },

    #[error("Corpus not found for community {0}")]
    CorpusNotFound(String),

    #[error("Unknown corpus shape: {0}")]
    UnknownShape(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid weight {name}: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

fn display_record_id(id: Option<i64>) -> String {
    id.map_or_else(|| "<no id>".to_string(), |id| id.to_string())
}

impl DomainError {
    /// Create a malformed record error
    pub fn malformed(id: Option<i64>, field: &'static str) -> Self {
        Self::MalformedRecord { id, field }
    }

    /// Get an error code string for logs and reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::CorpusNotFound(_) => "CORPUS_NOT_FOUND",
            Self::UnknownShape(_) => "UNKNOWN_SHAPE",
            Self::InvalidWeight { .. } => "INVALID_WEIGHT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CorpusNotFound(_))
    }

    /// Check if this is a configuration/validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownShape(_) | Self::InvalidWeight { .. } | Self::ValidationError(_)
        )
    }

    /// Check if the record can be skipped without failing its community
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::CorpusNotFound("123".to_string());
        assert_eq!(err.code(), "CORPUS_NOT_FOUND");

        let err = DomainError::InvalidWeight {
            name: "reply_weight",
            value: -1.0,
        };
        assert_eq!(err.code(), "INVALID_WEIGHT");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::CorpusNotFound("1".to_string()).is_not_found());
        assert!(DomainError::UnknownShape("forum".to_string()).is_validation());
        assert!(DomainError::malformed(Some(5), "date").is_skippable());
        assert!(!DomainError::StorageError("disk".to_string()).is_skippable());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::malformed(Some(123), "date");
        assert_eq!(err.to_string(), "Malformed record 123: missing date");

        let err = DomainError::malformed(None, "id");
        assert_eq!(err.to_string(), "Malformed record <no id>: missing id");

        let err = DomainError::CorpusNotFound("42".to_string());
        assert_eq!(err.to_string(), "Corpus not found for community 42");
    }
}
