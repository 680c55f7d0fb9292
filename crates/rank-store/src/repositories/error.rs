//! Error handling utilities for repositories

use std::path::Path;

use rank_core::error::DomainError;

/// Convert an I/O error to DomainError, keeping the path
pub fn map_io_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::StorageError(format!("{}: {e}", path.display()))
}

/// Convert a JSON error to DomainError, keeping the path
pub fn map_json_error(path: &Path, e: serde_json::Error) -> DomainError {
    DomainError::SerializationError(format!("{}: {e}", path.display()))
}

/// Create a "corpus not found" error
pub fn corpus_not_found(community_id: &str) -> DomainError {
    DomainError::CorpusNotFound(community_id.to_string())
}
