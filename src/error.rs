use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::drive::DriveError;

/// The primary error type for the application.
///
/// Everything in here is a structural failure: it aborts the run. Per-file
/// download failures never become an `AppError`, they are reported by the
/// mirror and the traversal moves on.
#[derive(Debug, Error)]
pub enum AppError {
    /// A local directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that was being created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The remote listing of a folder failed.
    #[error("Failed to list remote folder '{folder_id}': {source}")]
    Listing {
        /// The remote folder id that was being listed.
        folder_id: String,
        #[source]
        source: DriveError,
    },
    /// For when a specific setting fails validation.
    #[error("Validation error on field '{field}': {message}")]
    ValidationError {
        /// The name of the field that failed validation.
        field: String,
        /// A message describing the validation error.
        message: String,
    },
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Helpers for validating user supplied settings.
pub mod validation {
    use super::*;

    /// Validates a destination path.
    ///
    /// This function checks if a path is empty or contains null characters.
    pub fn validate_path(path: &str) -> AppResult<()> {
        if path.trim().is_empty() {
            return Err(AppError::ValidationError {
                field: "dest".to_string(),
                message: "Path cannot be empty".to_string(),
            });
        }

        if path.contains('\0') {
            return Err(AppError::ValidationError {
                field: "dest".to_string(),
                message: "Path contains null characters".to_string(),
            });
        }

        Ok(())
    }

    /// Validates that a required string setting is present and not blank.
    pub fn require_non_blank(value: Option<&str>, field: &str) -> AppResult<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(AppError::ValidationError {
                field: field.to_string(),
                message: "Value must be set".to_string(),
            }),
        }
    }
}
