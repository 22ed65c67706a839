//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The external project tool is not installed or not on PATH.
    #[error("Required tool '{tool}' was not found")]
    PrerequisiteMissing { tool: &'static str },

    /// An external structural call (create, register, reference, package-add)
    /// failed. Fatal: the pipeline halts with whatever was created so far
    /// left on disk.
    #[error("Structural operation '{operation}' failed: {detail}")]
    StructuralOperationFailure { operation: String, detail: String },

    /// The user declined to continue into an existing target directory.
    #[error("Aborted: target {path} already exists")]
    OverwriteDeclined { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Adapter state lock error")]
    AdapterLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PrerequisiteMissing { tool } => vec![
                format!("Install the '{}' SDK and ensure it is on your PATH", tool),
                "See https://dotnet.microsoft.com/download".into(),
            ],
            Self::StructuralOperationFailure { operation, .. } => vec![
                format!("The external tool failed while running: {}", operation),
                "Components created before the failure were left in place".into(),
                "Fix the underlying tool error, remove the partial output, and re-run".into(),
            ],
            Self::OverwriteDeclined { path } => vec![
                format!("Nothing was modified under: {}", path.display()),
                "Choose a different --name or remove the existing directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::AdapterLockError => vec![
                "Internal adapter state was poisoned".into(),
                "This is a bug; please report it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PrerequisiteMissing { .. } => ErrorCategory::Configuration,
            Self::OverwriteDeclined { .. } => ErrorCategory::Aborted,
            Self::StructuralOperationFailure { .. }
            | Self::FilesystemError { .. }
            | Self::AdapterLockError => ErrorCategory::Internal,
        }
    }
}
