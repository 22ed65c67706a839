// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Missing required option: --{option}")]
    MissingRequiredOption { option: &'static str },

    #[error("Invalid solution name '{name}': {reason}")]
    InvalidSolutionName { name: String, reason: String },

    #[error("Invalid value '{value}' for --{option} (expected one of: {})", allowed.join(", "))]
    InvalidEnumValue {
        option: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Malformed template '{template}': {reason}")]
    MalformedTemplate {
        template: String,
        reason: String,
    },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    /// A (component kind, flags, version band, provider) tuple fell through
    /// the package matrix. Unreachable while the enums stay closed; kept so
    /// the resolver has an honest error path instead of a panic.
    #[error("Package matrix has no entry for component '{component}': {detail}")]
    PackageMatrixGap { component: String, detail: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredOption { option } => vec![
                format!("Pass --{} on the command line", option),
                "Example: strata --name Shop".into(),
            ],
            Self::InvalidSolutionName { reason, .. } => vec![
                format!("Name rejected: {}", reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: Shop, OrderService, my-api".into(),
            ],
            Self::InvalidEnumValue { option, allowed, .. } => vec![
                format!("Valid values for --{}:", option),
                allowed
                    .iter()
                    .map(|v| format!("  \u{2022} {v}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ],
            Self::MalformedTemplate { template, .. } => vec![
                format!("Built-in template '{}' failed to parse", template),
                "This is a packaging defect; please report it".into(),
            ],
            Self::PackageMatrixGap { .. } => vec![
                "The package lookup table is missing an entry".into(),
                "This is a bug; please report it with your exact flags".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredOption { .. }
            | Self::InvalidSolutionName { .. }
            | Self::InvalidEnumValue { .. } => ErrorCategory::Validation,
            Self::MalformedTemplate { .. }
            | Self::PackageMatrixGap { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
