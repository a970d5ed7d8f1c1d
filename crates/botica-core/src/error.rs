//! # Error Types
//!
//! Domain error types for botica-core.
//!
//! Validation errors are resolved locally and rendered inline by the UI
//! layer; they never reach the network. Composer errors reject phase
//! transitions and leave the draft untouched.

use thiserror::Error;

use crate::composer::Phase;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A validation failure located on a ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {index}: {error}")]
pub struct LineError {
    /// Zero-based position of the offending line.
    pub index: usize,
    pub error: ValidationError,
}

// =============================================================================
// Composer Error
// =============================================================================

/// Rejected composer transitions.
///
/// Every variant leaves the draft exactly as it was; the caller renders the
/// errors and the user edits in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    /// Submission requires at least one line in the ledger.
    #[error("the ledger must contain at least one line")]
    EmptyLedger,

    /// One or more lines failed per-line validation.
    #[error("{} line(s) failed validation", .0.len())]
    InvalidLines(Vec<LineError>),

    /// Counterparty fields failed validation.
    #[error("{} counterparty field(s) failed validation", .0.len())]
    InvalidCounterparty(Vec<ValidationError>),

    /// Purchases need a supplier before submission.
    #[error("a provider must be selected")]
    ProviderNotSelected,

    /// A submission is already in flight; the trigger stays disabled.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The requested action is not defined for the current phase.
    #[error("cannot {action} while in phase {phase:?}")]
    InvalidPhase { phase: Phase, action: &'static str },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "full_name".to_string(),
        };
        assert_eq!(err.to_string(), "full_name is required");

        let err = LineError {
            index: 2,
            error: ValidationError::MustBePositive {
                field: "unit_price".to_string(),
            },
        };
        assert_eq!(err.to_string(), "line 2: unit_price must be positive");
    }

    #[test]
    fn test_composer_error_counts_lines() {
        let err = ComposerError::InvalidLines(vec![
            LineError {
                index: 0,
                error: ValidationError::Required {
                    field: "product_id".to_string(),
                },
            },
            LineError {
                index: 1,
                error: ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                },
            },
        ]);
        assert_eq!(err.to_string(), "2 line(s) failed validation");
    }
}
