//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Reason a price schedule was refused by the overlap guard.
///
/// The `Display` text is the reason string reported to callers.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum DateOverlapError {
    /// The candidate's start date is covered by an existing range.
    #[error("starts inside an existing range")]
    StartsInsideExisting,

    /// The candidate's (exclusive) end date reaches into an existing range.
    #[error("partially overlaps with an existing range")]
    PartialOverlap,

    /// An open-ended candidate starts on or before an existing range.
    #[error("an open-ended range would overlap a later existing range")]
    OpenEndedSwallowsLater,

    /// A bounded candidate fully contains an existing range's start.
    #[error("encloses an existing range")]
    EnclosesExisting,
}

/// Domain-level error.
///
/// Deterministic failures of domain rules: bad input or a refused schedule.
/// Missing rows and uniqueness clashes are storage concerns (`StoreError`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A price schedule would overlap one of its siblings.
    #[error("date overlap: {0}")]
    DateOverlap(#[from] DateOverlapError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_reason_strings_are_stable() {
        assert_eq!(
            DateOverlapError::StartsInsideExisting.to_string(),
            "starts inside an existing range"
        );
        assert_eq!(
            DateOverlapError::PartialOverlap.to_string(),
            "partially overlaps with an existing range"
        );
        assert_eq!(
            DateOverlapError::OpenEndedSwallowsLater.to_string(),
            "an open-ended range would overlap a later existing range"
        );
    }

    #[test]
    fn helpers_build_input_errors() {
        assert_eq!(
            DomainError::validation("code cannot be empty").to_string(),
            "validation failed: code cannot be empty"
        );
        assert_eq!(
            DomainError::invalid_id("ProductId: x"),
            DomainError::InvalidId("ProductId: x".to_string())
        );
    }

    #[test]
    fn overlap_converts_into_domain_error() {
        let err: DomainError = DateOverlapError::PartialOverlap.into();
        assert_eq!(err, DomainError::DateOverlap(DateOverlapError::PartialOverlap));
        assert_eq!(
            err.to_string(),
            "date overlap: partially overlaps with an existing range"
        );
    }
}
