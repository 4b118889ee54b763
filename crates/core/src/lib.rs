//! Shared primitives for all Rust crates in Roster.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Roster crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Malformed argument or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation is not valid for the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Supervisor referenced by an assignment does not exist.
    #[error("invalid supervisor: {0}")]
    InvalidSupervisor(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Subordinate call did not complete in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Subordinate call or workflow was cancelled.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// Storage adapter failed to persist or read a record.
    #[error("repository error: {0}")]
    Repository(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),

    /// A workflow that required full success finished with failures.
    #[error("role assignment incomplete: {}", .0.join("; "))]
    IncompleteAssignment(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_keeps_original_value() {
        let value = NonEmptyString::new(" it-dept ");
        assert!(value.is_ok());
        assert_eq!(value.unwrap_or_else(|_| unreachable!()).as_str(), " it-dept ");
    }

    #[test]
    fn incomplete_assignment_lists_every_message() {
        let error = AppError::IncompleteAssignment(vec![
            "first failed".to_owned(),
            "second failed".to_owned(),
        ]);

        assert_eq!(
            error.to_string(),
            "role assignment incomplete: first failed; second failed"
        );
    }
}
