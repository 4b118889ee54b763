//! Per-role outcomes and their aggregation for one workflow invocation.

use std::time::Duration;

use roster_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::identifiers::RoleId;
use crate::role::RoleType;

/// Classification of why a single role attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The user already holds the role.
    AlreadyExists,
    /// Input or supervisor validation failed.
    ValidationFailed,
    /// A repository could not persist the record.
    RepositoryError,
    /// The caller may not grant the role.
    Unauthorized,
    /// Timeout or cancellation of a subordinate call.
    TransientFailure,
    /// Anything not otherwise classified.
    Unknown,
}

impl FailureReason {
    /// Maps an error raised during an attempt to its failure reason.
    #[must_use]
    pub fn classify(error: &AppError) -> Self {
        match error {
            AppError::Validation(_) | AppError::InvalidState(_) | AppError::InvalidSupervisor(_) => {
                Self::ValidationFailed
            }
            AppError::Unauthorized(_) | AppError::Forbidden(_) => Self::Unauthorized,
            AppError::Timeout(_) | AppError::Cancelled(_) => Self::TransientFailure,
            AppError::Conflict(_) => Self::AlreadyExists,
            AppError::Repository(_) => Self::RepositoryError,
            AppError::NotFound(_) | AppError::Internal(_) | AppError::IncompleteAssignment(_) => {
                Self::Unknown
            }
        }
    }

    /// Returns whether an attempt failing for this reason may be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFailure)
    }

    /// Returns a stable storage value for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::ValidationFailed => "validation_failed",
            Self::RepositoryError => "repository_error",
            Self::Unauthorized => "unauthorized",
            Self::TransientFailure => "transient_failure",
            Self::Unknown => "unknown",
        }
    }
}

/// A role that was granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentSuccess {
    /// Identifier of the created role record.
    pub role_id: RoleId,
    /// Granted role type.
    pub role_type: RoleType,
    /// Duration of the successful attempt.
    pub duration: Duration,
}

/// A role that could not be granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentFailure {
    /// Role type that failed.
    pub role_type: RoleType,
    /// Error text of the last attempt.
    pub message: String,
    /// Failure classification.
    pub reason: FailureReason,
}

/// Overall status derived from a [`RoleAssignmentResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// At least one success and no failures.
    Succeeded,
    /// Both successes and failures.
    PartiallySucceeded,
    /// Failures only, or an empty catalog treated as failure.
    Failed,
    /// Cancelled or past the workflow deadline.
    Cancelled,
    /// No roles were defined and an empty catalog counts as success.
    Empty,
}

impl AssignmentStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::PartiallySucceeded => "partially_succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Empty => "empty",
        }
    }
}

/// Aggregated outcome of one standard-role assignment workflow.
///
/// Successes and failures keep processing order. A role type appears in at
/// most one of the two lists; [`Self::record_success`] and
/// [`Self::record_failure`] reject duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoleAssignmentResultRecord")]
pub struct RoleAssignmentResult {
    successes: Vec<RoleAssignmentSuccess>,
    failures: Vec<RoleAssignmentFailure>,
    cancellation: Option<String>,
    empty_catalog_failure: Option<String>,
}

/// Unvalidated wire form of [`RoleAssignmentResult`].
#[derive(Deserialize)]
struct RoleAssignmentResultRecord {
    #[serde(default)]
    successes: Vec<RoleAssignmentSuccess>,
    #[serde(default)]
    failures: Vec<RoleAssignmentFailure>,
    cancellation: Option<String>,
    empty_catalog_failure: Option<String>,
}

impl TryFrom<RoleAssignmentResultRecord> for RoleAssignmentResult {
    type Error = AppError;

    fn try_from(record: RoleAssignmentResultRecord) -> Result<Self, Self::Error> {
        let mut result = Self::new();
        for success in record.successes {
            result.record_success(success)?;
        }
        for failure in record.failures {
            result.record_failure(failure)?;
        }
        result.cancellation = record.cancellation;
        result.empty_catalog_failure = record.empty_catalog_failure;

        Ok(result)
    }
}

impl RoleAssignmentResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a granted role.
    pub fn record_success(&mut self, success: RoleAssignmentSuccess) -> AppResult<()> {
        self.ensure_unrecorded(success.role_type)?;
        self.successes.push(success);
        Ok(())
    }

    /// Appends a failed role.
    pub fn record_failure(&mut self, failure: RoleAssignmentFailure) -> AppResult<()> {
        self.ensure_unrecorded(failure.role_type)?;
        self.failures.push(failure);
        Ok(())
    }

    /// Marks the workflow as cancelled.
    pub fn mark_cancelled(&mut self, reason: impl Into<String>) {
        self.cancellation = Some(reason.into());
    }

    /// Marks an empty catalog as a failed outcome.
    pub fn mark_empty_catalog_failure(&mut self, message: impl Into<String>) {
        self.empty_catalog_failure = Some(message.into());
    }

    /// Returns granted roles in processing order.
    #[must_use]
    pub fn successes(&self) -> &[RoleAssignmentSuccess] {
        self.successes.as_slice()
    }

    /// Returns failed roles in processing order.
    #[must_use]
    pub fn failures(&self) -> &[RoleAssignmentFailure] {
        self.failures.as_slice()
    }

    /// Returns the cancellation reason, if the workflow was cancelled.
    #[must_use]
    pub fn cancellation(&self) -> Option<&str> {
        self.cancellation.as_deref()
    }

    /// Returns whether the role type was recorded in either list.
    #[must_use]
    pub fn contains_role(&self, role_type: RoleType) -> bool {
        self.successes
            .iter()
            .any(|success| success.role_type == role_type)
            || self
                .failures
                .iter()
                .any(|failure| failure.role_type == role_type)
    }

    /// Derives the overall status.
    #[must_use]
    pub fn status(&self) -> AssignmentStatus {
        if self.cancellation.is_some() {
            return AssignmentStatus::Cancelled;
        }

        match (self.successes.is_empty(), self.failures.is_empty()) {
            (false, true) => AssignmentStatus::Succeeded,
            (false, false) => AssignmentStatus::PartiallySucceeded,
            (true, false) => AssignmentStatus::Failed,
            (true, true) if self.empty_catalog_failure.is_some() => AssignmentStatus::Failed,
            (true, true) => AssignmentStatus::Empty,
        }
    }

    /// Returns whether every defined role was granted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(
            self.status(),
            AssignmentStatus::Succeeded | AssignmentStatus::Empty
        )
    }

    /// Returns every failure message, including cancellation and empty-catalog text.
    #[must_use]
    pub fn failure_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .failures
            .iter()
            .map(|failure| format!("{}: {}", failure.role_type, failure.message))
            .collect();
        messages.extend(self.empty_catalog_failure.iter().cloned());
        messages.extend(self.cancellation.iter().cloned());
        messages
    }

    /// Converts the result into an error unless every role was granted.
    pub fn into_full_success(self) -> AppResult<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(AppError::IncompleteAssignment(self.failure_messages()))
    }

    fn ensure_unrecorded(&self, role_type: RoleType) -> AppResult<()> {
        if self.contains_role(role_type) {
            return Err(AppError::InvalidState(format!(
                "role type '{role_type}' already has an outcome"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use roster_core::AppError;

    use super::{
        AssignmentStatus, FailureReason, RoleAssignmentFailure, RoleAssignmentResult,
        RoleAssignmentSuccess,
    };
    use crate::identifiers::RoleId;
    use crate::role::RoleType;

    fn success(role_type: RoleType) -> RoleAssignmentSuccess {
        RoleAssignmentSuccess {
            role_id: RoleId::new(),
            role_type,
            duration: Duration::from_millis(5),
        }
    }

    fn failure(role_type: RoleType, reason: FailureReason) -> RoleAssignmentFailure {
        RoleAssignmentFailure {
            role_type,
            message: "boom".to_owned(),
            reason,
        }
    }

    #[test]
    fn classification_follows_fixed_mapping() {
        let cases = [
            (AppError::Validation("x".to_owned()), FailureReason::ValidationFailed),
            (AppError::InvalidState("x".to_owned()), FailureReason::ValidationFailed),
            (AppError::InvalidSupervisor("x".to_owned()), FailureReason::ValidationFailed),
            (AppError::Unauthorized("x".to_owned()), FailureReason::Unauthorized),
            (AppError::Forbidden("x".to_owned()), FailureReason::Unauthorized),
            (AppError::Timeout("x".to_owned()), FailureReason::TransientFailure),
            (AppError::Cancelled("x".to_owned()), FailureReason::TransientFailure),
            (AppError::Conflict("x".to_owned()), FailureReason::AlreadyExists),
            (AppError::Repository("x".to_owned()), FailureReason::RepositoryError),
            (AppError::Internal("x".to_owned()), FailureReason::Unknown),
        ];

        for (error, expected) in cases {
            assert_eq!(FailureReason::classify(&error), expected, "{error}");
        }
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(FailureReason::TransientFailure.is_retryable());
        assert!(!FailureReason::ValidationFailed.is_retryable());
        assert!(!FailureReason::AlreadyExists.is_retryable());
        assert!(!FailureReason::Unknown.is_retryable());
    }

    #[test]
    fn status_is_derived_from_lists() {
        let mut result = RoleAssignmentResult::new();
        assert_eq!(result.status(), AssignmentStatus::Empty);

        assert!(result.record_success(success(RoleType::DepartmentManager)).is_ok());
        assert_eq!(result.status(), AssignmentStatus::Succeeded);

        assert!(
            result
                .record_failure(failure(
                    RoleType::ProjectCoordinator,
                    FailureReason::RepositoryError
                ))
                .is_ok()
        );
        assert_eq!(result.status(), AssignmentStatus::PartiallySucceeded);
        assert!(!result.is_success());

        let mut failed = RoleAssignmentResult::new();
        assert!(
            failed
                .record_failure(failure(
                    RoleType::DepartmentManager,
                    FailureReason::AlreadyExists
                ))
                .is_ok()
        );
        assert_eq!(failed.status(), AssignmentStatus::Failed);
    }

    #[test]
    fn role_type_cannot_be_recorded_twice() {
        let mut result = RoleAssignmentResult::new();
        assert!(result.record_success(success(RoleType::DepartmentManager)).is_ok());

        let duplicate = result.record_failure(failure(
            RoleType::DepartmentManager,
            FailureReason::Unknown,
        ));

        assert!(matches!(duplicate, Err(AppError::InvalidState(_))));
        assert!(result.failures().is_empty());
    }

    #[test]
    fn cancellation_overrides_partial_status() {
        let mut result = RoleAssignmentResult::new();
        assert!(result.record_success(success(RoleType::DepartmentManager)).is_ok());
        result.mark_cancelled("workflow deadline exceeded");

        assert_eq!(result.status(), AssignmentStatus::Cancelled);
        assert_eq!(result.cancellation(), Some("workflow deadline exceeded"));
    }

    #[test]
    fn empty_catalog_failure_is_reported() {
        let mut result = RoleAssignmentResult::new();
        result.mark_empty_catalog_failure("no standard roles defined for 'x'");

        assert_eq!(result.status(), AssignmentStatus::Failed);
        let error = result.into_full_success();
        assert!(matches!(
            error,
            Err(AppError::IncompleteAssignment(messages)) if messages.len() == 1
        ));
    }

    #[test]
    fn into_full_success_aggregates_messages() {
        let mut result = RoleAssignmentResult::new();
        assert!(
            result
                .record_failure(failure(
                    RoleType::DepartmentManager,
                    FailureReason::ValidationFailed
                ))
                .is_ok()
        );
        assert!(
            result
                .record_failure(failure(
                    RoleType::ProjectCoordinator,
                    FailureReason::ValidationFailed
                ))
                .is_ok()
        );

        let error = result.into_full_success();
        assert!(matches!(
            error,
            Err(AppError::IncompleteAssignment(messages))
                if messages == vec![
                    "department_manager: boom".to_owned(),
                    "project_coordinator: boom".to_owned(),
                ]
        ));
    }

    #[test]
    fn deserialization_keeps_roles_in_one_list() {
        let mut result = RoleAssignmentResult::new();
        assert!(result.record_success(success(RoleType::DepartmentManager)).is_ok());
        let encoded = serde_json::to_value(&result).unwrap_or_default();

        let decoded = serde_json::from_value::<RoleAssignmentResult>(encoded.clone());
        assert_eq!(decoded.ok(), Some(result));

        let mut overlapping = encoded;
        let duplicate =
            serde_json::to_value(failure(RoleType::DepartmentManager, FailureReason::Unknown))
                .unwrap_or_default();
        if let Some(failures) = overlapping
            .get_mut("failures")
            .and_then(|failures| failures.as_array_mut())
        {
            failures.push(duplicate);
        }

        let rejected = serde_json::from_value::<RoleAssignmentResult>(overlapping);
        assert!(rejected.is_err());
    }
}
