use std::collections::HashSet;
use std::time::Duration;

use roster_core::{AppError, AppResult};
use roster_domain::{DepartmentId, RoleAssignmentResult};

/// How an empty role catalog is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCatalogPolicy {
    /// Report an empty outcome that counts as success.
    Succeed,
    /// Report a failed outcome.
    #[default]
    Fail,
}

/// Options recognized by the standard-role assignment workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentOptions {
    validate_existing_roles: bool,
    validate_supervisors: bool,
    allow_partial_failures: bool,
    max_retry_attempts: u32,
    retry_delay: Duration,
    special_departments: HashSet<DepartmentId>,
    transaction_timeout: Duration,
    workflow_timeout: Option<Duration>,
    empty_catalog_policy: EmptyCatalogPolicy,
}

impl Default for RoleAssignmentOptions {
    fn default() -> Self {
        Self {
            validate_existing_roles: true,
            validate_supervisors: true,
            allow_partial_failures: false,
            max_retry_attempts: 3,
            retry_delay: Duration::from_millis(100),
            special_departments: HashSet::new(),
            transaction_timeout: Duration::from_secs(30),
            workflow_timeout: None,
            empty_catalog_policy: EmptyCatalogPolicy::Fail,
        }
    }
}

impl RoleAssignmentOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the existing-roles lookup.
    #[must_use]
    pub fn with_validate_existing_roles(mut self, enabled: bool) -> Self {
        self.validate_existing_roles = enabled;
        self
    }

    /// Enables or disables the supervisor existence check.
    #[must_use]
    pub fn with_validate_supervisors(mut self, enabled: bool) -> Self {
        self.validate_supervisors = enabled;
        self
    }

    /// Continues past failing roles when enabled.
    #[must_use]
    pub fn with_allow_partial_failures(mut self, enabled: bool) -> Self {
        self.allow_partial_failures = enabled;
        self
    }

    /// Sets the number of retries after the first attempt.
    #[must_use]
    pub fn with_max_retry_attempts(mut self, max_retry_attempts: u32) -> Self {
        self.max_retry_attempts = max_retry_attempts;
        self
    }

    /// Sets the linear backoff unit.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Sets the departments whose coordinators get the special work role.
    ///
    /// Only [`StandardRoleCatalog`](super::StandardRoleCatalog) reads this set.
    /// [`RoleAssignmentService::new_standard`](super::RoleAssignmentService::new_standard)
    /// builds that catalog from these options; a catalog passed to
    /// [`RoleAssignmentService::new`](super::RoleAssignmentService::new) keeps its own set.
    #[must_use]
    pub fn with_special_departments(
        mut self,
        special_departments: impl IntoIterator<Item = DepartmentId>,
    ) -> Self {
        self.special_departments = special_departments.into_iter().collect();
        self
    }

    /// Sets the timeout passed to the transaction manager.
    #[must_use]
    pub fn with_transaction_timeout(mut self, transaction_timeout: Duration) -> Self {
        self.transaction_timeout = transaction_timeout;
        self
    }

    /// Sets an overall deadline for one workflow invocation.
    #[must_use]
    pub fn with_workflow_timeout(mut self, workflow_timeout: Option<Duration>) -> Self {
        self.workflow_timeout = workflow_timeout;
        self
    }

    /// Sets how an empty role catalog is reported.
    #[must_use]
    pub fn with_empty_catalog_policy(mut self, empty_catalog_policy: EmptyCatalogPolicy) -> Self {
        self.empty_catalog_policy = empty_catalog_policy;
        self
    }

    /// Rejects option combinations that cannot run.
    pub fn validate(&self) -> AppResult<()> {
        if self.transaction_timeout.is_zero() {
            return Err(AppError::Validation(
                "transaction timeout must be greater than zero".to_owned(),
            ));
        }

        if self.workflow_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(AppError::Validation(
                "workflow timeout must be greater than zero when set".to_owned(),
            ));
        }

        Ok(())
    }

    /// Returns whether the existing-roles lookup runs.
    #[must_use]
    pub fn validate_existing_roles(&self) -> bool {
        self.validate_existing_roles
    }

    /// Returns whether supervisors are checked before persisting.
    #[must_use]
    pub fn validate_supervisors(&self) -> bool {
        self.validate_supervisors
    }

    /// Returns whether processing continues past failing roles.
    #[must_use]
    pub fn allow_partial_failures(&self) -> bool {
        self.allow_partial_failures
    }

    /// Returns the number of retries after the first attempt.
    #[must_use]
    pub fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }

    /// Returns the linear backoff unit.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the configured special departments.
    #[must_use]
    pub fn special_departments(&self) -> &HashSet<DepartmentId> {
        &self.special_departments
    }

    /// Returns the transaction timeout.
    #[must_use]
    pub fn transaction_timeout(&self) -> Duration {
        self.transaction_timeout
    }

    /// Returns the workflow deadline, if any.
    #[must_use]
    pub fn workflow_timeout(&self) -> Option<Duration> {
        self.workflow_timeout
    }

    /// Returns the empty-catalog policy.
    #[must_use]
    pub fn empty_catalog_policy(&self) -> EmptyCatalogPolicy {
        self.empty_catalog_policy
    }

    /// Returns the delay waited before retry number `attempt`.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }

    /// Returns whether a transaction wrapping `result` should commit.
    ///
    /// With partial failures allowed one success is enough; otherwise any
    /// failure rolls the whole workflow back.
    #[must_use]
    pub fn should_commit(&self, result: &RoleAssignmentResult) -> bool {
        if self.allow_partial_failures {
            !result.successes().is_empty()
        } else {
            result.failures().is_empty()
        }
    }
}
