//! Standard-role assignment workflow.
//!
//! Applies a department's role catalog to one user: skips roles the user
//! already holds, retries transient failures with linear backoff, aggregates
//! per-role outcomes and decides commit or rollback of an optional
//! transaction. Roles are processed strictly in catalog order.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use roster_core::{AppError, AppResult};
use roster_domain::{
    DepartmentId, FailureReason, RoleAssignment, RoleAssignmentFailure, RoleAssignmentResult,
    UserId,
};

use crate::role_assignment_ports::{
    AssignmentEvent, AssignmentEventSink, BackoffTimer, NoopTelemetryCollector, RoleCatalog,
    SupervisorResolver, TelemetryCollector, TokioBackoffTimer, TransactionManager,
    UserRoleRepository, WorkAssignmentRepository,
};

mod attempt;
mod blocking;
mod cancellation;
mod catalog;
mod options;

pub use catalog::StandardRoleCatalog;
pub use options::{EmptyCatalogPolicy, RoleAssignmentOptions};

use attempt::AttemptOutcome;
use cancellation::{CancellationGuard, Interruption};

/// Inputs shared by every role of one invocation.
struct AssignmentContext<'a> {
    user_id: &'a UserId,
    department_id: &'a DepartmentId,
    assigned_date: DateTime<Utc>,
}

/// Application service granting the standard roles of a department.
#[derive(Clone)]
pub struct RoleAssignmentService {
    catalog: Arc<dyn RoleCatalog>,
    user_role_repository: Arc<dyn UserRoleRepository>,
    work_assignment_repository: Arc<dyn WorkAssignmentRepository>,
    supervisor_resolver: Arc<dyn SupervisorResolver>,
    events: Arc<dyn AssignmentEventSink>,
    backoff_timer: Arc<dyn BackoffTimer>,
    telemetry: Arc<dyn TelemetryCollector>,
    transaction_manager: Option<Arc<dyn TransactionManager>>,
    options: RoleAssignmentOptions,
}

impl RoleAssignmentService {
    /// Creates a service from required dependencies.
    ///
    /// Fails with a validation error when `options` cannot run.
    pub fn new(
        catalog: Arc<dyn RoleCatalog>,
        user_role_repository: Arc<dyn UserRoleRepository>,
        work_assignment_repository: Arc<dyn WorkAssignmentRepository>,
        supervisor_resolver: Arc<dyn SupervisorResolver>,
        events: Arc<dyn AssignmentEventSink>,
        options: RoleAssignmentOptions,
    ) -> AppResult<Self> {
        options.validate()?;

        Ok(Self {
            catalog,
            user_role_repository,
            work_assignment_repository,
            supervisor_resolver,
            events,
            backoff_timer: Arc::new(TokioBackoffTimer),
            telemetry: Arc::new(NoopTelemetryCollector),
            transaction_manager: None,
            options,
        })
    }

    /// Creates a service over [`StandardRoleCatalog`] built from `options`.
    ///
    /// The catalog reads `special_departments` from the same options the
    /// service runs with.
    pub fn new_standard(
        user_role_repository: Arc<dyn UserRoleRepository>,
        work_assignment_repository: Arc<dyn WorkAssignmentRepository>,
        supervisor_resolver: Arc<dyn SupervisorResolver>,
        events: Arc<dyn AssignmentEventSink>,
        options: RoleAssignmentOptions,
    ) -> AppResult<Self> {
        let catalog = Arc::new(StandardRoleCatalog::from_options(
            supervisor_resolver.clone(),
            &options,
        ));

        Self::new(
            catalog,
            user_role_repository,
            work_assignment_repository,
            supervisor_resolver,
            events,
            options,
        )
    }

    /// Adds a telemetry collector.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetryCollector>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Wraps every invocation in a transaction.
    #[must_use]
    pub fn with_transaction_manager(
        mut self,
        transaction_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        self.transaction_manager = Some(transaction_manager);
        self
    }

    /// Replaces the timer used between retries.
    #[must_use]
    pub fn with_backoff_timer(mut self, backoff_timer: Arc<dyn BackoffTimer>) -> Self {
        self.backoff_timer = backoff_timer;
        self
    }

    /// Returns the options the service was built with.
    #[must_use]
    pub fn options(&self) -> &RoleAssignmentOptions {
        &self.options
    }

    /// Grants the department's standard roles to a user.
    ///
    /// Per-role problems are reported inside the returned result. An error is
    /// returned only when the catalog or existing-roles lookup fails, when the
    /// transaction cannot be opened or finished, or when the catalog lists a
    /// role type twice.
    pub async fn assign_standard_roles(
        &self,
        user_id: &UserId,
        department_id: &DepartmentId,
        assigned_date: DateTime<Utc>,
    ) -> AppResult<RoleAssignmentResult> {
        self.assign_standard_roles_with_cancellation(
            user_id,
            department_id,
            assigned_date,
            CancellationToken::new(),
        )
        .await
    }

    /// Grants the department's standard roles, stopping when `cancellation` fires.
    ///
    /// Cancellation and the configured workflow deadline are checked at every
    /// suspension point. Either one rolls back the transaction and yields a
    /// cancelled result.
    pub async fn assign_standard_roles_with_cancellation(
        &self,
        user_id: &UserId,
        department_id: &DepartmentId,
        assigned_date: DateTime<Utc>,
        cancellation: CancellationToken,
    ) -> AppResult<RoleAssignmentResult> {
        let started_at = Instant::now();
        let guard = CancellationGuard::new(cancellation, self.options.workflow_timeout());
        let context = AssignmentContext {
            user_id,
            department_id,
            assigned_date,
        };
        let mut result = RoleAssignmentResult::new();

        self.events.record(AssignmentEvent::AssignmentStarted {
            user_id: user_id.clone(),
            department_id: department_id.clone(),
        });

        let assignments = match guard
            .run(self.catalog.build_standard_assignments(department_id))
            .await
        {
            Ok(assignments) => assignments?,
            Err(interruption) => {
                result.mark_cancelled(interruption.message());
                return Ok(self.complete(&context, result, started_at));
            }
        };

        if assignments.is_empty() {
            if self.options.empty_catalog_policy() == EmptyCatalogPolicy::Fail {
                result.mark_empty_catalog_failure(format!(
                    "no standard roles are defined for department '{department_id}'"
                ));
            }
            return Ok(self.complete(&context, result, started_at));
        }

        let transaction = match &self.transaction_manager {
            Some(transaction_manager) => Some(
                transaction_manager
                    .begin(self.options.transaction_timeout())
                    .await?,
            ),
            None => None,
        };

        let processed = self
            .process_assignments(&context, &assignments, &guard, &mut result)
            .await;
        let commit = matches!(processed, Ok(None)) && self.options.should_commit(&result);

        let finished = match transaction {
            Some(transaction) if commit => transaction.commit().await,
            Some(transaction) => transaction.rollback().await,
            None => Ok(()),
        };

        let interruption = match processed {
            Ok(interruption) => interruption,
            Err(error) => {
                if let Err(rollback_error) = finished {
                    self.events.record(AssignmentEvent::TransactionRollbackFailed {
                        user_id: user_id.clone(),
                        department_id: department_id.clone(),
                        message: rollback_error.to_string(),
                    });
                }
                return Err(error);
            }
        };
        if let Some(interruption) = interruption {
            result.mark_cancelled(interruption.message());
        }
        finished?;

        Ok(self.complete(&context, result, started_at))
    }

    async fn process_assignments(
        &self,
        context: &AssignmentContext<'_>,
        assignments: &[RoleAssignment],
        guard: &CancellationGuard,
        result: &mut RoleAssignmentResult,
    ) -> AppResult<Option<Interruption>> {
        let existing_role_types = if self.options.validate_existing_roles() {
            match guard
                .run(
                    self.user_role_repository
                        .existing_role_types(context.user_id),
                )
                .await
            {
                Ok(existing_role_types) => existing_role_types?,
                Err(interruption) => return Ok(Some(interruption)),
            }
        } else {
            HashSet::new()
        };

        for assignment in assignments {
            if existing_role_types.contains(&assignment.role_type) {
                self.record_failure(
                    context,
                    result,
                    RoleAssignmentFailure {
                        role_type: assignment.role_type,
                        message: format!(
                            "user '{}' already has role '{}'",
                            context.user_id, assignment.role_type
                        ),
                        reason: FailureReason::AlreadyExists,
                    },
                )?;
            } else {
                self.events.record(AssignmentEvent::RoleAssigning {
                    user_id: context.user_id.clone(),
                    role_type: assignment.role_type,
                    supervisor_id: assignment.supervisor_id.clone(),
                });

                match self
                    .assign_role_with_retry(context, assignment, guard)
                    .await
                {
                    AttemptOutcome::Succeeded(success) => result.record_success(success)?,
                    AttemptOutcome::Failed(failure) => {
                        self.record_failure(context, result, failure)?;
                    }
                    AttemptOutcome::Interrupted(interruption) => return Ok(Some(interruption)),
                }
            }

            if !result.failures().is_empty() && !self.options.allow_partial_failures() {
                break;
            }
        }

        Ok(None)
    }

    fn record_failure(
        &self,
        context: &AssignmentContext<'_>,
        result: &mut RoleAssignmentResult,
        failure: RoleAssignmentFailure,
    ) -> AppResult<()> {
        self.events.record(AssignmentEvent::RoleFailed {
            user_id: context.user_id.clone(),
            role_type: failure.role_type,
            reason: failure.reason,
            message: failure.message.clone(),
        });

        result.record_failure(failure)
    }

    fn complete(
        &self,
        context: &AssignmentContext<'_>,
        result: RoleAssignmentResult,
        started_at: Instant,
    ) -> RoleAssignmentResult {
        self.events.record(AssignmentEvent::AssignmentCompleted {
            user_id: context.user_id.clone(),
            department_id: context.department_id.clone(),
            status: result.status(),
            succeeded: result.successes().len(),
            failed: result.failures().len(),
            duration: started_at.elapsed(),
        });

        result
    }
}
