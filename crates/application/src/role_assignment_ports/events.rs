use std::time::Duration;

use roster_domain::{
    AssignmentStatus, DepartmentId, FailureReason, RoleId, RoleType, SupervisorId, UserId,
    WorkRoleCode,
};

/// Structured events emitted while an assignment workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentEvent {
    /// The workflow started for a user and department.
    AssignmentStarted {
        /// User receiving roles.
        user_id: UserId,
        /// Department whose catalog is applied.
        department_id: DepartmentId,
    },
    /// A role is about to be attempted.
    RoleAssigning {
        /// User receiving the role.
        user_id: UserId,
        /// Role being attempted.
        role_type: RoleType,
        /// Supervisor resolved for the role.
        supervisor_id: SupervisorId,
    },
    /// A role was granted.
    RoleAssigned {
        /// User receiving the role.
        user_id: UserId,
        /// Granted role.
        role_type: RoleType,
        /// Created role record.
        role_id: RoleId,
        /// Duration of the successful attempt.
        duration: Duration,
    },
    /// A role could not be granted.
    RoleFailed {
        /// User that should have received the role.
        user_id: UserId,
        /// Failed role.
        role_type: RoleType,
        /// Failure classification.
        reason: FailureReason,
        /// Error text.
        message: String,
    },
    /// A transient failure is being retried.
    RetryAttempted {
        /// Role being retried.
        role_type: RoleType,
        /// Retry number, starting at one.
        attempt: u32,
        /// Delay waited before the retry.
        delay: Duration,
    },
    /// The work assignment for a role was written.
    WorkAssignmentCreated {
        /// User doing the work.
        user_id: UserId,
        /// Role record the work belongs to.
        role_id: RoleId,
        /// Work-role code.
        work_role: WorkRoleCode,
        /// Supervisor linked to the work.
        supervisor_id: SupervisorId,
    },
    /// Rolling back failed while the workflow was already returning another error.
    TransactionRollbackFailed {
        /// User receiving roles.
        user_id: UserId,
        /// Department whose catalog was applied.
        department_id: DepartmentId,
        /// Rollback error text.
        message: String,
    },
    /// The workflow finished.
    AssignmentCompleted {
        /// User receiving roles.
        user_id: UserId,
        /// Department whose catalog was applied.
        department_id: DepartmentId,
        /// Derived overall status.
        status: AssignmentStatus,
        /// Number of granted roles.
        succeeded: usize,
        /// Number of failed roles.
        failed: usize,
        /// Total workflow duration.
        duration: Duration,
    },
}

/// Fire-and-forget sink for [`AssignmentEvent`] values.
pub trait AssignmentEventSink: Send + Sync {
    /// Records one event. Must not fail or influence the workflow.
    fn record(&self, event: AssignmentEvent);
}
