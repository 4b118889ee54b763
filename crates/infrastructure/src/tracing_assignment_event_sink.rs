//! Assignment event sink that writes structured events to tracing output.

use roster_application::{AssignmentEvent, AssignmentEventSink};
use roster_domain::AssignmentStatus;
use tracing::{debug, info, warn};

/// Event sink that logs every assignment event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAssignmentEventSink;

impl TracingAssignmentEventSink {
    /// Creates a new tracing event sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentEventSink for TracingAssignmentEventSink {
    fn record(&self, event: AssignmentEvent) {
        match event {
            AssignmentEvent::AssignmentStarted {
                user_id,
                department_id,
            } => info!(
                user_id = %user_id,
                department_id = %department_id,
                "role assignment started"
            ),
            AssignmentEvent::RoleAssigning {
                user_id,
                role_type,
                supervisor_id,
            } => debug!(
                user_id = %user_id,
                role_type = role_type.as_str(),
                supervisor_id = %supervisor_id,
                "assigning role"
            ),
            AssignmentEvent::RoleAssigned {
                user_id,
                role_type,
                role_id,
                duration,
            } => info!(
                user_id = %user_id,
                role_type = role_type.as_str(),
                role_id = %role_id,
                duration_ms = duration.as_millis(),
                "role assigned"
            ),
            AssignmentEvent::RoleFailed {
                user_id,
                role_type,
                reason,
                message,
            } => warn!(
                user_id = %user_id,
                role_type = role_type.as_str(),
                reason = reason.as_str(),
                error = %message,
                "role assignment failed"
            ),
            AssignmentEvent::RetryAttempted {
                role_type,
                attempt,
                delay,
            } => warn!(
                role_type = role_type.as_str(),
                attempt,
                delay_ms = delay.as_millis(),
                "retrying role assignment after transient failure"
            ),
            AssignmentEvent::WorkAssignmentCreated {
                user_id,
                role_id,
                work_role,
                supervisor_id,
            } => debug!(
                user_id = %user_id,
                role_id = %role_id,
                work_role = work_role.as_str(),
                supervisor_id = %supervisor_id,
                "work assignment created"
            ),
            AssignmentEvent::TransactionRollbackFailed {
                user_id,
                department_id,
                message,
            } => warn!(
                user_id = %user_id,
                department_id = %department_id,
                error = %message,
                "transaction rollback failed"
            ),
            AssignmentEvent::AssignmentCompleted {
                user_id,
                department_id,
                status,
                succeeded,
                failed,
                duration,
            } => {
                if matches!(
                    status,
                    AssignmentStatus::Succeeded | AssignmentStatus::Empty
                ) {
                    info!(
                        user_id = %user_id,
                        department_id = %department_id,
                        status = ?status,
                        succeeded,
                        failed,
                        duration_ms = duration.as_millis(),
                        "role assignment completed"
                    );
                } else {
                    warn!(
                        user_id = %user_id,
                        department_id = %department_id,
                        status = ?status,
                        succeeded,
                        failed,
                        duration_ms = duration.as_millis(),
                        "role assignment completed with failures"
                    );
                }
            }
        }
    }
}
