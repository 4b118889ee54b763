use super::*;

use roster_domain::{
    CreateUserRoleCommand, FailureReason, RoleAssignmentFailure, RoleAssignmentSuccess, RoleId,
    WorkAssignmentCommand,
};

use super::cancellation::{CancellationGuard, Interruption};

/// Outcome of one role after its retry budget is spent.
pub(super) enum AttemptOutcome {
    Succeeded(RoleAssignmentSuccess),
    Failed(RoleAssignmentFailure),
    Interrupted(Interruption),
}

enum AttemptError {
    Failed(AppError),
    Interrupted(Interruption),
}

impl From<AppError> for AttemptError {
    fn from(error: AppError) -> Self {
        Self::Failed(error)
    }
}

impl From<Interruption> for AttemptError {
    fn from(interruption: Interruption) -> Self {
        Self::Interrupted(interruption)
    }
}

/// Writes that survive across the attempts of one role.
///
/// The role id is fixed for the whole retry loop, and a user-role record that
/// was already written is never written again.
struct RoleProgress {
    role_id: RoleId,
    user_role_written: bool,
}

impl RoleProgress {
    fn new() -> Self {
        Self {
            role_id: RoleId::new(),
            user_role_written: false,
        }
    }
}

impl RoleAssignmentService {
    pub(super) async fn assign_role_with_retry(
        &self,
        context: &AssignmentContext<'_>,
        assignment: &RoleAssignment,
        guard: &CancellationGuard,
    ) -> AttemptOutcome {
        let role_type = assignment.role_type;
        let started_at = Instant::now();
        let mut progress = RoleProgress::new();
        let mut retry = 0_u32;

        loop {
            if retry > 0 {
                let delay = self.options.backoff_for(retry);
                self.events.record(AssignmentEvent::RetryAttempted {
                    role_type,
                    attempt: retry,
                    delay,
                });
                self.telemetry.record_retry(role_type, retry);

                if let Err(interruption) = guard.run(self.backoff_timer.wait(delay)).await {
                    return AttemptOutcome::Interrupted(interruption);
                }
            }

            let attempt_started_at = Instant::now();
            let error = match self
                .attempt_once(context, assignment, guard, &mut progress)
                .await
            {
                Ok(role_id) => {
                    let duration = attempt_started_at.elapsed();
                    self.telemetry
                        .record_role_assignment(role_type, true, started_at.elapsed());
                    self.events.record(AssignmentEvent::RoleAssigned {
                        user_id: context.user_id.clone(),
                        role_type,
                        role_id,
                        duration,
                    });

                    return AttemptOutcome::Succeeded(RoleAssignmentSuccess {
                        role_id,
                        role_type,
                        duration,
                    });
                }
                Err(AttemptError::Interrupted(interruption)) => {
                    return AttemptOutcome::Interrupted(interruption);
                }
                Err(AttemptError::Failed(error)) => error,
            };

            let reason = FailureReason::classify(&error);
            if !reason.is_retryable() {
                self.telemetry
                    .record_role_assignment(role_type, false, started_at.elapsed());
                return AttemptOutcome::Failed(RoleAssignmentFailure {
                    role_type,
                    message: error.to_string(),
                    reason,
                });
            }

            if retry >= self.options.max_retry_attempts() {
                self.telemetry
                    .record_role_assignment(role_type, false, started_at.elapsed());
                return AttemptOutcome::Failed(RoleAssignmentFailure {
                    role_type,
                    message: format!(
                        "retry budget exhausted after {} attempt(s): {error}",
                        retry.saturating_add(1)
                    ),
                    reason: FailureReason::TransientFailure,
                });
            }

            retry += 1;
        }
    }

    async fn attempt_once(
        &self,
        context: &AssignmentContext<'_>,
        assignment: &RoleAssignment,
        guard: &CancellationGuard,
        progress: &mut RoleProgress,
    ) -> Result<RoleId, AttemptError> {
        let role_id = progress.role_id;
        if !progress.user_role_written {
            self.write_user_role(context, assignment, guard, role_id).await?;
            progress.user_role_written = true;
        }

        let work_started_at = Instant::now();
        guard
            .run(
                self.work_assignment_repository
                    .create_work_assignment(WorkAssignmentCommand::from_assignment(
                        role_id,
                        context.user_id,
                        context.department_id,
                        assignment,
                        context.assigned_date,
                    )),
            )
            .await??;

        self.telemetry
            .record_work_assignment(work_started_at.elapsed());
        self.events.record(AssignmentEvent::WorkAssignmentCreated {
            user_id: context.user_id.clone(),
            role_id,
            work_role: assignment.work_role,
            supervisor_id: assignment.supervisor_id.clone(),
        });

        Ok(role_id)
    }

    async fn write_user_role(
        &self,
        context: &AssignmentContext<'_>,
        assignment: &RoleAssignment,
        guard: &CancellationGuard,
        role_id: RoleId,
    ) -> Result<(), AttemptError> {
        if self.options.validate_supervisors() {
            let exists = guard
                .run(
                    self.supervisor_resolver
                        .validate_supervisor(&assignment.supervisor_id),
                )
                .await??;

            if !exists {
                return Err(AppError::InvalidSupervisor(format!(
                    "supervisor '{}' for role '{}' does not exist",
                    assignment.supervisor_id, assignment.role_type
                ))
                .into());
            }
        }

        guard
            .run(
                self.user_role_repository
                    .create_user_role(CreateUserRoleCommand::from_assignment(
                        role_id,
                        context.user_id,
                        context.department_id,
                        assignment,
                        context.assigned_date,
                    )),
            )
            .await??;

        Ok(())
    }
}
