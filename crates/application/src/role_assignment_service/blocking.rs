use super::*;

impl RoleAssignmentService {
    /// Runs the workflow to completion on the calling thread and requires full success.
    ///
    /// Builds a private current-thread runtime. Calling this from inside a
    /// tokio runtime is rejected with [`AppError::InvalidState`]; async callers
    /// use [`Self::assign_standard_roles`]. Any failed role is reported as one
    /// [`AppError::IncompleteAssignment`] listing every failure message.
    pub fn assign_standard_roles_blocking(
        &self,
        user_id: &UserId,
        department_id: &DepartmentId,
        assigned_date: DateTime<Utc>,
    ) -> AppResult<RoleAssignmentResult> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(AppError::InvalidState(
                "blocking role assignment cannot run inside an async runtime".to_owned(),
            ));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build assignment runtime: {error}"))
            })?;

        runtime
            .block_on(self.assign_standard_roles(user_id, department_id, assigned_date))?
            .into_full_success()
    }
}
