use async_trait::async_trait;

use roster_core::AppResult;
use roster_domain::{DepartmentId, SupervisorId};

/// Port resolving the supervisors responsible for a department.
#[async_trait]
pub trait SupervisorResolver: Send + Sync {
    /// Returns the supervisor of the department manager role.
    async fn department_manager(&self, department_id: &DepartmentId) -> AppResult<SupervisorId>;

    /// Returns the supervisor of the project coordinator role.
    async fn project_coordinator(&self, department_id: &DepartmentId) -> AppResult<SupervisorId>;

    /// Returns whether the supervisor exists.
    async fn validate_supervisor(&self, supervisor_id: &SupervisorId) -> AppResult<bool>;
}
