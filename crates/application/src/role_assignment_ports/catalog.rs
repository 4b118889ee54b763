use async_trait::async_trait;

use roster_core::AppResult;
use roster_domain::{DepartmentId, RoleAssignment};

/// Port producing the roles every member of a department should hold.
#[async_trait]
pub trait RoleCatalog: Send + Sync {
    /// Builds the ordered list of standard role assignments for a department.
    async fn build_standard_assignments(
        &self,
        department_id: &DepartmentId,
    ) -> AppResult<Vec<RoleAssignment>>;
}
