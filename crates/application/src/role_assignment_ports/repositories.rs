use std::collections::HashSet;

use async_trait::async_trait;

use roster_core::AppResult;
use roster_domain::{CreateUserRoleCommand, RoleType, UserId, WorkAssignmentCommand};

/// Repository port for user-role records.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Persists one user-role record.
    async fn create_user_role(&self, command: CreateUserRoleCommand) -> AppResult<()>;

    /// Returns the role types the user already holds.
    async fn existing_role_types(&self, user_id: &UserId) -> AppResult<HashSet<RoleType>>;
}

/// Repository port for work assignments created alongside role grants.
#[async_trait]
pub trait WorkAssignmentRepository: Send + Sync {
    /// Persists one work assignment.
    async fn create_work_assignment(&self, command: WorkAssignmentCommand) -> AppResult<()>;
}
