use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::{DepartmentId, RoleId, SupervisorId, UserId};
use crate::role::{ResourceType, RoleAssignment, RoleType, WorkRoleCode};

/// Fields persisted for one user-role record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRoleCommand {
    /// Identifier generated for the new role record.
    pub role_id: RoleId,
    /// User receiving the role.
    pub user_id: UserId,
    /// Department the role is scoped to.
    pub department_id: DepartmentId,
    /// Granted role type.
    pub role_type: RoleType,
    /// Supervisor of the granted role.
    pub supervisor_id: SupervisorId,
    /// Human-readable description of the grant.
    pub description: String,
    /// Effective date of the grant.
    pub assigned_date: DateTime<Utc>,
}

impl CreateUserRoleCommand {
    /// Builds the command for one catalog entry.
    #[must_use]
    pub fn from_assignment(
        role_id: RoleId,
        user_id: &UserId,
        department_id: &DepartmentId,
        assignment: &RoleAssignment,
        assigned_date: DateTime<Utc>,
    ) -> Self {
        Self {
            role_id,
            user_id: user_id.clone(),
            department_id: department_id.clone(),
            role_type: assignment.role_type,
            supervisor_id: assignment.supervisor_id.clone(),
            description: assignment.description.clone(),
            assigned_date,
        }
    }
}

/// Fields persisted for the work assignment created alongside a role grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkAssignmentCommand {
    /// Role record the work assignment belongs to.
    pub role_id: RoleId,
    /// User doing the work.
    pub user_id: UserId,
    /// Department owning the resource.
    pub department_id: DepartmentId,
    /// Supervisor linked to the work.
    pub supervisor_id: SupervisorId,
    /// Work-role code.
    pub work_role: WorkRoleCode,
    /// Resource scope of the work.
    pub resource_type: ResourceType,
    /// Effective date of the assignment.
    pub assigned_date: DateTime<Utc>,
}

impl WorkAssignmentCommand {
    /// Builds the command for one catalog entry.
    #[must_use]
    pub fn from_assignment(
        role_id: RoleId,
        user_id: &UserId,
        department_id: &DepartmentId,
        assignment: &RoleAssignment,
        assigned_date: DateTime<Utc>,
    ) -> Self {
        Self {
            role_id,
            user_id: user_id.clone(),
            department_id: department_id.clone(),
            supervisor_id: assignment.supervisor_id.clone(),
            work_role: assignment.work_role,
            resource_type: assignment.resource_type,
            assigned_date,
        }
    }
}
