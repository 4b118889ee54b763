use std::fmt::{Display, Formatter};
use std::str::FromStr;

use roster_core::AppError;
use serde::{Deserialize, Serialize};

use crate::identifiers::SupervisorId;

/// Standard role types granted to department staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    /// Manages a department and approves its work assignments.
    DepartmentManager,
    /// Coordinates projects run inside a department.
    ProjectCoordinator,
}

/// Static descriptive data attached to a role type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTypeMetadata {
    /// Role type described by this entry.
    pub role_type: RoleType,
    /// Human-readable role name.
    pub description: &'static str,
    /// Processing priority, lower runs first.
    pub priority: u8,
    /// Whether grants of this role need an approval step.
    pub requires_approval: bool,
}

static ROLE_TYPE_METADATA: [RoleTypeMetadata; 2] = [
    RoleTypeMetadata {
        role_type: RoleType::DepartmentManager,
        description: "Department Manager",
        priority: 1,
        requires_approval: true,
    },
    RoleTypeMetadata {
        role_type: RoleType::ProjectCoordinator,
        description: "Project Coordinator",
        priority: 2,
        requires_approval: false,
    },
];

impl RoleType {
    /// Returns a stable storage value for this role type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepartmentManager => "department_manager",
            Self::ProjectCoordinator => "project_coordinator",
        }
    }

    /// Returns all known role types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RoleType] = &[RoleType::DepartmentManager, RoleType::ProjectCoordinator];

        ALL
    }

    /// Returns the descriptive metadata for this role type.
    #[must_use]
    pub fn metadata(&self) -> &'static RoleTypeMetadata {
        match self {
            Self::DepartmentManager => &ROLE_TYPE_METADATA[0],
            Self::ProjectCoordinator => &ROLE_TYPE_METADATA[1],
        }
    }

    /// Returns the human-readable role name.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.metadata().description
    }
}

impl FromStr for RoleType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "department_manager" => Ok(Self::DepartmentManager),
            "project_coordinator" => Ok(Self::ProjectCoordinator),
            _ => Err(AppError::Validation(format!(
                "unknown role type value '{value}'"
            ))),
        }
    }
}

impl Display for RoleType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Work-role code written on the work assignment that accompanies a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkRoleCode {
    /// Work role for department managers.
    ProjectManager,
    /// Coordinator work role in special departments.
    SpecialAdministrator,
    /// Coordinator work role everywhere else.
    GeneralAdministrator,
}

impl WorkRoleCode {
    /// Returns the stable code value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectManager => "ProjectManager",
            Self::SpecialAdministrator => "SpecialAdministrator",
            Self::GeneralAdministrator => "GeneralAdministrator",
        }
    }
}

impl Display for WorkRoleCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Kind of resource a work assignment is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// The department as a whole.
    Department,
    /// Projects owned by the department.
    Project,
}

impl ResourceType {
    /// Returns a stable storage value for this resource type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Project => "project",
        }
    }
}

/// One role that should be granted, produced by a role catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Role type to grant.
    pub role_type: RoleType,
    /// Supervisor resolved for the role in this department.
    pub supervisor_id: SupervisorId,
    /// Work-role code for the accompanying work assignment.
    pub work_role: WorkRoleCode,
    /// Resource scope of the accompanying work assignment.
    pub resource_type: ResourceType,
    /// Human-readable description of the grant.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RoleType, WorkRoleCode};

    #[test]
    fn role_type_roundtrip_storage_value() {
        for role_type in RoleType::all() {
            let restored = RoleType::from_str(role_type.as_str());
            assert!(restored.is_ok());
            assert_eq!(
                restored.unwrap_or(RoleType::ProjectCoordinator),
                *role_type
            );
        }
    }

    #[test]
    fn unknown_role_type_is_rejected() {
        assert!(RoleType::from_str("department_owner").is_err());
    }

    #[test]
    fn metadata_table_matches_role_types() {
        for role_type in RoleType::all() {
            assert_eq!(role_type.metadata().role_type, *role_type);
        }

        assert!(RoleType::DepartmentManager.metadata().requires_approval);
        assert!(
            RoleType::DepartmentManager.metadata().priority
                < RoleType::ProjectCoordinator.metadata().priority
        );
    }

    #[test]
    fn work_role_codes_use_pascal_case() {
        assert_eq!(
            WorkRoleCode::SpecialAdministrator.to_string(),
            "SpecialAdministrator"
        );
        assert_eq!(WorkRoleCode::ProjectManager.as_str(), "ProjectManager");
    }
}
