use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use roster_core::AppResult;
use roster_domain::{DepartmentId, ResourceType, RoleAssignment, RoleType, WorkRoleCode};

use super::options::RoleAssignmentOptions;
use crate::role_assignment_ports::{RoleCatalog, SupervisorResolver};

/// Catalog granting a department manager and a project coordinator.
#[derive(Clone)]
pub struct StandardRoleCatalog {
    supervisor_resolver: Arc<dyn SupervisorResolver>,
    special_departments: HashSet<DepartmentId>,
}

impl StandardRoleCatalog {
    /// Creates a catalog from a resolver and the special department set.
    #[must_use]
    pub fn new(
        supervisor_resolver: Arc<dyn SupervisorResolver>,
        special_departments: HashSet<DepartmentId>,
    ) -> Self {
        Self {
            supervisor_resolver,
            special_departments,
        }
    }

    /// Creates a catalog using the special departments from workflow options.
    #[must_use]
    pub fn from_options(
        supervisor_resolver: Arc<dyn SupervisorResolver>,
        options: &RoleAssignmentOptions,
    ) -> Self {
        Self::new(supervisor_resolver, options.special_departments().clone())
    }

    /// Returns the coordinator work role for a department.
    #[must_use]
    pub fn coordinator_work_role(&self, department_id: &DepartmentId) -> WorkRoleCode {
        if self.special_departments.contains(department_id) {
            WorkRoleCode::SpecialAdministrator
        } else {
            WorkRoleCode::GeneralAdministrator
        }
    }
}

#[async_trait]
impl RoleCatalog for StandardRoleCatalog {
    async fn build_standard_assignments(
        &self,
        department_id: &DepartmentId,
    ) -> AppResult<Vec<RoleAssignment>> {
        let manager_supervisor = self
            .supervisor_resolver
            .department_manager(department_id)
            .await?;
        let coordinator_supervisor = self
            .supervisor_resolver
            .project_coordinator(department_id)
            .await?;

        Ok(vec![
            RoleAssignment {
                role_type: RoleType::DepartmentManager,
                supervisor_id: manager_supervisor,
                work_role: WorkRoleCode::ProjectManager,
                resource_type: ResourceType::Department,
                description: format!(
                    "{} for department '{department_id}'",
                    RoleType::DepartmentManager.description()
                ),
            },
            RoleAssignment {
                role_type: RoleType::ProjectCoordinator,
                supervisor_id: coordinator_supervisor,
                work_role: self.coordinator_work_role(department_id),
                resource_type: ResourceType::Project,
                description: format!(
                    "{} for department '{department_id}'",
                    RoleType::ProjectCoordinator.description()
                ),
            },
        ])
    }
}
