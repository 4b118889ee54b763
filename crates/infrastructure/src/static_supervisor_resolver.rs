use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use roster_application::SupervisorResolver;
use roster_core::{AppError, AppResult};
use roster_domain::{DepartmentId, SupervisorId};

#[derive(Debug, Clone)]
struct DepartmentSupervisors {
    manager: SupervisorId,
    coordinator: SupervisorId,
}

/// Supervisor resolver backed by a fixed department table.
///
/// Departments without an entry fall back to the default supervisors when
/// configured, otherwise resolution fails with `NotFound`. A supervisor
/// validates when it appears anywhere in the table or was registered with
/// [`Self::with_known_supervisor`].
#[derive(Debug, Clone, Default)]
pub struct StaticSupervisorResolver {
    departments: HashMap<DepartmentId, DepartmentSupervisors>,
    fallback: Option<DepartmentSupervisors>,
    known_supervisors: HashSet<SupervisorId>,
}

impl StaticSupervisorResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the supervisors of one department.
    #[must_use]
    pub fn with_department(
        mut self,
        department_id: DepartmentId,
        manager: SupervisorId,
        coordinator: SupervisorId,
    ) -> Self {
        self.known_supervisors.insert(manager.clone());
        self.known_supervisors.insert(coordinator.clone());
        self.departments.insert(
            department_id,
            DepartmentSupervisors {
                manager,
                coordinator,
            },
        );
        self
    }

    /// Sets the supervisors used for departments without an entry.
    #[must_use]
    pub fn with_fallback(mut self, manager: SupervisorId, coordinator: SupervisorId) -> Self {
        self.known_supervisors.insert(manager.clone());
        self.known_supervisors.insert(coordinator.clone());
        self.fallback = Some(DepartmentSupervisors {
            manager,
            coordinator,
        });
        self
    }

    /// Marks a supervisor as existing without binding it to a department.
    #[must_use]
    pub fn with_known_supervisor(mut self, supervisor_id: SupervisorId) -> Self {
        self.known_supervisors.insert(supervisor_id);
        self
    }

    fn supervisors_for(&self, department_id: &DepartmentId) -> AppResult<&DepartmentSupervisors> {
        self.departments
            .get(department_id)
            .or(self.fallback.as_ref())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no supervisors configured for department '{department_id}'"
                ))
            })
    }
}

#[async_trait]
impl SupervisorResolver for StaticSupervisorResolver {
    async fn department_manager(&self, department_id: &DepartmentId) -> AppResult<SupervisorId> {
        self.supervisors_for(department_id)
            .map(|supervisors| supervisors.manager.clone())
    }

    async fn project_coordinator(&self, department_id: &DepartmentId) -> AppResult<SupervisorId> {
        self.supervisors_for(department_id)
            .map(|supervisors| supervisors.coordinator.clone())
    }

    async fn validate_supervisor(&self, supervisor_id: &SupervisorId) -> AppResult<bool> {
        Ok(self.known_supervisors.contains(supervisor_id))
    }
}
