use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use roster_application::UserRoleRepository;
use roster_core::{AppError, AppResult};
use roster_domain::{CreateUserRoleCommand, RoleType, UserId};
use tokio::sync::RwLock;

/// In-memory user-role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRoleRepository {
    granted_elsewhere: HashMap<UserId, HashSet<RoleType>>,
    roles: RwLock<HashMap<UserId, Vec<CreateUserRoleCommand>>>,
}

impl InMemoryUserRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository where users already hold roles granted outside this store.
    #[must_use]
    pub fn with_existing_roles(granted_elsewhere: HashMap<UserId, HashSet<RoleType>>) -> Self {
        Self {
            granted_elsewhere,
            roles: RwLock::new(HashMap::new()),
        }
    }

    /// Returns every role record written for a user in insertion order.
    pub async fn roles_for(&self, user_id: &UserId) -> Vec<CreateUserRoleCommand> {
        self.roles
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryUserRoleRepository {
    async fn create_user_role(&self, command: CreateUserRoleCommand) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        let granted_elsewhere = self
            .granted_elsewhere
            .get(&command.user_id)
            .is_some_and(|role_types| role_types.contains(&command.role_type));
        let user_roles = roles.entry(command.user_id.clone()).or_default();

        if user_roles.iter().any(|existing| {
            existing.role_id == command.role_id && existing.role_type == command.role_type
        }) {
            return Ok(());
        }

        if granted_elsewhere
            || user_roles
                .iter()
                .any(|existing| existing.role_type == command.role_type)
        {
            return Err(AppError::Conflict(format!(
                "user '{}' already has role '{}'",
                command.user_id, command.role_type
            )));
        }

        user_roles.push(command);
        Ok(())
    }

    async fn existing_role_types(&self, user_id: &UserId) -> AppResult<HashSet<RoleType>> {
        let mut role_types = self
            .granted_elsewhere
            .get(user_id)
            .cloned()
            .unwrap_or_default();

        if let Some(commands) = self.roles.read().await.get(user_id) {
            role_types.extend(commands.iter().map(|command| command.role_type));
        }

        Ok(role_types)
    }
}
