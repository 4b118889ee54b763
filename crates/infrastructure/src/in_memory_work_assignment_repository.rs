use async_trait::async_trait;
use roster_application::WorkAssignmentRepository;
use roster_core::AppResult;
use roster_domain::{UserId, WorkAssignmentCommand};
use tokio::sync::RwLock;

/// In-memory work-assignment repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryWorkAssignmentRepository {
    assignments: RwLock<Vec<WorkAssignmentCommand>>,
}

impl InMemoryWorkAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns work assignments for a user in insertion order.
    pub async fn assignments_for(&self, user_id: &UserId) -> Vec<WorkAssignmentCommand> {
        self.assignments
            .read()
            .await
            .iter()
            .filter(|assignment| &assignment.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl WorkAssignmentRepository for InMemoryWorkAssignmentRepository {
    async fn create_work_assignment(&self, command: WorkAssignmentCommand) -> AppResult<()> {
        self.assignments.write().await.push(command);
        Ok(())
    }
}
