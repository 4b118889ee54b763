use std::time::Duration;

use async_trait::async_trait;

use roster_core::AppResult;

/// Port opening a unit of work around one assignment workflow.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Begins a transaction that must finish within `timeout`.
    async fn begin(&self, timeout: Duration) -> AppResult<Box<dyn Transaction>>;
}

/// An open unit of work. Consumed by exactly one of commit or rollback.
#[async_trait]
pub trait Transaction: Send {
    /// Makes every write of the workflow durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discards every write of the workflow.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
