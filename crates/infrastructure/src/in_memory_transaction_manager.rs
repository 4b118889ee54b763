use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use roster_application::{Transaction, TransactionManager};
use roster_core::{AppError, AppResult};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Counters describing how transactions opened by the manager finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    /// Transactions opened.
    pub begun: u64,
    /// Transactions committed within their timeout.
    pub committed: u64,
    /// Transactions rolled back, including commits refused after the timeout.
    pub rolled_back: u64,
}

#[derive(Debug, Default)]
struct TransactionLedger {
    next_id: AtomicU64,
    begun: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
}

/// Transaction manager that tracks unit-of-work boundaries in memory.
///
/// Writes are not staged, so this adapter only enforces the timeout and
/// records outcomes. Use it with the in-memory repositories in development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionManager {
    ledger: Arc<TransactionLedger>,
}

impl InMemoryTransactionManager {
    /// Creates a manager with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the transaction counters.
    #[must_use]
    pub fn stats(&self) -> TransactionStats {
        TransactionStats {
            begun: self.ledger.begun.load(Ordering::Relaxed),
            committed: self.ledger.committed.load(Ordering::Relaxed),
            rolled_back: self.ledger.rolled_back.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl TransactionManager for InMemoryTransactionManager {
    async fn begin(&self, timeout: Duration) -> AppResult<Box<dyn Transaction>> {
        if timeout.is_zero() {
            return Err(AppError::Validation(
                "transaction timeout must be greater than zero".to_owned(),
            ));
        }

        let id = self.ledger.next_id.fetch_add(1, Ordering::Relaxed);
        self.ledger.begun.fetch_add(1, Ordering::Relaxed);
        let started_at = Instant::now();
        debug!(transaction_id = id, timeout_ms = timeout.as_millis(), "transaction begun");

        Ok(Box::new(InMemoryTransaction {
            id,
            deadline: started_at.checked_add(timeout).unwrap_or(started_at),
            ledger: Arc::clone(&self.ledger),
        }))
    }
}

struct InMemoryTransaction {
    id: u64,
    deadline: Instant,
    ledger: Arc<TransactionLedger>,
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        if Instant::now() > self.deadline {
            self.ledger.rolled_back.fetch_add(1, Ordering::Relaxed);
            warn!(
                transaction_id = self.id,
                "transaction timed out before commit and was rolled back"
            );
            return Err(AppError::Timeout(format!(
                "transaction {} exceeded its timeout before commit",
                self.id
            )));
        }

        self.ledger.committed.fetch_add(1, Ordering::Relaxed);
        debug!(transaction_id = self.id, "transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.ledger.rolled_back.fetch_add(1, Ordering::Relaxed);
        debug!(transaction_id = self.id, "transaction rolled back");
        Ok(())
    }
}
