use std::time::Duration;

use async_trait::async_trait;

/// Port for waiting between retry attempts.
#[async_trait]
pub trait BackoffTimer: Send + Sync {
    /// Waits for the given delay.
    async fn wait(&self, delay: Duration);
}

/// Backoff timer backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioBackoffTimer;

#[async_trait]
impl BackoffTimer for TokioBackoffTimer {
    async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
