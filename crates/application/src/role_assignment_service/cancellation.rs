use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a workflow stopped before processing every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Interruption {
    Cancelled,
    DeadlineExceeded,
}

impl Interruption {
    pub(super) fn message(self) -> &'static str {
        match self {
            Self::Cancelled => "role assignment was cancelled",
            Self::DeadlineExceeded => "role assignment exceeded the workflow deadline",
        }
    }
}

/// Races every suspension point against the cancellation token and deadline.
pub(super) struct CancellationGuard {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CancellationGuard {
    pub(super) fn new(token: CancellationToken, timeout: Option<Duration>) -> Self {
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));

        Self { token, deadline }
    }

    fn check(&self) -> Result<(), Interruption> {
        if self.token.is_cancelled() {
            return Err(Interruption::Cancelled);
        }

        if self
            .deadline
            .is_some_and(|deadline| deadline <= Instant::now())
        {
            return Err(Interruption::DeadlineExceeded);
        }

        Ok(())
    }

    pub(super) async fn run<F>(&self, future: F) -> Result<F::Output, Interruption>
    where
        F: Future,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Interruption::Cancelled),
            () = deadline => Err(Interruption::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}
