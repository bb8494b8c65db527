//! Cancellation and deadline of a pipeline run.

use std::{future::Future, time::Duration};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{PipelineError, PipelineStage, Result};

/// Cooperative cancellation for one run, checked at every stage boundary.
#[derive(Debug, Clone)]
pub struct RunControl {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RunControl {
    /// Control starting now, with an optional maximum duration.
    pub fn new(token: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            token,
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    /// Control which is never cancelled.
    pub fn unbounded() -> Self {
        Self::new(CancellationToken::new(), None)
    }

    /// Fails if the run was cancelled or its deadline has passed.
    pub fn check(&self, stage: PipelineStage) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(PipelineError::Cancelled { stage });
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(PipelineError::TimedOut { stage })
            }
            _ => Ok(()),
        }
    }

    /// Run a stage, abandoning it on cancellation or deadline.
    ///
    /// Abandoning drops the stage future, which kills any child process it owns.
    pub async fn guard<T, F>(&self, stage: PipelineStage, stage_future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check(stage)?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(PipelineError::Cancelled { stage }),
            _ = deadline => Err(PipelineError::TimedOut { stage }),
            result = stage_future => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guard_passes_result_through() {
        let control = RunControl::unbounded();

        let value = control
            .guard(PipelineStage::Clone, async { Ok(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);

        let err = control
            .guard::<(), _>(PipelineStage::Fetch, async {
                Err(PipelineError::ProcessFailure { code: Some(2) })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::ProcessFailure { code: Some(2) }));
    }

    #[tokio::test]
    async fn cancelled_before_stage() {
        let token = CancellationToken::new();
        let control = RunControl::new(token.clone(), None);
        token.cancel();

        assert!(matches!(
            control.check(PipelineStage::Checkout),
            Err(PipelineError::Cancelled {
                stage: PipelineStage::Checkout
            })
        ));
    }

    #[tokio::test]
    async fn cancelled_during_stage() {
        let token = CancellationToken::new();
        let control = RunControl::new(token.clone(), None);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let err = control
            .guard::<(), _>(PipelineStage::Clone, std::future::pending())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Cancelled {
                stage: PipelineStage::Clone
            }
        ));
    }

    #[tokio::test]
    async fn deadline_during_stage() {
        let control = RunControl::new(CancellationToken::new(), Some(Duration::from_millis(20)));

        let err = control
            .guard::<(), _>(PipelineStage::Verify, std::future::pending())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TimedOut {
                stage: PipelineStage::Verify
            }
        ));
        assert!(control.check(PipelineStage::Verify).is_err());
    }
}
