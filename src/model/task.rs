//! Hand-off of background model work to the UI thread.
//!
//! Work runs on the tokio runtime and reports back over a oneshot channel.
//! The UI loop polls without blocking; tests can await the result.

use std::future::Future;

use tokio::sync::oneshot::{self, error::TryRecvError};

use super::error::ModelError;

/// The pending result of a spawned model task.
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<Result<T, ModelError>>,
}

impl<T: Send + 'static> Pending<T> {
    /// Spawn `work` on the current tokio runtime.
    ///
    /// Must be called from within a runtime context.
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = Result<T, ModelError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            // Receiver dropped means nobody wants the result
            let _ = tx.send(work.await);
        });
        Self { receiver: rx }
    }
}

impl<T> Pending<T> {
    /// Take the result if the task has finished.
    ///
    /// Returns `None` while the task is still running.
    pub fn try_take(&mut self) -> Option<Result<T, ModelError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(ModelError::Cancelled)),
        }
    }

    /// Wait for the task to finish.
    pub async fn wait(self) -> Result<T, ModelError> {
        self.receiver.await.unwrap_or(Err(ModelError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_returns_result() {
        let pending = Pending::spawn(async { Ok(42) });
        assert_eq!(pending.wait().await, Ok(42));
    }

    #[tokio::test]
    async fn test_try_take_before_and_after_completion() {
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let mut pending = Pending::spawn(async move {
            let _ = release_rx.await;
            Ok("done")
        });

        assert!(pending.try_take().is_none());

        release_tx.send(()).unwrap();
        let mut result = None;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            result = pending.try_take();
            if result.is_some() {
                break;
            }
        }
        assert_eq!(result, Some(Ok("done")));
    }

    #[tokio::test]
    async fn test_errors_are_forwarded() {
        let pending: Pending<()> = Pending::spawn(async { Err(ModelError::Cancelled) });
        assert_eq!(pending.wait().await, Err(ModelError::Cancelled));
    }
}
