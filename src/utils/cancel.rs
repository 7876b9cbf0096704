//! Cancellation utilities
//!
//! The abort signal callers attach to a request. Aborting drops the in-flight
//! HTTP future (closing the connection) and fails the call with
//! [`LlmError::Aborted`].

use std::future::Future;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::error::LlmError;
use crate::types::ChatStream;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Calls observing this handle stop as soon as possible.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Drive `future` unless `abort` fires first.
///
/// An already-cancelled handle wins before the future is polled.
pub async fn run_abortable<F, T>(abort: Option<&CancelHandle>, future: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    let Some(abort) = abort else {
        return future.await;
    };

    tokio::select! {
        biased;
        _ = abort.cancelled() => Err(LlmError::Aborted),
        res = future => res,
    }
}

/// Wrap a chat stream so that aborting yields one `Aborted` error and ends it.
pub fn abortable_stream(stream: ChatStream, abort: Option<CancelHandle>) -> ChatStream {
    let Some(abort) = abort else {
        return stream;
    };

    let mut inner = stream;
    let s = async_stream::stream! {
        loop {
            tokio::select! {
                biased;
                _ = abort.cancelled() => {
                    yield Err(LlmError::Aborted);
                    break;
                }
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    Box::pin(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn pre_cancelled_handle_aborts_without_polling() {
        let handle = CancelHandle::new();
        handle.cancel();

        let res = run_abortable(Some(&handle), async {
            Err::<(), _>(LlmError::HttpError("must not run".to_string()))
        })
        .await;
        assert!(matches!(res, Err(LlmError::Aborted)));
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_future() {
        let handle = CancelHandle::new();
        let trigger = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let res: Result<(), LlmError> =
            run_abortable(Some(&handle), futures::future::pending()).await;
        assert!(matches!(res, Err(LlmError::Aborted)));
    }

    #[tokio::test]
    async fn no_handle_runs_to_completion() {
        let res = run_abortable(None, async { Ok::<_, LlmError>(7) }).await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn cancel_wakes_pending_stream() {
        let pending: ChatStream = Box::pin(futures_util::stream::pending());
        let handle = CancelHandle::new();
        let mut s = abortable_stream(pending, Some(handle.clone()));

        let waiter = tokio::spawn(async move { s.next().await });
        tokio::task::yield_now().await;
        handle.cancel();

        let out = tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .expect("cancel should wake the waiting task")
            .expect("task ok");
        assert!(matches!(out, Some(Err(LlmError::Aborted))));
    }
}
