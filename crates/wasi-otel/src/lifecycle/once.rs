//! One-shot shutdown primitive.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;

use crate::error::OtelResult;

/// Runs a teardown at most once.
///
/// The first caller of [`run`](ShutdownOnce::run) executes the teardown.
/// Concurrent callers wait on the same cell, and later callers read the
/// stored outcome. Every caller gets a clone of that single outcome.
#[derive(Debug, Default)]
pub struct ShutdownOnce {
    fired: AtomicBool,
    outcome: OnceCell<OtelResult<()>>,
}

impl ShutdownOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any caller has entered [`run`](ShutdownOnce::run).
    pub fn is_shutdown(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub async fn run<F, Fut>(&self, teardown: F) -> OtelResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = OtelResult<()>>,
    {
        self.fired.store(true, Ordering::Release);
        self.outcome.get_or_init(teardown).await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OtelError;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_runs_teardown_once() {
        let once = ShutdownOnce::new();
        let calls = AtomicUsize::new(0);
        assert!(!once.is_shutdown());

        for _ in 0..3 {
            let result = once
                .run(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await;
            assert_eq!(result, Ok(()));
        }
        assert!(once.is_shutdown());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_repeat_callers_share_failure() {
        let once = ShutdownOnce::new();
        let first = once
            .run(|| async { Err(OtelError::InternalFailure("teardown".into())) })
            .await;
        let second = once.run(|| async { Ok(()) }).await;
        assert_eq!(first, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers() {
        let once = Arc::new(ShutdownOnce::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let once = Arc::clone(&once);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    once.run(|| async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        Ok(())
                    })
                    .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
