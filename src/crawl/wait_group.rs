// src/crawl/wait_group.rs
// =============================================================================
// A counted join barrier for tasks that spawn more tasks.
//
// The count goes up in add(), before the new task is handed to the runtime,
// and comes down when the returned guard is dropped. Because the guard lives
// inside the task, every way out of the task (early return, error, panic)
// releases it. wait() returns once the count has reached zero, which can
// only happen after the last task in the whole tree has finished.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    outstanding: AtomicUsize,
    done: Notify,
}

/// Tracks outstanding crawl tasks
#[derive(Debug, Clone, Default)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

/// Held by a running task; dropping it marks the task finished
#[derive(Debug)]
#[must_use = "the task is counted as finished as soon as the guard is dropped"]
pub struct WaitGuard {
    inner: Arc<Inner>,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more outstanding task
    pub fn add(&self) -> WaitGuard {
        self.inner.outstanding.fetch_add(1, Ordering::SeqCst);
        WaitGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until no task is outstanding
    pub async fn wait(&self) {
        loop {
            // Register interest before looking at the count, otherwise the
            // last guard could drop between the check and the await and the
            // wakeup would be lost.
            let notified = self.inner.done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for WaitGuard {
    fn drop(&mut self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.done.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_with_nothing_outstanding_returns() {
        let group = WaitGroup::new();
        group.wait().await;
        assert_eq!(group.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_guard_drop_releases_waiter() {
        let group = WaitGroup::new();
        let guard = group.add();
        assert_eq!(group.outstanding(), 1);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            drop(guard);
        });

        group.wait().await;
        assert_eq!(group.outstanding(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_waits_for_tasks_spawned_by_tasks() {
        let group = WaitGroup::new();
        let finished = Arc::new(AtomicUsize::new(0));

        let guard = group.add();
        let inner_group = group.clone();
        let inner_finished = Arc::clone(&finished);
        tokio::spawn(async move {
            let _guard = guard;
            for _ in 0..8 {
                let child = inner_group.add();
                let finished = Arc::clone(&inner_finished);
                tokio::spawn(async move {
                    let _child = child;
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        group.wait().await;
        assert_eq!(finished.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_panicking_task_still_releases() {
        let group = WaitGroup::new();
        let guard = group.add();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            panic!("task blew up");
        });
        assert!(handle.await.is_err());
        group.wait().await;
    }
}
