//! Bounded-concurrency capture dispatcher with graceful drain.
//!
//! Admits work through a fixed pool of slots (`tokio::sync::Semaphore`) so at
//! most `limit` captures run at once, and tracks outstanding tasks with an
//! explicit counter so `wait` blocks until every admitted capture has
//! finished. Slot release governs admission of new work; the outstanding
//! counter governs drain. The two are kept separate so a task that has already
//! freed its slot is still counted as running until its bookkeeping is done.

mod guard;

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};

use crate::target::CaptureTarget;
use guard::CompletionGuard;

/// Resolves a requested concurrency limit: `None` or `Some(0)` fall back to
/// the host's available parallelism (minimum 1).
pub fn effective_limit(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    }
}

/// Runs captures with at most `limit` in flight at once.
///
/// `R` is the task runner: invoked once per admitted target, its future is
/// spawned on the runtime. A runner error is logged and counted but never
/// propagated through [`submit`](Dispatcher::submit) or
/// [`wait`](Dispatcher::wait); a single failed capture must not abort the run.
///
/// The dispatcher holds no global state; independent dispatchers can coexist
/// in one process. It stays usable after `wait` returns, so
/// submit/wait cycles can be repeated.
pub struct Dispatcher<R> {
    runner: Arc<R>,
    slots: Arc<Semaphore>,
    outstanding: Arc<AtomicUsize>,
    idle: Arc<Notify>,
    failures: Arc<AtomicU64>,
    limit: usize,
}

impl<R, Fut> Dispatcher<R>
where
    R: Fn(CaptureTarget) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    /// Creates a dispatcher with `limit` admission slots (clamped to >= 1).
    pub fn new(limit: usize, runner: R) -> Self {
        let limit = limit.max(1);
        Self {
            runner: Arc::new(runner),
            slots: Arc::new(Semaphore::new(limit)),
            outstanding: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
            failures: Arc::new(AtomicU64::new(0)),
            limit,
        }
    }

    /// Configured concurrency limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of submitted-but-not-yet-completed captures. Includes
    /// submissions currently blocked waiting for a slot.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Number of captures whose runner returned an error so far.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Acquire)
    }

    /// Admits one capture target and starts it on the runtime.
    ///
    /// Suspends the caller until a slot is free, then spawns the runner bound
    /// to `target` and returns without waiting for it to finish. The
    /// outstanding counter is raised before blocking on a slot, so a queued
    /// submission already counts against [`wait`](Dispatcher::wait).
    pub async fn submit(&self, target: CaptureTarget) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);

        // The semaphore is never closed, so acquisition only fails on a
        // programming error.
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .expect("admission semaphore closed");

        let runner = Arc::clone(&self.runner);
        let failures = Arc::clone(&self.failures);
        let guard = CompletionGuard::new(permit, &self.outstanding, &self.idle);

        tokio::spawn(async move {
            // Moved into the task so completion is signalled exactly once,
            // on normal return and on panic alike.
            let _guard = guard;

            if let Err(err) = runner(target).await {
                failures.fetch_add(1, Ordering::AcqRel);
                tracing::error!(error = %err, "capture task failed");
            }
        });
    }

    /// Suspends until every capture submitted before this call has completed
    /// and released its slot. Returns immediately when nothing is outstanding.
    pub async fn wait(&self) {
        loop {
            // Register with the notifier before checking the counter, so a
            // completion that lands between the check and the await still
            // wakes us. `notified()` alone registers only on first poll.
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.outstanding.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}
