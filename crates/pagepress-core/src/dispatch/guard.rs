//! RAII guard that signals task completion when dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, OwnedSemaphorePermit};

/// Held by a spawned capture task for its whole lifetime. On drop it releases
/// the admission slot, then decrements the outstanding counter, then wakes
/// drain waiters when the counter hits zero. Dropping on panic keeps the
/// exactly-once completion guarantee.
pub(super) struct CompletionGuard {
    permit: Option<OwnedSemaphorePermit>,
    outstanding: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl CompletionGuard {
    pub(super) fn new(
        permit: OwnedSemaphorePermit,
        outstanding: &Arc<AtomicUsize>,
        idle: &Arc<Notify>,
    ) -> Self {
        Self {
            permit: Some(permit),
            outstanding: Arc::clone(outstanding),
            idle: Arc::clone(idle),
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // Free the slot first so a queued submission can start; that
        // submission already raised the counter, so drain cannot return
        // before the decrement below.
        drop(self.permit.take());

        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}
