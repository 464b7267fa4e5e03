//! Cancellable fire-once scheduled task
//!
//! Wraps a spawned timer task behind an arm/cancel interface so callers hold
//! no raw timer handles and a dropped owner leaves no pending work behind.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A quiet-period debouncer: `arm` schedules a task to run after the quiet
/// period, replacing any previously armed task. `cancel` (or drop) aborts the
/// pending task before it fires.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedule `task` to run once after the quiet period, cancelling any
    /// previously armed task. Re-entrant arming therefore coalesces many
    /// triggers into a single run.
    pub fn arm<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            task.await;
        }));
    }

    /// Abort the pending task, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is scheduled and has not yet run
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
