//! Cancellable tasks
//!
//! Long-running commands progress in steps and check a [`TaskHandle`]
//! between them. At most one handle is wired to the interrupt signal; wiring
//! a new one unwires the previous handle without cancelling it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Granularity at which sleeping tasks notice cancellation.
const STEP: Duration = Duration::from_millis(25);

/// Cancellation flag shared between a running loop and whoever interrupts it.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn same(&self, other: &TaskHandle) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// The slot holding the task currently wired to the interrupt signal.
/// Clones share the slot, so an interrupt can be delivered from another task
/// while a line is executing.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    wired: Arc<Mutex<Option<TaskHandle>>>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle and wire it, replacing any previously wired one.
    pub fn wire(&self) -> TaskHandle {
        let handle = TaskHandle::new();
        if let Ok(mut slot) = self.wired.lock() {
            if slot.replace(handle.clone()).is_some() {
                debug!("previous task unwired, left running");
            }
        }
        handle
    }

    /// Unwire `handle` if it is still the wired one.
    pub fn release(&self, handle: &TaskHandle) {
        if let Ok(mut slot) = self.wired.lock() {
            if slot.as_ref().is_some_and(|h| h.same(handle)) {
                *slot = None;
            }
        }
    }

    pub fn is_wired(&self) -> bool {
        self.wired.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Cancel and unwire the wired task. Returns false if nothing was wired.
    pub fn fire(&self) -> bool {
        let taken = self.wired.lock().ok().and_then(|mut s| s.take());
        match taken {
            Some(handle) => {
                debug!("interrupt cancelled wired task");
                handle.cancel();
                true
            }
            None => false,
        }
    }
}

/// Sleep for `duration` in short steps. Returns false if `handle` was
/// cancelled before the time was up.
pub async fn sleep_cancellable(handle: &TaskHandle, duration: Duration) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if handle.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        tokio::time::sleep((deadline - now).min(STEP)).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_cancels_wired() {
        let slot = InterruptHandle::new();
        let task = slot.wire();
        assert!(slot.is_wired());
        assert!(slot.fire());
        assert!(task.is_cancelled());
        assert!(!slot.is_wired());
        assert!(!slot.fire());
    }

    #[test]
    fn test_second_wire_leaves_first_running() {
        let slot = InterruptHandle::new();
        let first = slot.wire();
        let second = slot.wire();
        slot.fire();
        assert!(!first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_release_only_own_handle() {
        let slot = InterruptHandle::new();
        let first = slot.wire();
        let _second = slot.wire();
        slot.release(&first);
        assert!(slot.is_wired());
    }

    #[tokio::test]
    async fn test_sleep_runs_to_completion() {
        let handle = TaskHandle::new();
        assert!(sleep_cancellable(&handle, Duration::from_millis(30)).await);
    }

    #[tokio::test]
    async fn test_sleep_stops_when_cancelled() {
        let slot = InterruptHandle::new();
        let handle = slot.wire();
        let remote = slot.clone();
        let started = std::time::Instant::now();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            remote.fire();
        });
        assert!(!sleep_cancellable(&handle, Duration::from_secs(10)).await);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_clones_share_slot() {
        let slot = InterruptHandle::new();
        let remote = slot.clone();
        let task = slot.wire();
        assert!(remote.fire());
        assert!(task.is_cancelled());
    }
}
