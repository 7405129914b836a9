//! Busy indicator with guaranteed release

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Shared flag that is set while an action is running
///
/// Advisory only: the controller's single-consumer queue is what keeps
/// actions from interleaving.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped
    pub fn acquire(&self) -> BusyGuard {
        debug!("BusyFlag::acquire: called");
        self.inner.store(true, Ordering::SeqCst);
        BusyGuard {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Clears the busy flag on drop, on every exit path including panics
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        debug!("BusyGuard::drop: clearing busy flag");
        self.inner.store(false, Ordering::SeqCst);
    }
}
