//! Debounce channel: run an action once input has been quiet for a delay.
//!
//! Each `schedule` call supersedes the previous registration. A registration
//! fires at most once, and only if it is still the latest when its timer
//! elapses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A single logical debounce channel. Owns at most one pending timer.
#[derive(Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` to run after `delay` unless superseded first.
    ///
    /// Outside a Tokio runtime the action is dropped with a warning.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("Debounce scheduled outside a runtime; dropping action");
            return;
        };

        let latest = self.generation.clone();
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) == generation {
                action();
            } else {
                debug!("Debounce generation {} superseded", generation);
            }
        }));
    }

    /// Drop any pending registration without running it.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// Whether a registration is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
