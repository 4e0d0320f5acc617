//! Cross-thread running flag
//!
//! A [`RunSignal`] starts out running and can be stopped exactly once from any
//! thread. Waiters are woken through a condition variable instead of spinning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Inner {
    running: AtomicBool,
    gate: Mutex<()>,
    changed: Condvar,
}

/// Shared running/stopped flag
#[derive(Debug, Clone)]
pub struct RunSignal {
    inner: Arc<Inner>,
}

impl Default for RunSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSignal {
    /// Create a signal in the running state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                running: AtomicBool::new(true),
                gate: Mutex::new(()),
                changed: Condvar::new(),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Move to the stopped state and wake every waiter
    ///
    /// Returns true if this call performed the transition.
    pub fn request_stop(&self) -> bool {
        let was_running = self.inner.running.swap(false, Ordering::AcqRel);
        // Taking the gate orders the store before any waiter's predicate check
        let _gate = self
            .inner
            .gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.changed.notify_all();
        was_running
    }

    /// Block until stopped or until `timeout` elapses
    ///
    /// Returns true if the signal is stopped.
    pub fn wait_stopped(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut gate = self
            .inner
            .gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while self.is_running() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            gate = match self.inner.changed.wait_timeout(gate, deadline - now) {
                Ok((gate, _)) => gate,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }

        !self.is_running()
    }
}
