//! Network readiness signal.
//!
//! A level-triggered flag with blocking waits. The connectivity collaborator
//! sets it when the station has an address and clears it when the link
//! drops; the listener waits on it before binding.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Shared "network path is usable" flag.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use joydrive::connectivity::ConnectivitySignal;
///
/// let signal = Arc::new(ConnectivitySignal::new());
/// assert!(!signal.wait_ready_timeout(Duration::from_millis(1)));
///
/// let setter = Arc::clone(&signal);
/// std::thread::spawn(move || setter.set_ready());
/// assert!(signal.wait_ready_timeout(Duration::from_secs(5)));
/// ```
#[derive(Debug, Default)]
pub struct ConnectivitySignal {
    ready: Mutex<bool>,
    changed: Condvar,
}

impl ConnectivitySignal {
    /// Creates a signal in the not-ready state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the network ready and wakes every waiter.
    pub fn set_ready(&self) {
        *self.ready.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.changed.notify_all();
    }

    /// Marks the network not ready.
    pub fn clear(&self) {
        *self.ready.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    /// Current state without blocking.
    pub fn is_ready(&self) -> bool {
        *self.ready.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until ready.
    pub fn wait_ready(&self) {
        let guard = self.ready.lock().unwrap_or_else(PoisonError::into_inner);
        let _ready = self
            .changed
            .wait_while(guard, |ready| !*ready)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Blocks until ready or `timeout` elapses. Returns the state at return.
    pub fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut ready = self.ready.lock().unwrap_or_else(PoisonError::into_inner);
        while !*ready {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            ready = self
                .changed
                .wait_timeout(ready, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_not_ready() {
        assert!(!ConnectivitySignal::new().is_ready());
    }

    #[test]
    fn set_and_clear() {
        let signal = ConnectivitySignal::new();
        signal.set_ready();
        assert!(signal.is_ready());
        assert!(signal.wait_ready_timeout(Duration::ZERO));
        signal.clear();
        assert!(!signal.is_ready());
    }

    #[test]
    fn timeout_expires_when_never_set() {
        let signal = ConnectivitySignal::new();
        let started = Instant::now();
        assert!(!signal.wait_ready_timeout(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn waiters_wake_on_set() {
        let signal = Arc::new(ConnectivitySignal::new());
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let s = Arc::clone(&signal);
                thread::spawn(move || s.wait_ready())
            })
            .collect();
        thread::sleep(Duration::from_millis(20));
        signal.set_ready();
        for w in waiters {
            w.join().unwrap();
        }
    }
}
