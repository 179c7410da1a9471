//! Deadline and cancellation shared by every RPC call of one lookup.
//!
//! The deadline is absolute: a second call made after a slow first call only
//! gets whatever time is left.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Bounds a sequence of RPC calls with one deadline and one cancel signal.
#[derive(Debug, Clone)]
pub struct CallScope {
    deadline: Instant,
    cancel: watch::Receiver<bool>,
}

/// Fires the cancel signal of the [`CallScope`] it was created with.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Cancels every call running under the scope. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallScope {
    /// Creates a scope ending at `deadline`.
    pub fn new(deadline: Instant) -> (Self, Canceller) {
        let (tx, cancel) = watch::channel(false);
        (Self { deadline, cancel }, Canceller { tx })
    }

    /// Creates a scope ending `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> (Self, Canceller) {
        Self::new(Instant::now() + timeout)
    }

    /// The absolute deadline.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Completes once the scope is cancelled.
    ///
    /// Never completes if the [`Canceller`] is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.cancel.clone();
        let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}
