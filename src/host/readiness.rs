//! This module provides the `ReadinessGate`, a latched one-shot signal that
//! deferred actions wait on before talking to the host.
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::timeout;

/// Returned when a gate is not signalled within the allowed time.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{gate} was not signalled within {waited:?}")]
pub struct ReadinessTimeout {
    pub gate: &'static str,
    pub waited: Duration,
}

/// A one-shot readiness signal.
///
/// The gate starts closed. The first call to [`ReadinessGate::signal`]
/// opens it for good and releases every waiter; later signals change
/// nothing. A waiter therefore resumes at most once per wait, however often
/// the underlying event fires.
#[derive(Clone, Debug)]
pub struct ReadinessGate {
    name: &'static str,
    sender: Arc<watch::Sender<bool>>,
}

impl ReadinessGate {
    /// Creates a closed gate.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the signal, used in logs and timeout errors.
    pub fn new(name: &'static str) -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            name,
            sender: Arc::new(sender),
        }
    }

    /// Opens the gate.
    pub fn signal(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_open(&self) -> bool {
        *self.sender.borrow()
    }

    /// Waits until the gate is open.
    pub async fn wait(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = receiver.wait_for(|open| *open).await;
    }

    /// Waits until the gate is open, giving up after `limit`.
    ///
    /// A `limit` of `None` waits forever.
    ///
    /// # Errors
    ///
    /// Returns a `ReadinessTimeout` if the gate is still closed when `limit`
    /// elapses.
    pub async fn wait_for(&self, limit: Option<Duration>) -> Result<(), ReadinessTimeout> {
        match limit {
            Some(limit) => timeout(limit, self.wait())
                .await
                .map_err(|_| ReadinessTimeout {
                    gate: self.name,
                    waited: limit,
                }),
            None => {
                self.wait().await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signal_before_wait_releases_immediately() {
        let gate = ReadinessGate::new("tunnel connected");
        gate.signal();
        assert!(gate.is_open());
        gate.wait_for(Some(Duration::from_millis(1)))
            .await
            .expect("open gate should not time out");
    }

    #[tokio::test(start_paused = true)]
    async fn closed_gate_times_out() {
        let gate = ReadinessGate::new("tunnel connected");
        let error = gate
            .wait_for(Some(Duration::from_secs(5)))
            .await
            .expect_err("closed gate should time out");
        assert_eq!(error.gate, "tunnel connected");
        assert_eq!(error.waited, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn waiters_are_released_by_a_later_signal() {
        let gate = ReadinessGate::new("host ready");
        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.wait_for(None).await })
        };

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!waiter.is_finished());

        gate.signal();
        gate.signal();
        waiter
            .await
            .expect("waiter task")
            .expect("unbounded wait cannot time out");
    }
}
