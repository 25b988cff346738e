use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// State of the process-wide refresh timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRefreshState {
    Stopped,
    Running { interval: Duration },
}

/// Owns the single repeating reload timer.
///
/// `start` always cancels any live schedule before creating a new one, so
/// two timers can never coexist. Ticks carry the generation they were
/// scheduled under; ticks from a cancelled schedule are discarded via
/// [`AutoRefresh::accepts`], which closes the race between an aborted task
/// and messages it already sent.
#[derive(Debug)]
pub struct AutoRefresh {
    state: AutoRefreshState,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Default for AutoRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoRefresh {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AutoRefreshState::Stopped,
            generation: 0,
            handle: None,
        }
    }

    /// Starts a repeating schedule, cancelling any existing one first.
    /// `on_tick` receives the schedule's generation on every firing.
    pub fn start<F>(&mut self, interval: Duration, on_tick: F)
    where
        F: Fn(u64) + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        debug!(interval_secs = interval.as_secs(), generation, "Auto-refresh started");

        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                on_tick(generation);
            }
        }));
        self.state = AutoRefreshState::Running { interval };
    }

    /// Stops the timer. Returns `true` when a running schedule was
    /// cancelled, `false` when already stopped (the no-op case: the caller
    /// must not notify).
    pub fn stop(&mut self) -> bool {
        if self.state == AutoRefreshState::Stopped {
            return false;
        }
        self.cancel();
        self.state = AutoRefreshState::Stopped;
        debug!("Auto-refresh stopped");
        true
    }

    /// Whether a tick from `generation` belongs to the live schedule.
    #[must_use]
    pub fn accepts(&self, generation: u64) -> bool {
        matches!(self.state, AutoRefreshState::Running { .. }) && generation == self.generation
    }

    #[must_use]
    pub const fn state(&self) -> AutoRefreshState {
        self.state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, AutoRefreshState::Running { .. })
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_transitions_to_running() {
        let mut timer = AutoRefresh::new();
        assert_eq!(timer.state(), AutoRefreshState::Stopped);

        timer.start(Duration::from_secs(30), |_| {});
        assert_eq!(
            timer.state(),
            AutoRefreshState::Running {
                interval: Duration::from_secs(30)
            }
        );
    }

    #[tokio::test]
    async fn test_restart_invalidates_previous_schedule() {
        let mut timer = AutoRefresh::new();
        timer.start(Duration::from_secs(30), |_| {});
        let first_generation = 1;
        assert!(timer.accepts(first_generation));

        timer.start(Duration::from_secs(10), |_| {});
        assert!(!timer.accepts(first_generation));
        assert!(timer.accepts(first_generation + 1));
    }

    #[tokio::test]
    async fn test_stop_when_stopped_is_noop() {
        let mut timer = AutoRefresh::new();
        assert!(!timer.stop());

        timer.start(Duration::from_secs(30), |_| {});
        assert!(timer.stop());
        assert!(!timer.stop());
    }

    #[tokio::test]
    async fn test_stale_ticks_rejected_after_stop() {
        let mut timer = AutoRefresh::new();
        timer.start(Duration::from_secs(30), |_| {});
        timer.stop();
        assert!(!timer.accepts(1));
    }

    #[tokio::test]
    async fn test_ticks_carry_generation() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut timer = AutoRefresh::new();
        timer.start(Duration::from_millis(5), move |generation| {
            let _ = tx.send(generation);
        });

        let generation = rx.recv().await.unwrap();
        assert!(timer.accepts(generation));
    }
}
