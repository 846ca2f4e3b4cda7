//! Transient "copied" indicator with a cancellable reset timer

use crate::config::DEFAULT_COPY_RESET_DELAY;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug, Default)]
struct IndicatorState {
    copied: bool,
    generation: u64,
}

/// Tracks whether something was copied recently
///
/// Each `mark_copied` owns a fresh reset task and aborts the previous one.
/// The reset only clears the flag if no newer copy happened in between,
/// so a stale timer can never switch off a newer copy's indicator.
#[derive(Debug)]
pub struct CopyIndicator {
    state: Arc<Mutex<IndicatorState>>,
    reset_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<IndicatorState>) -> MutexGuard<'_, IndicatorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CopyIndicator {
    /// Create an indicator that resets after `reset_delay`
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(IndicatorState::default())),
            reset_delay,
            pending: None,
        }
    }

    /// Delay before the flag clears
    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    /// Whether the flag is currently set
    pub fn is_copied(&self) -> bool {
        lock(&self.state).copied
    }

    /// Whether a reset task is outstanding
    pub fn has_pending_reset(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Set the flag and (re)start the reset timer
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mark_copied(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.copied = true;
            state.generation
        };

        let state = Arc::clone(&self.state);
        let delay = self.reset_delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.generation == generation {
                state.copied = false;
                trace!(generation, "copied indicator reset");
            }
        }));
    }

    /// Clear the flag and drop any pending reset
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        let mut state = lock(&self.state);
        state.generation += 1;
        state.copied = false;
    }
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_RESET_DELAY)
    }
}

impl Drop for CopyIndicator {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_flag_resets_after_delay() {
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        assert!(!indicator.is_copied());

        indicator.mark_copied();
        assert!(indicator.is_copied());

        sleep(Duration::from_millis(1900)).await;
        assert!(indicator.is_copied());

        sleep(Duration::from_millis(200)).await;
        assert!(!indicator.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_timer() {
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));

        indicator.mark_copied();
        sleep(Duration::from_millis(1500)).await;
        indicator.mark_copied();

        // The first timer would have fired at 2.0s
        sleep(Duration::from_millis(1000)).await;
        assert!(indicator.is_copied());

        sleep(Duration::from_millis(600)).await;
        assert!(!indicator.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_immediately() {
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        indicator.mark_copied();
        assert!(indicator.has_pending_reset());

        indicator.cancel();
        assert!(!indicator.is_copied());
        assert!(!indicator.has_pending_reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_reset_task() {
        let mut indicator = CopyIndicator::new(Duration::from_secs(2));
        indicator.mark_copied();
        let state = Arc::clone(&indicator.state);
        drop(indicator);

        sleep(Duration::from_secs(3)).await;
        // Task was aborted, so nothing cleared the flag
        assert!(lock(&state).copied);
        assert_eq!(Arc::strong_count(&state), 1);
    }
}
