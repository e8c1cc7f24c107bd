use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::config;

/// Spinner disclosure delay used when none is configured
pub const DEFAULT_DISCLOSURE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    /// Running, spinner still hidden
    Pending,
    /// Running past the disclosure delay, spinner shown
    PendingVisible,
}

impl ActionPhase {
    pub fn is_busy(self) -> bool {
        !matches!(self, ActionPhase::Idle)
    }

    pub fn spinner_visible(self) -> bool {
        matches!(self, ActionPhase::PendingVisible)
    }
}

/// Puts the button back to idle however the run ends, including when its future is dropped
struct ResetOnDrop<'a> {
    phase: &'a watch::Sender<ActionPhase>,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.phase.send_replace(ActionPhase::Idle);
    }
}

/// A control that runs one async operation at a time.
///
/// Activating it while an operation is in flight does nothing. The spinner only shows once the
/// operation has been running longer than the disclosure delay, so quick actions never flicker.
/// An operation that never settles keeps the button busy; there is no built-in timeout.
#[derive(Debug)]
pub struct ActionButton {
    phase: watch::Sender<ActionPhase>,
    delay: Duration,
    disabled: AtomicBool,
}

impl Default for ActionButton {
    fn default() -> Self {
        Self::new(DEFAULT_DISCLOSURE_DELAY)
    }
}

impl ActionButton {
    pub fn new(delay: Duration) -> Self {
        let (phase, _) = watch::channel(ActionPhase::Idle);
        Self { phase, delay, disabled: AtomicBool::new(false) }
    }

    /// Button using the configured disclosure delay
    pub fn from_config() -> Self {
        Self::new(Duration::from_millis(config().action.disclosure_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> ActionPhase {
        *self.phase.borrow()
    }

    /// Watch phase changes (spinner on/off, enabled/disabled)
    pub fn subscribe(&self) -> watch::Receiver<ActionPhase> {
        self.phase.subscribe()
    }

    /// Disabled by the caller, independent of any run in progress
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst) || self.phase().is_busy()
    }

    /// Run `operation` if the button is idle and enabled.
    ///
    /// Returns `None` without polling `operation` when the button is busy or disabled;
    /// otherwise returns the operation's own output, errors included.
    pub async fn run<F, T>(&self, operation: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        if self.disabled.load(Ordering::SeqCst) {
            tracing::debug!("Action ignored: button disabled");
            return None;
        }

        let claimed = self.phase.send_if_modified(|phase| {
            if *phase == ActionPhase::Idle {
                *phase = ActionPhase::Pending;
                true
            } else {
                false
            }
        });
        if !claimed {
            tracing::debug!("Action ignored: previous activation still pending");
            return None;
        }

        let _reset = ResetOnDrop { phase: &self.phase };

        tokio::pin!(operation);
        let disclose = tokio::time::sleep(self.delay);
        tokio::pin!(disclose);

        let output = tokio::select! {
            biased;
            output = &mut operation => output,
            _ = &mut disclose => {
                self.phase.send_if_modified(|phase| {
                    if *phase == ActionPhase::Pending {
                        *phase = ActionPhase::PendingVisible;
                        true
                    } else {
                        false
                    }
                });
                tracing::debug!("Action still pending after {:?}, showing spinner", self.delay);
                operation.await
            }
        };

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_quick_action_never_shows_spinner() {
        let button = Arc::new(ActionButton::new(Duration::from_millis(300)));

        let task = {
            let button = Arc::clone(&button);
            tokio::spawn(async move {
                button.run(tokio::time::sleep(Duration::from_millis(100))).await
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(button.phase(), ActionPhase::Pending);
        assert!(button.is_disabled());

        assert!(task.await.unwrap().is_some());
        assert_eq!(button.phase(), ActionPhase::Idle);

        // Past the disclosure delay the cancelled timer must not flip the phase
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(button.phase(), ActionPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_action_shows_spinner_then_resets() {
        let button = Arc::new(ActionButton::new(Duration::from_millis(300)));

        let task = {
            let button = Arc::clone(&button);
            tokio::spawn(async move {
                button
                    .run(async {
                        tokio::time::sleep(Duration::from_millis(1000)).await;
                        Err::<(), _>("boom")
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(button.phase(), ActionPhase::Pending);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(button.phase(), ActionPhase::PendingVisible);

        let output = task.await.unwrap();
        assert_eq!(output, Some(Err("boom")));
        assert_eq!(button.phase(), ActionPhase::Idle);
        assert!(!button.is_disabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_activation_is_noop_while_pending() {
        let button = Arc::new(ActionButton::default());

        let first = {
            let button = Arc::clone(&button);
            tokio::spawn(async move { button.run(tokio::time::sleep(Duration::from_millis(500))).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut polled = false;
        let second = button
            .run(async {
                polled = true;
            })
            .await;
        assert!(second.is_none());
        assert!(!polled);

        assert!(first.await.unwrap().is_some());
        assert_eq!(button.run(async { 7 }).await, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_run_resets_to_idle() {
        let button = ActionButton::default();
        let result = tokio::time::timeout(
            Duration::from_millis(400),
            button.run(std::future::pending::<()>()),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(button.phase(), ActionPhase::Idle);
    }

    #[tokio::test]
    async fn test_externally_disabled_button_ignores_activation() {
        let button = ActionButton::default();
        button.set_disabled(true);
        assert!(button.run(async { 1 }).await.is_none());
        button.set_disabled(false);
        assert_eq!(button.run(async { 1 }).await, Some(1));
    }
}
