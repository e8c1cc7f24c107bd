use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::action::ActionButton;
use crate::error::Result;

/// A confirmation dialog whose confirm control is an [`ActionButton`].
///
/// The dialog stays open when the confirmed operation fails, so the user can retry, and
/// closes once it succeeds.
#[derive(Debug)]
pub struct Confirmation {
    title: String,
    message: String,
    open: AtomicBool,
    button: ActionButton,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, message: impl Into<String>, button: ActionButton) -> Self {
        Self { title: title.into(), message: message.into(), open: AtomicBool::new(false), button }
    }

    /// "Are you sure?" dialog for deleting `name`
    pub fn delete(name: &str, button: ActionButton) -> Self {
        Self::new(
            "Are you absolutely sure?",
            format!("This action cannot be undone. This will permanently delete {}.", name),
            button,
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn button(&self) -> &ActionButton {
        &self.button
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Dismiss; ignored while the confirmed operation is still running
    pub fn cancel(&self) -> bool {
        if self.button.phase().is_busy() {
            return false;
        }
        self.open.store(false, Ordering::SeqCst);
        true
    }

    /// Run `operation` through the button. `None` when the dialog is closed or already busy.
    pub async fn confirm<F, T>(&self, operation: F) -> Option<Result<T>>
    where
        F: Future<Output = Result<T>>,
    {
        if !self.is_open() {
            return None;
        }
        let outcome = self.button.run(operation).await?;
        if outcome.is_ok() {
            self.open.store(false, Ordering::SeqCst);
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_closed_dialog_ignores_confirm() {
        let dialog = Confirmation::delete("deck Spanish", ActionButton::default());
        assert!(dialog.confirm(async { Ok(()) }).await.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_dialog_open() {
        let dialog = Confirmation::delete("deck Spanish", ActionButton::default());
        dialog.open();

        let failed = dialog.confirm(async { Err::<(), _>(AdminError::api(500, "boom")) }).await;
        assert!(matches!(failed, Some(Err(_))));
        assert!(dialog.is_open());

        let ok = dialog.confirm(async { Ok(1) }).await;
        assert!(matches!(ok, Some(Ok(1))));
        assert!(!dialog.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_blocked_while_pending() {
        let dialog = Confirmation::delete("admin Ada", ActionButton::default());
        dialog.open();

        let (first, cancelled) = tokio::join!(
            dialog.confirm(async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            }),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                dialog.cancel()
            }
        );
        assert!(!cancelled);
        assert!(matches!(first, Some(Ok(()))));
    }
}
