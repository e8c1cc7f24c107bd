use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A transient user-facing message (toast)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sends notices to whoever renders them; also mirrors each one to the log
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notice>>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Log-only notifier
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(NoticeLevel::Info, message.into());
    }

    fn emit(&self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Error => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        if let Some(tx) = &self.tx {
            // Receiver gone means nobody is rendering; nothing to do
            let _ = tx.send(Notice { level, message });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_delivers_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Deck created!");
        notifier.error("Failed to delete deck");

        assert_eq!(rx.try_recv().unwrap(), Notice { level: NoticeLevel::Success, message: "Deck created!".into() });
        assert_eq!(rx.try_recv().unwrap().level, NoticeLevel::Error);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_silent_and_orphaned_notifiers_do_not_fail() {
        Notifier::silent().info("nobody listening");

        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.error("receiver gone");
    }
}
