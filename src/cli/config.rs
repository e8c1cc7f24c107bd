use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::dashboard::{Notice, Notifier, Screen};
use crate::models::EntityKind;
use crate::session::SessionStore;

/// Per-invocation state: the stored session and a client bound to it
pub struct CliContext {
    pub store: SessionStore,
    pub api: ApiClient,
}

impl CliContext {
    pub fn load() -> anyhow::Result<Self> {
        let store = SessionStore::from_config()?;
        let session = store.restore()?;
        let api = ApiClient::from_config(session)?;
        Ok(Self { store, api })
    }

    /// Require a signed-in session before talking to protected endpoints
    pub fn require_login(&self) -> anyhow::Result<()> {
        if !self.api.session().is_signed_in() {
            anyhow::bail!("Not logged in. Run `content-admin auth login <email> --password <password>` first");
        }
        Ok(())
    }

    /// A screen for `kind` plus the receiving end of its notices
    pub fn screen(&self, kind: EntityKind) -> (Screen, mpsc::UnboundedReceiver<Notice>) {
        let (notifier, rx) = Notifier::channel();
        (Screen::new(kind, self.api.clone(), notifier), rx)
    }

    /// Write the current session (or its absence) back to disk
    pub fn persist(&self) -> anyhow::Result<()> {
        match self.api.session().current() {
            Some(session) => self.store.save(&session)?,
            None => self.store.clear()?,
        }
        Ok(())
    }
}
