use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

use super::{Session, SessionContext};
use crate::config::config;
use crate::error::{AdminError, Result};

const SESSION_FILE: &str = "session.json";
const TOKEN_MIRROR_FILE: &str = "access_token";

/// Token copy with its own expiry, read by tools that only need the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenMirror {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Session persisted as JSON files in a config directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    mirror_days: i64,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), mirror_days: config().session.token_mirror_days }
    }

    /// Store in `ADMIN_SESSION_DIR`, or `~/.config/content-admin`
    pub fn from_config() -> Result<Self> {
        let dir = match &config().session.dir {
            Some(dir) => dir.clone(),
            None => {
                let home = std::env::var("HOME")
                    .map_err(|_| AdminError::session("HOME environment variable not set"))?;
                PathBuf::from(home).join(".config").join("content-admin")
            }
        };
        Ok(Self::new(dir))
    }

    pub fn with_mirror_days(mut self, days: i64) -> Self {
        self.mirror_days = days;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.dir.join(SESSION_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.dir.join(SESSION_FILE), serde_json::to_string_pretty(session)?)?;

        let mirror = TokenMirror {
            token: session.token.clone(),
            expires_at: Utc::now() + Duration::days(self.mirror_days),
        };
        fs::write(self.dir.join(TOKEN_MIRROR_FILE), serde_json::to_string(&mirror)?)?;
        tracing::debug!("Saved session to {}", self.dir.display());
        Ok(())
    }

    /// The mirrored token, unless it has expired
    pub fn mirrored_token(&self) -> Result<Option<String>> {
        let path = self.dir.join(TOKEN_MIRROR_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let mirror: TokenMirror = serde_json::from_str(&fs::read_to_string(path)?)?;
        if mirror.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(mirror.token))
    }

    pub fn clear(&self) -> Result<()> {
        for file in [SESSION_FILE, TOKEN_MIRROR_FILE] {
            let path = self.dir.join(file);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        tracing::debug!("Cleared session in {}", self.dir.display());
        Ok(())
    }

    /// Context seeded from disk
    pub fn restore(&self) -> Result<SessionContext> {
        let ctx = SessionContext::new();
        if let Some(session) = self.load()? {
            ctx.sign_in(session);
        }
        Ok(ctx)
    }

    /// Keep the files in step with the context until every sender is gone
    pub fn persist_changes(self, ctx: &SessionContext) -> JoinHandle<()> {
        let mut rx = ctx.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let current = rx.borrow_and_update().clone();
                let outcome = match current {
                    Some(session) => self.save(&session),
                    None => self.clear(),
                };
                if let Err(e) = outcome {
                    tracing::error!("Failed to persist session: {}", e);
                }
            }
        })
    }
}
