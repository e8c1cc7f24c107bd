pub mod store;

pub use store::SessionStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{AdminError, Result};

/// Avatar shown when the backend sends none
pub const DEFAULT_PHOTO: &str = "/avatars/neutral.jpg";

pub const SUPER_ADMIN_REQUIRED: &str = "Only Super Admins have this privilege. Please contact support.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SuperAdmin => "SuperAdmin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.replace(['_', ' ', '-'], "").to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::SuperAdmin),
            _ => Err(AdminError::validation(
                format!("Unknown role '{}'", s),
                [("role".to_string(), "Role must be Admin or SuperAdmin.".to_string())].into(),
            )),
        }
    }
}

/// The signed-in admin's identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub admin_id: String,
    pub name: String,
    pub email: String,
    pub photo: String,
    #[serde(default)]
    pub role: Role,
}

impl Session {
    /// Build from a login response's token and `admin` object
    pub fn from_login(token: impl Into<String>, admin: &Value) -> Self {
        let text = |key: &str| admin.get(key).and_then(Value::as_str).unwrap_or_default().to_string();

        let admin_id = match admin.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        let name = format!("{} {}", text("first_name"), text("last_name")).trim().to_string();
        let photo = match text("photo") {
            p if p.is_empty() => DEFAULT_PHOTO.to_string(),
            p => p,
        };
        let role = text("role").parse().unwrap_or_default();

        Self { token: token.into(), admin_id, name, email: text("email"), photo, role }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// Process-wide session, injected wherever identity is needed.
///
/// Updates go out over a watch channel so the API client, screens and the on-disk store all
/// observe sign-in, profile edits and sign-out without polling.
#[derive(Debug, Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<Option<Arc<Session>>>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_session(session: Session) -> Self {
        let ctx = Self::new();
        ctx.sign_in(session);
        ctx
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.tx.subscribe()
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!("Signed in as {} ({})", session.email, session.role.as_str());
        self.tx.send_replace(Some(Arc::new(session)));
    }

    /// Refresh the displayed identity after the admin edits their own profile
    pub fn update_profile(&self, name: Option<String>, email: Option<String>, photo: Option<String>) {
        self.tx.send_if_modified(|current| {
            let Some(session) = current else {
                return false;
            };
            let mut next = (**session).clone();
            if let Some(name) = name {
                next.name = name;
            }
            if let Some(email) = email {
                next.email = email;
            }
            if let Some(photo) = photo {
                next.photo = photo;
            }
            if next == **session {
                return false;
            }
            *current = Some(Arc::new(next));
            true
        });
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    pub fn require_session(&self) -> Result<Arc<Session>> {
        self.current().ok_or_else(|| AdminError::session("Not signed in"))
    }

    pub fn require_super_admin(&self) -> Result<Arc<Session>> {
        let session = self.require_session()?;
        if !session.is_super_admin() {
            return Err(AdminError::forbidden(SUPER_ADMIN_REQUIRED));
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_login_defaults() {
        let session = Session::from_login(
            "tok",
            &json!({"id": 4, "first_name": "Ada", "last_name": "", "email": "ada@example.com"}),
        );
        assert_eq!(session.admin_id, "4");
        assert_eq!(session.name, "Ada");
        assert_eq!(session.photo, DEFAULT_PHOTO);
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("SuperAdmin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_require_super_admin() {
        let ctx = SessionContext::new();
        assert!(matches!(ctx.require_super_admin(), Err(AdminError::Session(_))));

        ctx.sign_in(Session::from_login("t", &json!({"id": 1, "role": "Admin"})));
        let err = ctx.require_super_admin().unwrap_err();
        assert_eq!(err.to_string(), SUPER_ADMIN_REQUIRED);

        ctx.sign_in(Session::from_login("t", &json!({"id": 1, "role": "SuperAdmin"})));
        assert!(ctx.require_super_admin().is_ok());
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let ctx = SessionContext::new();
        let mut rx = ctx.subscribe();

        ctx.sign_in(Session::from_login("t", &json!({"id": 1, "first_name": "A"})));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.name.clone()), Some("A".to_string()));

        ctx.update_profile(Some("B".to_string()), None, None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.name.clone()), Some("B".to_string()));

        ctx.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
