use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::validate::{FieldErrors, Validate, MIN_PASSWORD_LEN};
use crate::session::Session;

pub const LOGIN_PATH: &str = "/api/admins/login/";
pub const LOGOUT_PATH: &str = "/api/admins/logout/";
pub const PASSWORD_RESET_PATH: &str = "/api/admins/password/reset/";
pub const PASSWORD_RESET_DONE_PATH: &str = "/api/admins/password/reset/done/";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .email("email", &self.email, "Please enter a valid email address.")
            .required("email", &self.email, "Please enter a valid email address.")
            .min_len("password", &self.password, MIN_PASSWORD_LEN, "Password must be at least 6 characters.");
        errors.finish("Please check your email and password.")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

impl Validate for PasswordResetRequest {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("email", &self.email, "Please enter a registered email address.")
            .email("email", &self.email, "Please enter a registered email address.");
        errors.finish("Please enter a registered email address.")
    }
}

/// Second step of a reset: the uid/token pair from the emailed link plus the new password
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetConfirm {
    pub uid: String,
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}

impl Validate for PasswordResetConfirm {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.uid.trim().is_empty() || self.token.trim().is_empty() {
            errors.add("token", "Invalid or missing token or uid");
        }
        errors
            .min_len("password", &self.password, MIN_PASSWORD_LEN, "Password must be at least 6 characters.")
            .min_len(
                "password_confirm",
                &self.password_confirm,
                MIN_PASSWORD_LEN,
                "Confirm Password must be at least 6 characters.",
            );
        if self.password != self.password_confirm {
            errors.add("password_confirm", "Passwords do not match.");
        }
        errors.finish("Please fix the highlighted fields.")
    }
}

impl ApiClient {
    /// Authenticate and publish the new session
    pub async fn login(&self, email: &str, password: &str) -> Result<Arc<Session>> {
        let request = LoginRequest { email: email.trim().to_string(), password: password.to_string() };
        request.validate()?;

        let reply = self.post(LOGIN_PATH, &request).await?;
        let token = reply
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AdminError::session("Login response did not include a token"))?;
        let admin = reply.get("admin").cloned().unwrap_or(Value::Null);

        self.session().sign_in(Session::from_login(token, &admin));
        self.session().require_session()
    }

    /// End the session on the backend, then locally. A failed call leaves the session in place.
    pub async fn logout(&self) -> Result<()> {
        self.post_empty(LOGOUT_PATH).await?;
        self.session().sign_out();
        Ok(())
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        let request = PasswordResetRequest { email: email.trim().to_string() };
        request.validate()?;
        self.post(PASSWORD_RESET_PATH, &request).await?;
        tracing::info!("Password reset requested for {}", request.email);
        Ok(())
    }

    pub async fn confirm_password_reset(&self, confirm: &PasswordResetConfirm) -> Result<()> {
        confirm.validate()?;
        self.post(PASSWORD_RESET_DONE_PATH, confirm).await?;
        tracing::info!("Password reset completed");
        Ok(())
    }
}
