// Client-side error types
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::records::RecordError;
use crate::table::TableError;

/// Errors surfaced by the admin client
///
/// Backend and transport failures end up as a single user-visible notice; validation
/// failures never reach the network and carry per-field messages.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // Transport failure (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Non-2xx response from the backend
    #[error("{message}")]
    Api { status: u16, message: String },

    // Client-side form validation, raised before any request
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("{0}")]
    Forbidden(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        AdminError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        AdminError::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AdminError::Forbidden(message.into())
    }

    pub fn session(message: impl Into<String>) -> Self {
        AdminError::Session(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AdminError::NotFound(message.into())
    }

    /// HTTP status for backend errors, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdminError::Api { status, .. } => Some(*status),
            AdminError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Network(_) => "NETWORK_ERROR",
            AdminError::Api { status, .. } => match status {
                400 => "BAD_REQUEST",
                401 => "UNAUTHORIZED",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                422 => "UNPROCESSABLE_ENTITY",
                s if *s >= 500 => "SERVER_ERROR",
                _ => "API_ERROR",
            },
            AdminError::Validation { .. } => "VALIDATION_ERROR",
            AdminError::Forbidden(_) => "FORBIDDEN",
            AdminError::Session(_) => "SESSION_ERROR",
            AdminError::NotFound(_) => "NOT_FOUND",
            AdminError::Url(_) => "INVALID_URL",
            AdminError::Io(_) => "IO_ERROR",
            AdminError::Json(_) => "INVALID_JSON",
            AdminError::Record(_) => "INVALID_RECORD",
            AdminError::Table(_) => "TABLE_ERROR",
        }
    }

    /// Field-level messages for validation failures
    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            AdminError::Validation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// Message for a notice, preferring the backend's own wording and falling back to
    /// the caller's generic text.
    pub fn notice_message(&self, fallback: &str) -> String {
        match self {
            AdminError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            AdminError::Validation { message, .. } => message.clone(),
            AdminError::Forbidden(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.to_string(),
            "error_code": self.error_code(),
        });

        if let Some(status) = self.status_code() {
            response["status"] = json!(status);
        }
        if let Some(field_errors) = self.field_errors() {
            response["field_errors"] = json!(field_errors);
        }

        response
    }
}
