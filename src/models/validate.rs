use std::collections::HashMap;

use crate::error::{AdminError, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Client-side checks run before a payload is sent
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Collects per-field messages; the first message recorded for a field wins
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, message);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.add(field, message);
        }
        self
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.chars().count() < min {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok when nothing was recorded, otherwise a validation error carrying every field message
    pub fn finish(self, message: &str) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        // A single failing field reads better as its own message
        let message = if self.errors.len() == 1 {
            self.errors.values().next().cloned().unwrap_or_else(|| message.to_string())
        } else {
            message.to_string()
        };
        Err(AdminError::validation(message, self.errors))
    }
}

/// local@domain.tld, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_single_error_becomes_message() {
        let mut errors = FieldErrors::new();
        errors.required("name", " ", "Deck name is required.");
        let err = errors.finish("Please fix the highlighted fields.").unwrap_err();
        assert_eq!(err.to_string(), "Deck name is required.");
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors
            .required("email", "", "Email is required.")
            .email("email", "", "Enter a valid email address.")
            .required("first_name", "", "First name is required.");
        let err = errors.finish("Please fix the highlighted fields.").unwrap_err();
        assert_eq!(err.to_string(), "Please fix the highlighted fields.");
        assert_eq!(err.field_errors().unwrap()["email"], "Email is required.");
    }
}
