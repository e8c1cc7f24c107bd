use serde::{Deserialize, Serialize};

use super::validate::{FieldErrors, Validate, MIN_PASSWORD_LEN};
use super::{Entity, EntityKind};
use crate::error::Result;
use crate::session::Role;
use crate::records::Record;
use crate::table::{ColumnDescriptor, LookupTable};

pub const CREATOR_LOOKUP: &str = "admins";
pub const UNKNOWN_CREATOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<serde_json::Value>,
}

impl Entity for Admin {
    const KIND: EntityKind = EntityKind::Admins;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

/// New admin account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Validate for AdminInput {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("first_name", &self.first_name, "First name is required.")
            .required("last_name", &self.last_name, "Last name is required.")
            .required("email", &self.email, "Email is required.")
            .email("email", &self.email, "Enter a valid email address.")
            .min_len("password", &self.password, MIN_PASSWORD_LEN, "Password must be at least 6 characters.");
        errors.finish("Please fix the highlighted fields.")
    }
}

/// Profile or role edit of an existing admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Admin> for AdminUpdate {
    fn from(admin: &Admin) -> Self {
        Self {
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            email: admin.email.clone(),
            role: admin.role,
        }
    }
}

impl Validate for AdminUpdate {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("first_name", &self.first_name, "First name is required.")
            .required("last_name", &self.last_name, "Last name is required.")
            .required("email", &self.email, "Email is required.")
            .email("email", &self.email, "Enter a valid email address.");
        errors.finish("Please fix the highlighted fields.")
    }
}

pub fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::field("first_name", "First Name").searchable(),
        ColumnDescriptor::field("last_name", "Last Name").searchable(),
        ColumnDescriptor::field("email", "Email").searchable(),
        ColumnDescriptor::field("role", "Role"),
        ColumnDescriptor::lookup("created_by_name", "Created By", "created_by", CREATOR_LOOKUP),
    ]
}

/// Admin id to "first last", for the Created By column
pub fn creator_lookup(admins: &[Record]) -> LookupTable {
    let mut table = LookupTable::new(UNKNOWN_CREATOR);
    for admin in admins {
        if let Some(id) = admin.id() {
            table.insert(id, format!("{} {}", admin.text("first_name"), admin.text("last_name")).trim().to_string());
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AdminInput {
        AdminInput {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_creator_lookup_placeholder() {
        let admins = vec![Record::from_json(serde_json::json!({"id": 3, "first_name": "Ada", "last_name": "L"})).unwrap()];
        let table = creator_lookup(&admins);
        assert_eq!(table.get("3"), Some("Ada L"));
        assert_eq!(table.get("4"), None);
        assert_eq!(table.placeholder(), UNKNOWN_CREATOR);
    }

    #[test]
    fn test_valid_admin_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_bad_email_and_short_password() {
        let mut bad = input();
        bad.email = "ada@".into();
        bad.password = "123".into();
        let err = bad.validate().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["email"], "Enter a valid email address.");
        assert_eq!(fields["password"], "Password must be at least 6 characters.");
    }

    #[test]
    fn test_role_serializes_as_backend_value() {
        let body = serde_json::to_value(AdminUpdate::from(&Admin {
            id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.co".into(),
            role: Role::SuperAdmin,
            created_at: None,
            created_by: None,
            updated_at: None,
            updated_by: None,
        }))
        .unwrap();
        assert_eq!(body["role"], "SuperAdmin");
    }
}
