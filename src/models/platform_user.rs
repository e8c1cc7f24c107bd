use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};
use crate::table::ColumnDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl Entity for PlatformUser {
    const KIND: EntityKind = EntityKind::Users;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

pub fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::field("first_name", "First Name").searchable(),
        ColumnDescriptor::field("last_name", "Last Name").searchable(),
        ColumnDescriptor::field("email", "Email").searchable(),
        ColumnDescriptor::field("status", "Status"),
        ColumnDescriptor::flag("email_verified", "Email Verified", "Yes", "No"),
        ColumnDescriptor::date("last_login", "Last Login"),
    ]
}
