pub mod admin;
pub mod card_content;
pub mod category;
pub mod deck;
pub mod platform_user;
pub mod validate;

pub use admin::{Admin, AdminInput, AdminUpdate};
pub use card_content::{CardContent, CardInput, CardStatus};
pub use category::{Category, CategoryInput};
pub use deck::{Deck, DeckInput};
pub use platform_user::PlatformUser;
pub use validate::{FieldErrors, Validate};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::config::config;
use crate::error::{AdminError, Result};
use crate::records::Record;
use crate::table::{ColumnDescriptor, PageSize, SortState, TableView};
use crate::types::Operation;

/// The administered entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Admins,
    Users,
    Decks,
    Categories,
    Cards,
}

/// Where a freshly created record lands in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
    /// The list is fetched again instead
    Refetch,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Admins,
        EntityKind::Users,
        EntityKind::Decks,
        EntityKind::Categories,
        EntityKind::Cards,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Admins => "admins",
            EntityKind::Users => "users",
            EntityKind::Decks => "decks",
            EntityKind::Categories => "categories",
            EntityKind::Cards => "cards",
        }
    }

    // ========================================
    // Routes
    // ========================================

    pub fn list_path(&self) -> &'static str {
        match self {
            EntityKind::Admins => "/api/admins/",
            EntityKind::Users => "/api/users/",
            EntityKind::Decks => "/api/decks/",
            EntityKind::Categories => "/api/categories/",
            EntityKind::Cards => "/api/cards/public/",
        }
    }

    pub fn create_path(&self) -> Option<&'static str> {
        match self {
            EntityKind::Admins => Some("/api/admins/"),
            EntityKind::Users => None,
            EntityKind::Decks => Some("/api/decks/"),
            EntityKind::Categories => Some("/api/categories/"),
            EntityKind::Cards => Some("/api/cards/"),
        }
    }

    pub fn detail_path(&self, id: &str) -> Option<String> {
        match self {
            EntityKind::Decks => Some(format!("/api/decks/{}/", id)),
            EntityKind::Categories => Some(format!("/api/categories/{}/", id)),
            EntityKind::Cards => Some(format!("/api/cards/{}/", id)),
            EntityKind::Admins | EntityKind::Users => None,
        }
    }

    pub fn update_path(&self, id: &str) -> Option<String> {
        match self {
            EntityKind::Admins => Some(format!("/api/admins/update/{}/", id)),
            EntityKind::Users => None,
            EntityKind::Decks => Some(format!("/api/decks/{}/", id)),
            EntityKind::Categories => Some(format!("/api/categories/{}/", id)),
            EntityKind::Cards => Some(format!("/api/cards/update/{}/", id)),
        }
    }

    pub fn delete_path(&self, id: &str) -> String {
        match self {
            EntityKind::Admins => format!("/api/admins/{}/", id),
            EntityKind::Users => format!("/api/users/{}/", id),
            EntityKind::Decks => format!("/api/decks/{}/", id),
            EntityKind::Categories => format!("/api/categories/{}/", id),
            EntityKind::Cards => format!("/api/cards/delete/{}/", id),
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::List | Operation::Delete => true,
            Operation::Create => self.create_path().is_some(),
            Operation::Update => self.update_path("0").is_some(),
            Operation::StatusChange => {
                matches!(self, EntityKind::Decks | EntityKind::Categories | EntityKind::Cards)
            }
        }
    }

    pub fn insert_position(&self) -> InsertPosition {
        match self {
            EntityKind::Admins => InsertPosition::Append,
            EntityKind::Decks | EntityKind::Categories => InsertPosition::Prepend,
            EntityKind::Users | EntityKind::Cards => InsertPosition::Refetch,
        }
    }

    // ========================================
    // Table presets
    // ========================================

    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        match self {
            EntityKind::Admins => admin::columns(),
            EntityKind::Users => platform_user::columns(),
            EntityKind::Decks => deck::columns(),
            EntityKind::Categories => category::columns(),
            EntityKind::Cards => card_content::columns(),
        }
    }

    pub fn export_filename(&self) -> &'static str {
        match self {
            EntityKind::Admins => "admin-users.csv",
            EntityKind::Users => "platform-users.csv",
            EntityKind::Decks => "decks.csv",
            EntityKind::Categories => "categories.csv",
            EntityKind::Cards => "card-content.csv",
        }
    }

    /// Decks open at 20 rows per page, everything else at the configured default
    pub fn default_page_size(&self) -> PageSize {
        match self {
            EntityKind::Decks => PageSize::new(20).unwrap_or_default(),
            _ => PageSize::new(config().table.default_page_size).unwrap_or_default(),
        }
    }

    pub fn default_sort(&self) -> Option<SortState> {
        match self {
            EntityKind::Decks | EntityKind::Categories | EntityKind::Cards => Some(SortState::asc("name")),
            EntityKind::Admins | EntityKind::Users => None,
        }
    }

    /// A fresh table configured for this collection
    pub fn table_view(&self) -> TableView {
        let view = TableView::new(self.columns())
            .with_page_size(self.default_page_size())
            .with_export_filename(self.export_filename());
        match self.default_sort() {
            Some(sort) => view.clone().with_sort(sort).unwrap_or(view),
            None => view,
        }
    }

    // ========================================
    // Notices
    // ========================================

    pub fn success_message(&self, operation: Operation) -> &'static str {
        use EntityKind::*;
        use Operation::*;
        match (self, operation) {
            (Admins, Create) => "Admin user added!",
            (Admins, Update) => "Admin updated successfully!",
            (Admins, Delete) => "Admin deleted successfully!",
            (Admins, StatusChange) => "Role updated successfully!",
            (Users, Delete) => "Platform user deleted successfully!",
            (Decks, Create) => "Deck created!",
            (Decks, Update) | (Decks, StatusChange) => "Deck updated!",
            (Decks, Delete) => "Deck deleted!",
            (Categories, Create) => "Category created!",
            (Categories, Update) | (Categories, StatusChange) => "Category updated!",
            (Categories, Delete) => "Category deleted!",
            (Cards, Create) => "Card content created!",
            (Cards, Update) => "Card content updated!",
            (Cards, StatusChange) => "Card status updated!",
            (Cards, Delete) => "Card content deleted!",
            (_, List) => "Loaded",
            (Users, _) => "Done",
        }
    }

    pub fn failure_message(&self, operation: Operation) -> &'static str {
        use EntityKind::*;
        use Operation::*;
        match (self, operation) {
            (Admins, List) => "Could not load admins",
            (Admins, Create) => "Error adding admin.",
            (Admins, Update) => "Error updating admin.",
            (Admins, Delete) => "Error deleting admin.",
            (Admins, StatusChange) => "Failed to update role.",
            (Users, List) => "Could not load platform users",
            (Users, _) => "Error deleting platform user.",
            (Decks, List) => "Failed to load decks",
            (Decks, Create) => "Failed to create deck",
            (Decks, Update) | (Decks, StatusChange) => "Failed to update deck",
            (Decks, Delete) => "Failed to delete deck",
            (Categories, List) => "Failed to load decks or categories",
            (Categories, Create) => "Failed to create category",
            (Categories, Update) | (Categories, StatusChange) => "Failed to update category",
            (Categories, Delete) => "Failed to delete category",
            (Cards, List) => "Failed to fetch public cards",
            (Cards, Create) => "Failed to create card content",
            (Cards, Update) => "Failed to update card content",
            (Cards, StatusChange) => "Failed to update card status",
            (Cards, Delete) => "Failed to delete card content",
        }
    }

    /// Whether failure notices should prefer the backend's `detail` text
    pub fn surfaces_backend_detail(&self) -> bool {
        matches!(self, EntityKind::Admins | EntityKind::Users | EntityKind::Cards)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admins" | "admin" | "admin-users" => Ok(EntityKind::Admins),
            "users" | "user" | "platform-users" => Ok(EntityKind::Users),
            "decks" | "deck" => Ok(EntityKind::Decks),
            "categories" | "category" => Ok(EntityKind::Categories),
            "cards" | "card" | "card-content" => Ok(EntityKind::Cards),
            other => Err(AdminError::validation(
                format!("Unknown entity '{}'", other),
                Default::default(),
            )),
        }
    }
}

/// A typed row of one collection
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> Option<i64>;

    fn from_record(record: &Record) -> Result<Self> {
        Ok(serde_json::from_value(record.to_json())?)
    }

    fn to_record(&self) -> Result<Record> {
        Ok(Record::from_json(serde_json::to_value(self)?)?)
    }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Active flag sent either as a boolean or as "Active"/"Inactive"; `null` reads as active
pub(crate) fn status_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(true),
        value => crate::records::parse_flag(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised status {}", value))),
    }
}

/// Count of records whose flag field is set, for KPI cards
pub fn count_active(records: &[Record], field: &str) -> usize {
    records.iter().filter(|r| r.flag(field).unwrap_or(false)).count()
}
