use serde::{Deserialize, Serialize};

use super::validate::{FieldErrors, Validate};
use super::{Entity, EntityKind};
use crate::error::Result;
use crate::records::Record;
use crate::table::{ColumnDescriptor, LookupTable};

pub const DECK_LOOKUP: &str = "decks";
pub const UNKNOWN_DECK: &str = "Unknown Deck";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    /// Owning deck id
    pub deck: i64,
    #[serde(default = "default_status", deserialize_with = "super::status_flag")]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_status() -> bool {
    true
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Categories;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
    pub deck: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>, deck: i64) -> Self {
        Self { name: name.into(), description: description.into(), deck: Some(deck), status: None }
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            deck: Some(category.deck),
            status: Some(category.status),
        }
    }
}

impl Validate for CategoryInput {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name, "Category name is required.")
            .required("description", &self.description, "Description is required.");
        if self.deck.is_none() {
            errors.add("deck", "Please select a deck.");
        }
        errors.finish("Please fill in the category name, description and deck.")
    }
}

pub fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::field("name", "Name").searchable(),
        ColumnDescriptor::field("description", "Description").searchable(),
        ColumnDescriptor::lookup("deck_name", "Deck", "deck", DECK_LOOKUP).searchable(),
        ColumnDescriptor::flag("status", "Status", "Active", "Inactive"),
        ColumnDescriptor::date("created_at", "Created At"),
    ]
}

/// Deck id to deck name, for the category table's Deck column
pub fn deck_lookup(decks: &[Record]) -> LookupTable {
    LookupTable::from_records(decks, "name", UNKNOWN_DECK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_requires_deck() {
        let input = CategoryInput { name: "Verbs".into(), description: "Basics".into(), deck: None, status: None };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please select a deck.");
    }

    #[test]
    fn test_payload_omits_unset_status() {
        let body = serde_json::to_value(CategoryInput::new("Verbs", "Basics", 3)).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Verbs", "description": "Basics", "deck": 3}));
    }
}
