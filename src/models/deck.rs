use serde::{Deserialize, Serialize};

use super::validate::{FieldErrors, Validate};
use super::{Entity, EntityKind};
use crate::error::Result;
use crate::table::ColumnDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
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

impl Entity for Deck {
    const KIND: EntityKind = EntityKind::Decks;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

/// Create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl DeckInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), status: None }
    }
}

impl From<&Deck> for DeckInput {
    fn from(deck: &Deck) -> Self {
        Self { name: deck.name.clone(), description: deck.description.clone(), status: Some(deck.status) }
    }
}

impl Validate for DeckInput {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name, "Deck name is required.")
            .required("description", &self.description, "Description is required.");
        errors.finish("Please fill in the deck name and description.")
    }
}

pub fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::field("name", "Deck Name").searchable(),
        ColumnDescriptor::field("description", "Deck Description").searchable(),
        ColumnDescriptor::flag("status", "Status", "Active", "Inactive"),
        ColumnDescriptor::date("created_at", "Created At"),
    ]
}
