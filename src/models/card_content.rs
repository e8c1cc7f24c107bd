use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::validate::{FieldErrors, Validate};
use super::{Entity, EntityKind};
use crate::error::{AdminError, Result};
use crate::records::Record;
use crate::table::{ColumnDescriptor, LookupTable};

pub const CATEGORY_LOOKUP: &str = "categories";
pub const CATEGORY_DECK_LOOKUP: &str = "category_decks";
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_READ_TIME: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    #[default]
    Draft,
    Published,
    Inactive,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Draft => "draft",
            CardStatus::Published => "published",
            CardStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for CardStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(CardStatus::Draft),
            "published" => Ok(CardStatus::Published),
            "inactive" => Ok(CardStatus::Inactive),
            _ => Err(AdminError::validation(
                format!("Unknown card status '{}'", s),
                [("status".to_string(), "Status must be draft, published or inactive.".to_string())].into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub short_description: String,
    /// Rich-text body, passed through untouched
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    pub category_id: i64,
    #[serde(default)]
    pub deck_id: Option<i64>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: CardStatus,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Entity for CardContent {
    const KIND: EntityKind = EntityKind::Cards;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInput {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub deck_id: Option<i64>,
    pub status: CardStatus,
    pub read_time: u32,
    pub tags: String,
}

impl CardInput {
    pub fn new(name: impl Into<String>, short_description: impl Into<String>, category_id: i64) -> Self {
        Self {
            name: name.into(),
            short_description: short_description.into(),
            description: String::new(),
            category_id: Some(category_id),
            deck_id: None,
            status: CardStatus::Draft,
            read_time: DEFAULT_READ_TIME,
            tags: String::new(),
        }
    }

    /// Full payload for an existing card with only its status changed
    pub fn with_status(card: &CardContent, status: CardStatus) -> Self {
        Self {
            name: card.name.clone(),
            short_description: card.short_description.clone(),
            description: card.description.clone(),
            category_id: Some(card.category_id),
            deck_id: card.deck_id,
            status,
            read_time: card.read_time.filter(|t| *t > 0).unwrap_or(DEFAULT_READ_TIME),
            tags: card.tags.clone().unwrap_or_default(),
        }
    }
}

impl Validate for CardInput {
    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name, "Name is required.")
            .required("short_description", &self.short_description, "Short description is required.");
        if self.category_id.is_none() {
            errors.add("category_id", "Please select a category.");
        }
        errors.finish("Please fill in the required card fields.")
    }
}

pub fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::field("name", "Name").searchable(),
        ColumnDescriptor::field("short_description", "Short Description").searchable(),
        ColumnDescriptor::lookup("deck_name", "Deck", "category_id", CATEGORY_DECK_LOOKUP),
        ColumnDescriptor::lookup("category_name", "Category", "category_id", CATEGORY_LOOKUP),
        ColumnDescriptor::field("status", "Status"),
    ]
}

/// Category id to category name
pub fn category_lookup(categories: &[Record]) -> LookupTable {
    LookupTable::from_records(categories, "name", NOT_AVAILABLE)
}

/// Category id to the name of the deck that category belongs to
pub fn category_deck_lookup(categories: &[Record], decks: &[Record]) -> LookupTable {
    let deck_names = LookupTable::from_records(decks, "name", NOT_AVAILABLE);
    let mut table = LookupTable::new(NOT_AVAILABLE);
    for category in categories {
        let Some(id) = category.id() else {
            continue;
        };
        if let Some(deck_name) = deck_names.get(&category.text("deck")) {
            table.insert(id, deck_name);
        }
    }
    table
}
