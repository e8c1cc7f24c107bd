use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::error::TableError;

/// Where a column's value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSource {
    /// The record field named by the column key
    Field,
    /// A boolean field shown through two labels
    Flag { on: String, off: String },
    /// An RFC 3339 timestamp shown as a calendar date
    Date,
    /// A foreign id resolved through a named lookup table
    Lookup { field: String, lookup: String },
}

/// Metadata pairing a data key with a display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub source: ColumnSource,
    /// Participates in the global search term
    #[serde(default)]
    pub searchable: bool,
}

impl ColumnDescriptor {
    pub fn field(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into(), source: ColumnSource::Field, searchable: false }
    }

    pub fn flag(
        key: impl Into<String>,
        label: impl Into<String>,
        on: impl Into<String>,
        off: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            source: ColumnSource::Flag { on: on.into(), off: off.into() },
            searchable: false,
        }
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into(), source: ColumnSource::Date, searchable: false }
    }

    pub fn lookup(
        key: impl Into<String>,
        label: impl Into<String>,
        field: impl Into<String>,
        lookup: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            source: ColumnSource::Lookup { field: field.into(), lookup: lookup.into() },
            searchable: false,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(TableError::InvalidSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self { key: key.into(), order: SortOrder::Asc }
    }

    /// Same column flips direction, a new column starts ascending
    pub fn toggled(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(state) if state.key == key => {
                SortState { key: state.key.clone(), order: state.order.flip() }
            }
            _ => SortState::asc(key),
        }
    }
}

/// Rows per page, restricted to the sizes the page-size selector offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub const ALLOWED: [u32; 5] = [10, 20, 30, 40, 50];

    pub fn new(size: u32) -> Result<Self, TableError> {
        if Self::ALLOWED.contains(&size) {
            Ok(Self(size))
        } else {
            Err(TableError::InvalidPageSize(size))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TableError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// Column key to substring pattern; empty patterns are inactive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    patterns: HashMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, pattern: impl Into<String>) {
        let pattern = pattern.into();
        let key = key.into();
        if pattern.is_empty() {
            self.patterns.remove(&key);
        } else {
            self.patterns.insert(key, pattern);
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.patterns.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.patterns.get(key).map(String::as_str)
    }

    /// Active (non-empty) filters
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Column key to visible flag; columns never toggled are visible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnVisibility {
    hidden: HashMap<String, bool>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, key: &str) -> bool {
        !self.hidden.get(key).copied().unwrap_or(false)
    }

    pub fn set_visible(&mut self, key: impl Into<String>, visible: bool) {
        self.hidden.insert(key.into(), !visible);
    }
}

/// Flip one column's visibility; hiding the last visible column is allowed
pub fn toggle_column_visibility(visibility: &ColumnVisibility, key: &str) -> ColumnVisibility {
    let mut next = visibility.clone();
    next.set_visible(key, !visibility.is_visible(key));
    next
}
