use chrono::DateTime;
use feruca::Collator;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::types::{ColumnDescriptor, ColumnSource};
use crate::records::Record;

/// Placeholder for a lookup column whose table was never registered
pub const MISSING_LOOKUP_PLACEHOLDER: &str = "N/A";

/// Side-loaded id to display-name map for a derived column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
    placeholder: String,
}

impl LookupTable {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self { entries: HashMap::new(), placeholder: placeholder.into() }
    }

    /// Build from records, keyed by their id
    pub fn from_records(records: &[Record], name_field: &str, placeholder: impl Into<String>) -> Self {
        let mut table = Self::new(placeholder);
        for record in records {
            if let Some(id) = record.id() {
                table.entries.insert(id, record.text(name_field));
            }
        }
        table
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(id.into(), name.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named lookup tables available to a view
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    tables: HashMap<String, LookupTable>,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, table: LookupTable) {
        self.tables.insert(name.into(), table);
    }

    pub fn get(&self, name: &str) -> Option<&LookupTable> {
        self.tables.get(name)
    }

    /// Resolve one record's value for a column
    pub fn cell(&self, record: &Record, column: &ColumnDescriptor) -> Cell {
        match &column.source {
            ColumnSource::Field => Cell::Text(record.text(&column.key)),
            ColumnSource::Flag { on, off } => match record.flag(&column.key) {
                Some(value) => {
                    let label = if value { on.clone() } else { off.clone() };
                    Cell::Flag { value, label }
                }
                None => Cell::Text(record.text(&column.key)),
            },
            ColumnSource::Date => {
                let raw = record.text(&column.key);
                let display = DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|_| raw.clone());
                Cell::Date { raw, display }
            }
            ColumnSource::Lookup { field, lookup } => {
                let id = record.text(field);
                match self.tables.get(lookup) {
                    Some(table) => match table.get(&id) {
                        Some(name) => Cell::Text(name.to_string()),
                        None => Cell::Unresolved { placeholder: table.placeholder().to_string() },
                    },
                    None => Cell::Unresolved { placeholder: MISSING_LOOKUP_PLACEHOLDER.to_string() },
                }
            }
        }
    }
}

/// A resolved column value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Flag { value: bool, label: String },
    Date { raw: String, display: String },
    /// Lookup gap: shows the placeholder, matches filters as ""
    Unresolved { placeholder: String },
}

impl Cell {
    /// What the user sees (table and CSV)
    pub fn display(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Flag { label, .. } => label,
            Cell::Date { display, .. } => display,
            Cell::Unresolved { placeholder } => placeholder,
        }
    }

    /// What search and column filters match against
    pub fn filter_text(&self) -> &str {
        match self {
            Cell::Unresolved { .. } => "",
            other => other.display(),
        }
    }

    pub(crate) fn sort_key(&self) -> SortKey {
        match self {
            Cell::Text(s) => SortKey::Text(s.to_lowercase()),
            Cell::Flag { value, .. } => SortKey::Flag(*value),
            Cell::Date { raw, .. } => SortKey::Raw(raw.clone()),
            Cell::Unresolved { .. } => SortKey::Text(String::new()),
        }
    }
}

/// Comparable form of a cell; ascending puts true before false
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SortKey {
    Flag(bool),
    /// Lowercased display text, ordered by Unicode collation
    Text(String),
    /// Machine text (timestamps), ordered by code point
    Raw(String),
}

impl SortKey {
    pub(crate) fn compare(&self, other: &Self, collator: &mut Collator) -> Ordering {
        match (self, other) {
            (SortKey::Flag(a), SortKey::Flag(b)) => b.cmp(a),
            (SortKey::Text(a), SortKey::Text(b)) => collator.collate(a.as_str(), b.as_str()),
            (SortKey::Raw(a), SortKey::Raw(b))
            | (SortKey::Text(a), SortKey::Raw(b))
            | (SortKey::Raw(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Flag(_), _) => Ordering::Less,
            (_, SortKey::Flag(_)) => Ordering::Greater,
        }
    }
}
