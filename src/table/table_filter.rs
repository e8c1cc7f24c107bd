use super::lookup::Lookups;
use super::types::{ColumnDescriptor, FilterState};
use crate::records::Record;

/// Case-insensitive containment
fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn column_text(record: &Record, column: Option<&ColumnDescriptor>, key: &str, lookups: &Lookups) -> String {
    match column {
        Some(column) => lookups.cell(record, column).filter_text().to_string(),
        None => record.text(key),
    }
}

/// Records matching the global search term and every active column filter, in source order.
///
/// The search term is ORed across searchable columns; column filters are ANDed with it and
/// with each other. Filter keys without a descriptor match against the raw field.
pub fn apply_filters<'a, I>(
    records: I,
    columns: &[ColumnDescriptor],
    lookups: &Lookups,
    search: &str,
    filters: &FilterState,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let search = search.to_lowercase();
    let active: Vec<(Option<&ColumnDescriptor>, &str, String)> = filters
        .active()
        .map(|(key, pattern)| (columns.iter().find(|c| c.key == key), key, pattern.to_lowercase()))
        .collect();

    records
        .into_iter()
        .filter(|record| {
            let search_hit = search.is_empty()
                || columns
                    .iter()
                    .filter(|c| c.searchable)
                    .any(|c| contains(lookups.cell(record, c).filter_text(), &search));

            search_hit
                && active
                    .iter()
                    .all(|(column, key, pattern)| contains(&column_text(record, *column, key, lookups), pattern))
        })
        .collect()
}
