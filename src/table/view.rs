use serde::Serialize;

use super::error::TableError;
use super::export::{export_csv, CsvExport};
use super::lookup::{LookupTable, Lookups};
use super::table_filter::apply_filters;
use super::table_order::sort_records;
use super::table_page::{paginate, Page};
use super::types::{
    toggle_column_visibility, ColumnDescriptor, ColumnVisibility, FilterState, PageSize, SortState,
};
use crate::records::Record;

/// One rendered row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<String>,
}

/// Everything needed to draw the table once
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    /// Visible columns, in display order
    pub columns: Vec<ColumnDescriptor>,
    pub page: Page<RowView>,
    /// Rows left after search and filters, before pagination
    pub filtered: usize,
    pub sort: Option<SortState>,
}

impl TableSnapshot {
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.page.rows.iter().map(|r| r.id.as_str()).collect()
    }

    /// Display values of one column on the current page
    pub fn column_values(&self, key: &str) -> Vec<&str> {
        match self.columns.iter().position(|c| c.key == key) {
            Some(index) => self.page.rows.iter().map(|r| r.cells[index].as_str()).collect(),
            None => Vec::new(),
        }
    }
}

/// UI state for one table: search, filters, sort, pagination and column visibility.
///
/// The record set itself is passed in on every call; the view never owns or persists it.
#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<ColumnDescriptor>,
    lookups: Lookups,
    search: String,
    filters: FilterState,
    sort: Option<SortState>,
    page: u32,
    page_size: PageSize,
    visibility: ColumnVisibility,
    export_filename: String,
}

impl TableView {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            lookups: Lookups::new(),
            search: String::new(),
            filters: FilterState::new(),
            sort: None,
            page: 1,
            page_size: PageSize::default(),
            visibility: ColumnVisibility::default(),
            export_filename: "export.csv".to_string(),
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Result<Self, TableError> {
        self.require_column(&sort.key)?;
        self.sort = Some(sort);
        Ok(self)
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    fn require_column(&self, key: &str) -> Result<&ColumnDescriptor, TableError> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| self.visibility.is_visible(&c.key)).collect()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn export_filename(&self) -> &str {
        &self.export_filename
    }

    // ========================================
    // State transitions
    // ========================================

    /// New search term; back to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_column_filter(&mut self, key: &str, pattern: impl Into<String>) -> Result<(), TableError> {
        self.require_column(key)?;
        self.filters.set(key, pattern);
        self.page = 1;
        Ok(())
    }

    pub fn clear_column_filter(&mut self, key: &str) {
        self.filters.clear(key);
        self.page = 1;
    }

    /// Header click: same column flips direction, a new one sorts ascending
    pub fn toggle_sort(&mut self, key: &str) -> Result<(), TableError> {
        self.require_column(key)?;
        self.sort = Some(SortState::toggled(self.sort.as_ref(), key));
        tracing::debug!("Sort set to {:?}", self.sort);
        Ok(())
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<(), TableError> {
        if let Some(state) = &sort {
            self.require_column(&state.key)?;
        }
        self.sort = sort;
        Ok(())
    }

    /// New page size; back to the first page
    pub fn set_page_size(&mut self, size: u32) -> Result<(), TableError> {
        self.page_size = PageSize::new(size)?;
        self.page = 1;
        Ok(())
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn toggle_column(&mut self, key: &str) -> Result<(), TableError> {
        self.require_column(key)?;
        self.visibility = toggle_column_visibility(&self.visibility, key);
        Ok(())
    }

    /// Register (or refresh) the lookup table a derived column resolves through
    pub fn set_lookup(&mut self, name: impl Into<String>, table: LookupTable) {
        self.lookups.insert(name, table);
    }

    // ========================================
    // Pipeline
    // ========================================

    /// Search, filter and sort; the set that pagination and export both start from
    pub fn filtered_sorted<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut rows = apply_filters(records, &self.columns, &self.lookups, &self.search, &self.filters);
        sort_records(&mut rows, &self.columns, &self.lookups, self.sort.as_ref());
        rows
    }

    /// Render the current page, clamping the stored page into range first
    pub fn view(&mut self, records: &[Record]) -> TableSnapshot {
        let rows = self.filtered_sorted(records);
        let total_pages = super::table_page::total_pages(rows.len(), self.page_size);
        self.page = self.page.clamp(1, total_pages);

        let visible: Vec<ColumnDescriptor> = self.visible_columns().into_iter().cloned().collect();
        let rendered: Vec<RowView> = rows
            .iter()
            .map(|record| RowView {
                id: record.id().unwrap_or_default(),
                cells: visible.iter().map(|c| self.lookups.cell(record, c).display().to_string()).collect(),
            })
            .collect();

        TableSnapshot {
            columns: visible,
            page: paginate(&rendered, self.page, self.page_size),
            filtered: rows.len(),
            sort: self.sort.clone(),
        }
    }

    /// Export every filtered row (not just the current page) over the visible columns
    pub fn export(&self, records: &[Record]) -> Result<CsvExport, TableError> {
        let rows = self.filtered_sorted(records);
        export_csv(&rows, &self.visible_columns(), &self.lookups, &self.export_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decks(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                Record::from_json(json!({
                    "id": i,
                    "name": format!("Deck-{:02}", i),
                    "description": format!("Description {}", i),
                    "status": i != 7,
                }))
                .unwrap()
            })
            .collect()
    }

    fn view() -> TableView {
        TableView::new(vec![
            ColumnDescriptor::field("name", "Deck Name").searchable(),
            ColumnDescriptor::field("description", "Deck Description").searchable(),
            ColumnDescriptor::flag("status", "Status", "Active", "Inactive"),
        ])
    }

    #[test]
    fn test_search_resets_page() {
        let records = decks(30);
        let mut table = view();
        table.go_to_page(3);
        assert_eq!(table.view(&records).page.page, 3);

        table.set_search("deck");
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_column_filter_changes_reset_page() {
        let records = decks(30);
        let mut table = view();
        table.go_to_page(3);
        assert_eq!(table.view(&records).page.page, 3);

        table.set_column_filter("name", "deck").unwrap();
        assert_eq!(table.page(), 1);
        assert_eq!(table.view(&records).page.page, 1);

        table.go_to_page(2);
        table.clear_column_filter("name");
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_page_clamps_when_filter_shrinks_set() {
        let records = decks(30);
        let mut table = view();
        table.go_to_page(3);
        table.set_column_filter("status", "inactive").unwrap();

        let snapshot = table.view(&records);
        assert_eq!(snapshot.page.page, 1);
        assert_eq!(snapshot.page.total_pages, 1);
        assert_eq!(snapshot.column_values("name"), vec!["Deck-07"]);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut table = view();
        assert!(matches!(table.toggle_sort("nope"), Err(TableError::UnknownColumn(_))));
        assert!(table.set_column_filter("nope", "x").is_err());
        assert!(table.toggle_column("nope").is_err());
        assert!(table.set_page_size(15).is_err());
    }

    #[test]
    fn test_hidden_columns_drop_from_view_and_export() {
        let records = decks(2);
        let mut table = view().with_export_filename("decks.csv");
        table.toggle_column("description").unwrap();

        let snapshot = table.view(&records);
        assert_eq!(snapshot.labels(), vec!["Deck Name", "Status"]);

        let export = table.export(&records).unwrap();
        assert_eq!(export.filename, "decks.csv");
        assert!(export.content.starts_with("\"Deck Name\",\"Status\"\n"));
    }

    #[test]
    fn test_export_ignores_pagination() {
        let records = decks(25);
        let mut table = view();
        table.go_to_page(2);
        let export = table.export(&records).unwrap();
        assert_eq!(export.content.lines().count(), 26);
    }

    #[test]
    fn test_next_and_prev_page_stay_in_range() {
        let records = decks(12);
        let mut table = view();
        table.prev_page();
        assert_eq!(table.page(), 1);

        table.next_page();
        table.next_page();
        assert_eq!(table.view(&records).page.page, 2);
    }
}
