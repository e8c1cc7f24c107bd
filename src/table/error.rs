use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid page size: {0} (expected one of 10, 20, 30, 40, 50)")]
    InvalidPageSize(u32),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown lookup: {0}")]
    UnknownLookup(String),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
