pub mod types;
pub mod error;
pub mod lookup;
pub mod table_filter;
pub mod table_order;
pub mod table_page;
pub mod export;
pub mod view;

pub use types::*;
pub use error::TableError;
pub use lookup::{Cell, LookupTable, Lookups};
pub use table_filter::apply_filters;
pub use table_order::sort_records;
pub use table_page::{paginate, Page};
pub use export::{export_csv, CsvExport};
pub use view::{TableSnapshot, TableView};
