pub mod record;
pub mod source;

pub use record::{parse_flag, Record, RecordError};
pub use source::RecordSource;
