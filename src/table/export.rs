use std::fs;
use std::path::{Path, PathBuf};

use super::error::TableError;
use super::lookup::Lookups;
use super::types::ColumnDescriptor;
use crate::records::Record;

pub const CSV_MIME_TYPE: &str = "text/csv";

/// A finished export, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl CsvExport {
    /// Write the file into `dir` under its own filename
    pub fn save_in(&self, dir: &Path) -> std::io::Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        tracing::info!("Exported {} bytes to {}", self.content.len(), path.display());
        Ok(path)
    }
}

/// Serialize rows as CSV: a header of column labels, then one line per row of display values.
///
/// Every field is quoted, embedded quotes are doubled and lines are joined by `\n` with no
/// trailing newline. Callers pass the filtered and sorted (unpaginated) rows and only the
/// visible columns.
pub fn export_csv(
    records: &[&Record],
    columns: &[&ColumnDescriptor],
    lookups: &Lookups,
    filename: &str,
) -> Result<CsvExport, TableError> {
    if filename.trim().is_empty() {
        return Err(TableError::Export("filename must not be empty".to_string()));
    }

    let content = if columns.is_empty() {
        // No visible columns: one empty line per header and row
        vec![""; records.len() + 1].join("\n")
    } else {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
        for record in records {
            let cells: Vec<String> =
                columns.iter().map(|c| lookups.cell(record, c).display().to_string()).collect();
            writer.write_record(&cells)?;
        }

        let bytes = writer.into_inner().map_err(|e| TableError::Export(e.to_string()))?;
        let mut text = String::from_utf8(bytes).map_err(|e| TableError::Export(e.to_string()))?;
        if text.ends_with('\n') {
            text.pop();
        }
        text
    };

    Ok(CsvExport { filename: filename.to_string(), mime_type: CSV_MIME_TYPE, content })
}
