use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::cli::OutputFormat;
use crate::dashboard::{Notice, NoticeLevel};
use crate::error::AdminError;
use crate::records::Record;
use crate::table::TableSnapshot;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error in the appropriate format, including any field-level messages
pub fn output_error(output_format: &OutputFormat, error: &AdminError) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&error.to_json())?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", error);
            if let Some(fields) = error.field_errors() {
                let mut fields: Vec<_> = fields.iter().collect();
                fields.sort();
                for (field, message) in fields {
                    eprintln!("  {}: {}", field, message);
                }
            }
        }
    }
    Ok(())
}

/// Print every notice queued so far
pub fn output_notices(
    output_format: &OutputFormat,
    notices: &mut mpsc::UnboundedReceiver<Notice>,
) -> anyhow::Result<()> {
    while let Ok(notice) = notices.try_recv() {
        match output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&json!({ "notice": notice }))?),
            OutputFormat::Text => match notice.level {
                NoticeLevel::Success => println!("✓ {}", notice.message),
                NoticeLevel::Info => println!("ℹ {}", notice.message),
                NoticeLevel::Error => eprintln!("✗ {}", notice.message),
            },
        }
    }
    Ok(())
}

/// Render one page of a table
pub fn output_snapshot(output_format: &OutputFormat, snapshot: &TableSnapshot) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Text => {
            if snapshot.page.rows.is_empty() {
                println!("No results.");
            } else {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(std::iter::once("ID").chain(snapshot.labels()).collect::<Vec<_>>());
                for row in &snapshot.page.rows {
                    let mut cells = vec![row.id.as_str()];
                    cells.extend(row.cells.iter().map(String::as_str));
                    table.add_row(cells);
                }
                println!("{table}");
            }
            println!(
                "Page {} of {} ({} matching, {} per page)",
                snapshot.page.page, snapshot.page.total_pages, snapshot.filtered, snapshot.page.page_size
            );
        }
    }
    Ok(())
}

/// Output a single record as key/value pairs
pub fn output_record(output_format: &OutputFormat, record: &Record) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record.to_json())?);
        }
        OutputFormat::Text => {
            let mut fields: Vec<_> = record.to_map().into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["Field", "Value"]);
            for (key, _) in fields {
                table.add_row(vec![key.clone(), record.text(&key)]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

/// Parse `key=value` pairs from repeated flags
pub fn parse_pairs(pairs: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", pair))
        })
        .collect()
}
