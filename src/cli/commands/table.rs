use clap::{Args, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use super::loaded_screen;
use crate::cli::utils::{output_snapshot, output_success, parse_pairs};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::models::EntityKind;
use crate::table::{SortOrder, SortState, TableView};

#[derive(Subcommand)]
pub enum TableCommands {
    #[command(about = "Show one page of a collection")]
    List {
        #[command(flatten)]
        args: TableArgs,
    },

    #[command(about = "Write every matching row over the visible columns to a CSV file")]
    Export {
        #[command(flatten)]
        args: TableArgs,
        #[arg(long, help = "Directory to write into (defaults to ADMIN_EXPORT_DIR or the current directory)")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    #[arg(help = "Collection: admins, users, decks, categories or cards")]
    pub entity: String,

    #[arg(long, help = "Case-insensitive search across the searchable columns")]
    pub search: Option<String>,

    #[arg(long = "filter", help = "Column filter as key=pattern (repeatable)")]
    pub filters: Vec<String>,

    #[arg(long, help = "Column key to sort by")]
    pub sort: Option<String>,

    #[arg(long, default_value = "asc", help = "Sort order: asc or desc")]
    pub order: String,

    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<u32>,

    #[arg(long, help = "Rows per page: 10, 20, 30, 40 or 50")]
    pub page_size: Option<u32>,

    #[arg(long = "hide", help = "Column key to hide (repeatable)")]
    pub hidden: Vec<String>,
}

impl TableArgs {
    /// Replay the flags onto a table the way a user would click through it
    pub fn apply(&self, table: &mut TableView) -> anyhow::Result<()> {
        if let Some(size) = self.page_size {
            table.set_page_size(size)?;
        }
        if let Some(term) = &self.search {
            table.set_search(term.as_str());
        }
        for (key, pattern) in parse_pairs(&self.filters)? {
            table.set_column_filter(&key, pattern)?;
        }
        if let Some(key) = &self.sort {
            let order: SortOrder = self.order.parse()?;
            table.set_sort(Some(SortState { key: key.clone(), order }))?;
        }
        for key in &self.hidden {
            if table.visibility().is_visible(key) {
                table.toggle_column(key)?;
            }
        }
        if let Some(page) = self.page {
            table.go_to_page(page);
        }
        Ok(())
    }
}

pub async fn handle(cmd: TableCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TableCommands::List { args } => {
            let kind: EntityKind = args.entity.parse()?;
            let (mut screen, _notices) = loaded_screen(kind, &output_format).await?;
            args.apply(screen.table_mut())?;

            let snapshot = screen.view();
            output_snapshot(&output_format, &snapshot)
        }
        TableCommands::Export { args, out } => {
            let kind: EntityKind = args.entity.parse()?;
            let (mut screen, _notices) = loaded_screen(kind, &output_format).await?;
            args.apply(screen.table_mut())?;

            let export = screen.export()?;
            let dir = out
                .or_else(|| config().table.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let path = export.save_in(&dir)?;
            output_success(
                &output_format,
                &format!("Exported {} to {}", kind, path.display()),
                Some(json!({ "path": path.display().to_string(), "mime_type": export.mime_type })),
            )
        }
    }
}
