use clap::Subcommand;
use serde_json::json;

use super::user::kpis_line;
use super::{confirmed_delete, loaded_screen, settle};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::error::AdminError;
use crate::models::{Category, CategoryInput, Entity, EntityKind};

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "Create a category inside a deck")]
    Create {
        #[arg(help = "Category name")]
        name: String,
        #[arg(long, help = "Deck ID the category belongs to")]
        deck: Option<i64>,
        #[arg(long, default_value = "", help = "Category description")]
        description: String,
    },

    #[command(about = "Edit a category")]
    Update {
        #[arg(help = "Category ID")]
        id: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
        #[arg(long, help = "Move to another deck")]
        deck: Option<i64>,
    },

    #[command(about = "Delete a category")]
    Delete {
        #[arg(help = "Category ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation warning")]
        yes: bool,
    },

    #[command(about = "Mark a category active")]
    Activate {
        #[arg(help = "Category ID")]
        id: String,
    },

    #[command(about = "Mark a category inactive")]
    Deactivate {
        #[arg(help = "Category ID")]
        id: String,
    },

    #[command(about = "Show total, active and inactive category counts")]
    Kpis,
}

pub async fn handle(cmd: CategoryCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (mut screen, mut notices) = loaded_screen(EntityKind::Categories, &output_format).await?;

    match cmd {
        CategoryCommands::Create { name, deck, description } => {
            let input = CategoryInput { name, description, deck, status: None };
            let created = screen.create(&input).await;
            let record = settle(&output_format, &mut notices, created)?;
            output_record(&output_format, &record)
        }
        CategoryCommands::Update { id, name, description, deck } => {
            let current = screen
                .source()
                .find(&id)
                .ok_or_else(|| AdminError::not_found(format!("category {}", id)))?;
            let mut input = CategoryInput::from(&Category::from_record(current)?);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if deck.is_some() {
                input.deck = deck;
            }
            let updated = screen.update(&id, &input).await;
            let record = settle(&output_format, &mut notices, updated)?;
            output_record(&output_format, &record)
        }
        CategoryCommands::Delete { id, yes } => {
            confirmed_delete(&mut screen, &mut notices, &id, yes, &output_format).await?;
            output_success(&output_format, &format!("Deleted category {}", id), Some(json!({ "id": id })))
        }
        CategoryCommands::Activate { id } => {
            let changed = screen.set_active(&id, true).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        CategoryCommands::Deactivate { id } => {
            let changed = screen.set_active(&id, false).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        CategoryCommands::Kpis => {
            let kpis = screen.kpis();
            output_success(&output_format, &kpis_line(&kpis), Some(json!({ "kpis": kpis })))
        }
    }
}
