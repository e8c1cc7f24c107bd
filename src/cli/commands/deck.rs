use clap::Subcommand;
use serde_json::json;

use super::user::kpis_line;
use super::{confirmed_delete, loaded_screen, settle};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::error::AdminError;
use crate::models::{Deck, DeckInput, Entity, EntityKind};

#[derive(Subcommand)]
pub enum DeckCommands {
    #[command(about = "Create a deck")]
    Create {
        #[arg(help = "Deck name")]
        name: String,
        #[arg(long, default_value = "", help = "Deck description")]
        description: String,
    },

    #[command(about = "Edit a deck's name or description")]
    Update {
        #[arg(help = "Deck ID")]
        id: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
    },

    #[command(about = "Delete a deck")]
    Delete {
        #[arg(help = "Deck ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation warning")]
        yes: bool,
    },

    #[command(about = "Mark a deck active")]
    Activate {
        #[arg(help = "Deck ID")]
        id: String,
    },

    #[command(about = "Mark a deck inactive")]
    Deactivate {
        #[arg(help = "Deck ID")]
        id: String,
    },

    #[command(about = "Show total, active and inactive deck counts")]
    Kpis,
}

pub async fn handle(cmd: DeckCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (mut screen, mut notices) = loaded_screen(EntityKind::Decks, &output_format).await?;

    match cmd {
        DeckCommands::Create { name, description } => {
            let created = screen.create(&DeckInput::new(name, description)).await;
            let record = settle(&output_format, &mut notices, created)?;
            output_record(&output_format, &record)
        }
        DeckCommands::Update { id, name, description } => {
            let current = screen
                .source()
                .find(&id)
                .ok_or_else(|| AdminError::not_found(format!("deck {}", id)))?;
            let mut input = DeckInput::from(&Deck::from_record(current)?);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(description) = description {
                input.description = description;
            }
            let updated = screen.update(&id, &input).await;
            let record = settle(&output_format, &mut notices, updated)?;
            output_record(&output_format, &record)
        }
        DeckCommands::Delete { id, yes } => {
            confirmed_delete(&mut screen, &mut notices, &id, yes, &output_format).await?;
            output_success(&output_format, &format!("Deleted deck {}", id), Some(json!({ "id": id })))
        }
        DeckCommands::Activate { id } => {
            let changed = screen.set_active(&id, true).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        DeckCommands::Deactivate { id } => {
            let changed = screen.set_active(&id, false).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        DeckCommands::Kpis => {
            let kpis = screen.kpis();
            output_success(&output_format, &kpis_line(&kpis), Some(json!({ "kpis": kpis })))
        }
    }
}
