use clap::Subcommand;
use serde_json::json;

use super::user::kpis_line;
use super::{confirmed_delete, loaded_screen, settle};
use crate::cli::config::CliContext;
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::error::AdminError;
use crate::models::card_content::DEFAULT_READ_TIME;
use crate::models::{CardContent, CardInput, CardStatus, Entity, EntityKind};

#[derive(Subcommand)]
pub enum CardCommands {
    #[command(about = "Create card content in a category")]
    Create {
        #[arg(help = "Card name")]
        name: String,
        #[arg(long, help = "Category ID")]
        category: Option<i64>,
        #[arg(long, default_value = "", help = "One-line summary")]
        short_description: String,
        #[arg(long, default_value = "", help = "Rich-text body, stored as given")]
        description: String,
        #[arg(long, default_value = "draft", help = "draft, published or inactive")]
        status: String,
        #[arg(long, default_value_t = DEFAULT_READ_TIME, help = "Estimated read time in minutes")]
        read_time: u32,
        #[arg(long, default_value = "", help = "Comma-separated tags")]
        tags: String,
    },

    #[command(about = "Edit card content")]
    Update {
        #[arg(help = "Card ID")]
        id: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New summary")]
        short_description: Option<String>,
        #[arg(long, help = "New body")]
        description: Option<String>,
        #[arg(long, help = "Move to another category")]
        category: Option<i64>,
    },

    #[command(about = "Change a card's publication status")]
    Status {
        #[arg(help = "Card ID")]
        id: String,
        #[arg(help = "draft, published or inactive")]
        status: String,
    },

    #[command(about = "Show one card")]
    Show {
        #[arg(help = "Card ID")]
        id: String,
    },

    #[command(about = "Delete card content")]
    Delete {
        #[arg(help = "Card ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation warning")]
        yes: bool,
    },

    #[command(about = "Show total, published and unpublished card counts")]
    Kpis,
}

pub async fn handle(cmd: CardCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    // Reads a single card straight from the backend, no list needed
    if let CardCommands::Show { id } = &cmd {
        return show(id, &output_format).await;
    }

    let (mut screen, mut notices) = loaded_screen(EntityKind::Cards, &output_format).await?;

    match cmd {
        CardCommands::Create { name, category, short_description, description, status, read_time, tags } => {
            let input = CardInput {
                name,
                short_description,
                description,
                category_id: category,
                deck_id: None,
                status: status.parse()?,
                read_time,
                tags,
            };
            let created = screen.create(&input).await;
            let record = settle(&output_format, &mut notices, created)?;
            output_record(&output_format, &record)
        }
        CardCommands::Update { id, name, short_description, description, category } => {
            let current = screen
                .source()
                .find(&id)
                .ok_or_else(|| AdminError::not_found(format!("card {}", id)))?;
            let card = CardContent::from_record(current)?;
            let mut input = CardInput::with_status(&card, card.status);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(short_description) = short_description {
                input.short_description = short_description;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if category.is_some() {
                input.category_id = category;
            }
            let updated = screen.update(&id, &input).await;
            let record = settle(&output_format, &mut notices, updated)?;
            output_record(&output_format, &record)
        }
        CardCommands::Status { id, status } => {
            let status: CardStatus = status.parse()?;
            let changed = screen.set_card_status(&id, status).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        CardCommands::Delete { id, yes } => {
            confirmed_delete(&mut screen, &mut notices, &id, yes, &output_format).await?;
            output_success(&output_format, &format!("Deleted card {}", id), Some(json!({ "id": id })))
        }
        CardCommands::Kpis => {
            let kpis = screen.kpis();
            output_success(&output_format, &kpis_line(&kpis), Some(json!({ "kpis": kpis })))
        }
        CardCommands::Show { id } => show(&id, &output_format).await,
    }
}

async fn show(id: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    let ctx = CliContext::load()?;
    ctx.require_login()?;
    let card = ctx.api.get_card(id).await?;
    output_record(output_format, &card.to_record()?)
}
