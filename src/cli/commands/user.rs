use clap::Subcommand;
use serde_json::json;

use super::{confirmed_delete, loaded_screen};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::models::EntityKind;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Delete a platform user")]
    Delete {
        #[arg(help = "User ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation warning")]
        yes: bool,
    },

    #[command(about = "Show total, active and inactive user counts")]
    Kpis,
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (mut screen, mut notices) = loaded_screen(EntityKind::Users, &output_format).await?;

    match cmd {
        UserCommands::Delete { id, yes } => {
            confirmed_delete(&mut screen, &mut notices, &id, yes, &output_format).await?;
            output_success(&output_format, &format!("Deleted user {}", id), Some(json!({ "id": id })))
        }
        UserCommands::Kpis => {
            let kpis = screen.kpis();
            output_success(&output_format, &kpis_line(&kpis), Some(json!({ "kpis": kpis })))
        }
    }
}

pub(crate) fn kpis_line(kpis: &crate::dashboard::Kpis) -> String {
    match (kpis.active, kpis.inactive) {
        (Some(active), Some(inactive)) => format!("Total: {}  Active: {}  Inactive: {}", kpis.total, active, inactive),
        _ => format!("Total: {}", kpis.total),
    }
}
