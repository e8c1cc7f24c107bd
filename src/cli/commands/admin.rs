use clap::Subcommand;
use serde_json::json;

use super::{confirmed_delete, loaded_screen, settle};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::error::AdminError;
use crate::models::{Admin, AdminInput, AdminUpdate, Entity, EntityKind};
use crate::session::Role;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Add an admin account")]
    Create {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long, help = "Initial password (at least 6 characters)")]
        password: String,
        #[arg(long, default_value = "Admin", help = "Admin or SuperAdmin")]
        role: String,
    },

    #[command(about = "Edit an admin's profile")]
    Update {
        #[arg(help = "Admin ID")]
        id: String,
        #[arg(long, help = "New first name")]
        first_name: Option<String>,
        #[arg(long, help = "New last name")]
        last_name: Option<String>,
        #[arg(long, help = "New email")]
        email: Option<String>,
    },

    #[command(about = "Change an admin's role (SuperAdmin only)")]
    Role {
        #[arg(help = "Admin ID")]
        id: String,
        #[arg(help = "Admin or SuperAdmin")]
        role: String,
    },

    #[command(about = "Delete an admin account")]
    Delete {
        #[arg(help = "Admin ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation warning")]
        yes: bool,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (mut screen, mut notices) = loaded_screen(EntityKind::Admins, &output_format).await?;

    match cmd {
        AdminCommands::Create { email, first_name, last_name, password, role } => {
            let input = AdminInput { first_name, last_name, email, password, role: role.parse()? };
            let created = screen.create(&input).await;
            let record = settle(&output_format, &mut notices, created)?;
            output_record(&output_format, &record)
        }
        AdminCommands::Update { id, first_name, last_name, email } => {
            let current = screen
                .source()
                .find(&id)
                .ok_or_else(|| AdminError::not_found(format!("admin {}", id)))?;
            let mut input = AdminUpdate::from(&Admin::from_record(current)?);
            if let Some(first_name) = first_name {
                input.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                input.last_name = last_name;
            }
            if let Some(email) = email {
                input.email = email;
            }
            let updated = screen.update(&id, &input).await;
            let record = settle(&output_format, &mut notices, updated)?;
            output_record(&output_format, &record)
        }
        AdminCommands::Role { id, role } => {
            let role: Role = role.parse()?;
            let changed = screen.change_role(&id, role).await;
            let record = settle(&output_format, &mut notices, changed)?;
            output_record(&output_format, &record)
        }
        AdminCommands::Delete { id, yes } => {
            confirmed_delete(&mut screen, &mut notices, &id, yes, &output_format).await?;
            output_success(&output_format, &format!("Deleted admin {}", id), Some(json!({ "id": id })))
        }
    }
}
