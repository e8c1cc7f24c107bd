use clap::Subcommand;
use serde_json::json;

use crate::api::auth::PasswordResetConfirm;
use crate::cli::config::CliContext;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login as an admin")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show the signed-in admin")]
    Whoami,

    #[command(about = "Email a password reset link")]
    ResetPassword {
        #[arg(help = "Registered email")]
        email: String,
    },

    #[command(about = "Set a new password using the uid and token from a reset link")]
    ConfirmReset {
        #[arg(help = "User ID from the reset link")]
        uid: String,
        #[arg(help = "Token from the reset link")]
        token: String,
        #[arg(long, help = "New password")]
        password: String,
        #[arg(long, help = "New password again")]
        password_confirm: String,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = CliContext::load()?;

    match cmd {
        AuthCommands::Login { email, password } => {
            let session = ctx.api.login(&email, &password).await?;
            ctx.persist()?;
            output_success(
                &output_format,
                &format!("Logged in as {} ({})", session.name, session.role.as_str()),
                Some(json!({ "admin_id": session.admin_id, "email": session.email, "role": session.role })),
            )
        }
        AuthCommands::Logout => {
            ctx.require_login()?;
            ctx.api.logout().await?;
            ctx.persist()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Whoami => {
            let session = ctx.api.session().require_session()?;
            output_success(
                &output_format,
                &format!("{} <{}> - {}", session.name, session.email, session.role.as_str()),
                Some(json!({
                    "admin_id": session.admin_id,
                    "name": session.name,
                    "email": session.email,
                    "photo": session.photo,
                    "role": session.role,
                })),
            )
        }
        AuthCommands::ResetPassword { email } => {
            ctx.api.request_password_reset(&email).await?;
            output_success(&output_format, "Password reset link sent. Check your email.", None)
        }
        AuthCommands::ConfirmReset { uid, token, password, password_confirm } => {
            let confirm = PasswordResetConfirm { uid, token, password, password_confirm };
            ctx.api.confirm_password_reset(&confirm).await?;
            output_success(&output_format, "Password has been reset. You can now log in.", None)
        }
    }
}
