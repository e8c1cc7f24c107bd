pub mod admin;
pub mod auth;
pub mod card;
pub mod category;
pub mod deck;
pub mod table;
pub mod user;

use tokio::sync::mpsc;

use crate::cli::config::CliContext;
use crate::cli::utils::output_notices;
use crate::cli::OutputFormat;
use crate::action::ActionButton;
use crate::dashboard::{Confirmation, Notice, Screen};
use crate::models::EntityKind;

/// A signed-in screen with its records already fetched
pub(crate) async fn loaded_screen(
    kind: EntityKind,
    output_format: &OutputFormat,
) -> anyhow::Result<(Screen, mpsc::UnboundedReceiver<Notice>)> {
    let ctx = CliContext::load()?;
    ctx.require_login()?;

    let (mut screen, mut notices) = ctx.screen(kind);
    let loaded = screen.load().await;
    settle(output_format, &mut notices, loaded)?;
    Ok((screen, notices))
}

/// Print whatever the screen reported, then hand back the outcome
pub(crate) fn settle<T>(
    output_format: &OutputFormat,
    notices: &mut mpsc::UnboundedReceiver<Notice>,
    result: crate::error::Result<T>,
) -> anyhow::Result<T> {
    output_notices(output_format, notices)?;
    Ok(result?)
}

/// Delete `id` behind a confirmation; without `--yes` only the warning is shown
pub(crate) async fn confirmed_delete(
    screen: &mut Screen,
    notices: &mut mpsc::UnboundedReceiver<Notice>,
    id: &str,
    yes: bool,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let label = screen
        .source()
        .find(id)
        .map(|record| record.text("name"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{} {}", screen.kind(), id));
    let dialog = Confirmation::delete(&label, ActionButton::from_config());

    if !yes {
        anyhow::bail!("{} {} Re-run with --yes to confirm.", dialog.title(), dialog.message());
    }

    dialog.open();
    match dialog.confirm(screen.delete(id)).await {
        Some(outcome) => settle(output_format, notices, outcome),
        None => anyhow::bail!("Delete of {} is already in progress", label),
    }
}
