use clap::Parser;
use content_admin::cli::utils::output_error;
use content_admin::cli::{Cli, OutputFormat};
use content_admin::error::AdminError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so ADMIN_API_BASE_URL and friends can live next to the binary
    let _ = dotenvy::dotenv();

    let config = content_admin::config::config();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(content_admin::is_development!())
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Starting content-admin in {:?} mode against {}", config.environment, config.api.base_url);

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = content_admin::cli::run(cli).await {
        match std::env::var("ADMIN_CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => match e.downcast_ref::<AdminError>() {
                Some(err) => output_error(&output_format, err)?,
                None => eprintln!("Error: {e}"),
            },
        }
        std::process::exit(1);
    }

    Ok(())
}
