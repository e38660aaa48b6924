//! SFM CLI - inspect and edit field provenance on a Security Force Monitor backend.

use clap::Parser;
use sfm_cli::commands;
use sfm_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> sfm_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(ref path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    if let Some(profile_name) = cli.profile.clone() {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    if let Command::Profile(args) = cli.command {
        return commands::execute_profile(args, &mut config, &config_path, &formatter).await;
    }

    let client = config.client_config(cli.base_url.as_deref())?;
    tracing::debug!(base_url = %client.base_url, lang = %client.lang, "using backend");

    match cli.command {
        Command::Sources(args) => commands::execute_sources(args, &client, &formatter).await,
        Command::Versions(args) => commands::execute_versions(args, &client, &formatter).await,
        Command::Revert(args) => commands::execute_revert(args, &client, &formatter).await,
        Command::Translations(args) => {
            commands::execute_translations(args, &client, &formatter).await
        }
        Command::Translate(args) => commands::execute_translate(args, &client, &formatter).await,
        Command::Languages(args) => commands::execute_languages(args, &client, &formatter).await,
        Command::Search(args) => commands::execute_search(args, &client, &formatter).await,
        Command::Profile(_) => Ok(()),
    }
}
