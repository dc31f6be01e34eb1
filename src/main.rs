use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use callsync::clock::SystemClock;
use callsync::config::Config;
use callsync::pipeline;
use callsync::store::OdooStore;

#[derive(Parser)]
#[command(name = "callsync")]
#[command(about = "Scrapes 3CX call reports and syncs call logs into Odoo")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "callsync.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the call report once and push unseen records
    Run,
    /// Show the resolved configuration (secrets redacted)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "info,chromiumoxide=warn,chromiumoxide::conn=off,chromiumoxide::handler=off",
            )
        }))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?
        .resolve()
        .with_context(|| format!("Incomplete configuration: {}", cli.config.display()))?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Config => {
            println!("Config file: {}", cli.config.display());
            println!("Console: {} (headless: {})", config.console.base_url, config.console.headless);
            println!("Console user: {}", config.console.username);
            println!("Store: {} (db: {})", config.store.url, config.store.db);
            println!("Store user: {}", config.store.username);
        }
        Command::Run => {
            let store = OdooStore::login(
                &config.store.url,
                config.store.db.clone(),
                &config.store.username,
                config.store.password.clone(),
            )
            .await
            .context("Failed to connect to Odoo")?;

            let report = pipeline::run(&config, &store, &SystemClock).await;

            println!(
                "Created {} call logs ({} already synced, {} failed)",
                report.created, report.skipped_existing, report.failed
            );
        }
    }

    Ok(())
}
