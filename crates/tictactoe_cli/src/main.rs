//! Tic-tac-toe - terminal driver
//!
//! Sets up two players from the command line, plays scripted matches on
//! the session engine and prints what a game screen would show.

#![warn(missing_docs)]

mod avatars;
mod cli;
mod config;
mod driver;

use anyhow::Result;
use avatars::AvatarCatalog;
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = AppConfig::load(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Play(args) => driver::run(&config, &args, &mut stdout),
        Command::Avatars { dir } => list_avatars(config, dir, &mut stdout),
    }
}

/// Logs go to stderr so stdout stays a clean transcript.
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the numbered avatar catalog
#[instrument(skip(config, out))]
fn list_avatars(config: AppConfig, dir: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
    let config = match dir {
        Some(dir) => config.with_avatar_dir(dir),
        None => config,
    };

    let catalog = AvatarCatalog::scan(config.avatar_dir(), config.avatar_extensions())?;
    info!(count = catalog.entries().len(), "Listing avatars");

    writeln!(out, "Avatars in {}:", catalog.dir().display())?;
    for (i, name) in catalog.entries().iter().enumerate() {
        writeln!(out, "{:>2}. {}", i + 1, name)?;
    }
    Ok(())
}
