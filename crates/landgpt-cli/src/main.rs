//! `landgpt` — console assistant for Indian land records.
//!
//! # Usage
//!
//! ```
//! landgpt                      # numbered menu
//! landgpt setup --seed 42      # schema, FAQs and mock records, then exit
//! landgpt ask --db records.db  # interactive questions
//! ```

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use landgpt_cli::{App, AppConfig};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "landgpt", version, about = "AI legal assistant for land records")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "landgpt.toml")]
  config: PathBuf,

  /// SQLite database file (overrides `store_path`).
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  /// Seed for the mock record generator (overrides `scraper.seed`).
  #[arg(long)]
  seed: Option<u64>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
  /// Show the numbered menu (default).
  Menu,
  /// Create the database, load FAQs and collect mock records.
  Setup,
  /// Walk through a populated database.
  Demo,
  /// Ask questions interactively.
  Ask,
  /// Print database statistics.
  Stats,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // CLI flags override the config file, which overrides defaults.
  let mut config = match AppConfig::load(&cli.config) {
    Ok(config) => config,
    Err(e) => {
      tracing::error!(error = %e, "configuration rejected");
      println!("❌ {e:#}");
      return Ok(());
    }
  };
  if let Some(db) = cli.db {
    config.store_path = db;
  }
  if cli.seed.is_some() {
    config.scraper.seed = cli.seed;
  }

  let app = App::new(config);
  tracing::debug!(store = %app.config().store_path.display(), "configuration loaded");

  let stdin = io::stdin();
  let mut input = stdin.lock();
  let mut out = io::stdout();

  let result = match cli.command.unwrap_or(Command::Menu) {
    Command::Menu => app.run_menu(&mut input, &mut out).await,
    Command::Setup => app.setup_database(&mut out).await,
    Command::Demo => app.run_demo(&mut out).await,
    Command::Ask => app.interactive(&mut input, &mut out).await,
    Command::Stats => app.view_stats(&mut out).await,
  };

  // Failures are reported, never turned into a non-zero exit.
  if let Err(e) = result {
    tracing::error!(error = %e, "command failed");
    println!("❌ {e:#}");
  }
  Ok(())
}
