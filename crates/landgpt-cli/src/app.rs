//! The numbered main menu and the actions behind it.
//!
//! Every action opens the store for its own duration. Failures are reported
//! on the console and the menu keeps running.

use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};
use landgpt_assistant::{KeywordResponder, seed};
use landgpt_bhulekh::{LandRecordSource, MockScraper, bulk_generate};
use landgpt_store_sqlite::SqliteStore;

use crate::{chat, config::AppConfig, demo};

const MENU: &str = "
📋 Main Menu:
1. 🚀 Quick Setup (Database + Demo)
2. 🗄️ Setup Database Only
3. 🎬 Run Demo
4. 💬 Interactive Query
5. 📊 View Database Stats
6. 🚪 Exit";

const MISSING_STORE: &str = "❌ Database not found. Please run setup first.";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
  QuickSetup,
  SetupDatabase,
  RunDemo,
  InteractiveQuery,
  ViewStats,
  Exit,
}

impl MenuChoice {
  pub fn parse(input: &str) -> Option<Self> {
    match input.trim() {
      "1" => Some(Self::QuickSetup),
      "2" => Some(Self::SetupDatabase),
      "3" => Some(Self::RunDemo),
      "4" => Some(Self::InteractiveQuery),
      "5" => Some(Self::ViewStats),
      "6" => Some(Self::Exit),
      _ => None,
    }
  }
}

pub struct App {
  config:    AppConfig,
  responder: KeywordResponder,
}

impl App {
  pub fn new(config: AppConfig) -> Self {
    let responder = KeywordResponder::new(
      config.responder.districts.clone(),
      config.responder.excerpt_chars,
    );
    Self { config, responder }
  }

  pub fn config(&self) -> &AppConfig { &self.config }

  /// Show the menu until the user picks Exit or input ends.
  pub async fn run_menu<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
    writeln!(out, "🌾 LandGPT - AI Legal Assistant for Land Records")?;
    writeln!(out, "{}", "=".repeat(50))?;

    let mut line = String::new();
    loop {
      writeln!(out, "{MENU}")?;
      write!(out, "\nSelect option (1-6): ")?;
      out.flush()?;

      line.clear();
      if input.read_line(&mut line)? == 0 {
        break;
      }

      let Some(choice) = MenuChoice::parse(&line) else {
        writeln!(out, "❌ Invalid option. Please choose 1-6.")?;
        continue;
      };
      if choice == MenuChoice::Exit {
        writeln!(out, "👋 Thank you for using LandGPT!")?;
        break;
      }

      if let Err(e) = self.dispatch(choice, input, out).await {
        tracing::error!(error = %e, ?choice, "menu action failed");
        writeln!(out, "❌ {e:#}")?;
      }
    }
    Ok(())
  }

  async fn dispatch<R: BufRead, W: Write>(
    &self,
    choice: MenuChoice,
    input: &mut R,
    out: &mut W,
  ) -> Result<()> {
    match choice {
      MenuChoice::QuickSetup => {
        writeln!(out, "\n🚀 Running Quick Setup...")?;
        self.setup_database(out).await?;
        self.run_demo(out).await?;
        writeln!(out, "\n✅ Quick setup completed!")?;
      }
      MenuChoice::SetupDatabase => self.setup_database(out).await?,
      MenuChoice::RunDemo => self.run_demo(out).await?,
      MenuChoice::InteractiveQuery => self.interactive(input, out).await?,
      MenuChoice::ViewStats => self.view_stats(out).await?,
      MenuChoice::Exit => {}
    }
    Ok(())
  }

  async fn open_store(&self) -> Result<SqliteStore> {
    let path = &self.config.store_path;
    SqliteStore::open(path)
      .await
      .with_context(|| format!("failed to open store at {}", path.display()))
  }

  /// Open the store only if setup has already created it.
  async fn open_existing<W: Write>(&self, out: &mut W) -> Result<Option<SqliteStore>> {
    if !self.config.store_path.exists() {
      writeln!(out, "{MISSING_STORE}")?;
      return Ok(None);
    }
    self.open_store().await.map(Some)
  }

  /// Create the schema, seed FAQs and collect mock records.
  pub async fn setup_database<W: Write>(&self, out: &mut W) -> Result<()> {
    writeln!(out, "\n🗄️ Setting up database...")?;
    let store = self.open_store().await?;

    writeln!(out, "📚 Loading legal FAQs...")?;
    let faqs = seed::load_sample_faqs(&store)
      .await
      .context("failed to load sample FAQs")?;
    writeln!(out, "   {faqs} FAQs loaded")?;

    let mut scraper = MockScraper::new(self.config.scraper.seed, self.config.scraper.delay());
    let districts: Vec<String> = scraper
      .districts()
      .into_iter()
      .take(self.config.district_count)
      .collect();

    writeln!(out, "🌐 Collecting records for {}...", districts.join(", "))?;
    let report =
      bulk_generate(&mut scraper, &store, &districts, self.config.limit_per_district).await;
    writeln!(out, "🎉 Total records collected: {}", report.succeeded)?;
    if !report.failed.is_empty() {
      writeln!(out, "⚠️ {} records could not be collected", report.failed.len())?;
    }

    writeln!(out, "✅ Database setup completed")?;
    Ok(())
  }

  pub async fn run_demo<W: Write>(&self, out: &mut W) -> Result<()> {
    if let Some(store) = self.open_existing(out).await? {
      demo::run(&store, &self.responder, out).await?;
    }
    Ok(())
  }

  pub async fn interactive<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
    if let Some(store) = self.open_existing(out).await? {
      chat::run(&self.responder, &store, input, out).await?;
    }
    Ok(())
  }

  pub async fn view_stats<W: Write>(&self, out: &mut W) -> Result<()> {
    if let Some(store) = self.open_existing(out).await? {
      demo::show_stats(&store, out).await?;
    }
    Ok(())
  }
}
