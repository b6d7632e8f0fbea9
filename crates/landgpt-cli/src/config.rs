//! Runtime configuration.
//!
//! Every field has a built-in default, so the TOML file is optional. Values
//! are threaded explicitly into each component; nothing reads globals.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use landgpt_assistant::{DistrictKeyword, districts, responder::DEFAULT_EXCERPT_CHARS};
use landgpt_bhulekh::DelayPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
  pub store_path:         PathBuf,
  /// How many gazetteer districts the setup collects, in portal order.
  pub district_count:     usize,
  pub limit_per_district: usize,
  pub scraper:            ScraperConfig,
  pub responder:          ResponderConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path:         PathBuf::from("landgpt.db"),
      district_count:     3,
      limit_per_district: 8,
      scraper:            ScraperConfig::default(),
      responder:          ResponderConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
  /// Fixed seed for reproducible mock data.
  pub seed:         Option<u64>,
  /// Politeness delay bounds per record; 0/0 disables it.
  pub delay_min_ms: u64,
  pub delay_max_ms: u64,
}

impl ScraperConfig {
  pub fn delay(&self) -> DelayPolicy {
    DelayPolicy::from_range(self.delay_min_ms, self.delay_max_ms)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponderConfig {
  /// Maximum FAQ answer length in characters; absent prints answers whole.
  pub excerpt_chars: Option<usize>,
  pub districts:     Vec<DistrictKeyword>,
}

impl Default for ResponderConfig {
  fn default() -> Self {
    Self {
      excerpt_chars: Some(DEFAULT_EXCERPT_CHARS),
      districts:     districts::up_districts(),
    }
  }
}

impl AppConfig {
  /// Read `path` if it exists, filling unspecified fields with defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }
}
