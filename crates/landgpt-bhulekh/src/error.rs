//! Error types for `landgpt-bhulekh`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record source could not produce a record.
  #[error("source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The record store refused or failed to persist a record.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
