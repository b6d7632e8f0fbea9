//! Error types for `landgpt-core`.

use thiserror::Error;

/// Validation failures raised before anything touches storage.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("required field is missing or blank: {0}")]
  MissingField(&'static str),

  #[error("{field} must be a finite, non-negative number (got {value})")]
  InvalidArea { field: &'static str, value: f64 },

  #[error("unknown record field: {0:?}")]
  UnknownField(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
