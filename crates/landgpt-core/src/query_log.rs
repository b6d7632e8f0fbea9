//! Append-only log of user queries and the answers given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user interaction to append to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuery {
  pub query:      String,
  pub response:   Option<String>,
  /// Free-form classification, e.g. `"demo"` or a responder category.
  pub query_type: Option<String>,
}

impl NewQuery {
  pub fn new(query: impl Into<String>) -> Self {
    Self { query: query.into(), response: None, query_type: None }
  }

  pub fn response(mut self, response: impl Into<String>) -> Self {
    self.response = Some(response.into());
    self
  }

  pub fn query_type(mut self, query_type: impl Into<String>) -> Self {
    self.query_type = Some(query_type.into());
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
  pub query_id:   i64,
  pub query:      String,
  pub response:   Option<String>,
  pub query_type: Option<String>,
  pub timestamp:  DateTime<Utc>,
}
