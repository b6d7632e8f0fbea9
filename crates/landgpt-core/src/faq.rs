//! Legal FAQ entries about land records.
//!
//! FAQs are seeded once and never edited. Duplicate questions are allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Language tag applied when a seed entry does not specify one.
pub const DEFAULT_LANGUAGE: &str = "hindi";

/// Input to [`FaqStore::insert`](crate::store::FaqStore::insert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaq {
  pub question: String,
  /// Free text; usually a multi-line numbered list.
  pub answer:   String,
  pub category: Option<String>,
  /// Comma-separated keywords, e.g. `"mutation,application,process"`.
  pub tags:     Option<String>,
  pub language: String,
}

impl NewFaq {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      question: question.into(),
      answer:   answer.into(),
      category: None,
      tags:     None,
      language: DEFAULT_LANGUAGE.to_owned(),
    }
  }

  pub fn category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn tags(mut self, tags: impl Into<String>) -> Self {
    self.tags = Some(tags.into());
    self
  }

  pub fn language(mut self, language: impl Into<String>) -> Self {
    self.language = language.into();
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.question.trim().is_empty() {
      return Err(Error::MissingField("question"));
    }
    if self.answer.trim().is_empty() {
      return Err(Error::MissingField("answer"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
  pub faq_id:     i64,
  pub question:   String,
  pub answer:     String,
  pub category:   Option<String>,
  pub tags:       Option<String>,
  pub language:   String,
  pub created_at: DateTime<Utc>,
}

impl FaqEntry {
  /// Individual tags, trimmed, empties skipped.
  pub fn tag_list(&self) -> Vec<&str> {
    self
      .tags
      .as_deref()
      .unwrap_or_default()
      .split(',')
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_and_answer_are_required() {
    assert_eq!(
      NewFaq::new(" ", "answer").validate(),
      Err(Error::MissingField("question"))
    );
    assert_eq!(
      NewFaq::new("question", "").validate(),
      Err(Error::MissingField("answer"))
    );
    assert!(NewFaq::new("q", "a").validate().is_ok());
  }

  #[test]
  fn tag_list_splits_and_trims() {
    let entry = FaqEntry {
      faq_id:     1,
      question:   "q".into(),
      answer:     "a".into(),
      category:   None,
      tags:       Some("mutation, application,,process ".into()),
      language:   DEFAULT_LANGUAGE.into(),
      created_at: Utc::now(),
    };
    assert_eq!(entry.tag_list(), vec!["mutation", "application", "process"]);
  }
}
