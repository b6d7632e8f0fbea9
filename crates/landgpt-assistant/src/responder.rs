//! [`KeywordResponder`] — a stateless, single-pass keyword classifier.
//!
//! Categories are tried in a fixed priority order and the first one whose
//! keywords appear in the lower-cased query wins:
//!
//! mutation → khasra → registry → district → help → fallback
//!
//! A query mentioning both "mutation" and "khasra" is therefore answered as a
//! mutation question. Within a category the answer comes from the FAQ or
//! record store; a lookup that finds nothing (or fails) yields the category's
//! canned message instead.

use landgpt_core::{
  faq::FaqEntry,
  query_log::NewQuery,
  record::{RecordField, RecordQuery},
  store::{FaqStore, QueryLog, RecordStore},
};
use strum::{Display, IntoStaticStr};

use crate::districts::DistrictKeyword;

const MUTATION_KEYWORDS: &[&str] = &["mutation", "म्यूटेशन"];
const KHASRA_KEYWORDS: &[&str] = &["khasra", "खसरा"];
const REGISTRY_KEYWORDS: &[&str] = &["registry", "रजिस्ट्री"];
const HELP_KEYWORDS: &[&str] = &["help", "मदद"];

const MUTATION_CANNED: &str =
  "म्यूटेशन की जानकारी: यह भूमि स्वामित्व बदलने की प्रक्रिया है। \
   I can help with mutation processes.";
const KHASRA_CANNED: &str =
  "खसरा नंबर: भूमि के टुकड़े की विशिष्ट पहचान संख्या है। यह सरकारी रिकॉर्ड में \
   जमीन की पहचान के लिए उपयोग होती है।";
const REGISTRY_CANNED: &str =
  "रजिस्ट्री के लिए आवश्यक दस्तावेज: बिक्री पत्र, पुराना रजिस्ट्री दस्तावेज, \
   खसरा/खतौनी, आधार कार्ड, PAN कार्ड";
const HELP_TEXT: &str = "मैं निम्न विषयों में मदद कर सकता हूं:
   • भूमि रिकॉर्ड खोजना
   • म्यूटेशन प्रक्रिया
   • रजिस्ट्री की जानकारी
   • खसरा नंबर की व्याख्या";

/// Reply when no category matches.
pub const FALLBACK_TEXT: &str = "मैं आपकी भूमि संबंधी समस्या में मदद करने की कोशिश \
   कर रहा हूं। कृपया अधिक स्पष्ट प्रश्न पूछें।";

/// Default FAQ excerpt length, in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
  Mutation,
  Khasra,
  Registry,
  District,
  Help,
  Fallback,
}

impl Category {
  pub fn as_str(self) -> &'static str { self.into() }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
  pub category: Category,
  pub text:     String,
}

impl Response {
  fn new(category: Category, text: impl Into<String>) -> Self {
    Self { category, text: text.into() }
  }
}

pub struct KeywordResponder {
  districts:     Vec<DistrictKeyword>,
  /// `None` returns FAQ answers in full.
  excerpt_chars: Option<usize>,
}

impl KeywordResponder {
  pub fn new(districts: Vec<DistrictKeyword>, excerpt_chars: Option<usize>) -> Self {
    Self { districts, excerpt_chars }
  }

  /// Pick the category for `text`, and the district when it is a district
  /// query.
  pub fn classify(&self, text: &str) -> (Category, Option<&DistrictKeyword>) {
    let lowered = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if mentions(MUTATION_KEYWORDS) {
      return (Category::Mutation, None);
    }
    if mentions(KHASRA_KEYWORDS) {
      return (Category::Khasra, None);
    }
    if mentions(REGISTRY_KEYWORDS) {
      return (Category::Registry, None);
    }
    if let Some(district) = self.districts.iter().find(|d| d.matches(&lowered)) {
      return (Category::District, Some(district));
    }
    if mentions(HELP_KEYWORDS) {
      return (Category::Help, None);
    }
    (Category::Fallback, None)
  }

  /// Answer `text` from `store`. Never fails: store errors are logged and
  /// the category's canned message is returned.
  pub async fn respond<S>(&self, store: &S, text: &str) -> Response
  where
    S: RecordStore + FaqStore,
  {
    let (category, district) = self.classify(text);

    match category {
      Category::Mutation => {
        let faq = lookup(store.find_by_tag("mutation").await).flatten();
        self.faq_or(category, faq, MUTATION_CANNED)
      }
      Category::Khasra => {
        let faq = lookup(store.find_by_question("Khasra").await).flatten();
        self.faq_or(category, faq, KHASRA_CANNED)
      }
      Category::Registry => {
        let faq = lookup(store.find_by_tag("registry").await).flatten();
        self.faq_or(category, faq, REGISTRY_CANNED)
      }
      Category::District => {
        // classify() always pairs District with a keyword.
        let Some(district) = district else {
          return Response::new(Category::Fallback, FALLBACK_TEXT);
        };
        let query = RecordQuery::new().with(RecordField::District, district.name.as_str());
        let text = match lookup(store.summarize(&query).await) {
          Some(s) if s.plots > 0 => format!(
            "{} में {} भूमि रिकॉर्ड हैं, कुल क्षेत्रफल {:.2} हेक्टेयर, औसत क्षेत्रफल {:.2} हेक्टेयर",
            district.name, s.plots, s.total_hectare, s.average_hectare
          ),
          _ => format!("{} के लिए कोई रिकॉर्ड नहीं मिला", district.name),
        };
        Response::new(category, text)
      }
      Category::Help => Response::new(category, HELP_TEXT),
      Category::Fallback => Response::new(category, FALLBACK_TEXT),
    }
  }

  /// [`respond`](Self::respond), then append the interaction to the query
  /// log. `query_type` overrides the category tag.
  pub async fn respond_and_log<S>(
    &self,
    store: &S,
    text: &str,
    query_type: Option<&str>,
  ) -> Response
  where
    S: RecordStore + FaqStore + QueryLog,
  {
    let response = self.respond(store, text).await;
    let tag = query_type.unwrap_or(response.category.as_str());
    store
      .record(NewQuery::new(text).response(response.text.as_str()).query_type(tag))
      .await;
    response
  }

  fn faq_or(&self, category: Category, faq: Option<FaqEntry>, canned: &str) -> Response {
    match faq {
      Some(entry) => Response::new(category, excerpt(&entry.answer, self.excerpt_chars)),
      None => Response::new(category, canned),
    }
  }
}

impl Default for KeywordResponder {
  fn default() -> Self {
    Self::new(crate::districts::up_districts(), Some(DEFAULT_EXCERPT_CHARS))
  }
}

/// Log a failed lookup and treat it like an empty one.
fn lookup<T, E: std::fmt::Display>(result: Result<T, E>) -> Option<T> {
  result
    .map_err(|e| tracing::warn!(error = %e, "responder lookup failed"))
    .ok()
}

/// First `max` characters of `text`, with `...` appended when cut.
fn excerpt(text: &str, max: Option<usize>) -> String {
  match max {
    Some(max) if text.chars().count() > max => {
      let mut cut: String = text.chars().take(max).collect();
      cut.push_str("...");
      cut
    }
    _ => text.to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use landgpt_core::{
    record::{NewLandRecord, ParcelId},
    store::QueryLog as _,
  };
  use landgpt_store_sqlite::SqliteStore;

  use super::*;
  use crate::seed;

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  async fn seeded_store() -> SqliteStore {
    let s = store().await;
    seed::load_sample_faqs(&s).await.unwrap();
    s
  }

  // ─── Classification ────────────────────────────────────────────────────────

  #[test]
  fn khasra_question_is_khasra() {
    let r = KeywordResponder::default();
    assert_eq!(r.classify("Khasra number kya hota hai?").0, Category::Khasra);
  }

  #[test]
  fn mutation_wins_over_khasra() {
    let r = KeywordResponder::default();
    assert_eq!(
      r.classify("mutation ke baad khasra badlega?").0,
      Category::Mutation
    );
  }

  #[test]
  fn keyword_categories_beat_district_names() {
    let r = KeywordResponder::default();
    assert_eq!(r.classify("Agra registry office").0, Category::Registry);

    let (category, district) = r.classify("Agra mein kitni zameen hai?");
    assert_eq!(category, Category::District);
    assert_eq!(district.unwrap().name, "Agra");
  }

  #[test]
  fn district_beats_help() {
    let r = KeywordResponder::default();
    assert_eq!(r.classify("help me with Bareilly").0, Category::District);
    assert_eq!(r.classify("HELP").0, Category::Help);
    assert_eq!(r.classify("मदद चाहिए").0, Category::Help);
  }

  #[test]
  fn devanagari_keywords_are_recognised() {
    let r = KeywordResponder::default();
    assert_eq!(r.classify("म्यूटेशन कैसे करें").0, Category::Mutation);
    assert_eq!(r.classify("खसरा क्या है").0, Category::Khasra);
    assert_eq!(r.classify("आगरा में जमीन").0, Category::District);
  }

  #[test]
  fn empty_and_unrecognised_fall_back() {
    let r = KeywordResponder::default();
    assert_eq!(r.classify("").0, Category::Fallback);
    assert_eq!(r.classify("namaste, kaise ho?").0, Category::Fallback);
  }

  #[test]
  fn excerpt_counts_characters_not_bytes() {
    assert_eq!(excerpt("खसरा नंबर", Some(4)), "खसरा...");
    assert_eq!(excerpt("short", Some(10)), "short");
    assert_eq!(excerpt("unbounded", None), "unbounded");
  }

  // ─── Answers ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn khasra_answer_comes_from_faq() {
    let s = seeded_store().await;
    let r = KeywordResponder::new(vec![], None);

    let response = r.respond(&s, "Khasra number kya hota hai?").await;
    assert_eq!(response.category, Category::Khasra);
    assert!(response.text.starts_with("खसरा नंबर का मतलब"));
  }

  #[tokio::test]
  async fn mutation_answer_is_excerpted() {
    let s = seeded_store().await;
    let r = KeywordResponder::new(vec![], Some(20));

    let response = r.respond(&s, "Mutation ke liye application kaise karein?").await;
    assert_eq!(response.category, Category::Mutation);
    assert!(response.text.ends_with("..."));
    assert_eq!(response.text.chars().count(), 23);
  }

  #[tokio::test]
  async fn empty_faq_store_uses_canned_answers() {
    let s = store().await;
    let r = KeywordResponder::default();

    let response = r.respond(&s, "registry ke documents").await;
    assert_eq!(response, Response::new(Category::Registry, REGISTRY_CANNED));

    let response = r.respond(&s, "khasra?").await;
    assert_eq!(response.text, KHASRA_CANNED);
  }

  #[tokio::test]
  async fn district_answer_summarises_records() {
    let s = store().await;
    for (khasra, hectare) in [("1", 1.25), ("2", 2.75)] {
      let mut record =
        NewLandRecord::new(ParcelId::new("Agra", "Agra", "Sample Village 1", khasra));
      record.details.area_hectare = Some(hectare);
      landgpt_core::store::RecordStore::upsert(&s, record).await.unwrap();
    }
    let r = KeywordResponder::default();

    let response = r.respond(&s, "Agra mein kitni zameen hai?").await;
    assert_eq!(response.category, Category::District);
    assert!(response.text.contains("2 भूमि रिकॉर्ड"));
    assert!(response.text.contains("4.00 हेक्टेयर"));

    let response = r.respond(&s, "Aligarh?").await;
    assert_eq!(response.text, "Aligarh के लिए कोई रिकॉर्ड नहीं मिला");
  }

  #[tokio::test]
  async fn failed_lookups_degrade_to_canned_answers() {
    let dir = std::env::temp_dir().join(format!("landgpt-responder-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("landgpt.db");
    std::fs::remove_file(&path).ok();

    let s = SqliteStore::open(&path).await.unwrap();
    seed::load_sample_faqs(&s).await.unwrap();
    rusqlite::Connection::open(&path)
      .unwrap()
      .execute_batch("DROP TABLE legal_faqs; DROP TABLE land_records;")
      .unwrap();
    let r = KeywordResponder::default();

    let response = r.respond(&s, "Mutation ke liye application kaise karein?").await;
    assert_eq!(response, Response::new(Category::Mutation, MUTATION_CANNED));

    let response = r.respond(&s, "Khasra number kya hota hai?").await;
    assert_eq!(response.text, KHASRA_CANNED);

    let response = r.respond_and_log(&s, "Agra mein kitni zameen hai?", None).await;
    assert_eq!(response.category, Category::District);
    assert_eq!(response.text, "Agra के लिए कोई रिकॉर्ड नहीं मिला");
    assert_eq!(s.count_queries().await.unwrap(), 1);

    drop(s);
    std::fs::remove_dir_all(&dir).ok();
  }

  #[tokio::test]
  async fn unrecognised_query_gets_fallback() {
    let s = seeded_store().await;
    let r = KeywordResponder::default();
    let response = r.respond(&s, "").await;
    assert_eq!(response, Response::new(Category::Fallback, FALLBACK_TEXT));
  }

  #[tokio::test]
  async fn respond_and_log_appends_one_entry() {
    let s = seeded_store().await;
    let r = KeywordResponder::default();

    r.respond_and_log(&s, "help", None).await;
    r.respond_and_log(&s, "Khasra number kya hota hai?", Some("demo")).await;

    assert_eq!(s.count_queries().await.unwrap(), 2);
    let recent = s.recent_queries(2).await.unwrap();
    assert_eq!(recent[0].query_type.as_deref(), Some("demo"));
    assert_eq!(recent[1].query_type.as_deref(), Some("help"));
    assert_eq!(recent[1].response.as_deref(), Some(HELP_TEXT));
  }
}
