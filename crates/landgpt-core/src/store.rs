//! Store traits for land records, FAQs and the query log.
//!
//! Implemented by storage backends (e.g. `landgpt-store-sqlite`). The mock
//! generator and the keyword responder depend on these traits, not on a
//! concrete backend.

use std::future::Future;

use crate::{
  faq::{FaqEntry, NewFaq},
  query_log::{NewQuery, QueryLogEntry},
  record::{
    AreaSummary, DistrictSummary, LandRecord, NewLandRecord, ParcelId,
    RecordField, RecordQuery, Tally,
  },
};

// ─── Records ─────────────────────────────────────────────────────────────────

/// Persistence for [`LandRecord`]s keyed by [`ParcelId`].
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a record, or replace every detail of the record with the same
  /// identity. Fails with a validation error if an identity component is
  /// blank.
  fn upsert(
    &self,
    record: NewLandRecord,
  ) -> impl Future<Output = Result<LandRecord, Self::Error>> + Send + '_;

  /// Fetch a single record by identity. Returns `None` if absent.
  fn get<'a>(
    &'a self,
    parcel: &'a ParcelId,
  ) -> impl Future<Output = Result<Option<LandRecord>, Self::Error>> + Send + 'a;

  /// All records matching every criterion of `query`. An empty result is not
  /// an error.
  fn search<'a>(
    &'a self,
    query: &'a RecordQuery,
  ) -> impl Future<Output = Result<Vec<LandRecord>, Self::Error>> + Send + 'a;

  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Plot count and hectare totals over the records matching `query`.
  /// `query.limit` is ignored.
  fn summarize<'a>(
    &'a self,
    query: &'a RecordQuery,
  ) -> impl Future<Output = Result<AreaSummary, Self::Error>> + Send + 'a;

  /// Plot count and average area per district.
  fn district_breakdown(
    &self,
  ) -> impl Future<Output = Result<Vec<DistrictSummary>, Self::Error>> + Send + '_;

  /// Distinct non-null values of `field` with their row counts.
  fn tally(
    &self,
    field: RecordField,
  ) -> impl Future<Output = Result<Vec<Tally>, Self::Error>> + Send + '_;
}

// ─── FAQs ────────────────────────────────────────────────────────────────────

/// Persistence for legal [`FaqEntry`]s. Append-only.
pub trait FaqStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append an entry. No uniqueness check is made.
  fn insert(
    &self,
    faq: NewFaq,
  ) -> impl Future<Output = Result<FaqEntry, Self::Error>> + Send + '_;

  /// Entries whose question, answer or tags contain `term`. `limit` is the
  /// caller's choice; `None` returns every match.
  fn search_faqs<'a>(
    &'a self,
    term: &'a str,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<FaqEntry>, Self::Error>> + Send + 'a;

  /// First entry whose tags contain `tag`.
  fn find_by_tag<'a>(
    &'a self,
    tag: &'a str,
  ) -> impl Future<Output = Result<Option<FaqEntry>, Self::Error>> + Send + 'a;

  /// First entry whose question contains `fragment`.
  fn find_by_question<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Option<FaqEntry>, Self::Error>> + Send + 'a;

  fn count_faqs(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of entries per category. Uncategorised entries are excluded.
  fn category_counts(
    &self,
  ) -> impl Future<Output = Result<Vec<Tally>, Self::Error>> + Send + '_;
}

// ─── Query log ───────────────────────────────────────────────────────────────

/// Best-effort telemetry of user interactions.
pub trait QueryLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one interaction. Never fails the caller: backend errors are
  /// reported to the operator log and swallowed.
  fn record(&self, entry: NewQuery) -> impl Future<Output = ()> + Send + '_;

  fn count_queries(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Most recent entries first.
  fn recent_queries(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<QueryLogEntry>, Self::Error>> + Send + '_;
}
