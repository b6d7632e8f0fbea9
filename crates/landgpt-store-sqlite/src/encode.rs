//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use landgpt_core::{
  faq::FaqEntry,
  query_log::QueryLogEntry,
  record::{LandRecord, ParcelDetails, ParcelId},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Wrap `term` as `%term%`, escaping LIKE wildcards with `\`.
///
/// Pair with `ESCAPE '\'` in the statement.
pub fn like_pattern(term: &str) -> String {
  let mut out = String::with_capacity(term.len() + 2);
  out.push('%');
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

/// SQLite treats a negative LIMIT as "no limit".
pub fn encode_limit(limit: Option<usize>) -> i64 {
  limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawLandRecord::from_row`].
pub const RECORD_COLUMNS: &str = "record_id, district, tehsil, village, \
  khasra_number, khata_number, owner_name, father_name, area_hectare, \
  area_bigha, land_type, irrigation_status, crop_details, mutation_date, \
  registry_date, created_at";

/// Raw values read directly from a `land_records` row.
pub struct RawLandRecord {
  pub record_id:         i64,
  pub district:          String,
  pub tehsil:            String,
  pub village:           String,
  pub khasra_number:     String,
  pub khata_number:      Option<String>,
  pub owner_name:        Option<String>,
  pub father_name:       Option<String>,
  pub area_hectare:      Option<f64>,
  pub area_bigha:        Option<f64>,
  pub land_type:         Option<String>,
  pub irrigation_status: Option<String>,
  pub crop_details:      Option<String>,
  pub mutation_date:     Option<String>,
  pub registry_date:     Option<String>,
  pub created_at:        String,
}

impl RawLandRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:         row.get(0)?,
      district:          row.get(1)?,
      tehsil:            row.get(2)?,
      village:           row.get(3)?,
      khasra_number:     row.get(4)?,
      khata_number:      row.get(5)?,
      owner_name:        row.get(6)?,
      father_name:       row.get(7)?,
      area_hectare:      row.get(8)?,
      area_bigha:        row.get(9)?,
      land_type:         row.get(10)?,
      irrigation_status: row.get(11)?,
      crop_details:      row.get(12)?,
      mutation_date:     row.get(13)?,
      registry_date:     row.get(14)?,
      created_at:        row.get(15)?,
    })
  }

  pub fn into_record(self) -> Result<LandRecord> {
    Ok(LandRecord {
      record_id:  self.record_id,
      parcel:     ParcelId {
        district:      self.district,
        tehsil:        self.tehsil,
        village:       self.village,
        khasra_number: self.khasra_number,
      },
      details:    ParcelDetails {
        khata_number:      self.khata_number,
        owner_name:        self.owner_name,
        father_name:       self.father_name,
        area_hectare:      self.area_hectare,
        area_bigha:        self.area_bigha,
        land_type:         self.land_type,
        irrigation_status: self.irrigation_status,
        crop_details:      self.crop_details,
        mutation_date:     self.mutation_date.as_deref().map(decode_date).transpose()?,
        registry_date:     self.registry_date.as_deref().map(decode_date).transpose()?,
      },
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawFaq::from_row`].
pub const FAQ_COLUMNS: &str =
  "faq_id, question, answer, category, tags, language, created_at";

/// Raw values read directly from a `legal_faqs` row.
pub struct RawFaq {
  pub faq_id:     i64,
  pub question:   String,
  pub answer:     String,
  pub category:   Option<String>,
  pub tags:       Option<String>,
  pub language:   String,
  pub created_at: String,
}

impl RawFaq {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      faq_id:     row.get(0)?,
      question:   row.get(1)?,
      answer:     row.get(2)?,
      category:   row.get(3)?,
      tags:       row.get(4)?,
      language:   row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_faq(self) -> Result<FaqEntry> {
    Ok(FaqEntry {
      faq_id:     self.faq_id,
      question:   self.question,
      answer:     self.answer,
      category:   self.category,
      tags:       self.tags,
      language:   self.language,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `user_queries` row.
pub struct RawQuery {
  pub query_id:   i64,
  pub query:      String,
  pub response:   Option<String>,
  pub query_type: Option<String>,
  pub timestamp:  String,
}

impl RawQuery {
  pub fn into_entry(self) -> Result<QueryLogEntry> {
    Ok(QueryLogEntry {
      query_id:   self.query_id,
      query:      self.query,
      response:   self.response,
      query_type: self.query_type,
      timestamp:  decode_dt(&self.timestamp)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("mutation"), "%mutation%");
    assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
  }

  #[test]
  fn dates_use_iso_calendar_format() {
    let d = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
    assert_eq!(encode_date(d), "2023-01-15");
    assert_eq!(decode_date("2023-01-15").unwrap(), d);
    assert!(matches!(decode_date("15/01/2023"), Err(Error::DateParse(_))));
  }

  #[test]
  fn missing_limit_means_unbounded() {
    assert_eq!(encode_limit(None), -1);
    assert_eq!(encode_limit(Some(2)), 2);
  }
}
