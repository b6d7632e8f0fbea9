//! [`SqliteStore`] — the SQLite implementation of the LandGPT store traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use landgpt_core::{
  faq::{FaqEntry, NewFaq},
  query_log::{NewQuery, QueryLogEntry},
  record::{
    AreaSummary, DistrictSummary, LandRecord, NewLandRecord, ParcelId,
    RecordField, RecordQuery, Tally,
  },
  store::{FaqStore, QueryLog, RecordStore},
};

use crate::{
  Error, Result,
  encode::{
    FAQ_COLUMNS, RECORD_COLUMNS, RawFaq, RawLandRecord, RawQuery, decode_dt,
    encode_date, encode_dt, encode_limit, like_pattern,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Land records, legal FAQs and the query log in a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Row counts across all three tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
  pub land_records: u64,
  pub faqs:         u64,
  pub queries:      u64,
  pub districts:    u64,
  pub tehsils:      u64,
  pub villages:     u64,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema initialised");
    Ok(())
  }

  /// Names of the user tables, alphabetically.
  pub async fn list_tables(&self) -> Result<Vec<String>> {
    let tables = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name FROM sqlite_master
           WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
           ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(tables)
  }

  pub async fn stats(&self) -> Result<StoreStats> {
    let stats = self
      .conn
      .call(|conn| {
        let count = |sql: &str| -> rusqlite::Result<u64> {
          conn.query_row(sql, [], |row| row.get::<_, i64>(0)).map(|n| n as u64)
        };
        Ok(StoreStats {
          land_records: count("SELECT COUNT(*) FROM land_records")?,
          faqs:         count("SELECT COUNT(*) FROM legal_faqs")?,
          queries:      count("SELECT COUNT(*) FROM user_queries")?,
          districts:    count("SELECT COUNT(DISTINCT district) FROM land_records")?,
          tehsils:      count("SELECT COUNT(DISTINCT tehsil) FROM land_records")?,
          villages:     count("SELECT COUNT(DISTINCT village) FROM land_records")?,
        })
      })
      .await?;
    Ok(stats)
  }

  async fn count_rows(&self, table: &'static str) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
          row.get(0)
        })?)
      })
      .await?;
    Ok(n as u64)
  }

  async fn insert_query(&self, entry: NewQuery) -> Result<QueryLogEntry> {
    let timestamp = Utc::now();
    let at_str = encode_dt(timestamp);
    let NewQuery { query, response, query_type } = entry;
    let (q, r, t) = (query.clone(), response.clone(), query_type.clone());

    let query_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_queries (query, response, query_type, timestamp)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![q, r, t, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(QueryLogEntry { query_id, query, response, query_type, timestamp })
  }

  /// First FAQ whose `column` matches `fragment`, oldest first.
  async fn find_faq(
    &self,
    column: &'static str,
    fragment: &str,
  ) -> Result<Option<FaqEntry>> {
    let pattern = like_pattern(fragment);

    let raw: Option<RawFaq> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {FAQ_COLUMNS} FROM legal_faqs
               WHERE {column} LIKE ?1 ESCAPE '\\'
               ORDER BY faq_id
               LIMIT 1"
            ),
            rusqlite::params![pattern],
            RawFaq::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawFaq::into_faq).transpose()
  }
}

/// Build the `WHERE` clause for a record query. Column names come from the
/// closed [`RecordField`] set; every value is bound as a parameter.
fn record_filter(query: &RecordQuery) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = vec![];
  let mut params: Vec<Value> = vec![];

  for (field, value) in query.criteria() {
    params.push(Value::Text(value.to_owned()));
    // instr() rather than LIKE: substring matching must be case-sensitive.
    conds.push(format!("instr({}, ?{}) > 0", field.column(), params.len()));
  }
  if let Some(min) = query.min_area_hectare {
    params.push(Value::Real(min));
    conds.push(format!("area_hectare > ?{}", params.len()));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (where_clause, params)
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn upsert(&self, record: NewLandRecord) -> Result<LandRecord> {
    record.validate()?;

    let NewLandRecord { parcel, details } = record;
    let now_str = encode_dt(Utc::now());
    let p = parcel.clone();
    let d = details.clone();
    let mutation_date = d.mutation_date.map(encode_date);
    let registry_date = d.registry_date.map(encode_date);

    let (record_id, created_at): (i64, String) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO land_records (
             district, tehsil, village, khasra_number, khata_number,
             owner_name, father_name, area_hectare, area_bigha, land_type,
             irrigation_status, crop_details, mutation_date, registry_date,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
           ON CONFLICT (district, tehsil, village, khasra_number) DO UPDATE SET
             khata_number      = excluded.khata_number,
             owner_name        = excluded.owner_name,
             father_name       = excluded.father_name,
             area_hectare      = excluded.area_hectare,
             area_bigha        = excluded.area_bigha,
             land_type         = excluded.land_type,
             irrigation_status = excluded.irrigation_status,
             crop_details      = excluded.crop_details,
             mutation_date     = excluded.mutation_date,
             registry_date     = excluded.registry_date
           RETURNING record_id, created_at",
          rusqlite::params![
            p.district,
            p.tehsil,
            p.village,
            p.khasra_number,
            d.khata_number,
            d.owner_name,
            d.father_name,
            d.area_hectare,
            d.area_bigha,
            d.land_type,
            d.irrigation_status,
            d.crop_details,
            mutation_date,
            registry_date,
            now_str,
          ],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
      })
      .await?;

    Ok(LandRecord {
      record_id,
      parcel,
      details,
      created_at: decode_dt(&created_at)?,
    })
  }

  async fn get(&self, parcel: &ParcelId) -> Result<Option<LandRecord>> {
    let p = parcel.clone();

    let raw: Option<RawLandRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {RECORD_COLUMNS} FROM land_records
               WHERE district = ?1 AND tehsil = ?2
                 AND village = ?3 AND khasra_number = ?4"
            ),
            rusqlite::params![p.district, p.tehsil, p.village, p.khasra_number],
            RawLandRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawLandRecord::into_record).transpose()
  }

  async fn search(&self, query: &RecordQuery) -> Result<Vec<LandRecord>> {
    let (where_clause, mut params) = record_filter(query);
    params.push(Value::Integer(encode_limit(query.limit)));
    let sql = format!(
      "SELECT {RECORD_COLUMNS} FROM land_records
       {where_clause}
       ORDER BY record_id
       LIMIT ?{}",
      params.len()
    );

    let raws: Vec<RawLandRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawLandRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLandRecord::into_record).collect()
  }

  async fn count(&self) -> Result<u64> { self.count_rows("land_records").await }

  async fn summarize(&self, query: &RecordQuery) -> Result<AreaSummary> {
    let (where_clause, params) = record_filter(query);
    let sql = format!(
      "SELECT COUNT(*), COALESCE(SUM(area_hectare), 0.0), COALESCE(AVG(area_hectare), 0.0)
       FROM land_records
       {where_clause}"
    );

    let (plots, total_hectare, average_hectare): (i64, f64, f64) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(params.iter()),
          |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?)
      })
      .await?;

    Ok(AreaSummary { plots: plots as u64, total_hectare, average_hectare })
  }

  async fn district_breakdown(&self) -> Result<Vec<DistrictSummary>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT district, COUNT(*), COALESCE(AVG(area_hectare), 0.0)
           FROM land_records
           GROUP BY district
           ORDER BY district",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(DistrictSummary {
              district:        row.get(0)?,
              plots:           row.get::<_, i64>(1)? as u64,
              average_hectare: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn tally(&self, field: RecordField) -> Result<Vec<Tally>> {
    let column = field.column();
    let sql = format!(
      "SELECT {column}, COUNT(*) FROM land_records
       WHERE {column} IS NOT NULL
       GROUP BY {column}
       ORDER BY COUNT(*) DESC, {column}"
    );

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Tally { value: row.get(0)?, count: row.get::<_, i64>(1)? as u64 })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── FaqStore impl ───────────────────────────────────────────────────────────

impl FaqStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, faq: NewFaq) -> Result<FaqEntry> {
    faq.validate()?;

    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let f = faq.clone();

    let faq_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO legal_faqs (question, answer, category, tags, language, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![f.question, f.answer, f.category, f.tags, f.language, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(FaqEntry {
      faq_id,
      question: faq.question,
      answer: faq.answer,
      category: faq.category,
      tags: faq.tags,
      language: faq.language,
      created_at,
    })
  }

  async fn search_faqs(&self, term: &str, limit: Option<usize>) -> Result<Vec<FaqEntry>> {
    let pattern = like_pattern(term);
    let limit_val = encode_limit(limit);

    let raws: Vec<RawFaq> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FAQ_COLUMNS} FROM legal_faqs
           WHERE question LIKE ?1 ESCAPE '\\'
              OR answer   LIKE ?1 ESCAPE '\\'
              OR tags     LIKE ?1 ESCAPE '\\'
           ORDER BY faq_id
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern, limit_val], RawFaq::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFaq::into_faq).collect()
  }

  async fn find_by_tag(&self, tag: &str) -> Result<Option<FaqEntry>> {
    self.find_faq("tags", tag).await
  }

  async fn find_by_question(&self, fragment: &str) -> Result<Option<FaqEntry>> {
    self.find_faq("question", fragment).await
  }

  async fn count_faqs(&self) -> Result<u64> { self.count_rows("legal_faqs").await }

  async fn category_counts(&self) -> Result<Vec<Tally>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT category, COUNT(*) FROM legal_faqs
           WHERE category IS NOT NULL
           GROUP BY category
           ORDER BY category",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Tally { value: row.get(0)?, count: row.get::<_, i64>(1)? as u64 })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── QueryLog impl ───────────────────────────────────────────────────────────

impl QueryLog for SqliteStore {
  type Error = Error;

  async fn record(&self, entry: NewQuery) {
    if let Err(e) = self.insert_query(entry).await {
      tracing::warn!(error = %e, "failed to record user query");
    }
  }

  async fn count_queries(&self) -> Result<u64> { self.count_rows("user_queries").await }

  async fn recent_queries(&self, limit: usize) -> Result<Vec<QueryLogEntry>> {
    let limit_val = encode_limit(Some(limit));

    let raws: Vec<RawQuery> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT query_id, query, response, query_type, timestamp
           FROM user_queries
           ORDER BY query_id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawQuery {
              query_id:   row.get(0)?,
              query:      row.get(1)?,
              response:   row.get(2)?,
              query_type: row.get(3)?,
              timestamp:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuery::into_entry).collect()
  }
}
