//! Sequential bulk collection: districts × tehsils × villages × khasra numbers
//! into a [`RecordStore`].

use landgpt_core::{record::ParcelId, store::RecordStore};

use crate::{Error, source::LandRecordSource};

/// Tehsils visited per district.
pub const TEHSILS_PER_DISTRICT: usize = 2;
/// Villages visited per tehsil.
pub const VILLAGES_PER_TEHSIL: usize = 2;
/// Upper bound on khasra numbers visited per village.
pub const MAX_KHASRA_PER_VILLAGE: usize = 5;

/// One parcel that could not be collected.
#[derive(Debug)]
pub struct BulkFailure {
  pub parcel: ParcelId,
  pub error:  Error,
}

#[derive(Debug, Default)]
pub struct BulkReport {
  pub succeeded: usize,
  pub failed:    Vec<BulkFailure>,
}

impl BulkReport {
  pub fn attempted(&self) -> usize { self.succeeded + self.failed.len() }
}

/// Khasra numbers `1..=n` visited per village so that a district yields at
/// most `limit_per_district` records.
pub fn khasra_per_village(limit_per_district: usize) -> usize {
  (limit_per_district / (TEHSILS_PER_DISTRICT * VILLAGES_PER_TEHSIL))
    .min(MAX_KHASRA_PER_VILLAGE)
}

/// Collect records for `districts` and upsert each into `store`.
///
/// Failures are logged and collected; iteration always runs to the end.
pub async fn bulk_generate<Src, S>(
  source: &mut Src,
  store: &S,
  districts: &[String],
  limit_per_district: usize,
) -> BulkReport
where
  Src: LandRecordSource,
  S: RecordStore,
{
  let khasra_count = khasra_per_village(limit_per_district);
  let mut report = BulkReport::default();

  for district in districts {
    tracing::info!(%district, "collecting district");

    for tehsil in source.tehsils(district).into_iter().take(TEHSILS_PER_DISTRICT) {
      let villages = source.villages(district, &tehsil);

      for village in villages.into_iter().take(VILLAGES_PER_TEHSIL) {
        for khasra in 1..=khasra_count {
          let parcel =
            ParcelId::new(district.as_str(), tehsil.as_str(), village.as_str(), khasra.to_string());

          match collect_one(source, store, &parcel).await {
            Ok(()) => {
              report.succeeded += 1;
              tracing::debug!(%district, %tehsil, %village, khasra, "stored parcel");
            }
            Err(error) => {
              tracing::warn!(%district, %tehsil, %village, khasra, %error, "failed to collect parcel");
              report.failed.push(BulkFailure { parcel, error });
            }
          }
        }
      }
    }
  }

  tracing::info!(
    succeeded = report.succeeded,
    failed = report.failed.len(),
    "bulk collection finished"
  );
  report
}

async fn collect_one<Src, S>(source: &mut Src, store: &S, parcel: &ParcelId) -> Result<(), Error>
where
  Src: LandRecordSource,
  S: RecordStore,
{
  let record = source
    .fetch_khatauni(parcel)
    .await
    .map_err(|e| Error::Source(Box::new(e)))?;
  store
    .upsert(record)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fmt;

  use landgpt_core::record::{NewLandRecord, RecordField, RecordQuery};
  use landgpt_store_sqlite::SqliteStore;

  use super::*;
  use crate::{DelayPolicy, MockScraper, gazetteer, mock};

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  fn first_districts(n: usize) -> Vec<String> {
    gazetteer::districts().into_iter().take(n).collect()
  }

  #[test]
  fn khasra_count_is_capped() {
    assert_eq!(khasra_per_village(8), 2);
    assert_eq!(khasra_per_village(3), 0);
    assert_eq!(khasra_per_village(10), 2);
    assert_eq!(khasra_per_village(1000), MAX_KHASRA_PER_VILLAGE);
  }

  #[tokio::test]
  async fn three_districts_of_eight() {
    let s = store().await;
    let mut scraper = MockScraper::new(Some(11), DelayPolicy::None);

    let report = bulk_generate(&mut scraper, &s, &first_districts(3), 8).await;

    assert!(report.succeeded <= 3 * 8);
    assert_eq!(report.succeeded, 24);
    assert!(report.failed.is_empty());

    let all = s.search(&RecordQuery::new()).await.unwrap();
    assert_eq!(all.len(), report.succeeded);
    for r in &all {
      assert!(mock::AREA_HECTARE_RANGE.contains(&r.details.area_hectare.unwrap()));
      assert!(mock::AREA_BIGHA_RANGE.contains(&r.details.area_bigha.unwrap()));
    }

    let agra = s
      .search(&RecordQuery::new().with(RecordField::District, "Agra"))
      .await
      .unwrap();
    assert_eq!(agra.len(), 8);
  }

  #[tokio::test]
  async fn rerun_does_not_duplicate() {
    let s = store().await;
    let mut scraper = MockScraper::new(Some(2), DelayPolicy::None);
    let districts = first_districts(1);

    bulk_generate(&mut scraper, &s, &districts, 8).await;
    bulk_generate(&mut scraper, &s, &districts, 8).await;

    assert_eq!(s.count().await.unwrap(), 8);
  }

  #[tokio::test]
  async fn district_without_sample_tehsils_uses_fallback() {
    let s = store().await;
    let mut scraper = MockScraper::new(Some(2), DelayPolicy::None);

    let report = bulk_generate(&mut scraper, &s, &["Banda".to_owned()], 8).await;

    // One fallback tehsil × two villages × two khasra numbers.
    assert_eq!(report.succeeded, 4);
  }

  // ── Failure handling ──────────────────────────────────────────────────────

  #[derive(Debug)]
  struct PortalDown;

  impl fmt::Display for PortalDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("portal unavailable")
    }
  }

  impl std::error::Error for PortalDown {}

  /// Fails on khasra 2; returns an invalid area on khasra 3.
  struct Flaky(MockScraper);

  impl LandRecordSource for Flaky {
    type Error = PortalDown;

    fn districts(&self) -> Vec<String> { self.0.districts() }

    fn tehsils(&self, district: &str) -> Vec<String> { self.0.tehsils(district) }

    fn villages(&self, district: &str, tehsil: &str) -> Vec<String> {
      self.0.villages(district, tehsil)
    }

    async fn fetch_khatauni(&mut self, parcel: &ParcelId) -> Result<NewLandRecord, PortalDown> {
      match parcel.khasra_number.as_str() {
        "2" => Err(PortalDown),
        "3" => {
          let mut record = self.0.generate(parcel);
          record.details.area_hectare = Some(-1.0);
          Ok(record)
        }
        _ => Ok(self.0.generate(parcel)),
      }
    }
  }

  #[tokio::test]
  async fn failures_are_collected_and_iteration_continues() {
    let s = store().await;
    let mut source = Flaky(MockScraper::new(Some(4), DelayPolicy::None));

    // 12 / 4 = 3 khasra numbers per village, four villages.
    let report = bulk_generate(&mut source, &s, &first_districts(1), 12).await;

    assert_eq!(report.attempted(), 12);
    assert_eq!(report.succeeded, 4);
    assert_eq!(report.failed.len(), 8);
    assert!(
      report
        .failed
        .iter()
        .filter(|f| f.parcel.khasra_number == "2")
        .all(|f| matches!(f.error, Error::Source(_)))
    );
    assert!(
      report
        .failed
        .iter()
        .filter(|f| f.parcel.khasra_number == "3")
        .all(|f| matches!(f.error, Error::Store(_)))
    );
    assert_eq!(s.count().await.unwrap(), 4);
  }
}
