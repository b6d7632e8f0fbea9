//! [`MockScraper`] — a stand-in for the Bhulekh portal that fabricates
//! plausible khatauni rows instead of fetching them.

use std::{convert::Infallible, ops::RangeInclusive};

use chrono::NaiveDate;
use landgpt_core::record::{NewLandRecord, ParcelDetails, ParcelId};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
  gazetteer,
  source::{DelayPolicy, LandRecordSource},
};

pub const AREA_HECTARE_RANGE: RangeInclusive<f64> = 0.5..=5.0;
pub const AREA_BIGHA_RANGE: RangeInclusive<f64> = 1.0..=12.0;

/// Agricultural, residential, barren.
pub const LAND_TYPES: &[&str] = &["कृषि योग्य", "आवासीय", "बंजर"];

/// Irrigated, non-irrigated.
pub const IRRIGATION_STATUSES: &[&str] = &["सिंचित", "असिंचित"];

/// Wheat, paddy, maize, sugarcane.
pub const CROPS: &[&str] = &["गेहूं", "धान", "मक्का", "गन्ना"];

const OWNER_PLACEHOLDER: &str = "Sample Owner Name";
const FATHER_PLACEHOLDER: &str = "Sample Father Name";

pub struct MockScraper {
  rng:   StdRng,
  delay: DelayPolicy,
}

impl MockScraper {
  /// `seed` makes output reproducible; `None` seeds from the OS.
  pub fn new(seed: Option<u64>, delay: DelayPolicy) -> Self {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self { rng, delay }
  }

  /// Fabricate the details for a parcel. Identity is copied through.
  pub fn generate(&mut self, parcel: &ParcelId) -> NewLandRecord {
    let rng = &mut self.rng;
    NewLandRecord {
      parcel:  parcel.clone(),
      details: ParcelDetails {
        khata_number:      Some(format!("KH{}", rng.gen_range(100..=999))),
        owner_name:        Some(OWNER_PLACEHOLDER.to_owned()),
        father_name:       Some(FATHER_PLACEHOLDER.to_owned()),
        area_hectare:      Some(round2(rng.gen_range(AREA_HECTARE_RANGE))),
        area_bigha:        Some(round2(rng.gen_range(AREA_BIGHA_RANGE))),
        land_type:         pick(rng, LAND_TYPES),
        irrigation_status: pick(rng, IRRIGATION_STATUSES),
        crop_details:      pick(rng, CROPS),
        mutation_date:     NaiveDate::from_ymd_opt(2023, 1, 15),
        registry_date:     NaiveDate::from_ymd_opt(2022, 12, 10),
      },
    }
  }
}

fn pick(rng: &mut StdRng, choices: &[&str]) -> Option<String> {
  choices.choose(rng).map(|c| (*c).to_owned())
}

fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }

impl LandRecordSource for MockScraper {
  type Error = Infallible;

  fn districts(&self) -> Vec<String> { gazetteer::districts() }

  fn tehsils(&self, district: &str) -> Vec<String> { gazetteer::tehsils(district) }

  fn villages(&self, district: &str, tehsil: &str) -> Vec<String> {
    gazetteer::villages(district, tehsil)
  }

  async fn fetch_khatauni(&mut self, parcel: &ParcelId) -> Result<NewLandRecord, Infallible> {
    let pause = self.delay.sample(&mut self.rng);
    if !pause.is_zero() {
      tokio::time::sleep(pause).await;
    }
    Ok(self.generate(parcel))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parcel() -> ParcelId { ParcelId::new("Agra", "Agra", "Sample Village 1", "1") }

  #[test]
  fn generated_fields_stay_in_documented_ranges() {
    let mut scraper = MockScraper::new(Some(42), DelayPolicy::None);
    for _ in 0..500 {
      let record = scraper.generate(&parcel());
      let d = &record.details;

      assert!(AREA_HECTARE_RANGE.contains(&d.area_hectare.unwrap()));
      assert!(AREA_BIGHA_RANGE.contains(&d.area_bigha.unwrap()));
      assert!(LAND_TYPES.contains(&d.land_type.as_deref().unwrap()));
      assert!(IRRIGATION_STATUSES.contains(&d.irrigation_status.as_deref().unwrap()));
      assert!(CROPS.contains(&d.crop_details.as_deref().unwrap()));

      let khata = d.khata_number.as_deref().unwrap();
      let n: u32 = khata.strip_prefix("KH").unwrap().parse().unwrap();
      assert!((100..=999).contains(&n));
    }
  }

  #[test]
  fn identity_is_copied_through() {
    let mut scraper = MockScraper::new(Some(1), DelayPolicy::None);
    let record = scraper.generate(&parcel());
    assert_eq!(record.parcel, parcel());
    assert!(record.validate().is_ok());
  }

  #[test]
  fn same_seed_reproduces_output() {
    let mut a = MockScraper::new(Some(99), DelayPolicy::None);
    let mut b = MockScraper::new(Some(99), DelayPolicy::None);
    for _ in 0..10 {
      assert_eq!(a.generate(&parcel()), b.generate(&parcel()));
    }
  }

  #[test]
  fn areas_are_rounded_to_two_places() {
    let mut scraper = MockScraper::new(Some(5), DelayPolicy::None);
    let area = scraper.generate(&parcel()).details.area_hectare.unwrap();
    assert!(((area * 100.0).round() - area * 100.0).abs() < 1e-6);
  }

  #[tokio::test]
  async fn fetch_honours_fixed_delay() {
    let mut scraper = MockScraper::new(Some(3), DelayPolicy::Fixed { millis: 20 });
    let started = std::time::Instant::now();
    let record = scraper.fetch_khatauni(&parcel()).await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_millis(20));
    assert_eq!(record.parcel.khasra_number, "1");
  }
}
