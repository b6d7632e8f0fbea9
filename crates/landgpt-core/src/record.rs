//! Land-parcel records — the khatauni rows collected from the Bhulekh portal.
//!
//! A record is identified by its [`ParcelId`] (district, tehsil, village,
//! khasra number). Writing a record whose identity already exists replaces
//! every detail field wholesale; records are never deleted.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The identity tuple of a land parcel. Unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParcelId {
  pub district:      String,
  pub tehsil:        String,
  pub village:       String,
  pub khasra_number: String,
}

impl ParcelId {
  pub fn new(
    district: impl Into<String>,
    tehsil: impl Into<String>,
    village: impl Into<String>,
    khasra_number: impl Into<String>,
  ) -> Self {
    Self {
      district:      district.into(),
      tehsil:        tehsil.into(),
      village:       village.into(),
      khasra_number: khasra_number.into(),
    }
  }

  /// Reject identities with a blank component.
  pub fn validate(&self) -> Result<()> {
    let parts = [
      ("district", &self.district),
      ("tehsil", &self.tehsil),
      ("village", &self.village),
      ("khasra_number", &self.khasra_number),
    ];
    for (name, value) in parts {
      if value.trim().is_empty() {
        return Err(Error::MissingField(name));
      }
    }
    Ok(())
  }
}

// ─── Details ─────────────────────────────────────────────────────────────────

/// Everything about a parcel other than its identity.
///
/// Land type and irrigation status are free text: the portal reports them in
/// Hindi and the vocabulary differs between districts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelDetails {
  /// Holding (account) that groups this parcel with others of the same owner.
  pub khata_number:      Option<String>,
  pub owner_name:        Option<String>,
  pub father_name:       Option<String>,
  pub area_hectare:      Option<f64>,
  pub area_bigha:        Option<f64>,
  pub land_type:         Option<String>,
  pub irrigation_status: Option<String>,
  pub crop_details:      Option<String>,
  pub mutation_date:     Option<NaiveDate>,
  pub registry_date:     Option<NaiveDate>,
}

impl ParcelDetails {
  pub fn validate(&self) -> Result<()> {
    check_area("area_hectare", self.area_hectare)?;
    check_area("area_bigha", self.area_bigha)
  }
}

fn check_area(field: &'static str, area: Option<f64>) -> Result<()> {
  match area {
    Some(value) if !value.is_finite() || value < 0.0 => {
      Err(Error::InvalidArea { field, value })
    }
    _ => Ok(()),
  }
}

/// Input to [`RecordStore::upsert`](crate::store::RecordStore::upsert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLandRecord {
  pub parcel:  ParcelId,
  pub details: ParcelDetails,
}

impl NewLandRecord {
  pub fn new(parcel: ParcelId) -> Self {
    Self { parcel, details: ParcelDetails::default() }
  }

  pub fn validate(&self) -> Result<()> {
    self.parcel.validate()?;
    self.details.validate()
  }
}

/// A record as persisted. `created_at` is assigned on first insert and kept
/// across replacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
  pub record_id:  i64,
  pub parcel:     ParcelId,
  pub details:    ParcelDetails,
  pub created_at: DateTime<Utc>,
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// The closed set of text columns a [`RecordQuery`] may filter on.
///
/// The string form of each variant is its column name.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
  District,
  Tehsil,
  Village,
  KhasraNumber,
  KhataNumber,
  OwnerName,
  FatherName,
  LandType,
  IrrigationStatus,
  CropDetails,
}

impl RecordField {
  /// The SQL column backing this field.
  pub fn column(self) -> &'static str { self.into() }

  /// Parse a column name, rejecting anything outside the closed set.
  pub fn parse(name: &str) -> Result<Self> {
    name.parse().map_err(|_| Error::UnknownField(name.to_owned()))
  }
}

/// Parameters for [`RecordStore::search`](crate::store::RecordStore::search).
///
/// Every criterion is a case-sensitive substring match; all must hold.
/// Blank criterion values are dropped. No ordering is guaranteed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
  criteria:             BTreeMap<RecordField, String>,
  /// Only parcels strictly larger than this many hectares.
  pub min_area_hectare: Option<f64>,
  pub limit:            Option<usize>,
}

impl RecordQuery {
  pub fn new() -> Self { Self::default() }

  /// Add (or replace) a substring criterion. Blank values clear the field.
  pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
    let value = value.into();
    if value.is_empty() {
      self.criteria.remove(&field);
    } else {
      self.criteria.insert(field, value);
    }
    self
  }

  pub fn larger_than(mut self, hectare: f64) -> Self {
    self.min_area_hectare = Some(hectare);
    self
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  /// Build a query from loosely-typed `(column, value)` pairs, validating
  /// every column against [`RecordField`].
  pub fn from_pairs<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
  ) -> Result<Self> {
    pairs
      .into_iter()
      .try_fold(Self::new(), |query, (name, value)| {
        Ok(query.with(RecordField::parse(name)?, value))
      })
  }

  pub fn criteria(&self) -> impl Iterator<Item = (RecordField, &str)> {
    self.criteria.iter().map(|(f, v)| (*f, v.as_str()))
  }

  pub fn is_unfiltered(&self) -> bool {
    self.criteria.is_empty() && self.min_area_hectare.is_none()
  }
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Plot count and area totals over a filtered set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
  pub plots:           u64,
  pub total_hectare:   f64,
  pub average_hectare: f64,
}

/// Per-district row of [`RecordStore::district_breakdown`](crate::store::RecordStore::district_breakdown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
  pub district:        String,
  pub plots:           u64,
  pub average_hectare: f64,
}

/// A distinct field value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
  pub value: String,
  pub count: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_identity_component_is_rejected() {
    let parcel = ParcelId::new("Agra", "  ", "Sample Village 1", "1");
    assert_eq!(parcel.validate(), Err(Error::MissingField("tehsil")));

    let parcel = ParcelId::new("Agra", "Fatehabad", "Sample Village 1", "");
    assert_eq!(parcel.validate(), Err(Error::MissingField("khasra_number")));
  }

  #[test]
  fn negative_area_is_rejected() {
    let mut record =
      NewLandRecord::new(ParcelId::new("Agra", "Agra", "Sample Village 1", "1"));
    record.details.area_bigha = Some(-1.0);
    assert!(matches!(
      record.validate(),
      Err(Error::InvalidArea { field: "area_bigha", .. })
    ));

    record.details.area_bigha = Some(0.0);
    assert!(record.validate().is_ok());
  }

  #[test]
  fn field_names_round_trip_through_column() {
    use strum::IntoEnumIterator;
    for field in RecordField::iter() {
      assert_eq!(RecordField::parse(field.column()), Ok(field));
    }
    assert_eq!(RecordField::KhasraNumber.column(), "khasra_number");
  }

  #[test]
  fn unknown_field_is_rejected() {
    let err = RecordQuery::from_pairs([("district", "Agra"), ("1=1; --", "x")])
      .unwrap_err();
    assert_eq!(err, Error::UnknownField("1=1; --".into()));
  }

  #[test]
  fn blank_criteria_are_dropped() {
    let query = RecordQuery::from_pairs([("district", "Agra"), ("village", "")])
      .unwrap();
    let criteria: Vec<_> = query.criteria().collect();
    assert_eq!(criteria, vec![(RecordField::District, "Agra")]);

    assert!(RecordQuery::new().with(RecordField::Tehsil, "").is_unfiltered());
  }
}
