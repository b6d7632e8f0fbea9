//! District names recognised in user queries.

use serde::Deserialize;

/// A district as it may appear in a query: its English name (matched
/// case-insensitively) and, optionally, its Devanagari spelling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DistrictKeyword {
  /// Stored form, as used in the `district` column.
  pub name:  String,
  pub hindi: Option<String>,
}

impl DistrictKeyword {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), hindi: None }
  }

  pub fn hindi(mut self, hindi: impl Into<String>) -> Self {
    self.hindi = Some(hindi.into());
    self
  }

  /// Whether `lowered` (an already lower-cased query) mentions the district.
  pub fn matches(&self, lowered: &str) -> bool {
    lowered.contains(&self.name.to_lowercase())
      || self.hindi.as_deref().is_some_and(|h| lowered.contains(h))
  }
}

/// The sample Uttar Pradesh districts with their Hindi names.
pub fn up_districts() -> Vec<DistrictKeyword> {
  [
    ("Agra", "आगरा"),
    ("Aligarh", "अलीगढ़"),
    ("Allahabad", "इलाहाबाद"),
    ("Ambedkar Nagar", "अंबेडकर नगर"),
    ("Amethi", "अमेठी"),
    ("Amroha", "अमरोहा"),
    ("Auraiya", "औरैया"),
    ("Azamgarh", "आजमगढ़"),
    ("Baghpat", "बागपत"),
    ("Bahraich", "बहराइच"),
    ("Ballia", "बलिया"),
    ("Balrampur", "बलरामपुर"),
    ("Banda", "बांदा"),
    ("Barabanki", "बाराबंकी"),
    ("Bareilly", "बरेली"),
  ]
  .into_iter()
  .map(|(name, hindi)| DistrictKeyword::new(name).hindi(hindi))
  .collect()
}
