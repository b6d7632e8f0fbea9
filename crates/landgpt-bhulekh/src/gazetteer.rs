//! Sample administrative hierarchy of Uttar Pradesh used by the mock source.

/// Districts listed on the UP Bhulekh portal, in portal order.
pub const DISTRICTS: &[&str] = &[
  "Agra",
  "Aligarh",
  "Allahabad",
  "Ambedkar Nagar",
  "Amethi",
  "Amroha",
  "Auraiya",
  "Azamgarh",
  "Baghpat",
  "Bahraich",
  "Ballia",
  "Balrampur",
  "Banda",
  "Barabanki",
  "Bareilly",
];

/// Placeholder tehsil for districts without sample data.
pub const FALLBACK_TEHSIL: &str = "Sample Tehsil";

pub const VILLAGES: &[&str] =
  &["Sample Village 1", "Sample Village 2", "Sample Village 3"];

pub fn districts() -> Vec<String> {
  DISTRICTS.iter().map(|d| (*d).to_owned()).collect()
}

pub fn tehsils(district: &str) -> Vec<String> {
  let known: &[&str] = match district {
    "Agra" => &["Agra", "Fatehabad", "Kheragarh", "Pinahat"],
    "Aligarh" => &["Atrauli", "Gabhana", "Iglas", "Koil"],
    "Allahabad" => &["Bara", "Handia", "Karchhana", "Koraon"],
    _ => &[FALLBACK_TEHSIL],
  };
  known.iter().map(|t| (*t).to_owned()).collect()
}

/// Every tehsil currently shares the same three sample villages.
pub fn villages(_district: &str, _tehsil: &str) -> Vec<String> {
  VILLAGES.iter().map(|v| (*v).to_owned()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_district_falls_back_to_sample_tehsil() {
    assert_eq!(tehsils("Banda"), vec![FALLBACK_TEHSIL.to_owned()]);
    assert_eq!(tehsils("Agra").len(), 4);
  }

  #[test]
  fn fifteen_districts_start_with_agra() {
    let all = districts();
    assert_eq!(all.len(), 15);
    assert_eq!(all[0], "Agra");
  }
}
