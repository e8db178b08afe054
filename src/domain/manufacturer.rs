//! Manufacturer reference records.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Embedded reference data the fixture source cycles through
const FIXTURES: &str = include_str!("../../assets/manufacturers.json");

/// Identifier assigned when a record enters the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ManufacturerId(pub u32);

impl std::fmt::Display for ManufacturerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A manufacturer listed in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(default)]
    pub id: ManufacturerId,
    pub name: String,
    /// "City, Country"
    pub location: String,
    /// 0.0 to 5.0
    pub rating: f32,
    pub reviews: u32,
    /// Headcount band such as "200-500"
    pub employees: String,
    pub specialties: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    /// Shown as a recommended match
    #[serde(default)]
    pub suggested: bool,
}

impl Manufacturer {
    /// Country part of the location
    pub fn country(&self) -> &str {
        self.location
            .rsplit_once(',')
            .map(|(_, country)| country.trim())
            .unwrap_or(self.location.trim())
    }

    pub fn has_specialty(&self, tag: &str) -> bool {
        self.specialties.iter().any(|s| s.eq_ignore_ascii_case(tag))
    }

    /// Star string for compact rows, e.g. "★ 4.8 (127)"
    pub fn rating_label(&self) -> String {
        format!("★ {:.1} ({})", self.rating, self.reviews)
    }
}

/// Parse the embedded fixture list
pub fn load_fixtures() -> Result<Vec<Manufacturer>, CatalogError> {
    let mut records: Vec<Manufacturer> = serde_json::from_str(FIXTURES)?;
    for (idx, record) in records.iter_mut().enumerate() {
        record.id = ManufacturerId(idx as u32 + 1);
    }
    Ok(records)
}

#[cfg(test)]
pub(crate) fn sample(name: &str, location: &str, rating: f32, specialties: &[&str]) -> Manufacturer {
    Manufacturer {
        id: ManufacturerId(0),
        name: name.to_string(),
        location: location.to_string(),
        rating,
        reviews: 10,
        employees: "200-500".to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        images: Vec::new(),
        description: String::new(),
        suggested: false,
    }
}
