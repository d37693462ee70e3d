//! Occupation catalog and occupation rating factors
//!
//! Each occupation maps to a coarse risk rating class, and each class maps to
//! a multiplicative loading on the sum insured. The factors are placeholders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// Coarse occupational risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingClass {
    #[serde(rename = "Light Manual")]
    LightManual,
    #[serde(rename = "Professional")]
    Professional,
    #[serde(rename = "White Collar")]
    WhiteCollar,
    #[serde(rename = "Heavy Manual")]
    HeavyManual,
}

impl RatingClass {
    pub const ALL: [RatingClass; 4] = [
        RatingClass::LightManual,
        RatingClass::Professional,
        RatingClass::WhiteCollar,
        RatingClass::HeavyManual,
    ];

    /// Display name, also used as the key in factor tables
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingClass::LightManual => "Light Manual",
            RatingClass::Professional => "Professional",
            RatingClass::WhiteCollar => "White Collar",
            RatingClass::HeavyManual => "Heavy Manual",
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingClass {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RatingClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RatingError::UnknownRatingClass(trimmed.to_string()))
    }
}

/// Selectable occupations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupation {
    Cleaner,
    Doctor,
    Author,
    Farmer,
    Mechanic,
    Florist,
    Other,
}

impl Occupation {
    /// Catalog key (the value submitted by the dropdown)
    pub fn key(&self) -> &'static str {
        self.entry().key
    }

    pub fn label(&self) -> &'static str {
        self.entry().label
    }

    pub fn rating_class(&self) -> RatingClass {
        self.entry().rating_class
    }

    /// Look up an occupation by catalog key. Unknown keys give `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        OccupationCatalog::lookup(key).map(|entry| entry.occupation)
    }

    fn entry(&self) -> &'static OccupationEntry {
        // Catalog rows are in variant declaration order
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Occupation {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Occupation::from_key(s).ok_or_else(|| RatingError::UnknownOccupation(s.trim().to_string()))
    }
}

/// One row of the occupation catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupationEntry {
    pub occupation: Occupation,
    pub key: &'static str,
    pub label: &'static str,
    pub rating_class: RatingClass,
}

impl OccupationEntry {
    /// Dropdown label: `<Label> — <RatingClass>`
    pub fn display_label(&self) -> String {
        format!("{} — {}", self.label, self.rating_class)
    }
}

const CATALOG: [OccupationEntry; 7] = [
    OccupationEntry { occupation: Occupation::Cleaner, key: "Cleaner", label: "Cleaner", rating_class: RatingClass::LightManual },
    OccupationEntry { occupation: Occupation::Doctor, key: "Doctor", label: "Doctor", rating_class: RatingClass::Professional },
    OccupationEntry { occupation: Occupation::Author, key: "Author", label: "Author", rating_class: RatingClass::WhiteCollar },
    OccupationEntry { occupation: Occupation::Farmer, key: "Farmer", label: "Farmer", rating_class: RatingClass::HeavyManual },
    OccupationEntry { occupation: Occupation::Mechanic, key: "Mechanic", label: "Mechanic", rating_class: RatingClass::HeavyManual },
    OccupationEntry { occupation: Occupation::Florist, key: "Florist", label: "Florist", rating_class: RatingClass::LightManual },
    OccupationEntry { occupation: Occupation::Other, key: "Other", label: "Other", rating_class: RatingClass::HeavyManual },
];

/// Fixed, read-only occupation catalog
pub struct OccupationCatalog;

impl OccupationCatalog {
    /// All rows in display order
    pub fn entries() -> &'static [OccupationEntry] {
        &CATALOG
    }

    /// Exact key match (surrounding whitespace ignored)
    pub fn lookup(key: &str) -> Option<&'static OccupationEntry> {
        let key = key.trim();
        CATALOG.iter().find(|entry| entry.key == key)
    }

    /// (key, display label) pairs for populating a select list
    pub fn options() -> impl Iterator<Item = (&'static str, String)> {
        CATALOG.iter().map(|entry| (entry.key, entry.display_label()))
    }
}

/// Rating class -> occupation factor
#[derive(Debug, Clone, PartialEq)]
pub struct OccupationFactors {
    factors: Vec<(RatingClass, f64)>,
}

impl OccupationFactors {
    /// Placeholder factors (not real pricing)
    pub fn placeholder() -> Self {
        Self {
            factors: vec![
                (RatingClass::LightManual, 11.50),
                (RatingClass::Professional, 1.5),
                (RatingClass::WhiteCollar, 2.25),
                (RatingClass::HeavyManual, 31.75),
            ],
        }
    }

    /// Create from loaded CSV data
    pub fn from_loaded(factors: &[(RatingClass, f64)]) -> Self {
        for class in RatingClass::ALL {
            if !factors.iter().any(|(c, _)| *c == class) {
                log::warn!("No factor loaded for rating class {}, defaulting to 1.0", class);
            }
        }
        Self {
            factors: factors.to_vec(),
        }
    }

    /// Factor for a class; a class missing from the table is 1.0
    pub fn factor(&self, class: RatingClass) -> f64 {
        self.factors
            .iter()
            .rev()
            .find(|(c, _)| *c == class)
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0)
    }
}

impl Default for OccupationFactors {
    fn default() -> Self {
        Self::placeholder()
    }
}
