//! Rating tables: occupation catalog, occupation factors and age bands

mod age;
mod occupation;
pub mod loader;

pub use age::AgeBands;
pub use occupation::{Occupation, OccupationCatalog, OccupationEntry, OccupationFactors, RatingClass};
pub use loader::LoadedRatingTables;

use std::path::Path;

use crate::error::RatingError;

/// Container for all rating lookups. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTables {
    pub occupation_factors: OccupationFactors,
    pub age_bands: AgeBands,
}

impl RatingTables {
    /// Built-in placeholder factors (illustration only)
    pub fn placeholder() -> Self {
        Self {
            occupation_factors: OccupationFactors::placeholder(),
            age_bands: AgeBands::placeholder(),
        }
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, RatingError> {
        let loaded = LoadedRatingTables::load_from(path)?;

        Ok(Self {
            occupation_factors: OccupationFactors::from_loaded(&loaded.occupation_factors),
            age_bands: AgeBands::from_loaded(&loaded.age_bands)?,
        })
    }

    /// Occupation factor for the occupation's rating class
    pub fn occupation_factor(&self, class: RatingClass) -> f64 {
        self.occupation_factors.factor(class)
    }

    pub fn age_factor(&self, age_next_birthday: u32) -> f64 {
        self.age_bands.factor(age_next_birthday)
    }
}

impl Default for RatingTables {
    fn default() -> Self {
        Self::placeholder()
    }
}
