//! CSV-based rating table loader
//!
//! Loads rating factors from CSV files in data/rating/

use std::fs::File;
use std::path::Path;

use super::RatingClass;
use crate::error::RatingError;

/// Default path to rating tables directory
pub const DEFAULT_RATING_PATH: &str = "data/rating";

/// Load occupation factors from CSV
/// Returns Vec<(rating_class, factor)> in file order
pub fn load_occupation_factors(path: &Path) -> Result<Vec<(RatingClass, f64)>, RatingError> {
    let file = File::open(path.join("occupation_factors.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut factors = Vec::new();

    for result in reader.records() {
        let record = result?;
        let class: RatingClass = column(&record, 0, "rating_class")?.parse()?;
        let factor = parse_f64("factor", column(&record, 1, "factor")?)?;
        factors.push((class, factor));
    }

    Ok(factors)
}

/// Load age bands from CSV
/// Returns Vec<(max_age, factor)>; an empty max_age is the open tail band
pub fn load_age_bands(path: &Path) -> Result<Vec<(Option<u32>, f64)>, RatingError> {
    let file = File::open(path.join("age_bands.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bands = Vec::new();

    for result in reader.records() {
        let record = result?;
        let max_age = match column(&record, 0, "max_age")?.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| RatingError::invalid_number("max_age", raw))?,
            ),
        };
        let factor = parse_f64("factor", column(&record, 1, "factor")?)?;
        bands.push((max_age, factor));
    }

    Ok(bands)
}

fn column<'r>(record: &'r csv::StringRecord, index: usize, name: &'static str) -> Result<&'r str, RatingError> {
    record.get(index).ok_or(RatingError::MissingColumn(name))
}

fn parse_f64(column: &'static str, raw: &str) -> Result<f64, RatingError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RatingError::invalid_number(column, raw))
}

/// Raw rating tables as read from a directory
#[derive(Debug, Clone)]
pub struct LoadedRatingTables {
    pub occupation_factors: Vec<(RatingClass, f64)>,
    pub age_bands: Vec<(Option<u32>, f64)>,
}

impl LoadedRatingTables {
    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, RatingError> {
        Ok(Self {
            occupation_factors: load_occupation_factors(path)?,
            age_bands: load_age_bands(path)?,
        })
    }
}
