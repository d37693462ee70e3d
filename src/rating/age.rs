//! Age-next-birthday step factors

use crate::error::RatingError;

/// Closed age bands with inclusive upper bounds, plus an open tail factor
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBands {
    /// (max_age inclusive, factor), strictly increasing by max_age
    bands: Vec<(u32, f64)>,
    /// Factor above the last band
    tail_factor: f64,
}

impl AgeBands {
    /// Placeholder bands: <=30, <=40, <=50, <=60, older
    pub fn placeholder() -> Self {
        Self {
            bands: vec![
                (30, 0.80),
                (40, 1.00),
                (50, 1.30),
                (60, 1.70),
            ],
            tail_factor: 2.20,
        }
    }

    /// Build bands, checking that upper bounds strictly increase
    pub fn new(bands: Vec<(u32, f64)>, tail_factor: f64) -> Result<Self, RatingError> {
        for pair in bands.windows(2) {
            let (previous, next) = (pair[0].0, pair[1].0);
            if next <= previous {
                return Err(RatingError::UnorderedAgeBands { previous, next });
            }
        }
        Ok(Self { bands, tail_factor })
    }

    /// Create from loaded CSV rows, `None` max_age marks the open tail.
    /// Without a tail row the last band's factor continues past its bound.
    pub fn from_loaded(rows: &[(Option<u32>, f64)]) -> Result<Self, RatingError> {
        let mut bands = Vec::with_capacity(rows.len());
        let mut tail = None;

        for &(max_age, factor) in rows {
            match max_age {
                Some(age) => bands.push((age, factor)),
                None => tail = Some(factor),
            }
        }

        let tail_factor = match (tail, bands.last()) {
            (Some(factor), _) => factor,
            (None, Some(&(age, factor))) => {
                log::warn!("No open age band loaded, ages above {} use factor {}", age, factor);
                factor
            }
            (None, None) => return Err(RatingError::EmptyAgeBands),
        };

        Self::new(bands, tail_factor)
    }

    /// Age factor for an age next birthday
    pub fn factor(&self, age: u32) -> f64 {
        self.bands
            .iter()
            .find(|(max_age, _)| age <= *max_age)
            .map(|(_, factor)| *factor)
            .unwrap_or(self.tail_factor)
    }

    pub fn bands(&self) -> &[(u32, f64)] {
        &self.bands
    }

    pub fn tail_factor(&self) -> f64 {
        self.tail_factor
    }
}

impl Default for AgeBands {
    fn default() -> Self {
        Self::placeholder()
    }
}
