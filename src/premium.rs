//! Monthly premium calculation
//!
//! premium = sum insured x occupation factor x age factor / 1000 x 12
//!
//! The factors are placeholders; the result is an illustration, not a price.

use serde::{Deserialize, Serialize};

use crate::form::ValidatedInput;
use crate::rating::{RatingClass, RatingTables};
use crate::render::format_amount;

/// Sum insured is rated per mille
pub const RATE_BASIS: f64 = 1000.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Round to 2 decimals; non-finite values become 0
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.is_finite() { rounded } else { 0.0 }
}

/// Monthly premium rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PremiumResult(f64);

impl PremiumResult {
    pub fn from_raw(value: f64) -> Self {
        Self(round_to_cents(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Display text, e.g. `9,000.00`
    pub fn formatted(&self) -> String {
        format_amount(self.0)
    }
}

/// Premium with the factors that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuote {
    pub rating_class: RatingClass,
    pub occupation_factor: f64,
    pub age_factor: f64,
    pub monthly_premium: PremiumResult,
}

/// Applies rating tables to validated input
#[derive(Debug, Clone, Copy)]
pub struct PremiumCalculator<'a> {
    tables: &'a RatingTables,
}

impl<'a> PremiumCalculator<'a> {
    pub fn new(tables: &'a RatingTables) -> Self {
        Self { tables }
    }

    /// Unrounded monthly premium. Non-finite results collapse to 0.
    pub fn monthly_premium(&self, sum_insured: f64, age_next_birthday: u32, class: RatingClass) -> f64 {
        let occupation_factor = self.tables.occupation_factor(class);
        let age_factor = self.tables.age_factor(age_next_birthday);
        let premium = sum_insured * occupation_factor * age_factor / RATE_BASIS * MONTHS_PER_YEAR;
        if premium.is_finite() { premium } else { 0.0 }
    }

    pub fn quote(&self, input: &ValidatedInput) -> PremiumQuote {
        let rating_class = input.occupation.rating_class();
        let raw = self.monthly_premium(input.sum_insured, input.age_next_birthday, rating_class);

        PremiumQuote {
            rating_class,
            occupation_factor: self.tables.occupation_factor(rating_class),
            age_factor: self.tables.age_factor(input.age_next_birthday),
            monthly_premium: PremiumResult::from_raw(raw),
        }
    }
}
