//! Reactive premium form engine
//!
//! Every field edit goes through [`PremiumFormEngine::apply`], which mutates
//! the form and then runs the recalculation handler:
//!
//! - No occupation selected: the engine goes `Idle` and any premium is
//!   cleared, whatever the other fields hold.
//! - Occupation selected and every field valid: the premium is recomputed and
//!   the engine is `Computed`.
//! - Occupation selected but some field invalid: the errors are shown and the
//!   premium is withheld (`Suppressed`).
//!
//! The premium is only ever present while the whole form validates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::form::{BirthMonth, Field, FieldEdit, FormInput, ValidationErrors, Validator};
use crate::premium::{PremiumCalculator, PremiumQuote, PremiumResult};
use crate::rating::{Occupation, RatingClass, RatingTables};

/// Where the premium display stands after the latest edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EngineState {
    /// No occupation selected, nothing displayed
    Idle,
    /// Occupation selected, other fields failing validation
    Suppressed,
    /// Every field valid, premium displayed
    Computed { quote: PremiumQuote },
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Suppressed => "suppressed",
            EngineState::Computed { .. } => "computed",
        }
    }
}

/// Serializable view of the engine
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub input: FormInput,
    pub errors: ValidationErrors,
    pub state: EngineState,
    pub selected_rating: Option<RatingClass>,
    pub birth_date: Option<NaiveDate>,
    pub premium: Option<PremiumResult>,
    pub formatted_premium: Option<String>,
}

/// Owns the form state of one form instance
#[derive(Debug, Clone)]
pub struct PremiumFormEngine {
    tables: RatingTables,
    input: FormInput,
    errors: ValidationErrors,
    state: EngineState,
}

impl PremiumFormEngine {
    /// Empty form, no errors shown yet
    pub fn new(tables: RatingTables) -> Self {
        Self {
            tables,
            input: FormInput::new(),
            errors: ValidationErrors::new(),
            state: EngineState::Idle,
        }
    }

    pub fn with_placeholder_rates() -> Self {
        Self::new(RatingTables::placeholder())
    }

    pub fn tables(&self) -> &RatingTables {
        &self.tables
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Displayed premium, if any
    pub fn premium(&self) -> Option<PremiumResult> {
        match self.state {
            EngineState::Computed { quote } => Some(quote.monthly_premium),
            _ => None,
        }
    }

    pub fn quote(&self) -> Option<&PremiumQuote> {
        match &self.state {
            EngineState::Computed { quote } => Some(quote),
            _ => None,
        }
    }

    /// Rating class of the selected occupation
    pub fn selected_rating(&self) -> Option<RatingClass> {
        self.input.occupation.map(|occupation| occupation.rating_class())
    }

    /// First day of the entered birth month, once the date field is valid
    pub fn birth_date(&self) -> Option<NaiveDate> {
        BirthMonth::parse(&self.input.dob_month_year).map(|month| month.first_day())
    }

    /// Apply one field edit and recalculate
    pub fn apply(&mut self, edit: FieldEdit) -> &EngineState {
        let field = edit.field();
        let changed = self.input.apply(edit);
        log::debug!("edit {} (changed: {})", field, changed);
        self.recalculate();
        &self.state
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> &EngineState {
        self.apply(FieldEdit::Name(value.into()))
    }

    pub fn set_age_next_birthday(&mut self, value: impl Into<String>) -> &EngineState {
        self.apply(FieldEdit::AgeNextBirthday(value.into()))
    }

    pub fn set_dob_month_year(&mut self, value: impl Into<String>) -> &EngineState {
        self.apply(FieldEdit::DobMonthYear(value.into()))
    }

    /// `None` unselects the occupation
    pub fn select_occupation(&mut self, occupation: Option<Occupation>) -> &EngineState {
        self.apply(FieldEdit::Occupation(occupation))
    }

    pub fn set_sum_insured(&mut self, value: impl Into<String>) -> &EngineState {
        self.apply(FieldEdit::SumInsured(value.into()))
    }

    /// Re-run the handler on the current input. Idempotent.
    pub fn revalidate(&mut self) -> &EngineState {
        self.recalculate();
        &self.state
    }

    /// Back to an empty, idle form
    pub fn reset(&mut self) {
        self.input = FormInput::new();
        self.errors = ValidationErrors::new();
        self.state = EngineState::Idle;
        log::debug!("form reset");
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let premium = self.premium();
        EngineSnapshot {
            input: self.input.clone(),
            errors: self.errors.clone(),
            state: self.state,
            selected_rating: self.selected_rating(),
            birth_date: self.birth_date(),
            premium,
            formatted_premium: premium.map(|p| p.formatted()),
        }
    }

    fn recalculate(&mut self) {
        let previous = self.state.as_str();

        self.state = match Validator::check(&self.input) {
            Ok(validated) => {
                self.errors = ValidationErrors::new();
                let quote = PremiumCalculator::new(&self.tables).quote(&validated);
                log::debug!(
                    "premium {} (sum {} x {} x {} / 1000 x 12)",
                    quote.monthly_premium.value(),
                    validated.sum_insured,
                    quote.occupation_factor,
                    quote.age_factor
                );
                EngineState::Computed { quote }
            }
            Err(errors) => {
                self.errors = errors;
                // Unselected occupation clears regardless of other fields
                if self.input.occupation.is_none() {
                    EngineState::Idle
                } else {
                    EngineState::Suppressed
                }
            }
        };

        if previous != self.state.as_str() {
            log::debug!("state {} -> {}", previous, self.state.as_str());
        }
    }
}

impl Default for PremiumFormEngine {
    fn default() -> Self {
        Self::with_placeholder_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validation::{INVALID_AGE, OCCUPATION_REQUIRED};
    use approx::assert_relative_eq;

    fn fill_valid_base(engine: &mut PremiumFormEngine) {
        engine.set_name("Test User");
        engine.set_age_next_birthday("35");
        engine.set_dob_month_year("07/1990");
        engine.set_sum_insured("500000");
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = PremiumFormEngine::with_placeholder_rates();
        assert_eq!(*engine.state(), EngineState::Idle);
        assert!(engine.errors().is_empty());
        assert_eq!(engine.premium(), None);
        assert_eq!(engine.selected_rating(), None);
    }

    #[test]
    fn test_premium_when_occupation_selected() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);

        // Only the occupation is missing
        assert_eq!(*engine.state(), EngineState::Idle);
        assert_eq!(engine.errors().len(), 1);
        assert_eq!(engine.error(Field::Occupation), Some(OCCUPATION_REQUIRED));

        engine.select_occupation(Some(Occupation::Doctor));

        let premium = engine.premium().expect("premium should be computed");
        assert_relative_eq!(premium.value(), 9000.00);
        assert_eq!(premium.formatted(), "9,000.00");
        assert!(engine.errors().is_empty());
        assert_eq!(engine.selected_rating(), Some(RatingClass::Professional));
    }

    #[test]
    fn test_premium_follows_occupation_change() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);

        engine.select_occupation(Some(Occupation::Doctor));
        assert_eq!(engine.premium().map(|p| p.formatted()), Some("9,000.00".to_string()));

        engine.select_occupation(Some(Occupation::Cleaner));
        assert_eq!(engine.premium().map(|p| p.formatted()), Some("69,000.00".to_string()));
        assert_eq!(engine.input().name, "Test User");
        assert_eq!(engine.input().sum_insured, "500000");
    }

    #[test]
    fn test_clearing_occupation_clears_premium() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Doctor));
        assert!(engine.premium().is_some());

        engine.select_occupation(None);
        assert_eq!(*engine.state(), EngineState::Idle);
        assert_eq!(engine.premium(), None);
        assert_eq!(engine.selected_rating(), None);
    }

    #[test]
    fn test_clearing_occupation_with_invalid_fields() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        engine.set_age_next_birthday("abc");
        engine.select_occupation(Some(Occupation::Farmer));
        assert_eq!(*engine.state(), EngineState::Suppressed);

        engine.select_occupation(None);
        assert_eq!(*engine.state(), EngineState::Idle);
        assert_eq!(engine.premium(), None);
    }

    #[test]
    fn test_invalid_age_suppresses_premium() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        engine.set_name("Invalid Age");
        engine.set_age_next_birthday("18");
        engine.set_dob_month_year("07/2007");
        engine.set_sum_insured("100000");
        engine.select_occupation(Some(Occupation::Doctor));

        assert_eq!(*engine.state(), EngineState::Suppressed);
        assert_eq!(engine.premium(), None);
        assert_eq!(engine.error(Field::AgeNextBirthday), Some(INVALID_AGE));
        assert_eq!(engine.errors().len(), 1);
    }

    #[test]
    fn test_invalid_edit_after_computed_withholds_premium() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Doctor));

        engine.set_sum_insured("-5");
        assert_eq!(engine.premium(), None);
        assert!(engine.errors().contains(Field::SumInsured));
        // Other values are kept as typed
        assert_eq!(engine.input().age_next_birthday, "35");

        engine.set_sum_insured("250,000");
        assert_relative_eq!(engine.premium().unwrap().value(), 4500.00);
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_any_field_edit_recomputes() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Doctor));

        // 500000 x 1.5 x 1.3 / 1000 x 12
        engine.set_age_next_birthday("45");
        assert_relative_eq!(engine.premium().unwrap().value(), 11_700.00);

        let quote = engine.quote().unwrap();
        assert_eq!(quote.age_factor, 1.3);
        assert_eq!(quote.occupation_factor, 1.5);
    }

    #[test]
    fn test_revalidate_is_idempotent() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Mechanic));

        let state = *engine.state();
        let errors = engine.errors().clone();
        engine.revalidate();
        engine.revalidate();
        assert_eq!(*engine.state(), state);
        assert_eq!(*engine.errors(), errors);

        engine.set_age_next_birthday("200");
        let errors = engine.errors().clone();
        engine.revalidate();
        assert_eq!(*engine.errors(), errors);
        assert_eq!(*engine.state(), EngineState::Suppressed);
    }

    #[test]
    fn test_birth_date_follows_dob_field() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        assert_eq!(engine.birth_date(), None);

        engine.set_dob_month_year("07/1990");
        assert_eq!(engine.birth_date(), NaiveDate::from_ymd_opt(1990, 7, 1));

        engine.set_dob_month_year("13/1990");
        assert_eq!(engine.birth_date(), None);
        assert!(serde_json::to_value(engine.snapshot()).unwrap()["birthDate"].is_null());
    }

    #[test]
    fn test_reset() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Doctor));

        engine.reset();
        assert_eq!(*engine.input(), FormInput::new());
        assert!(engine.errors().is_empty());
        assert_eq!(*engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_snapshot_json() {
        let mut engine = PremiumFormEngine::with_placeholder_rates();
        fill_valid_base(&mut engine);
        engine.select_occupation(Some(Occupation::Doctor));

        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["state"]["state"], "computed");
        assert_eq!(json["premium"], 9000.0);
        assert_eq!(json["formattedPremium"], "9,000.00");
        assert_eq!(json["selectedRating"], "Professional");
        assert_eq!(json["input"]["occupation"], "Doctor");
        assert_eq!(json["birthDate"], "1990-07-01");
        assert!(json["errors"].as_object().unwrap().is_empty());
    }
}
