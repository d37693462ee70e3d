//! Field validation
//!
//! Validation is a pure function of the form input. Every pass rebuilds the
//! full error map; an empty map means every field is acceptable.
//!
//! # Rules
//! - Name: not blank
//! - Age next birthday: whole number in 21..=120 (commas ignored)
//! - Date of birth: `MM/YYYY`, month 01-12, year 1900-2099
//! - Occupation: selected
//! - Sum insured: finite and positive (commas ignored)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Field, FormInput};
use crate::rating::Occupation;

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_AGE: &str = "Enter a valid age (21–120)";
pub const INVALID_DOB: &str = "Enter DOB as mm/YYYY (e.g., 07/1990)";
pub const OCCUPATION_REQUIRED: &str = "Select an occupation";
pub const INVALID_SUM_INSURED: &str = "Enter a positive Sum Insured";

pub const MIN_AGE_NEXT_BIRTHDAY: u32 = 21;
pub const MAX_AGE_NEXT_BIRTHDAY: u32 = 120;

/// Parse a number typed into a text box.
///
/// Commas are stripped and surrounding whitespace trimmed. A blank value
/// reads as 0. Anything that is not a finite number gives `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A birth month entered as `MM/YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMonth {
    pub month: u32,
    pub year: i32,
}

impl BirthMonth {
    /// Strict `MM/YYYY`: two month digits 01-12, four year digits 1900-2099,
    /// nothing before or after.
    pub fn parse(raw: &str) -> Option<Self> {
        let (mm, yyyy) = raw.split_once('/')?;
        if mm.len() != 2 || yyyy.len() != 4 {
            return None;
        }
        if !mm.bytes().chain(yyyy.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let month: u32 = mm.parse().ok()?;
        let year: i32 = yyyy.parse().ok()?;
        if !(1..=12).contains(&month) || !(1900..=2099).contains(&year) {
            return None;
        }
        Some(Self { month, year })
    }

    /// First day of the birth month
    pub fn first_day(&self) -> NaiveDate {
        // month and year are range-checked in parse
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

/// Field -> message for every failing field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors in field display order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Form input that passed every rule, with parsed values
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub name: String,
    pub age_next_birthday: u32,
    pub birth_month: BirthMonth,
    pub occupation: Occupation,
    pub sum_insured: f64,
}

/// Stateless form validator
pub struct Validator;

impl Validator {
    /// Error map for the input; empty when valid
    pub fn validate(input: &FormInput) -> ValidationErrors {
        match Self::check(input) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Parse and validate every field
    pub fn check(input: &FormInput) -> Result<ValidatedInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = input.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, NAME_REQUIRED);
        }

        let age = Self::check_age(&input.age_next_birthday);
        if age.is_none() {
            errors.insert(Field::AgeNextBirthday, INVALID_AGE);
        }

        let birth_month = BirthMonth::parse(&input.dob_month_year);
        if birth_month.is_none() {
            errors.insert(Field::DobMonthYear, INVALID_DOB);
        }

        if input.occupation.is_none() {
            errors.insert(Field::Occupation, OCCUPATION_REQUIRED);
        }

        let sum_insured = parse_number(&input.sum_insured).filter(|sum| *sum > 0.0);
        if sum_insured.is_none() {
            errors.insert(Field::SumInsured, INVALID_SUM_INSURED);
        }

        match (age, birth_month, input.occupation, sum_insured) {
            (Some(age_next_birthday), Some(birth_month), Some(occupation), Some(sum_insured))
                if errors.is_empty() =>
            {
                Ok(ValidatedInput {
                    name: name.to_string(),
                    age_next_birthday,
                    birth_month,
                    occupation,
                    sum_insured,
                })
            }
            _ => Err(errors),
        }
    }

    fn check_age(raw: &str) -> Option<u32> {
        let age = parse_number(raw)?;
        let in_range = age >= MIN_AGE_NEXT_BIRTHDAY as f64 && age <= MAX_AGE_NEXT_BIRTHDAY as f64;
        if in_range && age.fract() == 0.0 {
            Some(age as u32)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> FormInput {
        FormInput {
            name: "Test User".into(),
            age_next_birthday: "35".into(),
            dob_month_year: "07/1990".into(),
            occupation: Some(Occupation::Doctor),
            sum_insured: "500000".into(),
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        let input = valid_input();
        assert!(Validator::validate(&input).is_empty());

        let validated = Validator::check(&input).unwrap();
        assert_eq!(validated.name, "Test User");
        assert_eq!(validated.age_next_birthday, 35);
        assert_eq!(validated.birth_month, BirthMonth { month: 7, year: 1990 });
        assert_eq!(validated.occupation, Occupation::Doctor);
        assert_eq!(validated.sum_insured, 500_000.0);
    }

    #[test]
    fn test_empty_form_fails_every_field() {
        let errors = Validator::validate(&FormInput::new());
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::AgeNextBirthday), Some(INVALID_AGE));
        assert_eq!(errors.get(Field::DobMonthYear), Some(INVALID_DOB));
        assert_eq!(errors.get(Field::Occupation), Some(OCCUPATION_REQUIRED));
        assert_eq!(errors.get(Field::SumInsured), Some(INVALID_SUM_INSURED));
    }

    #[test]
    fn test_whitespace_name_required() {
        let input = FormInput { name: "   \t".into(), ..valid_input() };
        let errors = Validator::validate(&input);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::Name));
    }

    #[test]
    fn test_age_rules() {
        let age_error = |raw: &str| {
            let input = FormInput { age_next_birthday: raw.into(), ..valid_input() };
            Validator::validate(&input).contains(Field::AgeNextBirthday)
        };

        assert!(age_error("18"));
        assert!(age_error("20"));
        assert!(!age_error("21"));
        assert!(!age_error("120"));
        assert!(age_error("121"));
        assert!(age_error("35.5"));
        assert!(!age_error("35.0"));
        assert!(!age_error(" 40 "));
        assert!(age_error("abc"));
        assert!(age_error(""));
        assert!(age_error("-35"));
    }

    #[test]
    fn test_dob_pattern() {
        assert_eq!(BirthMonth::parse("01/1900"), Some(BirthMonth { month: 1, year: 1900 }));
        assert_eq!(BirthMonth::parse("12/2099"), Some(BirthMonth { month: 12, year: 2099 }));
        assert_eq!(BirthMonth::parse("00/1990"), None);
        assert_eq!(BirthMonth::parse("13/1990"), None);
        assert_eq!(BirthMonth::parse("7/1990"), None);
        assert_eq!(BirthMonth::parse("07/90"), None);
        assert_eq!(BirthMonth::parse("07/1899"), None);
        assert_eq!(BirthMonth::parse("07/2100"), None);
        assert_eq!(BirthMonth::parse("07-1990"), None);
        assert_eq!(BirthMonth::parse(" 07/1990"), None);
        assert_eq!(BirthMonth::parse("07/1990/"), None);
        assert_eq!(BirthMonth::parse("+7/1990"), None);
        assert_eq!(BirthMonth::parse(""), None);
    }

    #[test]
    fn test_birth_month_first_day() {
        let month = BirthMonth::parse("07/1990").unwrap();
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(1990, 7, 1).unwrap());
    }

    #[test]
    fn test_sum_insured_rules() {
        let sum_error = |raw: &str| {
            let input = FormInput { sum_insured: raw.into(), ..valid_input() };
            Validator::validate(&input).contains(Field::SumInsured)
        };

        assert!(!sum_error("500000"));
        assert!(!sum_error("500,000"));
        assert!(!sum_error("0.01"));
        assert!(sum_error("0"));
        assert!(sum_error("-1"));
        assert!(sum_error(""));
        assert!(sum_error("lots"));
        assert!(sum_error("inf"));
        assert!(sum_error("NaN"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_number("  42 "), Some(42.0));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number(",,"), Some(0.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("infinity"), None);
    }

    #[test]
    fn test_missing_occupation() {
        let input = FormInput { occupation: None, ..valid_input() };
        let result = Validator::check(&input);
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Occupation), Some(OCCUPATION_REQUIRED));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let input = FormInput { age_next_birthday: "18".into(), ..valid_input() };
        assert_eq!(Validator::validate(&input), Validator::validate(&input));
        assert_eq!(Validator::check(&valid_input()), Validator::check(&valid_input()));
    }

    #[test]
    fn test_errors_iterate_in_field_order() {
        let fields: Vec<Field> = Validator::validate(&FormInput::new())
            .iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }
}
