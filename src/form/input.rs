//! Raw form state and single-field edits

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::rating::Occupation;

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    AgeNextBirthday,
    DobMonthYear,
    Occupation,
    SumInsured,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::AgeNextBirthday,
        Field::DobMonthYear,
        Field::Occupation,
        Field::SumInsured,
    ];

    /// Stable field identifier (matches the serialized name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::AgeNextBirthday => "ageNextBirthday",
            Field::DobMonthYear => "dobMonthYear",
            Field::Occupation => "occupation",
            Field::SumInsured => "sumInsured",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::AgeNextBirthday => "Age Next Birthday",
            Field::DobMonthYear => "Date of Birth (mm/YYYY)",
            Field::Occupation => "Usual Occupation",
            Field::SumInsured => "Death – Sum Insured",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = EditError;

    /// Accepts the field identifier or a short alias (`age`, `dob`, `sum`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let field = match key.to_ascii_lowercase().as_str() {
            "name" => Field::Name,
            "agenextbirthday" | "age" => Field::AgeNextBirthday,
            "dobmonthyear" | "dob" => Field::DobMonthYear,
            "occupation" => Field::Occupation,
            "suminsured" | "sum" => Field::SumInsured,
            _ => return Err(EditError::UnknownField(key.to_string())),
        };
        Ok(field)
    }
}

/// Raw form values. Text fields hold exactly what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub name: String,
    pub age_next_birthday: String,
    /// mm/YYYY
    pub dob_month_year: String,
    pub occupation: Option<Occupation>,
    pub sum_insured: String,
}

impl FormInput {
    /// All-empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one edit. Returns false when the value did not change.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        match edit {
            FieldEdit::Name(value) => replace(&mut self.name, value),
            FieldEdit::AgeNextBirthday(value) => replace(&mut self.age_next_birthday, value),
            FieldEdit::DobMonthYear(value) => replace(&mut self.dob_month_year, value),
            FieldEdit::Occupation(value) => replace(&mut self.occupation, value),
            FieldEdit::SumInsured(value) => replace(&mut self.sum_insured, value),
        }
    }

    /// Raw text of a field; occupation renders as its key or empty
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::AgeNextBirthday => &self.age_next_birthday,
            Field::DobMonthYear => &self.dob_month_year,
            Field::Occupation => self.occupation.map(|o| o.key()).unwrap_or(""),
            Field::SumInsured => &self.sum_insured,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// A change to a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    AgeNextBirthday(String),
    DobMonthYear(String),
    /// `None` unselects
    Occupation(Option<Occupation>),
    SumInsured(String),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Name(_) => Field::Name,
            FieldEdit::AgeNextBirthday(_) => Field::AgeNextBirthday,
            FieldEdit::DobMonthYear(_) => Field::DobMonthYear,
            FieldEdit::Occupation(_) => Field::Occupation,
            FieldEdit::SumInsured(_) => Field::SumInsured,
        }
    }

    /// Build an edit from a field and its text value.
    /// An empty occupation value unselects; an unknown key is an error.
    pub fn from_text(field: Field, value: &str) -> Result<Self, EditError> {
        let edit = match field {
            Field::Name => FieldEdit::Name(value.to_string()),
            Field::AgeNextBirthday => FieldEdit::AgeNextBirthday(value.to_string()),
            Field::DobMonthYear => FieldEdit::DobMonthYear(value.to_string()),
            Field::Occupation => {
                if value.trim().is_empty() {
                    FieldEdit::Occupation(None)
                } else {
                    FieldEdit::Occupation(Some(value.parse()?))
                }
            }
            Field::SumInsured => FieldEdit::SumInsured(value.to_string()),
        };
        Ok(edit)
    }
}

impl FromStr for FieldEdit {
    type Err = EditError;

    /// Parses `field=value`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| EditError::MissingValue(s.trim().to_string()))?;
        FieldEdit::from_text(field.parse()?, value)
    }
}
