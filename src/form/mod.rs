//! Form state and validation

mod input;
pub mod validation;

pub use input::{Field, FieldEdit, FormInput};
pub use validation::{parse_number, BirthMonth, ValidatedInput, ValidationErrors, Validator};
