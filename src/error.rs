//! Errors raised while loading rating tables or parsing edits
//!
//! Form validation never produces these: a bad field value is reported
//! through `ValidationErrors` instead.

use thiserror::Error;

/// Errors that can occur while building rating tables
#[derive(Debug, Error)]
pub enum RatingError {
    /// Table file could not be opened or read
    #[error("I/O error reading rating table: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content
    #[error("CSV error in rating table: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric column did not parse
    #[error("Invalid number in {column}: {value:?}")]
    InvalidNumber {
        column: &'static str,
        value: String,
    },

    /// Row is shorter than the table layout
    #[error("Missing column in rating table: {0}")]
    MissingColumn(&'static str),

    /// Occupation key not in the catalog
    #[error("Unknown occupation: {0}")]
    UnknownOccupation(String),

    /// Rating class name not recognised
    #[error("Unknown rating class: {0}")]
    UnknownRatingClass(String),

    /// Age band table has no rows
    #[error("Age band table is empty")]
    EmptyAgeBands,

    /// Age band upper bounds must strictly increase
    #[error("Age bands out of order: {previous} is followed by {next}")]
    UnorderedAgeBands {
        previous: u32,
        next: u32,
    },
}

/// Errors turning text into a form edit
#[derive(Debug, Error)]
pub enum EditError {
    /// Field name not recognised
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Edit text had no `=` separator
    #[error("Expected field=value, got {0:?}")]
    MissingValue(String),

    /// Occupation key not in the catalog
    #[error(transparent)]
    Rating(#[from] RatingError),
}

impl RatingError {
    /// Creates an invalid number error
    pub fn invalid_number(column: &'static str, value: impl Into<String>) -> Self {
        RatingError::InvalidNumber {
            column,
            value: value.into(),
        }
    }
}
