//! Premium Form - monthly life-insurance premium illustration
//!
//! This library provides:
//! - Form state for name, age next birthday, date of birth, occupation and sum insured
//! - Field validation with per-field messages
//! - Occupation catalog, occupation rating factors and age bands
//! - Monthly premium calculation from placeholder rating tables
//! - A reactive engine that recomputes the premium after every edit

pub mod error;
pub mod rating;
pub mod form;
pub mod premium;
pub mod engine;
pub mod render;

// Re-export commonly used types
pub use error::{EditError, RatingError};
pub use rating::{Occupation, OccupationCatalog, RatingClass, RatingTables};
pub use form::{Field, FieldEdit, FormInput, ValidationErrors, Validator};
pub use premium::{PremiumCalculator, PremiumQuote, PremiumResult};
pub use engine::{EngineState, PremiumFormEngine};
