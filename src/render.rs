//! Plain-text rendering of the premium form

use std::fmt;

use crate::engine::PremiumFormEngine;
use crate::form::Field;
use crate::rating::OccupationCatalog;

pub const TITLE: &str = "Life Insurance Monthly Premium Calculator";
pub const INTRO: &str = "Enter details below to compute the estimated monthly premium.";
pub const DISCLAIMER: &str =
    "This is an illustration using placeholder rates. Replace the logic with your official pricing model.";
/// Label of the empty occupation option
pub const SELECT_PROMPT: &str = "-- Select --";

/// Format with thousands separators and exactly 2 decimals (`69,000.00`).
/// Non-finite values format as `0.00`.
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

/// Occupation dropdown lines, empty option first
pub fn occupation_options() -> Vec<String> {
    std::iter::once(SELECT_PROMPT.to_string())
        .chain(OccupationCatalog::options().map(|(key, label)| format!("{:<10} {}", key, label)))
        .collect()
}

/// Render the whole form: fields, inline errors, rating line and result panel
pub fn render_form(engine: &PremiumFormEngine) -> String {
    FormView(engine).to_string()
}

/// Text view over an engine
pub struct FormView<'a>(pub &'a PremiumFormEngine);

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.0;
        let input = engine.input();

        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", INTRO)?;
        writeln!(f)?;

        for field in Field::ALL {
            let value = match field {
                Field::Occupation => input
                    .occupation
                    .and_then(|o| OccupationCatalog::lookup(o.key()))
                    .map(|entry| entry.display_label())
                    .unwrap_or_else(|| SELECT_PROMPT.to_string()),
                _ => input.raw(field).to_string(),
            };
            writeln!(f, "{:<24} {}", format!("{}:", field.label()), value)?;
            if let Some(message) = engine.error(field) {
                writeln!(f, "{:<24} ! {}", "", message)?;
            }
        }

        if let Some(class) = engine.selected_rating() {
            writeln!(f)?;
            writeln!(f, "Selected Occupation Rating: {}", class)?;
        }

        if let Some(premium) = engine.premium() {
            writeln!(f)?;
            writeln!(f, "Estimated Monthly Premium:")?;
            writeln!(f, "  {}", premium.formatted())?;
            writeln!(f, "{}", DISCLAIMER)?;
        }

        Ok(())
    }
}
