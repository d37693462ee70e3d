//! Quote a whole file of applicants
//!
//! Each row is run through its own form engine, rows in parallel.
//!
//! Usage: cargo run --bin quote_batch -- applicants.csv --output quotes.csv

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use premium_form::{FieldEdit, Occupation, PremiumFormEngine, RatingTables};

#[derive(Debug, Parser)]
#[command(name = "quote_batch", about = "Quote monthly premiums for a CSV of applicants")]
struct Cli {
    /// Applicants CSV: name,age_next_birthday,dob,occupation,sum_insured
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "quotes_output.csv")]
    output: PathBuf,

    /// Rating tables directory (placeholder rates if omitted)
    #[arg(long)]
    tables: Option<PathBuf>,
}

/// Raw applicant row, every value kept as typed
#[derive(Debug, Clone, Deserialize)]
struct ApplicantRow {
    name: String,
    age_next_birthday: String,
    dob: String,
    occupation: String,
    sum_insured: String,
}

#[derive(Debug, Clone, Serialize)]
struct QuoteRow {
    name: String,
    birth_date: Option<NaiveDate>,
    premium: Option<f64>,
    errors: String,
}

impl ApplicantRow {
    fn edits(&self) -> Vec<FieldEdit> {
        let occupation = match self.occupation.trim() {
            "" => None,
            key => {
                let found = Occupation::from_key(key);
                if found.is_none() {
                    log::warn!("Unknown occupation {:?} for {:?}, left unselected", key, self.name);
                }
                found
            }
        };

        vec![
            FieldEdit::Name(self.name.clone()),
            FieldEdit::AgeNextBirthday(self.age_next_birthday.clone()),
            FieldEdit::DobMonthYear(self.dob.clone()),
            FieldEdit::SumInsured(self.sum_insured.clone()),
            FieldEdit::Occupation(occupation),
        ]
    }
}

fn quote(tables: &RatingTables, applicant: &ApplicantRow) -> QuoteRow {
    let mut engine = PremiumFormEngine::new(tables.clone());
    for edit in applicant.edits() {
        engine.apply(edit);
    }

    let errors: Vec<&str> = engine.errors().iter().map(|(_, message)| message).collect();

    QuoteRow {
        name: applicant.name.clone(),
        birth_date: engine.birth_date(),
        premium: engine.premium().map(|p| p.value()),
        errors: errors.join("; "),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let tables = match &cli.tables {
        Some(dir) => RatingTables::from_csv_path(dir)
            .with_context(|| format!("loading rating tables from {}", dir.display()))?,
        None => RatingTables::placeholder(),
    };

    let start = Instant::now();
    println!("Loading applicants from {}...", cli.input.display());

    let mut reader = csv::Reader::from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let applicants: Vec<ApplicantRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("reading applicant rows")?;
    println!("Loaded {} applicants in {:?}", applicants.len(), start.elapsed());

    let quote_start = Instant::now();
    let quotes: Vec<QuoteRow> = applicants
        .par_iter()
        .map(|applicant| quote(&tables, applicant))
        .collect();
    println!("Quotes complete in {:?}", quote_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &quotes {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let quoted = quotes.iter().filter(|q| q.premium.is_some()).count();
    println!("\nResults written to: {}", cli.output.display());
    println!("\nSummary:");
    println!("  Applicants: {}", quotes.len());
    println!("  Quoted: {}", quoted);
    println!("  Rejected: {}", quotes.len() - quoted);

    Ok(())
}
