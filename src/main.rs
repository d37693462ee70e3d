//! Premium Form CLI
//!
//! Fill in the premium form from the command line or line by line on stdin

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use premium_form::render::{occupation_options, render_form};
use premium_form::{FieldEdit, Occupation, PremiumFormEngine, RatingTables};

#[derive(Debug, Parser)]
#[command(name = "premium_form", version, about = "Illustrative monthly life-insurance premium")]
struct Cli {
    /// Directory with occupation_factors.csv and age_bands.csv (placeholder rates if omitted)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Print JSON snapshots instead of the rendered form
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the occupation choices
    Options,
    /// Fill the form from flags and show the result
    Quote(QuoteArgs),
    /// Read `field=value` edits from stdin, showing the form after each
    Session,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    #[arg(long)]
    name: Option<String>,
    /// Age next birthday
    #[arg(long)]
    age: Option<String>,
    /// Date of birth as mm/YYYY
    #[arg(long)]
    dob: Option<String>,
    /// Occupation key, e.g. Doctor
    #[arg(long)]
    occupation: Option<Occupation>,
    /// Death sum insured
    #[arg(long)]
    sum: Option<String>,
}

impl QuoteArgs {
    /// Edits in form order, skipping fields not given
    fn edits(self) -> Vec<FieldEdit> {
        let mut edits = Vec::new();
        if let Some(name) = self.name {
            edits.push(FieldEdit::Name(name));
        }
        if let Some(age) = self.age {
            edits.push(FieldEdit::AgeNextBirthday(age));
        }
        if let Some(dob) = self.dob {
            edits.push(FieldEdit::DobMonthYear(dob));
        }
        if let Some(occupation) = self.occupation {
            edits.push(FieldEdit::Occupation(Some(occupation)));
        }
        if let Some(sum) = self.sum {
            edits.push(FieldEdit::SumInsured(sum));
        }
        edits
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let tables = match &cli.tables {
        Some(dir) => {
            log::info!("Loading rating tables from {}", dir.display());
            RatingTables::from_csv_path(dir)
                .with_context(|| format!("loading rating tables from {}", dir.display()))?
        }
        None => RatingTables::placeholder(),
    };

    let mut engine = PremiumFormEngine::new(tables);

    match cli.command {
        Command::Options => {
            for line in occupation_options() {
                println!("{}", line);
            }
        }
        Command::Quote(args) => {
            for edit in args.edits() {
                engine.apply(edit);
            }
            print_engine(&engine, cli.json)?;
        }
        Command::Session => run_session(&mut engine, cli.json)?,
    }

    Ok(())
}

fn run_session(engine: &mut PremiumFormEngine, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut edits = 0usize;

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == "reset" {
            engine.reset();
        } else {
            match trimmed.parse::<FieldEdit>() {
                Ok(edit) => {
                    engine.apply(edit);
                    edits += 1;
                }
                Err(e) => {
                    eprintln!("line {}: {}", line_no + 1, e);
                    continue;
                }
            }
        }

        print_engine(engine, json)?;
    }

    log::info!("Session ended after {} edits", edits);
    Ok(())
}

fn print_engine(engine: &PremiumFormEngine, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let snapshot = serde_json::to_string(&engine.snapshot()).context("serializing snapshot")?;
        writeln!(stdout, "{}", snapshot)?;
    } else {
        writeln!(stdout, "{}", render_form(engine))?;
    }
    Ok(())
}
