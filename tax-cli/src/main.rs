use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use tax_cli::logging::init_logging;
use tax_cli::report::{CalculationReport, SuggestionReport, to_toml};
use tax_core::TaxRules;
use tax_data::{coerce_amount, load_from_file, load_rules};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal income tax calculator.
///
/// Reads household inputs from CSV, applies the built-in rules or a TOML
/// override, and prints the results as TOML on stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate tax for every row of an input CSV.
    Calculate {
        /// CSV file with one household per row.
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        rules: RulesArgs,
    },

    /// Suggest social insurance and GHS contributions for a salary.
    Suggest {
        /// Gross annual salary, e.g. `42,000`.
        #[arg(short, long)]
        gross: String,

        #[command(flatten)]
        rules: RulesArgs,
    },

    /// Print the effective rule set.
    Rules {
        #[command(flatten)]
        rules: RulesArgs,
    },
}

#[derive(Debug, Args)]
struct RulesArgs {
    /// TOML file overriding the built-in rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// CSV file replacing the bracket schedule.
    #[arg(long)]
    brackets: Option<PathBuf>,
}

impl RulesArgs {
    fn load(&self) -> Result<TaxRules> {
        let rules = load_rules(self.rules.as_deref(), self.brackets.as_deref())
            .context("failed to load tax rules")?;
        debug!(
            tax_year = rules.tax_year,
            brackets = rules.brackets.len(),
            "rules ready"
        );
        Ok(rules)
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn calculate(
    input: &Path,
    rules: &RulesArgs,
) -> Result<String> {
    let rules = rules.load()?;
    let records = load_from_file(input)
        .with_context(|| format!("failed to load inputs from {}", input.display()))?;
    info!(rows = records.len(), path = %input.display(), "loaded inputs");

    to_toml(&CalculationReport::build(&records, &rules))
}

fn suggest(
    gross: &str,
    rules: &RulesArgs,
) -> Result<String> {
    let rules = rules.load()?;
    let gross_income = coerce_amount("gross", gross);

    to_toml(&SuggestionReport::build(gross_income, &rules))
}

fn print_rules(rules: &RulesArgs) -> Result<String> {
    to_toml(&rules.load()?)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let output = match &cli.command {
        Command::Calculate { input, rules } => calculate(input, rules)?,
        Command::Suggest { gross, rules } => suggest(gross, rules)?,
        Command::Rules { rules } => print_rules(rules)?,
    };

    print!("{output}");
    Ok(())
}
