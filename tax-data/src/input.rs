//! Coercion of raw, form-style values into [`TaxInput`], and a CSV loader
//! built on it.
//!
//! ## Coercion rules
//!
//! | Kind     | Rule |
//! |----------|------|
//! | amount   | trim, drop `,` separators and a leading `€`; empty or unparsable → 0; negative → 0 |
//! | count    | as amount, then truncated to a whole number |
//! | flag     | `true`, `yes`, `y`, `1`, `on` (any case) → true; anything else → false |
//! | status   | `single`, `married`, `singleParent` / `single_parent`; anything else is an error |
//! | housing  | empty or `none`, `rent`, `mortgage`; anything else is an error |
//!
//! Spouse income is cleared unless the status is `married`.
//!
//! ## CSV format
//!
//! Headers are matched by name and column order does not matter. Every column
//! except `family_status` may be omitted. `label` is an optional free-text
//! identifier carried through to the output.
//!
//! ```csv
//! label,gross_income,family_status,num_children,home_insurance_amount
//! alice,50000,single,0,600
//! bob,"85,000.00",married,3,
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tax_core::{FamilyStatus, HousingExpenseType, TaxInput};
use thiserror::Error;
use tracing::warn;

/// Errors for values that cannot be coerced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("unrecognised family status '{0}'")]
    InvalidFamilyStatus(String),

    #[error("unrecognised housing expense type '{0}'")]
    InvalidHousingType(String),
}

/// Errors that can occur while loading input rows from CSV.
#[derive(Debug, Error)]
pub enum InputLoadError {
    /// The CSV structure itself is invalid.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row contained a value that could not be coerced. `row` is 1-based,
    /// not counting the header.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: CoercionError,
    },

    #[error("cannot read input file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Form values exactly as entered, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawTaxInput {
    pub label: String,
    pub gross_income: String,
    pub spouse_income: String,
    pub family_status: String,
    pub num_children: String,
    pub housing_expense_type: String,
    pub housing_amount: String,
    pub has_green_investment: String,
    pub green_investment_amount: String,
    pub green_subsidy_amount: String,
    pub home_insurance_amount: String,
    pub life_insurance_amount: String,
    pub social_insurance_amount: String,
    pub dividend_income: String,
    pub interest_income: String,
}

/// A coerced input together with its optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub label: Option<String>,
    pub input: TaxInput,
}

impl RawTaxInput {
    /// Applies the coercion rules and returns a ready-to-calculate input.
    pub fn coerce(&self) -> Result<TaxInput, CoercionError> {
        let family_status = FamilyStatus::parse(self.family_status.trim())
            .ok_or_else(|| CoercionError::InvalidFamilyStatus(self.family_status.clone()))?;
        let housing_expense_type = HousingExpenseType::parse(self.housing_expense_type.trim())
            .ok_or_else(|| CoercionError::InvalidHousingType(self.housing_expense_type.clone()))?;

        let spouse_income = if family_status.is_married() {
            coerce_amount("spouse_income", &self.spouse_income)
        } else {
            Decimal::ZERO
        };

        Ok(TaxInput {
            gross_income: coerce_amount("gross_income", &self.gross_income),
            spouse_income,
            family_status,
            num_children: coerce_count("num_children", &self.num_children),
            housing_expense_type,
            housing_amount: coerce_amount("housing_amount", &self.housing_amount),
            has_green_investment: coerce_flag(&self.has_green_investment),
            green_investment_amount: coerce_amount(
                "green_investment_amount",
                &self.green_investment_amount,
            ),
            green_subsidy_amount: coerce_amount("green_subsidy_amount", &self.green_subsidy_amount),
            home_insurance_amount: coerce_amount(
                "home_insurance_amount",
                &self.home_insurance_amount,
            ),
            life_insurance_amount: coerce_amount(
                "life_insurance_amount",
                &self.life_insurance_amount,
            ),
            social_insurance_amount: coerce_amount(
                "social_insurance_amount",
                &self.social_insurance_amount,
            ),
            dividend_income: coerce_amount("dividend_income", &self.dividend_income),
            interest_income: coerce_amount("interest_income", &self.interest_income),
        })
    }

    fn label(&self) -> Option<String> {
        let label = self.label.trim();
        (!label.is_empty()).then(|| label.to_string())
    }
}

/// Normalizes input for decimal parsing: trims whitespace, a leading euro
/// sign and thousands separators.
fn normalize_amount(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('€')
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "")
}

fn parse_amount(
    field: &str,
    raw: &str,
) -> Decimal {
    let normalized = normalize_amount(raw);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        warn!(field, input = %raw, "unparsable amount treated as 0: {}", e);
        Decimal::ZERO
    })
}

/// Coerces a monetary value. Empty, unparsable and negative input become 0.
pub fn coerce_amount(
    field: &str,
    raw: &str,
) -> Decimal {
    let amount = parse_amount(field, raw);
    if amount < Decimal::ZERO {
        warn!(field, %amount, "negative amount treated as 0");
        return Decimal::ZERO;
    }
    amount
}

/// Coerces a count such as the number of children, truncating fractions.
pub fn coerce_count(
    field: &str,
    raw: &str,
) -> u32 {
    coerce_amount(field, raw).trunc().to_u32().unwrap_or_else(|| {
        warn!(field, input = %raw, "count out of range treated as 0");
        0
    })
}

/// Coerces a checkbox-style flag.
pub fn coerce_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on"
    )
}

/// Parse CSV text and return one [`InputRecord`] per row, in file order.
///
/// # Errors
///
/// * [`InputLoadError::Parse`] if the CSV is structurally invalid.
/// * [`InputLoadError::InvalidRow`] if a status or housing code is unknown.
pub fn load_from_str(input: &str) -> Result<Vec<InputRecord>, InputLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<RawTaxInput>()
        .enumerate()
        .map(|(idx, result)| {
            let raw = result?;
            let input = raw
                .coerce()
                .map_err(|source| InputLoadError::InvalidRow {
                    row: idx + 1,
                    source,
                })?;
            Ok(InputRecord {
                label: raw.label(),
                input,
            })
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &std::path::Path) -> Result<Vec<InputRecord>, InputLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
