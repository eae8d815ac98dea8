//! TOML documents printed by the `tax-calc` subcommands.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::{ContributionSuggestion, suggest_contributions};
use tax_core::{TaxCalculator, TaxResult, TaxRules};
use tax_data::InputRecord;

/// One calculated input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    /// 1-based position in the input file.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub result: TaxResult,
}

/// Output of `tax-calc calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationReport {
    pub tax_year: i32,
    pub results: Vec<ResultEntry>,
}

impl CalculationReport {
    pub fn build(
        records: &[InputRecord],
        rules: &TaxRules,
    ) -> Self {
        let calculator = TaxCalculator::new(rules);
        let results = records
            .iter()
            .enumerate()
            .map(|(idx, record)| ResultEntry {
                row: idx + 1,
                label: record.label.clone(),
                result: calculator.calculate(&record.input),
            })
            .collect();

        Self {
            tax_year: calculator.rules().tax_year,
            results,
        }
    }
}

/// Output of `tax-calc suggest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionReport {
    pub gross_income: Decimal,
    pub social_insurance_rate: Decimal,
    pub ghs_rate: Decimal,
    pub suggestion: ContributionSuggestion,
}

impl SuggestionReport {
    pub fn build(
        gross_income: Decimal,
        rules: &TaxRules,
    ) -> Self {
        let rates = &rules.contribution_rates;
        Self {
            gross_income,
            social_insurance_rate: rates.social_insurance,
            ghs_rate: rates.ghs,
            suggestion: suggest_contributions(gross_income, rates),
        }
    }
}

/// Renders any report as pretty-printed TOML.
pub fn to_toml<T: Serialize>(report: &T) -> Result<String> {
    toml::to_string_pretty(report).context("failed to render report as TOML")
}
