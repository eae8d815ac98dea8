use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of the household income test for means-tested deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub total_household_income: Decimal,
    pub income_limit: Decimal,
}

/// Kind of personal deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    DependentChildren,
    Rent,
    MortgageInterest,
    GreenInvestment,
    HomeInsurance,
}

impl DeductionCategory {
    /// Display name, as shown next to the amount.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DependentChildren => "Dependent Children",
            Self::Rent => "Rent",
            Self::MortgageInterest => "Mortgage Interest",
            Self::GreenInvestment => "Energy Efficiency / Electric Vehicle",
            Self::HomeInsurance => "Home Insurance (Natural Disasters)",
        }
    }

    /// Whether the deduction depends on the household income test.
    pub fn is_means_tested(&self) -> bool {
        !matches!(self, Self::HomeInsurance)
    }
}

/// A single applied personal deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLineItem {
    pub category: DeductionCategory,
    /// Display name of `category`.
    pub label: String,
    pub amount: Decimal,
    pub note: String,
}

/// Portion of the final taxable income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdownEntry {
    pub bracket_label: String,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Everything derived from one [`TaxInput`](crate::TaxInput).
///
/// Scalars come first and nested records last so the struct serializes
/// cleanly to table-based formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub exempt_income: Decimal,
    /// Gross minus exempt income. May be negative when exempt income exceeds
    /// gross income.
    pub taxable_before_standard_deductions: Decimal,
    pub standard_deductions_applied: Decimal,
    pub net_income: Decimal,
    pub personal_deductions_total: Decimal,
    pub final_taxable_income: Decimal,
    pub final_tax: Decimal,
    /// Final tax as a percentage of gross income.
    pub effective_rate: Decimal,
    pub deductions: Vec<DeductionLineItem>,
    pub breakdown: Vec<TaxBreakdownEntry>,
    pub eligibility: EligibilityResult,
}
