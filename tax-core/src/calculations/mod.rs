//! Income tax calculation steps.
//!
//! Each step is a plain function over [`rust_decimal::Decimal`] values so it
//! can be used on its own (for previews) or through [`TaxCalculator`], which
//! runs them in order.

pub mod brackets;
pub mod common;
pub mod contributions;
pub mod deductions;
pub mod eligibility;
pub mod pipeline;
pub mod standard_deduction;

pub use brackets::{BracketTax, compute_bracket_tax};
pub use contributions::{ContributionSuggestion, suggest_contributions};
pub use deductions::{
    PersonalDeductions, child_deduction_schedule, children_deduction, compute_deductions,
};
pub use eligibility::{evaluate_eligibility, income_limit_for};
pub use pipeline::{TaxCalculator, calculate};
pub use standard_deduction::compute_standard_deduction;
