//! End-to-end income tax calculation.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Exempt income (dividends + interest) |
//! | 2    | Taxable income before standard deductions (gross − exempt) |
//! | 3    | Standard deductions, limited by the 1/5 rule |
//! | 4    | Net income (step 2 − step 3) |
//! | 5    | Household income test |
//! | 6    | Personal deductions |
//! | 7    | Final taxable income (step 4 − step 6, minimum 0) |
//! | 8    | Progressive bracket tax |
//! | 9    | Effective rate (tax ÷ gross × 100) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{TaxCalculator, TaxInput, TaxRules};
//!
//! let rules = TaxRules::default();
//! let input = TaxInput {
//!     gross_income: dec!(50000),
//!     home_insurance_amount: dec!(600),
//!     ..Default::default()
//! };
//!
//! let result = TaxCalculator::new(&rules).calculate(&input);
//!
//! assert_eq!(result.personal_deductions_total, dec!(500));
//! assert_eq!(result.final_taxable_income, dec!(49500));
//! assert_eq!(result.final_tax, dec!(6750));
//! assert_eq!(result.effective_rate, dec!(13.5));
//! ```

use tracing::debug;

use crate::calculations::brackets::compute_bracket_tax;
use crate::calculations::common::{non_negative, percentage_of};
use crate::calculations::deductions::compute_deductions;
use crate::calculations::eligibility::evaluate_eligibility;
use crate::calculations::standard_deduction::compute_standard_deduction;
use crate::{TaxInput, TaxResult, TaxRules};

/// Calculator bound to one rule set.
///
/// The rules are expected to have passed [`TaxRules::validate`]; the
/// calculation itself never fails.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rules: &'a TaxRules,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TaxRules {
        self.rules
    }

    /// Runs every step for `input` and returns the full result.
    ///
    /// Negative amounts are treated as zero and spouse income is ignored
    /// unless the household is married.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let input = input.normalized();
        debug!(
            family_status = input.family_status.as_str(),
            num_children = input.num_children,
            housing = input.housing_expense_type.as_str(),
            "calculating"
        );

        let exempt_income = input.exempt_income();
        let taxable_before_standard_deductions = input.gross_income.saturating_sub(exempt_income);
        let standard_deductions_applied = compute_standard_deduction(
            input.life_insurance_amount,
            input.social_insurance_amount,
            taxable_before_standard_deductions,
            self.rules.standard_deduction_ratio,
        );
        let net_income =
            taxable_before_standard_deductions.saturating_sub(standard_deductions_applied);
        debug!(
            %exempt_income,
            %taxable_before_standard_deductions,
            %standard_deductions_applied,
            %net_income,
            "income before personal deductions"
        );

        let eligibility = evaluate_eligibility(
            input.gross_income,
            input.spouse_income,
            input.num_children,
            input.family_status,
            &self.rules.income_limits,
        );
        debug!(
            eligible = eligibility.eligible,
            household_income = %eligibility.total_household_income,
            limit = %eligibility.income_limit,
            "household income test"
        );

        let personal = compute_deductions(&input, &eligibility, self.rules);
        let final_taxable_income = non_negative(net_income.saturating_sub(personal.total));

        let bracket_tax = compute_bracket_tax(final_taxable_income, &self.rules.brackets);
        let effective_rate = percentage_of(bracket_tax.total_tax, input.gross_income);
        debug!(
            %final_taxable_income,
            final_tax = %bracket_tax.total_tax,
            %effective_rate,
            "tax calculated"
        );

        TaxResult {
            gross_income: input.gross_income,
            exempt_income,
            taxable_before_standard_deductions,
            standard_deductions_applied,
            net_income,
            personal_deductions_total: personal.total,
            final_taxable_income,
            final_tax: bracket_tax.total_tax,
            effective_rate,
            deductions: personal.items,
            breakdown: bracket_tax.breakdown,
            eligibility,
        }
    }
}

/// Calculates `input` under `rules`. Shorthand for
/// `TaxCalculator::new(rules).calculate(input)`.
pub fn calculate(
    input: &TaxInput,
    rules: &TaxRules,
) -> TaxResult {
    TaxCalculator::new(rules).calculate(input)
}
