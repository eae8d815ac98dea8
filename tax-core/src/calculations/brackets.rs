//! Progressive bracket tax.
//!
//! Each bracket taxes only the slice of income between its lower bound and
//! the smaller of its upper bound and the taxable income. Brackets that
//! receive no income, and zero-rate bands, are left out of the breakdown.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxRules;
//! use tax_core::calculations::compute_bracket_tax;
//!
//! let rules = TaxRules::default();
//! let result = compute_bracket_tax(dec!(100000), &rules.brackets);
//!
//! assert_eq!(result.total_tax, dec!(23300));
//! assert_eq!(result.breakdown.len(), 4);
//! ```

use rust_decimal::Decimal;

use crate::{BracketSchedule, TaxBreakdownEntry};

/// Total tax and per-bracket detail for one taxable amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTax {
    pub total_tax: Decimal,
    pub breakdown: Vec<TaxBreakdownEntry>,
}

/// Applies `schedule` to `taxable_income`.
///
/// `taxable_income` is expected to be non-negative; a negative amount falls
/// below every lower bound and yields zero tax. Sums saturate at
/// [`Decimal::MAX`].
pub fn compute_bracket_tax(
    taxable_income: Decimal,
    schedule: &BracketSchedule,
) -> BracketTax {
    let mut total_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for bracket in schedule {
        if taxable_income <= bracket.min_income {
            continue;
        }

        let upper = match bracket.max_income {
            Some(max) => taxable_income.min(max),
            None => taxable_income,
        };
        let taxable_amount = upper - bracket.min_income;
        if taxable_amount <= Decimal::ZERO || bracket.tax_rate.is_zero() {
            continue;
        }

        let tax = taxable_amount.saturating_mul(bracket.tax_rate);
        total_tax = total_tax.saturating_add(tax);
        breakdown.push(TaxBreakdownEntry {
            bracket_label: bracket.label(),
            lower_bound: bracket.min_income,
            upper_bound: bracket.max_income,
            rate: bracket.tax_rate,
            taxable_amount,
            tax,
        });
    }

    BracketTax {
        total_tax,
        breakdown,
    }
}
