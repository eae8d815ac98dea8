//! Advisory estimate of employee social insurance and GHS contributions.
//!
//! Not part of the tax calculation. A front end can offer the total as a
//! starting value for the social insurance field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ContributionRates;
use crate::calculations::common::round_half_up;

/// Suggested contributions for a salary, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionSuggestion {
    pub social_insurance: Decimal,
    pub ghs: Decimal,
    pub total: Decimal,
}

/// Estimates contributions on `gross_income`.
///
/// Returns an all-zero suggestion when `gross_income` is not positive.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::ContributionRates;
/// use tax_core::calculations::suggest_contributions;
///
/// let suggestion = suggest_contributions(dec!(50000), &ContributionRates::default());
///
/// assert_eq!(suggestion.social_insurance, dec!(4400.00));
/// assert_eq!(suggestion.ghs, dec!(1450.00));
/// assert_eq!(suggestion.total, dec!(5850.00));
/// ```
pub fn suggest_contributions(
    gross_income: Decimal,
    rates: &ContributionRates,
) -> ContributionSuggestion {
    if gross_income <= Decimal::ZERO {
        return ContributionSuggestion::default();
    }

    ContributionSuggestion {
        social_insurance: round_half_up(gross_income * rates.social_insurance),
        ghs: round_half_up(gross_income * rates.ghs),
        total: round_half_up(gross_income * rates.total()),
    }
}
