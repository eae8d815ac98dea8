//! The 1/5 rule: life and social insurance contributions are deductible only
//! up to a share (20% by default) of taxable income before those deductions.

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;

/// Returns the deductible part of `life_insurance + social_insurance`.
///
/// The cap is `ratio` of `taxable_before_standard_deductions`, with a negative
/// base treated as zero so the cap is never negative.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::compute_standard_deduction;
///
/// let applied = compute_standard_deduction(dec!(3000), dec!(4000), dec!(30000), dec!(0.20));
///
/// assert_eq!(applied, dec!(6000));
/// ```
pub fn compute_standard_deduction(
    life_insurance: Decimal,
    social_insurance: Decimal,
    taxable_before_standard_deductions: Decimal,
    ratio: Decimal,
) -> Decimal {
    let claimed = life_insurance.saturating_add(social_insurance);
    let cap = non_negative(taxable_before_standard_deductions).saturating_mul(ratio);
    claimed.min(cap)
}
