//! Household income test for means-tested personal deductions.
//!
//! The applicable limit depends on family status and, for families, on the
//! number of children:
//!
//! | Household            | Limit key                |
//! |----------------------|--------------------------|
//! | single (any children)| `single`                 |
//! | family, 0–2 children | `family_0_2_children`    |
//! | family, 3–4 children | `family_3_4_children`    |
//! | family, 5+ children  | `family_5_plus_children` |
//!
//! The household qualifies when combined income does not exceed the limit.

use rust_decimal::Decimal;

use crate::{EligibilityResult, FamilyStatus, IncomeLimits};

/// Returns the income limit that applies to a household.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FamilyStatus, IncomeLimits};
/// use tax_core::calculations::income_limit_for;
///
/// let limits = IncomeLimits::default();
///
/// assert_eq!(income_limit_for(FamilyStatus::Single, 4, &limits), dec!(40000));
/// assert_eq!(income_limit_for(FamilyStatus::Married, 4, &limits), dec!(150000));
/// ```
pub fn income_limit_for(
    family_status: FamilyStatus,
    num_children: u32,
    limits: &IncomeLimits,
) -> Decimal {
    match (family_status, num_children) {
        (FamilyStatus::Single, _) => limits.single,
        (_, 0..=2) => limits.family_up_to_two_children,
        (_, 3..=4) => limits.family_three_to_four_children,
        _ => limits.family_five_or_more_children,
    }
}

/// Evaluates whether the household qualifies for means-tested deductions.
///
/// `spouse_income` is added as given; callers clear it for households that
/// are not married.
pub fn evaluate_eligibility(
    gross_income: Decimal,
    spouse_income: Decimal,
    num_children: u32,
    family_status: FamilyStatus,
    limits: &IncomeLimits,
) -> EligibilityResult {
    let total_household_income = gross_income.saturating_add(spouse_income);
    let income_limit = income_limit_for(family_status, num_children, limits);

    EligibilityResult {
        eligible: total_household_income <= income_limit,
        total_household_income,
        income_limit,
    }
}
