//! Personal deductions that reduce income before the brackets are applied.
//!
//! | Deduction        | Income test | Amount                                   |
//! |------------------|-------------|------------------------------------------|
//! | Children         | yes         | per-child table, doubled for single parents |
//! | Rent / mortgage  | yes         | expense, capped                          |
//! | Green investment | yes         | investment minus subsidy, capped         |
//! | Home insurance   | no          | premium, capped                          |
//!
//! The green investment amount is not floored: a subsidy larger than the
//! investment produces a negative line item that still counts toward the
//! total.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    ChildDeductionAmounts, DeductionCategory, DeductionLineItem, EligibilityResult, FamilyStatus,
    HousingExpenseType, TaxInput, TaxRules,
};

/// Applied personal deductions and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalDeductions {
    pub items: Vec<DeductionLineItem>,
    pub total: Decimal,
}

impl PersonalDeductions {
    fn push(
        &mut self,
        category: DeductionCategory,
        amount: Decimal,
        note: String,
    ) {
        debug!(?category, %amount, "applying personal deduction");
        self.total = self.total.saturating_add(amount);
        self.items.push(DeductionLineItem {
            category,
            label: category.label().to_string(),
            amount,
            note,
        });
    }
}

fn child_multiplier(family_status: FamilyStatus) -> Decimal {
    if family_status.is_single_parent() {
        Decimal::TWO
    } else {
        Decimal::ONE
    }
}

/// Per-child deduction amounts in birth order.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{ChildDeductionAmounts, FamilyStatus};
/// use tax_core::calculations::child_deduction_schedule;
///
/// let amounts = ChildDeductionAmounts::default();
///
/// assert_eq!(
///     child_deduction_schedule(4, FamilyStatus::Married, &amounts),
///     vec![dec!(1000), dec!(1250), dec!(1500), dec!(1500)]
/// );
/// assert_eq!(
///     child_deduction_schedule(2, FamilyStatus::SingleParent, &amounts),
///     vec![dec!(2000), dec!(2500)]
/// );
/// ```
pub fn child_deduction_schedule(
    num_children: u32,
    family_status: FamilyStatus,
    amounts: &ChildDeductionAmounts,
) -> Vec<Decimal> {
    let multiplier = child_multiplier(family_status);
    (1..=num_children)
        .map(|child| amounts.base_amount(child) * multiplier)
        .collect()
}

/// Total children deduction, equal to the sum of
/// [`child_deduction_schedule`].
///
/// Both read [`ChildDeductionAmounts::base_amount`]. Children from the last
/// tier on share one amount, so they are counted rather than enumerated.
pub fn children_deduction(
    num_children: u32,
    family_status: FamilyStatus,
    amounts: &ChildDeductionAmounts,
) -> Decimal {
    let last_tier = amounts.tiers().len() as u32;
    let individually_listed = num_children.min(last_tier - 1);
    let sharing_last_tier = num_children - individually_listed;

    let base = (1..=individually_listed)
        .map(|child| amounts.base_amount(child))
        .sum::<Decimal>()
        .saturating_add(
            amounts
                .base_amount(last_tier)
                .saturating_mul(Decimal::from(sharing_last_tier)),
        );

    base.saturating_mul(child_multiplier(family_status))
}

/// Computes every applicable personal deduction for `input`.
///
/// Children, housing and green investment require `eligibility.eligible`;
/// home insurance applies regardless. Items are returned in that order.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{EligibilityResult, TaxInput, TaxRules};
/// use tax_core::calculations::compute_deductions;
///
/// let input = TaxInput {
///     home_insurance_amount: dec!(600),
///     ..Default::default()
/// };
/// let not_eligible = EligibilityResult {
///     eligible: false,
///     total_household_income: dec!(90000),
///     income_limit: dec!(40000),
/// };
///
/// let deductions = compute_deductions(&input, &not_eligible, &TaxRules::default());
///
/// assert_eq!(deductions.items.len(), 1);
/// assert_eq!(deductions.total, dec!(500));
/// ```
pub fn compute_deductions(
    input: &TaxInput,
    eligibility: &EligibilityResult,
    rules: &TaxRules,
) -> PersonalDeductions {
    let caps = &rules.deduction_caps;
    let mut deductions = PersonalDeductions::default();
    let allowed =
        |category: DeductionCategory| eligibility.eligible || !category.is_means_tested();

    if allowed(DeductionCategory::DependentChildren) && input.num_children > 0 {
        let amount = children_deduction(
            input.num_children,
            input.family_status,
            &rules.child_deductions,
        );
        deductions.push(
            DeductionCategory::DependentChildren,
            amount,
            children_note(input.num_children, input.family_status),
        );
    }

    let housing_category = match input.housing_expense_type {
        HousingExpenseType::None => None,
        HousingExpenseType::Rent => Some(DeductionCategory::Rent),
        HousingExpenseType::Mortgage => Some(DeductionCategory::MortgageInterest),
    };
    if let Some(category) = housing_category
        && allowed(category)
        && input.housing_amount > Decimal::ZERO
    {
        deductions.push(
            category,
            input.housing_amount.min(caps.housing),
            format!("Maximum {} per person", caps.housing),
        );
    }

    if allowed(DeductionCategory::GreenInvestment)
        && input.has_green_investment
        && input.green_investment_amount > Decimal::ZERO
    {
        let net_amount = input.green_investment_amount - input.green_subsidy_amount;
        deductions.push(
            DeductionCategory::GreenInvestment,
            net_amount.min(caps.green_investment),
            format!(
                "Net expense: {} (max {}/year)",
                net_amount, caps.green_investment
            ),
        );
    }

    if allowed(DeductionCategory::HomeInsurance) && input.home_insurance_amount > Decimal::ZERO {
        deductions.push(
            DeductionCategory::HomeInsurance,
            input.home_insurance_amount.min(caps.home_insurance),
            format!("Maximum {} (no income criteria)", caps.home_insurance),
        );
    }

    deductions
}

fn children_note(
    num_children: u32,
    family_status: FamilyStatus,
) -> String {
    let noun = if num_children == 1 { "child" } else { "children" };
    if family_status.is_single_parent() {
        format!("{num_children} {noun} (single parent, double rate)")
    } else {
        format!("{num_children} {noun}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn eligible() -> EligibilityResult {
        EligibilityResult {
            eligible: true,
            total_household_income: dec!(30000),
            income_limit: dec!(40000),
        }
    }

    fn not_eligible() -> EligibilityResult {
        EligibilityResult {
            eligible: false,
            total_household_income: dec!(130000),
            income_limit: dec!(100000),
        }
    }

    fn categories(deductions: &PersonalDeductions) -> Vec<DeductionCategory> {
        deductions.items.iter().map(|item| item.category).collect()
    }

    // =========================================================================
    // children
    // =========================================================================

    #[test]
    fn three_children_married() {
        let amount = children_deduction(3, FamilyStatus::Married, &ChildDeductionAmounts::default());

        assert_eq!(amount, dec!(3750));
    }

    #[test]
    fn two_children_single_parent_double_rate() {
        let amount = children_deduction(
            2,
            FamilyStatus::SingleParent,
            &ChildDeductionAmounts::default(),
        );

        assert_eq!(amount, dec!(4500));
    }

    #[test]
    fn no_children_no_deduction() {
        let amount = children_deduction(0, FamilyStatus::Married, &ChildDeductionAmounts::default());

        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn children_total_matches_schedule_sum() {
        let amounts = ChildDeductionAmounts::default();

        for status in [FamilyStatus::Married, FamilyStatus::SingleParent] {
            for children in 0..9 {
                let schedule_sum: Decimal = child_deduction_schedule(children, status, &amounts)
                    .into_iter()
                    .sum();
                assert_eq!(
                    children_deduction(children, status, &amounts),
                    schedule_sum,
                    "{children} children, {status:?}"
                );
            }
        }
    }

    #[test]
    fn largest_child_count_is_counted_not_enumerated() {
        let amounts = ChildDeductionAmounts::default();

        let amount = children_deduction(u32::MAX, FamilyStatus::SingleParent, &amounts);

        let expected = (dec!(1000) + dec!(1250) + dec!(1500) * Decimal::from(u32::MAX - 2)) * dec!(2);
        assert_eq!(amount, expected);
    }

    #[test]
    fn children_deduction_requires_eligibility() {
        let input = TaxInput {
            family_status: FamilyStatus::Married,
            num_children: 2,
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &not_eligible(), &TaxRules::default());

        assert!(deductions.items.is_empty());
        assert_eq!(deductions.total, Decimal::ZERO);
    }

    #[test]
    fn children_note_mentions_single_parent_rate() {
        let input = TaxInput {
            family_status: FamilyStatus::SingleParent,
            num_children: 1,
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(
            deductions.items,
            vec![DeductionLineItem {
                category: DeductionCategory::DependentChildren,
                label: "Dependent Children".to_string(),
                amount: dec!(2000),
                note: "1 child (single parent, double rate)".to_string(),
            }]
        );
    }

    // =========================================================================
    // housing
    // =========================================================================

    #[test]
    fn housing_is_capped() {
        let input = TaxInput {
            housing_expense_type: HousingExpenseType::Rent,
            housing_amount: dec!(5000),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(categories(&deductions), vec![DeductionCategory::Rent]);
        assert_eq!(deductions.total, dec!(2000));
    }

    #[test]
    fn mortgage_line_item_carries_display_label() {
        let input = TaxInput {
            housing_expense_type: HousingExpenseType::Mortgage,
            housing_amount: dec!(1200),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(deductions.items[0].label, "Mortgage Interest");
        assert_eq!(deductions.items[0].amount, dec!(1200));
    }

    #[test]
    fn housing_below_cap_is_claimed_in_full() {
        let input = TaxInput {
            housing_expense_type: HousingExpenseType::Mortgage,
            housing_amount: dec!(1200.40),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(
            categories(&deductions),
            vec![DeductionCategory::MortgageInterest]
        );
        assert_eq!(deductions.total, dec!(1200.40));
    }

    #[test]
    fn housing_amount_without_type_is_ignored() {
        let input = TaxInput {
            housing_expense_type: HousingExpenseType::None,
            housing_amount: dec!(1500),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert!(deductions.items.is_empty());
    }

    // =========================================================================
    // green investment
    // =========================================================================

    #[test]
    fn green_investment_nets_subsidy_before_cap() {
        let input = TaxInput {
            has_green_investment: true,
            green_investment_amount: dec!(1500),
            green_subsidy_amount: dec!(800),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(deductions.total, dec!(700));
        assert_eq!(
            deductions.items[0].note,
            "Net expense: 700 (max 1000/year)"
        );
    }

    #[test]
    fn green_investment_is_capped() {
        let input = TaxInput {
            has_green_investment: true,
            green_investment_amount: dec!(8000),
            green_subsidy_amount: dec!(2000),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(deductions.total, dec!(1000));
    }

    #[test]
    fn subsidy_above_investment_yields_negative_line_item() {
        let input = TaxInput {
            has_green_investment: true,
            green_investment_amount: dec!(500),
            green_subsidy_amount: dec!(800),
            home_insurance_amount: dec!(400),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(deductions.items[0].amount, dec!(-300));
        assert_eq!(deductions.total, dec!(100));
    }

    #[test]
    fn green_amount_without_flag_is_ignored() {
        let input = TaxInput {
            has_green_investment: false,
            green_investment_amount: dec!(900),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert!(deductions.items.is_empty());
    }

    // =========================================================================
    // home insurance
    // =========================================================================

    #[test]
    fn home_insurance_applies_without_eligibility() {
        let input = TaxInput {
            home_insurance_amount: dec!(600),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &not_eligible(), &TaxRules::default());

        assert_eq!(
            deductions.items,
            vec![DeductionLineItem {
                category: DeductionCategory::HomeInsurance,
                label: "Home Insurance (Natural Disasters)".to_string(),
                amount: dec!(500),
                note: "Maximum 500 (no income criteria)".to_string(),
            }]
        );
    }

    // =========================================================================
    // aggregation
    // =========================================================================

    #[test]
    fn all_deductions_in_fixed_order() {
        let input = TaxInput {
            family_status: FamilyStatus::Married,
            num_children: 3,
            housing_expense_type: HousingExpenseType::Rent,
            housing_amount: dec!(2400),
            has_green_investment: true,
            green_investment_amount: dec!(600),
            home_insurance_amount: dec!(250),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &TaxRules::default());

        assert_eq!(
            categories(&deductions),
            vec![
                DeductionCategory::DependentChildren,
                DeductionCategory::Rent,
                DeductionCategory::GreenInvestment,
                DeductionCategory::HomeInsurance,
            ]
        );
        assert_eq!(deductions.total, dec!(3750) + dec!(2000) + dec!(600) + dec!(250));
    }

    #[test]
    fn caps_follow_rules() {
        let mut rules = TaxRules::default();
        rules.deduction_caps.housing = dec!(3000);

        let input = TaxInput {
            housing_expense_type: HousingExpenseType::Rent,
            housing_amount: dec!(5000),
            ..Default::default()
        };

        let deductions = compute_deductions(&input, &eligible(), &rules);

        assert_eq!(deductions.total, dec!(3000));
    }
}
