use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FamilyStatus, HousingExpenseType};

/// Declared income and expense figures for one tax year.
///
/// Every monetary field defaults to zero, so callers only need to set what
/// was actually declared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxInput {
    pub gross_income: Decimal,
    /// Only meaningful when `family_status` is [`FamilyStatus::Married`].
    pub spouse_income: Decimal,
    pub family_status: FamilyStatus,
    pub num_children: u32,

    // Means-tested expenses
    pub housing_expense_type: HousingExpenseType,
    pub housing_amount: Decimal,
    pub has_green_investment: bool,
    pub green_investment_amount: Decimal,
    pub green_subsidy_amount: Decimal,

    // Not means-tested
    pub home_insurance_amount: Decimal,

    // Subject to the 1/5 rule
    pub life_insurance_amount: Decimal,
    pub social_insurance_amount: Decimal,

    // Exempt income
    pub dividend_income: Decimal,
    pub interest_income: Decimal,
}

impl TaxInput {
    /// Returns a copy with negative amounts raised to zero and spouse income
    /// cleared unless the household is married.
    pub fn normalized(&self) -> Self {
        let non_negative = |value: Decimal| value.max(Decimal::ZERO);

        Self {
            gross_income: non_negative(self.gross_income),
            spouse_income: if self.family_status.is_married() {
                non_negative(self.spouse_income)
            } else {
                Decimal::ZERO
            },
            family_status: self.family_status,
            num_children: self.num_children,
            housing_expense_type: self.housing_expense_type,
            housing_amount: non_negative(self.housing_amount),
            has_green_investment: self.has_green_investment,
            green_investment_amount: non_negative(self.green_investment_amount),
            green_subsidy_amount: non_negative(self.green_subsidy_amount),
            home_insurance_amount: non_negative(self.home_insurance_amount),
            life_insurance_amount: non_negative(self.life_insurance_amount),
            social_insurance_amount: non_negative(self.social_insurance_amount),
            dividend_income: non_negative(self.dividend_income),
            interest_income: non_negative(self.interest_income),
        }
    }

    /// Dividend plus interest income.
    pub fn exempt_income(&self) -> Decimal {
        self.dividend_income.saturating_add(self.interest_income)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn normalized_clears_spouse_income_when_not_married() {
        let input = TaxInput {
            spouse_income: dec!(30000),
            family_status: FamilyStatus::SingleParent,
            ..Default::default()
        };

        assert_eq!(input.normalized().spouse_income, Decimal::ZERO);
    }

    #[test]
    fn normalized_keeps_spouse_income_when_married() {
        let input = TaxInput {
            spouse_income: dec!(30000),
            family_status: FamilyStatus::Married,
            ..Default::default()
        };

        assert_eq!(input.normalized().spouse_income, dec!(30000));
    }

    #[test]
    fn normalized_raises_negative_amounts_to_zero() {
        let input = TaxInput {
            gross_income: dec!(-10),
            housing_amount: dec!(-1),
            green_subsidy_amount: dec!(-500),
            dividend_income: dec!(-0.01),
            interest_income: dec!(250),
            ..Default::default()
        };

        let normalized = input.normalized();

        assert_eq!(normalized.gross_income, Decimal::ZERO);
        assert_eq!(normalized.housing_amount, Decimal::ZERO);
        assert_eq!(normalized.green_subsidy_amount, Decimal::ZERO);
        assert_eq!(normalized.dividend_income, Decimal::ZERO);
        assert_eq!(normalized.interest_income, dec!(250));
    }

    #[test]
    fn exempt_income_sums_dividends_and_interest() {
        let input = TaxInput {
            dividend_income: dec!(1200.50),
            interest_income: dec!(300),
            ..Default::default()
        };

        assert_eq!(input.exempt_income(), dec!(1500.50));
    }

    #[test]
    fn exempt_income_saturates_at_max() {
        let input = TaxInput {
            dividend_income: Decimal::MAX,
            interest_income: Decimal::MAX,
            ..Default::default()
        };

        assert_eq!(input.exempt_income(), Decimal::MAX);
    }
}
