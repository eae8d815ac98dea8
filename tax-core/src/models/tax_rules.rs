//! Rule set for one tax year: brackets, income limits, deduction amounts and
//! caps.
//!
//! [`TaxRules::default`] carries the 2026 schedule. Every section is
//! `#[serde(default)]`, so an override file only needs the values it changes.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxRules;
//!
//! let rules = TaxRules::default();
//!
//! assert!(rules.validate().is_ok());
//! assert_eq!(rules.income_limits.single, dec!(40000));
//! assert_eq!(rules.deduction_caps.housing, dec!(2000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketSchedule, TaxBracket};

/// Errors reported by [`TaxRules::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// The bracket schedule has no entries.
    #[error("bracket schedule is empty")]
    NoBrackets,

    /// The first bracket must start at zero income.
    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    /// The first bracket must be the zero-rate band.
    #[error("first bracket rate must be 0, got {0}")]
    FirstBracketRateNotZero(Decimal),

    /// A bracket does not start where the previous one ended.
    #[error("bracket {index} starts at {found}, expected {expected}")]
    BracketNotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bounded bracket whose upper bound is not above its lower bound.
    #[error("bracket {index} has upper bound {max} not above lower bound {min}")]
    EmptyBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Only the last bracket may be unbounded.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast { index: usize },

    /// The last bracket must be unbounded.
    #[error("last bracket must be unbounded, got upper bound {0}")]
    LastBracketBounded(Decimal),

    /// A bracket rate outside [0, 1].
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    /// A bracket rate lower than the one before it.
    #[error("bracket {index} rate {rate} is lower than previous rate {previous}")]
    DecreasingRate {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },

    /// A threshold, per-child amount or cap below zero.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// Per-child amounts must not shrink for later children.
    #[error("per-child amounts must not decrease: {first}, {second}, {subsequent}")]
    DecreasingChildAmounts {
        first: Decimal,
        second: Decimal,
        subsequent: Decimal,
    },

    /// A ratio or rate outside [0, 1].
    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRatio { field: &'static str, value: Decimal },
}

/// Household income thresholds for means-tested deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeLimits {
    /// Applies to single filers regardless of children.
    pub single: Decimal,
    #[serde(rename = "family_0_2_children")]
    pub family_up_to_two_children: Decimal,
    #[serde(rename = "family_3_4_children")]
    pub family_three_to_four_children: Decimal,
    #[serde(rename = "family_5_plus_children")]
    pub family_five_or_more_children: Decimal,
}

impl Default for IncomeLimits {
    fn default() -> Self {
        Self {
            single: dec!(40000),
            family_up_to_two_children: dec!(100000),
            family_three_to_four_children: dec!(150000),
            family_five_or_more_children: dec!(200000),
        }
    }
}

/// Base deduction per dependent child, by birth order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildDeductionAmounts {
    pub first: Decimal,
    pub second: Decimal,
    /// Third and every later child.
    pub subsequent: Decimal,
}

impl ChildDeductionAmounts {
    /// The amounts as an ordered table, first child first.
    pub fn tiers(&self) -> [Decimal; 3] {
        [self.first, self.second, self.subsequent]
    }

    /// Base amount for the child at 1-based position `child_number`.
    pub fn base_amount(
        &self,
        child_number: u32,
    ) -> Decimal {
        let tiers = self.tiers();
        let index = child_number.clamp(1, tiers.len() as u32) as usize - 1;
        tiers[index]
    }
}

impl Default for ChildDeductionAmounts {
    fn default() -> Self {
        Self {
            first: dec!(1000),
            second: dec!(1250),
            subsequent: dec!(1500),
        }
    }
}

/// Upper limits on individual personal deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionCaps {
    pub housing: Decimal,
    pub green_investment: Decimal,
    pub home_insurance: Decimal,
}

impl Default for DeductionCaps {
    fn default() -> Self {
        Self {
            housing: dec!(2000),
            green_investment: dec!(1000),
            home_insurance: dec!(500),
        }
    }
}

/// Employee contribution rates used by the advisory suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionRates {
    pub social_insurance: Decimal,
    /// General Healthcare System contribution.
    pub ghs: Decimal,
}

impl ContributionRates {
    pub fn total(&self) -> Decimal {
        self.social_insurance + self.ghs
    }
}

impl Default for ContributionRates {
    fn default() -> Self {
        Self {
            social_insurance: dec!(0.088),
            ghs: dec!(0.029),
        }
    }
}

/// Complete rule set for a tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    pub tax_year: i32,

    /// Share of pre-deduction taxable income that insurance-type deductions
    /// may not exceed (the 1/5 rule).
    pub standard_deduction_ratio: Decimal,

    pub brackets: BracketSchedule,
    pub income_limits: IncomeLimits,
    pub child_deductions: ChildDeductionAmounts,
    pub deduction_caps: DeductionCaps,
    pub contribution_rates: ContributionRates,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            tax_year: 2026,
            standard_deduction_ratio: dec!(0.20),
            brackets: default_brackets(),
            income_limits: IncomeLimits::default(),
            child_deductions: ChildDeductionAmounts::default(),
            deduction_caps: DeductionCaps::default(),
            contribution_rates: ContributionRates::default(),
        }
    }
}

fn default_brackets() -> BracketSchedule {
    BracketSchedule::new(vec![
        TaxBracket::new(dec!(0), Some(dec!(22000)), dec!(0)),
        TaxBracket::new(dec!(22000), Some(dec!(32000)), dec!(0.20)),
        TaxBracket::new(dec!(32000), Some(dec!(42000)), dec!(0.25)),
        TaxBracket::new(dec!(42000), Some(dec!(72000)), dec!(0.30)),
        TaxBracket::new(dec!(72000), None, dec!(0.35)),
    ])
}

impl TaxRules {
    /// Returns a copy of these rules using a different bracket schedule.
    pub fn with_brackets(
        mut self,
        brackets: BracketSchedule,
    ) -> Self {
        self.brackets = brackets;
        self
    }

    /// Validates the rule set.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesError`] found, checking the bracket schedule
    /// first, then amounts, then ratios.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{RulesError, TaxRules};
    ///
    /// let mut rules = TaxRules::default();
    /// rules.standard_deduction_ratio = dec!(1.5);
    ///
    /// assert_eq!(
    ///     rules.validate(),
    ///     Err(RulesError::InvalidRatio {
    ///         field: "standard_deduction_ratio",
    ///         value: dec!(1.5),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), RulesError> {
        validate_brackets(&self.brackets)?;

        let amounts = [
            ("income_limits.single", self.income_limits.single),
            (
                "income_limits.family_0_2_children",
                self.income_limits.family_up_to_two_children,
            ),
            (
                "income_limits.family_3_4_children",
                self.income_limits.family_three_to_four_children,
            ),
            (
                "income_limits.family_5_plus_children",
                self.income_limits.family_five_or_more_children,
            ),
            ("child_deductions.first", self.child_deductions.first),
            ("child_deductions.second", self.child_deductions.second),
            ("child_deductions.subsequent", self.child_deductions.subsequent),
            ("deduction_caps.housing", self.deduction_caps.housing),
            (
                "deduction_caps.green_investment",
                self.deduction_caps.green_investment,
            ),
            (
                "deduction_caps.home_insurance",
                self.deduction_caps.home_insurance,
            ),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RulesError::NegativeAmount { field, value });
            }
        }

        let children = &self.child_deductions;
        if children.first > children.second || children.second > children.subsequent {
            return Err(RulesError::DecreasingChildAmounts {
                first: children.first,
                second: children.second,
                subsequent: children.subsequent,
            });
        }

        let ratios = [
            ("standard_deduction_ratio", self.standard_deduction_ratio),
            (
                "contribution_rates.social_insurance",
                self.contribution_rates.social_insurance,
            ),
            ("contribution_rates.ghs", self.contribution_rates.ghs),
        ];
        for (field, value) in ratios {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RulesError::InvalidRatio { field, value });
            }
        }

        Ok(())
    }
}

fn validate_brackets(schedule: &BracketSchedule) -> Result<(), RulesError> {
    let brackets = schedule.brackets();
    let (first, last) = match (brackets.first(), brackets.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(RulesError::NoBrackets),
    };

    if first.min_income != Decimal::ZERO {
        return Err(RulesError::FirstBracketNotAtZero(first.min_income));
    }
    if first.tax_rate != Decimal::ZERO {
        return Err(RulesError::FirstBracketRateNotZero(first.tax_rate));
    }

    let mut previous: Option<&TaxBracket> = None;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(RulesError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }

        if let Some(prev) = previous {
            // Only the last bracket is unbounded, so `prev` always has a max here.
            let expected = prev.max_income.unwrap_or(Decimal::MAX);
            if bracket.min_income != expected {
                return Err(RulesError::BracketNotContiguous {
                    index,
                    expected,
                    found: bracket.min_income,
                });
            }
            if bracket.tax_rate < prev.tax_rate {
                return Err(RulesError::DecreasingRate {
                    index,
                    rate: bracket.tax_rate,
                    previous: prev.tax_rate,
                });
            }
        }

        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(RulesError::EmptyBracket {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            None if index + 1 < brackets.len() => {
                return Err(RulesError::UnboundedBracketNotLast { index });
            }
            _ => {}
        }

        previous = Some(bracket);
    }

    if let Some(max) = last.max_income {
        return Err(RulesError::LastBracketBounded(max));
    }

    Ok(())
}
