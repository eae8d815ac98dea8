mod family_status;
mod tax_bracket;
mod tax_input;
mod tax_result;
mod tax_rules;

pub use family_status::{FamilyStatus, HousingExpenseType};
pub use tax_bracket::{BracketSchedule, TaxBracket};
pub use tax_input::TaxInput;
pub use tax_result::{
    DeductionCategory, DeductionLineItem, EligibilityResult, TaxBreakdownEntry, TaxResult,
};
pub use tax_rules::{
    ChildDeductionAmounts, ContributionRates, DeductionCaps, IncomeLimits, RulesError, TaxRules,
};
