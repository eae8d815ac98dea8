//! Loading of [`TaxRules`] overrides from TOML, optionally with a separate
//! bracket CSV.
//!
//! Every section is optional; anything left out keeps its built-in value.
//! Write fractional values as strings so they stay exact:
//!
//! ```toml
//! tax_year = 2026
//! standard_deduction_ratio = "0.20"
//!
//! [income_limits]
//! single = 45000
//!
//! [deduction_caps]
//! home_insurance = 750
//!
//! [[brackets]]
//! min_income = 0
//! max_income = 25000
//! tax_rate = "0"
//!
//! [[brackets]]
//! min_income = 25000
//! tax_rate = "0.20"
//! ```

use std::path::Path;

use tax_core::{RulesError, TaxRules};
use thiserror::Error;
use tracing::{debug, info};

use crate::loader::{BracketLoader, BracketLoaderError};

/// Errors that can occur while loading a rule set.
#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("cannot read rules file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Brackets(#[from] BracketLoaderError),

    #[error("invalid rules: {0}")]
    Invalid(#[from] RulesError),
}

/// Parses and validates a TOML rule set.
pub fn rules_from_str(input: &str) -> Result<TaxRules, RulesLoadError> {
    let rules: TaxRules = toml::from_str(input)?;
    rules.validate()?;
    Ok(rules)
}

/// Builds the effective rule set.
///
/// Starts from the TOML file at `rules_path` (or the built-in defaults),
/// replaces the bracket table with `brackets_path` when given, and validates
/// the result.
pub fn load_rules(
    rules_path: Option<&Path>,
    brackets_path: Option<&Path>,
) -> Result<TaxRules, RulesLoadError> {
    let mut rules = match rules_path {
        Some(path) => {
            let contents =
                std::fs::read_to_string(path).map_err(|source| RulesLoadError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            info!(path = %path.display(), "loading rules");
            toml::from_str(&contents)?
        }
        None => {
            debug!("using built-in rules");
            TaxRules::default()
        }
    };

    if let Some(path) = brackets_path {
        info!(path = %path.display(), "loading bracket schedule");
        rules.brackets = BracketLoader::load_file(path)?;
    }

    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::TaxBracket;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let rules = rules_from_str("").expect("empty TOML should load");

        assert_eq!(rules, TaxRules::default());
    }

    #[test]
    fn partial_section_keeps_other_fields() {
        let rules = rules_from_str(
            r#"
            [income_limits]
            single = 45000
            "#,
        )
        .expect("should load");

        assert_eq!(rules.income_limits.single, dec!(45000));
        assert_eq!(rules.income_limits.family_up_to_two_children, dec!(100000));
        assert_eq!(rules.deduction_caps, TaxRules::default().deduction_caps);
    }

    #[test]
    fn family_tier_keys_use_child_ranges() {
        let rules = rules_from_str(
            r#"
            [income_limits]
            family_0_2_children = 110000
            family_3_4_children = 160000
            family_5_plus_children = 210000
            "#,
        )
        .expect("should load");

        assert_eq!(rules.income_limits.family_up_to_two_children, dec!(110000));
        assert_eq!(rules.income_limits.family_three_to_four_children, dec!(160000));
        assert_eq!(rules.income_limits.family_five_or_more_children, dec!(210000));
    }

    #[test]
    fn string_ratio_is_exact() {
        let rules = rules_from_str(r#"standard_deduction_ratio = "0.15""#).expect("should load");

        assert_eq!(rules.standard_deduction_ratio, dec!(0.15));
    }

    #[test]
    fn brackets_replace_the_whole_schedule() {
        let rules = rules_from_str(
            r#"
            [[brackets]]
            min_income = 0
            max_income = 25000
            tax_rate = "0"

            [[brackets]]
            min_income = 25000
            tax_rate = "0.20"
            "#,
        )
        .expect("should load");

        assert_eq!(
            rules.brackets.brackets(),
            &[
                TaxBracket::new(dec!(0), Some(dec!(25000)), dec!(0)),
                TaxBracket::new(dec!(25000), None, dec!(0.20)),
            ]
        );
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let err = rules_from_str(
            r#"
            [deduction_caps]
            housing = -1
            "#,
        )
        .expect_err("negative cap should fail validation");

        assert!(matches!(
            err,
            RulesLoadError::Invalid(RulesError::NegativeAmount {
                field: "deduction_caps.housing",
                ..
            })
        ));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = rules_from_str("tax_year = ").expect_err("should fail to parse");

        assert!(matches!(err, RulesLoadError::Toml(_)));
    }

    #[test]
    fn load_rules_without_files_uses_defaults() {
        let rules = load_rules(None, None).expect("defaults should load");

        assert_eq!(rules, TaxRules::default());
    }

    #[test]
    fn load_rules_reports_missing_file() {
        let err = load_rules(Some(Path::new("no/such/rules.toml")), None)
            .expect_err("missing file should fail");

        assert!(matches!(err, RulesLoadError::Io { .. }));
    }
}
