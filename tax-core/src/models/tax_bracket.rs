use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive schedule.
///
/// `max_income` of `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Human-readable range such as `22000 - 32000` or `72000 - ∞`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TaxBracket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.max_income {
            Some(max) => write!(f, "{} - {}", self.min_income, max),
            None => write!(f, "{} - ∞", self.min_income),
        }
    }
}

/// Ordered, contiguous progressive schedule.
///
/// Ordering and contiguity are checked by
/// [`TaxRules::validate`](crate::TaxRules::validate), not on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxBracket> {
        self.brackets.iter()
    }
}

impl From<Vec<TaxBracket>> for BracketSchedule {
    fn from(brackets: Vec<TaxBracket>) -> Self {
        Self::new(brackets)
    }
}

impl<'a> IntoIterator for &'a BracketSchedule {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
