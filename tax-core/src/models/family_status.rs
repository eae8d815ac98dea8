use serde::{Deserialize, Serialize};

/// Household composition used for eligibility and child deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyStatus {
    #[default]
    Single,
    Married,
    SingleParent,
}

impl FamilyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::SingleParent => "singleParent",
        }
    }

    /// Parses a status code. Accepts `single_parent` as well as `singleParent`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "married" => Some(Self::Married),
            "singleParent" | "single_parent" => Some(Self::SingleParent),
            _ => None,
        }
    }

    pub fn is_married(&self) -> bool {
        matches!(self, Self::Married)
    }

    pub fn is_single_parent(&self) -> bool {
        matches!(self, Self::SingleParent)
    }
}

/// Kind of housing expense claimed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingExpenseType {
    #[default]
    None,
    Rent,
    Mortgage,
}

impl HousingExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rent => "rent",
            Self::Mortgage => "mortgage",
        }
    }

    /// Parses a housing code. An empty string means no housing expense.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "none" => Some(Self::None),
            "rent" => Some(Self::Rent),
            "mortgage" => Some(Self::Mortgage),
            _ => None,
        }
    }
}
