//! File-backed inputs for the tax engine: rule overrides, bracket tables and
//! batches of household inputs.

pub mod input;
pub mod loader;
pub mod rules;

pub use input::{
    CoercionError, InputLoadError, InputRecord, RawTaxInput, coerce_amount, coerce_count,
    coerce_flag, load_from_file, load_from_str,
};
pub use loader::{BracketLoader, BracketLoaderError, BracketRecord};
pub use rules::{RulesLoadError, load_rules, rules_from_str};
