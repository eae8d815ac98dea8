pub mod calculations;
pub mod models;

pub use calculations::TaxCalculator;
pub use models::*;
