use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket schedule.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("bracket file contains no brackets")]
    Empty,

    #[error("cannot read bracket file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `min_income`: lower bound of the band
/// - `max_income`: upper bound of the band (empty for the unbounded top band)
/// - `rate`: marginal rate as a decimal (e.g. 0.20 for 20%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules stored as CSV.
///
/// Rows must be in ascending order; the schedule is not re-sorted. Ordering
/// and contiguity are checked later by `TaxRules::validate`.
///
/// ```csv
/// min_income,max_income,rate
/// 0,22000,0
/// 22000,32000,0.20
/// 32000,,0.25
/// ```
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse a CSV reader straight into a [`BracketSchedule`].
    ///
    /// # Errors
    ///
    /// Returns [`BracketLoaderError::Empty`] when the file has a header but
    /// no rows.
    pub fn load<R: Read>(reader: R) -> Result<BracketSchedule, BracketLoaderError> {
        let records = Self::parse(reader)?;
        if records.is_empty() {
            return Err(BracketLoaderError::Empty);
        }

        debug!(brackets = records.len(), "parsed bracket schedule");
        Ok(records
            .into_iter()
            .map(TaxBracket::from)
            .collect::<Vec<_>>()
            .into())
    }

    /// Convenience wrapper: open `path` and delegate to [`BracketLoader::load`].
    pub fn load_file(path: &Path) -> Result<BracketSchedule, BracketLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(file)
    }
}
