//! Custom regime tables from CSV.
//!
//! One row per slab. The scalar columns repeat on every row of a fiscal year
//! and must agree; surcharge, cess and capital-gains rules are not part of
//! the file and take the statutory values.
//!
//! | Column | Type | Notes |
//! |--------|------|-------|
//! | `fiscal_year` | string | Any accepted spelling, e.g. `FY2026-27` |
//! | `lower_bound` | decimal | |
//! | `upper_bound` | decimal | Empty for the top slab |
//! | `rate` | decimal | Fraction, e.g. `0.05` |
//! | `standard_deduction` | decimal | |
//! | `rebate_income_limit` | decimal | |
//! | `rebate_max_amount` | decimal | |
//! | `advance_tax_threshold` | decimal | |
//!
//! Decimal cells are parsed from their text, never through `f64`.

use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::regime::{CESS_RATE, statutory_capital_gains, statutory_surcharge};
use tax_core::{FiscalYear, RegimeConfigError, RegimeRegistry, TaxError, TaxRegimeConfig, TaxSlab};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading regime tables.
#[derive(Debug, Error)]
pub enum RegimeLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised fiscal year '{0}'")]
    InvalidFiscalYear(String),

    #[error("{fiscal_year}: rows disagree on {field}")]
    InconsistentScalar {
        fiscal_year: FiscalYear,
        field: &'static str,
    },

    #[error("{fiscal_year}: {source}")]
    InvalidRegime {
        fiscal_year: FiscalYear,
        #[source]
        source: RegimeConfigError,
    },

    #[error(transparent)]
    Registry(#[from] TaxError),
}

impl From<csv::Error> for RegimeLoadError {
    fn from(err: csv::Error) -> Self {
        RegimeLoadError::CsvParse(err.to_string())
    }
}

/// A single slab row from the regime CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegimeRecord {
    pub fiscal_year: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub standard_deduction: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rebate_income_limit: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rebate_max_amount: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub advance_tax_threshold: Decimal,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
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

/// Loader for regime tables from CSV files.
pub struct RegimeLoader;

impl RegimeLoader {
    /// Parse raw slab records from a CSV reader, in file order.
    pub fn records<R: Read>(reader: R) -> Result<Vec<RegimeRecord>, RegimeLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RegimeRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate every regime table in a CSV reader, oldest fiscal
    /// year first.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxRegimeConfig>, RegimeLoadError> {
        let records = Self::records(reader)?;
        Self::build(&records)
    }

    /// Group slab records by fiscal year into validated tables.
    ///
    /// Slabs may appear in any order within a year; they are sorted by lower
    /// bound before validation.
    pub fn build(records: &[RegimeRecord]) -> Result<Vec<TaxRegimeConfig>, RegimeLoadError> {
        let mut groups: BTreeMap<FiscalYear, Vec<&RegimeRecord>> = BTreeMap::new();
        for record in records {
            let fiscal_year = FiscalYear::parse(&record.fiscal_year)
                .ok_or_else(|| RegimeLoadError::InvalidFiscalYear(record.fiscal_year.clone()))?;
            groups.entry(fiscal_year).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|(fiscal_year, rows)| build_config(fiscal_year, rows))
            .collect()
    }

    /// Register every table with `registry`, replacing any table already
    /// held for the same fiscal year. Returns how many were registered.
    pub fn load(
        registry: &mut RegimeRegistry,
        configs: Vec<TaxRegimeConfig>,
    ) -> Result<usize, RegimeLoadError> {
        let mut registered = 0;
        for config in configs {
            registry.register(config)?;
            registered += 1;
        }
        Ok(registered)
    }
}

fn build_config(
    fiscal_year: FiscalYear,
    mut rows: Vec<&RegimeRecord>,
) -> Result<TaxRegimeConfig, RegimeLoadError> {
    rows.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

    // `build` only creates groups with at least one row
    let first = rows[0];
    let scalars: [(&'static str, fn(&RegimeRecord) -> Decimal); 4] = [
        ("standard_deduction", |r| r.standard_deduction),
        ("rebate_income_limit", |r| r.rebate_income_limit),
        ("rebate_max_amount", |r| r.rebate_max_amount),
        ("advance_tax_threshold", |r| r.advance_tax_threshold),
    ];
    for (field, get) in scalars {
        if rows.iter().any(|r| get(r) != get(first)) {
            warn!(%fiscal_year, field, "regime rows disagree");
            return Err(RegimeLoadError::InconsistentScalar { fiscal_year, field });
        }
    }

    let config = TaxRegimeConfig {
        fiscal_year,
        slabs: rows
            .iter()
            .map(|r| TaxSlab {
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                rate: r.rate,
            })
            .collect(),
        standard_deduction: first.standard_deduction,
        rebate_income_limit: first.rebate_income_limit,
        rebate_max_amount: first.rebate_max_amount,
        advance_tax_threshold: first.advance_tax_threshold,
        surcharge_brackets: statutory_surcharge(),
        cess_rate: CESS_RATE,
        capital_gains: statutory_capital_gains(),
    };

    config
        .validate()
        .map_err(|source| RegimeLoadError::InvalidRegime {
            fiscal_year,
            source,
        })?;

    debug!(%fiscal_year, slabs = config.slabs.len(), "built regime from CSV");
    Ok(config)
}
