//! Income profile loader for JSON and CSV input.
//!
//! ## JSON Format
//!
//! Either a single object or an array of objects. Each object carries a
//! `category` and any of that category's amount fields; amounts may be JSON
//! numbers or strings (`"Rs. 6,00,000"` is accepted). Numbers are read from
//! their source text, so every digit survives. Missing or `null` fields are
//! zero.
//!
//! ```json
//! {"category": "Salaried", "basic_salary": 600000, "hra": "2,00,000"}
//! ```
//!
//! ## CSV Format
//!
//! One profile per row. Headers are matched by name; only `category` is
//! required. Rows of different categories may share a file, leaving the
//! cells that do not apply to them empty.
//!
//! | Column | Required | Notes |
//! |--------|----------|-------|
//! | `category` | yes | `Salaried`, `Rental`, `Freelancer`, `Business`, `Investor` (any case) |
//! | any amount field | no | Empty cell for zero |
//!
//! ```csv
//! category,basic_salary,hra,bonus,stcg,ltcg
//! Salaried,600000,200000,50000,,
//! Investor,,,,500000,1000000
//! ```

use std::collections::BTreeMap;
use std::io::Read;

use serde_json::value::RawValue;
use tax_core::{EmploymentCategory, IncomeProfile, ProfileUpdate, TaxError};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading profiles.
///
/// Row numbers are 1-based: the first data row of a CSV file (after the
/// header) or the first element of a JSON array is row 1.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV input has no 'category' column")]
    NoCategoryColumn,

    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },

    #[error("row {row} has no category")]
    MissingCategory { row: usize },

    #[error("unrecognised category '{category}' on row {row}")]
    UnknownCategory { category: String, row: usize },

    #[error("row {row}: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: TaxError,
    },

    #[error("input contains no profiles")]
    Empty,
}

/// Reads [`IncomeProfile`]s from external files.
///
/// Every amount goes through [`IncomeProfile::apply_update`], so file input
/// gets the same checks as any other partial update: negative, non-numeric
/// or foreign fields are rejected with [`TaxError::InvalidInput`].
pub struct ProfileLoader;

impl ProfileLoader {
    /// Parse profiles from JSON, returned in input order.
    pub fn from_json<R: Read>(reader: R) -> Result<Vec<IncomeProfile>, ProfileLoadError> {
        let document: Box<RawValue> = serde_json::from_reader(reader)?;
        let items: Vec<Box<RawValue>> = if document.get().starts_with('[') {
            serde_json::from_str(document.get())?
        } else {
            vec![document]
        };

        let profiles = items
            .iter()
            .enumerate()
            .map(|(idx, item)| json_profile(item, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        finish(profiles, "JSON")
    }

    /// Parse profiles from CSV, returned in file order.
    pub fn from_csv<R: Read>(reader: R) -> Result<Vec<IncomeProfile>, ProfileLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let category_column = headers
            .iter()
            .position(|h| h == "category")
            .ok_or(ProfileLoadError::NoCategoryColumn)?;

        let mut profiles = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = idx + 1;

            let category = record
                .get(category_column)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            let update: ProfileUpdate = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, (_, cell))| *i != category_column && !cell.is_empty())
                .map(|(_, pair)| pair)
                .collect();

            profiles.push(build_profile(category, &update, row)?);
        }

        finish(profiles, "CSV")
    }
}

fn json_profile(
    item: &RawValue,
    row: usize,
) -> Result<IncomeProfile, ProfileLoadError> {
    if !item.get().starts_with('{') {
        return Err(ProfileLoadError::NotAnObject { row });
    }
    let map: BTreeMap<String, Box<RawValue>> = serde_json::from_str(item.get())?;

    let mut category = None;
    let mut update = ProfileUpdate::new();
    for (key, value) in map {
        let raw = match value.get() {
            "null" => continue,
            text if text.starts_with('"') => serde_json::from_str::<String>(text)?,
            text => text.to_string(),
        };
        if key == "category" {
            category = Some(raw);
        } else {
            update = update.set(key, raw);
        }
    }

    build_profile(category, &update, row)
}

fn build_profile(
    category: Option<String>,
    update: &ProfileUpdate,
    row: usize,
) -> Result<IncomeProfile, ProfileLoadError> {
    let raw = category.ok_or(ProfileLoadError::MissingCategory { row })?;
    let Some(category) = EmploymentCategory::parse(&raw) else {
        warn!(row, category = %raw, "rejected profile with unknown category");
        return Err(ProfileLoadError::UnknownCategory { category: raw, row });
    };

    let mut profile = IncomeProfile::empty(category);
    profile
        .apply_update(update)
        .map_err(|source| ProfileLoadError::Invalid { row, source })?;
    Ok(profile)
}

fn finish(
    profiles: Vec<IncomeProfile>,
    format: &str,
) -> Result<Vec<IncomeProfile>, ProfileLoadError> {
    if profiles.is_empty() {
        return Err(ProfileLoadError::Empty);
    }
    debug!(count = profiles.len(), format, "loaded income profiles");
    Ok(profiles)
}
