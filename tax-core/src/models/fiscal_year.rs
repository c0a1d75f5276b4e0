use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::TaxError;

static FISCAL_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*FY\s*(\d{4})\s*-\s*(\d{2})(?:\s*/\s*AY\s*(\d{4})\s*-\s*(\d{2}))?\s*$")
        .expect("fiscal year pattern is valid")
});

/// Indian fiscal year, running 1 April to 31 March.
///
/// Identified by its starting calendar year: `FiscalYear(2025)` is FY 2025-26,
/// assessed in AY 2026-27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalYear(i32);

impl FiscalYear {
    /// Creates a fiscal year from its four-digit starting year.
    pub fn new(start_year: i32) -> Option<Self> {
        (1000..=9998).contains(&start_year).then_some(Self(start_year))
    }

    /// Parses `FY2025-26`, `FY 2025-26`, `fy2025-26` or the long form
    /// `FY 2025-26 / AY 2026-27`.
    ///
    /// The two-digit suffix must name the following year, and an assessment
    /// year, when present, must be the one that follows the fiscal year.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = FISCAL_YEAR_RE.captures(s)?;
        let start: i32 = caps[1].parse().ok()?;
        let suffix: i32 = caps[2].parse().ok()?;
        if suffix != (start + 1) % 100 {
            return None;
        }

        if let (Some(ay_start), Some(ay_suffix)) = (caps.get(3), caps.get(4)) {
            let ay_start: i32 = ay_start.as_str().parse().ok()?;
            let ay_suffix: i32 = ay_suffix.as_str().parse().ok()?;
            if ay_start != start + 1 || ay_suffix != (start + 2) % 100 {
                return None;
            }
        }

        Self::new(start)
    }

    /// Canonical identifier, e.g. `FY2025-26`.
    pub fn id(&self) -> String {
        format!("FY{}-{:02}", self.0, (self.0 + 1) % 100)
    }

    /// Assessment year in which this fiscal year's income is assessed, e.g. `AY2026-27`.
    pub fn assessment_year(&self) -> String {
        format!("AY{}-{:02}", self.0 + 1, (self.0 + 2) % 100)
    }

    /// 1 April of the starting year.
    pub fn start_date(&self) -> NaiveDate {
        self.date(4, 1)
    }

    /// 31 March of the following year.
    pub fn end_date(&self) -> NaiveDate {
        self.date(3, 31)
    }

    /// The given day within this fiscal year. January to March fall in the
    /// second calendar year.
    pub fn date(
        &self,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        let year = if month >= 4 { self.0 } else { self.0 + 1 };
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("fixed calendar dates exist in four-digit years")
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl TryFrom<String> for FiscalYear {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(TaxError::UnknownFiscalYear(value))
    }
}

impl From<FiscalYear> for String {
    fn from(value: FiscalYear) -> Self {
        value.id()
    }
}
