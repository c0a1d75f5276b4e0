use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FiscalYear;

/// A contiguous income band taxed at a single marginal rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Decimal,
    /// `None` for the top, unbounded slab.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.05 = 5%).
    pub rate: Decimal,
}

/// Surcharge rate applied to the whole post-rebate tax once taxable income
/// is strictly greater than `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Flat-rate treatment of capital gains outside the slab system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsRules {
    pub stcg_rate: Decimal,
    pub ltcg_rate: Decimal,
    /// Long-term gains up to this amount are exempt.
    pub ltcg_exemption: Decimal,
}

/// Rule table for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegimeConfig {
    pub fiscal_year: FiscalYear,
    pub slabs: Vec<TaxSlab>,
    pub standard_deduction: Decimal,
    pub rebate_income_limit: Decimal,
    pub rebate_max_amount: Decimal,
    pub advance_tax_threshold: Decimal,
    pub surcharge_brackets: Vec<SurchargeBracket>,
    pub cess_rate: Decimal,
    pub capital_gains: CapitalGainsRules,
}

/// Ways a regime table can violate its invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    #[error("regime has no slabs")]
    NoSlabs,

    #[error("first slab must start at 0, starts at {0}")]
    FirstSlabNotAtZero(Decimal),

    #[error("slab {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("slab {index} has an upper bound that does not exceed its lower bound")]
    EmptySlab { index: usize },

    #[error("slab {index} is unbounded but is not the last slab")]
    UnboundedBeforeLast { index: usize },

    #[error("last slab must be unbounded, ends at {0}")]
    LastSlabBounded(Decimal),

    #[error("slab {index} has a lower rate than the slab below it")]
    DecreasingRate { index: usize },

    #[error("rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("surcharge bracket {index} does not raise the threshold")]
    SurchargeNotIncreasing { index: usize },
}

fn check_rate(rate: Decimal) -> Result<(), RegimeConfigError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RegimeConfigError::InvalidRate(rate));
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), RegimeConfigError> {
    if value < Decimal::ZERO {
        return Err(RegimeConfigError::NegativeAmount { field, value });
    }
    Ok(())
}

impl TaxRegimeConfig {
    /// Checks that slabs cover [0, ∞) contiguously with non-decreasing rates,
    /// that every rate is a fraction, and that surcharge thresholds rise.
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        let first = self.slabs.first().ok_or(RegimeConfigError::NoSlabs)?;
        if !first.lower_bound.is_zero() {
            return Err(RegimeConfigError::FirstSlabNotAtZero(first.lower_bound));
        }

        let last_index = self.slabs.len() - 1;
        let mut expected_lower = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, slab) in self.slabs.iter().enumerate() {
            check_rate(slab.rate)?;

            if slab.lower_bound != expected_lower {
                return Err(RegimeConfigError::Gap {
                    index,
                    expected: expected_lower,
                    found: slab.lower_bound,
                });
            }
            if slab.rate < previous_rate {
                return Err(RegimeConfigError::DecreasingRate { index });
            }

            match slab.upper_bound {
                Some(upper) if index == last_index => {
                    return Err(RegimeConfigError::LastSlabBounded(upper));
                }
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(RegimeConfigError::EmptySlab { index });
                }
                Some(upper) => expected_lower = upper,
                None if index != last_index => {
                    return Err(RegimeConfigError::UnboundedBeforeLast { index });
                }
                None => {}
            }

            previous_rate = slab.rate;
        }

        check_amount("standard_deduction", self.standard_deduction)?;
        check_amount("rebate_income_limit", self.rebate_income_limit)?;
        check_amount("rebate_max_amount", self.rebate_max_amount)?;
        check_amount("advance_tax_threshold", self.advance_tax_threshold)?;
        check_amount("ltcg_exemption", self.capital_gains.ltcg_exemption)?;
        check_rate(self.cess_rate)?;
        check_rate(self.capital_gains.stcg_rate)?;
        check_rate(self.capital_gains.ltcg_rate)?;

        for (index, bracket) in self.surcharge_brackets.iter().enumerate() {
            check_rate(bracket.rate)?;
            check_amount("surcharge threshold", bracket.threshold)?;
            if index > 0 && bracket.threshold <= self.surcharge_brackets[index - 1].threshold {
                return Err(RegimeConfigError::SurchargeNotIncreasing { index });
            }
        }

        Ok(())
    }
}
