//! Built-in regime tables and the registry that looks them up by fiscal year.
//!
//! Both built-in tables describe the new tax regime under section 115BAC.
//!
//! | Fiscal year | Slabs | Std. deduction | 87A limit / max |
//! |-------------|-------|----------------|-----------------|
//! | FY2025-26   | 0/5/10/15/20/25/30% at 4L steps from 4L | 75,000 | 12,00,000 / 60,000 |
//! | FY2024-25   | 0% to 3L, 5% to 7L, 10% to 10L, 15% to 12L, 20% to 15L, 30% above | 75,000 | 7,00,000 / 25,000 |

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::TaxError;
use crate::models::{CapitalGainsRules, FiscalYear, SurchargeBracket, TaxRegimeConfig, TaxSlab};

fn slab(
    lower_bound: Decimal,
    upper_bound: Option<Decimal>,
    rate: Decimal,
) -> TaxSlab {
    TaxSlab {
        lower_bound,
        upper_bound,
        rate,
    }
}

/// Surcharge table: >50L 10%, >1Cr 15%, >2Cr 25%, >5Cr 37%.
pub fn statutory_surcharge() -> Vec<SurchargeBracket> {
    vec![
        SurchargeBracket {
            threshold: dec!(5000000),
            rate: dec!(0.10),
        },
        SurchargeBracket {
            threshold: dec!(10000000),
            rate: dec!(0.15),
        },
        SurchargeBracket {
            threshold: dec!(20000000),
            rate: dec!(0.25),
        },
        SurchargeBracket {
            threshold: dec!(50000000),
            rate: dec!(0.37),
        },
    ]
}

/// STCG at 20%, LTCG at 12.5% above a 1,25,000 exemption.
pub fn statutory_capital_gains() -> CapitalGainsRules {
    CapitalGainsRules {
        stcg_rate: dec!(0.20),
        ltcg_rate: dec!(0.125),
        ltcg_exemption: dec!(125000),
    }
}

/// Health and education cess.
pub const CESS_RATE: Decimal = dec!(0.04);

pub fn fy_2025_26() -> TaxRegimeConfig {
    TaxRegimeConfig {
        fiscal_year: FiscalYear::new(2025).expect("2025 is a four-digit year"),
        slabs: vec![
            slab(dec!(0), Some(dec!(400000)), dec!(0)),
            slab(dec!(400000), Some(dec!(800000)), dec!(0.05)),
            slab(dec!(800000), Some(dec!(1200000)), dec!(0.10)),
            slab(dec!(1200000), Some(dec!(1600000)), dec!(0.15)),
            slab(dec!(1600000), Some(dec!(2000000)), dec!(0.20)),
            slab(dec!(2000000), Some(dec!(2400000)), dec!(0.25)),
            slab(dec!(2400000), None, dec!(0.30)),
        ],
        standard_deduction: dec!(75000),
        rebate_income_limit: dec!(1200000),
        rebate_max_amount: dec!(60000),
        advance_tax_threshold: dec!(10000),
        surcharge_brackets: statutory_surcharge(),
        cess_rate: CESS_RATE,
        capital_gains: statutory_capital_gains(),
    }
}

pub fn fy_2024_25() -> TaxRegimeConfig {
    TaxRegimeConfig {
        fiscal_year: FiscalYear::new(2024).expect("2024 is a four-digit year"),
        slabs: vec![
            slab(dec!(0), Some(dec!(300000)), dec!(0)),
            slab(dec!(300000), Some(dec!(700000)), dec!(0.05)),
            slab(dec!(700000), Some(dec!(1000000)), dec!(0.10)),
            slab(dec!(1000000), Some(dec!(1200000)), dec!(0.15)),
            slab(dec!(1200000), Some(dec!(1500000)), dec!(0.20)),
            slab(dec!(1500000), None, dec!(0.30)),
        ],
        standard_deduction: dec!(75000),
        rebate_income_limit: dec!(700000),
        rebate_max_amount: dec!(25000),
        advance_tax_threshold: dec!(10000),
        surcharge_brackets: statutory_surcharge(),
        cess_rate: CESS_RATE,
        capital_gains: statutory_capital_gains(),
    }
}

/// Regime tables keyed by fiscal year.
///
/// Typical lifetime:
/// 1. Create with [`RegimeRegistry::with_builtin`] (or `new` for an empty one).
/// 2. Call `register` for any additional tables, e.g. loaded from CSV.
/// 3. Call `get` with any accepted fiscal-year spelling.
#[derive(Debug, Clone)]
pub struct RegimeRegistry {
    regimes: BTreeMap<FiscalYear, TaxRegimeConfig>,
}

impl RegimeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            regimes: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in regime.
    pub fn with_builtin() -> Self {
        let mut regimes = BTreeMap::new();
        for config in [fy_2024_25(), fy_2025_26()] {
            regimes.insert(config.fiscal_year, config);
        }
        Self { regimes }
    }

    /// Validate and register a regime table.
    ///
    /// A table for a fiscal year that is already present replaces it.
    pub fn register(
        &mut self,
        config: TaxRegimeConfig,
    ) -> Result<(), TaxError> {
        config.validate()?;
        info!(fiscal_year = %config.fiscal_year, slabs = config.slabs.len(), "registered tax regime");
        self.regimes.insert(config.fiscal_year, config);
        Ok(())
    }

    /// Look up the table for `fiscal_year_id`.
    ///
    /// # Errors
    /// * [`TaxError::UnknownFiscalYear`] when the id does not parse or no
    ///   table is registered for it.
    pub fn get(
        &self,
        fiscal_year_id: &str,
    ) -> Result<&TaxRegimeConfig, TaxError> {
        let found = FiscalYear::parse(fiscal_year_id).and_then(|fy| self.regimes.get(&fy));
        debug!(fiscal_year_id, found = found.is_some(), "regime lookup");
        found.ok_or_else(|| TaxError::UnknownFiscalYear(fiscal_year_id.to_string()))
    }

    /// Canonical ids of every registered regime, oldest first.
    pub fn available(&self) -> Vec<String> {
        self.regimes.keys().map(FiscalYear::id).collect()
    }
}

impl Default for RegimeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Built-in regime for `fiscal_year_id`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::regime_for;
///
/// let regime = regime_for("FY 2025-26 / AY 2026-27").unwrap();
/// assert_eq!(regime.rebate_income_limit, dec!(1200000));
/// ```
pub fn regime_for(fiscal_year_id: &str) -> Result<TaxRegimeConfig, TaxError> {
    RegimeRegistry::with_builtin().get(fiscal_year_id).cloned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_regimes_validate() {
        assert_eq!(fy_2025_26().validate(), Ok(()));
        assert_eq!(fy_2024_25().validate(), Ok(()));
    }

    #[test]
    fn lookup_accepts_every_spelling() {
        let registry = RegimeRegistry::with_builtin();

        for id in ["FY2025-26", "FY 2025-26", "fy2025-26", "FY 2025-26 / AY 2026-27"] {
            assert_eq!(registry.get(id).unwrap().fiscal_year.id(), "FY2025-26");
        }
    }

    #[test]
    fn older_regime_has_lower_rebate_limit() {
        let regime = regime_for("FY2024-25").unwrap();

        assert_eq!(regime.rebate_income_limit, dec!(700000));
        assert_eq!(regime.rebate_max_amount, dec!(25000));
    }

    #[test]
    fn unknown_year_fails() {
        assert_eq!(
            regime_for("FY2019-20"),
            Err(TaxError::UnknownFiscalYear("FY2019-20".to_string()))
        );
    }

    #[test]
    fn unparseable_year_fails() {
        assert_eq!(
            regime_for("next year"),
            Err(TaxError::UnknownFiscalYear("next year".to_string()))
        );
    }

    #[test]
    fn available_lists_sorted_ids() {
        assert_eq!(
            RegimeRegistry::with_builtin().available(),
            vec!["FY2024-25".to_string(), "FY2025-26".to_string()]
        );
    }

    #[test]
    fn register_replaces_existing_year() {
        let mut registry = RegimeRegistry::with_builtin();
        let custom = TaxRegimeConfig {
            standard_deduction: dec!(50000),
            ..fy_2025_26()
        };

        registry.register(custom).unwrap();

        assert_eq!(
            registry.get("FY2025-26").unwrap().standard_deduction,
            dec!(50000)
        );
    }

    #[test]
    fn register_rejects_invalid_table() {
        let mut registry = RegimeRegistry::new();
        let broken = TaxRegimeConfig {
            slabs: vec![],
            ..fy_2025_26()
        };

        assert!(matches!(
            registry.register(broken),
            Err(TaxError::InvalidRegime(_))
        ));
        assert!(registry.available().is_empty());
    }
}
