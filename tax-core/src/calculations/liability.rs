//! Liability aggregation: the full pipeline from profile to [`TaxResult`].
//!
//! # Pipeline
//!
//! | Step | Stage | Output |
//! |------|-------|--------|
//! | 1 | [`compute_taxable_income`] | slab-taxable income |
//! | 2 | [`calculate_slab_tax`] | gross tax and breakdown |
//! | 3 | [`calculate_rebate`] | section 87A rebate |
//! | 4 | gross − rebate | tax after rebate |
//! | 5 | [`calculate_surcharge_and_cess`] | surcharge, cess |
//! | 6 | [`calculate_capital_gains_tax`] | STCG tax, LTCG tax |
//! | 7 | sum of 4–6 | total tax |
//! | 8 | total > advance-tax threshold | advance tax flag |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{InvestorIncome, IncomeProfile, compute_liability};
//!
//! let profile = IncomeProfile::Investor(InvestorIncome {
//!     stcg: dec!(500000),
//!     ltcg: dec!(1000000),
//!     ..Default::default()
//! });
//!
//! let result = compute_liability(&profile, "FY2025-26").unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(0));
//! assert_eq!(result.stcg_tax, dec!(100000));
//! assert_eq!(result.ltcg_tax, dec!(109375));
//! assert_eq!(result.total_tax, dec!(209375));
//! assert!(result.advance_tax_required);
//! ```

use tracing::debug;

use crate::TaxError;
use crate::calculations::{
    calculate_capital_gains_tax, calculate_rebate, calculate_slab_tax,
    calculate_surcharge_and_cess, compute_taxable_income,
};
use crate::models::{IncomeProfile, TaxRegimeConfig, TaxResult};
use crate::regime::RegimeRegistry;

/// Runs the pipeline against one regime table.
///
/// Holds nothing but a borrow of the table, so a single calculator can serve
/// any number of profiles, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct LiabilityCalculator<'a> {
    regime: &'a TaxRegimeConfig,
}

impl<'a> LiabilityCalculator<'a> {
    pub fn new(regime: &'a TaxRegimeConfig) -> Self {
        Self { regime }
    }

    /// Computes the complete liability for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] if any declared field is negative or
    /// above [`MAX_DECLARED_AMOUNT`](crate::MAX_DECLARED_AMOUNT).
    pub fn calculate(
        &self,
        profile: &IncomeProfile,
    ) -> Result<TaxResult, TaxError> {
        let regime = self.regime;

        let taxable_income = compute_taxable_income(profile, regime)?;
        let slab_tax = calculate_slab_tax(taxable_income, &regime.slabs)?;
        let gross_tax = slab_tax.gross_tax;

        let rebate_87a = calculate_rebate(gross_tax, taxable_income, regime);
        let tax_after_rebate = gross_tax - rebate_87a;

        let levies = calculate_surcharge_and_cess(tax_after_rebate, taxable_income, regime);

        let (stcg, ltcg) = profile.capital_gains();
        let gains = calculate_capital_gains_tax(stcg, ltcg, &regime.capital_gains)?;

        let total_tax =
            tax_after_rebate + levies.surcharge + levies.cess + gains.stcg_tax + gains.ltcg_tax;
        let advance_tax_required = total_tax > regime.advance_tax_threshold;

        debug!(
            fiscal_year = %regime.fiscal_year,
            category = %profile.category(),
            %total_tax,
            advance_tax_required,
            "computed liability"
        );

        Ok(TaxResult {
            taxable_income,
            gross_tax,
            rebate_87a,
            tax_after_rebate,
            surcharge: levies.surcharge,
            cess: levies.cess,
            stcg_tax: gains.stcg_tax,
            ltcg_tax: gains.ltcg_tax,
            total_tax,
            advance_tax_required,
            tax_breakdown: slab_tax.breakdown,
        })
    }
}

/// Computes liability under the built-in regime for `fiscal_year_id`.
///
/// # Errors
///
/// * [`TaxError::UnknownFiscalYear`] if no built-in regime matches.
/// * [`TaxError::InvalidInput`] if any declared field is negative or above
///   [`MAX_DECLARED_AMOUNT`](crate::MAX_DECLARED_AMOUNT).
pub fn compute_liability(
    profile: &IncomeProfile,
    fiscal_year_id: &str,
) -> Result<TaxResult, TaxError> {
    let registry = RegimeRegistry::with_builtin();
    let regime = registry.get(fiscal_year_id)?;
    LiabilityCalculator::new(regime).calculate(profile)
}

/// Computes liability under an explicit regime table.
pub fn compute_liability_with(
    profile: &IncomeProfile,
    regime: &TaxRegimeConfig,
) -> Result<TaxResult, TaxError> {
    LiabilityCalculator::new(regime).calculate(profile)
}
