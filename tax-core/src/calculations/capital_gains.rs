//! Flat-rate capital gains tax, outside the slab system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TaxError;
use crate::calculations::common::floor_at_zero;
use crate::error::ensure_declared_amount;
use crate::models::CapitalGainsRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsTax {
    pub stcg_tax: Decimal,
    pub ltcg_tax: Decimal,
}

/// STCG at the short-term rate; LTCG at the long-term rate on the part above
/// the exemption. Neither amount touches slab income.
///
/// # Errors
///
/// Returns [`TaxError::InvalidInput`] if either gain is negative or above
/// [`MAX_DECLARED_AMOUNT`](crate::MAX_DECLARED_AMOUNT).
pub fn calculate_capital_gains_tax(
    stcg: Decimal,
    ltcg: Decimal,
    rules: &CapitalGainsRules,
) -> Result<CapitalGainsTax, TaxError> {
    let stcg = ensure_declared_amount("stcg", stcg)?;
    let ltcg = ensure_declared_amount("ltcg", ltcg)?;

    let stcg_tax = stcg * rules.stcg_rate;
    let ltcg_tax = floor_at_zero(ltcg - rules.ltcg_exemption) * rules.ltcg_rate;

    debug!(%stcg, %ltcg, %stcg_tax, %ltcg_tax, "computed capital gains tax");
    Ok(CapitalGainsTax { stcg_tax, ltcg_tax })
}
