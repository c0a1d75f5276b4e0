//! Surcharge and cess on the post-rebate tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{SurchargeBracket, TaxRegimeConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeCess {
    pub surcharge: Decimal,
    pub cess: Decimal,
}

/// Rate of the highest bracket whose threshold `taxable_income` strictly
/// exceeds, or zero below every threshold.
pub fn surcharge_rate(
    taxable_income: Decimal,
    brackets: &[SurchargeBracket],
) -> Decimal {
    brackets
        .iter()
        .take_while(|b| taxable_income > b.threshold)
        .last()
        .map_or(Decimal::ZERO, |b| b.rate)
}

/// Surcharge on the whole of `tax_after_rebate`, then cess on tax plus
/// surcharge.
///
/// The surcharge is a flat percentage chosen by income bracket, not a
/// marginal rate: crossing a threshold by one rupee applies the new rate to
/// the entire tax. Cess is always charged.
pub fn calculate_surcharge_and_cess(
    tax_after_rebate: Decimal,
    taxable_income: Decimal,
    regime: &TaxRegimeConfig,
) -> SurchargeCess {
    let rate = surcharge_rate(taxable_income, &regime.surcharge_brackets);
    let surcharge = tax_after_rebate * rate;
    let cess = (tax_after_rebate + surcharge) * regime.cess_rate;

    debug!(%taxable_income, surcharge_rate = %rate, %surcharge, %cess, "applied surcharge and cess");
    SurchargeCess { surcharge, cess }
}
