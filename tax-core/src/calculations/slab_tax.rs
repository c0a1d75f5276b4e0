//! Progressive slab taxation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TaxError;
use crate::calculations::common::rate_to_percent;
use crate::error::ensure_non_negative;
use crate::format::slab_label;
use crate::models::{TaxBreakdownEntry, TaxSlab};

/// Gross tax from the slab table with its per-slab itemization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTax {
    pub gross_tax: Decimal,
    pub breakdown: Vec<TaxBreakdownEntry>,
}

/// Taxes `taxable_income` slab by slab, lowest first.
///
/// Each slab the income reaches into contributes
/// `min(taxable_income, upper_bound) − lower_bound` at its rate. Walking
/// stops at the first slab the income does not exceed. Only slabs with a
/// strictly positive tax appear in the breakdown, so the 0% band is taxed
/// but never itemized.
///
/// Slabs must be ordered and contiguous; see
/// [`TaxRegimeConfig::validate`](crate::TaxRegimeConfig::validate).
///
/// # Errors
///
/// Returns [`TaxError::InvalidInput`] if `taxable_income` is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::calculate_slab_tax;
/// use tax_core::regime::fy_2025_26;
///
/// let slab_tax = calculate_slab_tax(dec!(775000), &fy_2025_26().slabs).unwrap();
///
/// assert_eq!(slab_tax.gross_tax, dec!(18750));
/// assert_eq!(slab_tax.breakdown.len(), 1);
/// assert_eq!(slab_tax.breakdown[0].slab_label, "Rs. 4,00,000 - Rs. 8,00,000");
/// ```
pub fn calculate_slab_tax(
    taxable_income: Decimal,
    slabs: &[TaxSlab],
) -> Result<SlabTax, TaxError> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let mut gross_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for slab in slabs {
        if taxable_income <= slab.lower_bound {
            break;
        }

        let ceiling = match slab.upper_bound {
            Some(upper) => upper.min(taxable_income),
            None => taxable_income,
        };
        let taxable_in_slab = ceiling - slab.lower_bound;
        let tax_in_slab = taxable_in_slab * slab.rate;
        gross_tax += tax_in_slab;

        if tax_in_slab > Decimal::ZERO {
            breakdown.push(TaxBreakdownEntry {
                slab_label: slab_label(slab),
                rate_percent: rate_to_percent(slab.rate),
                taxable_amount_in_slab: taxable_in_slab,
                tax_in_slab,
            });
        }
    }

    debug!(%taxable_income, %gross_tax, slabs_taxed = breakdown.len(), "computed slab tax");
    Ok(SlabTax {
        gross_tax,
        breakdown,
    })
}
