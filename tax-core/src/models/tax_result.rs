use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contribution of one slab to the gross tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdownEntry {
    /// Human-readable band, e.g. `Rs. 4,00,000 - Rs. 8,00,000`.
    pub slab_label: String,
    /// Marginal rate in percent (5 for a 0.05 rate).
    pub rate_percent: Decimal,
    pub taxable_amount_in_slab: Decimal,
    pub tax_in_slab: Decimal,
}

/// Outcome of one liability computation.
///
/// Recomputed from scratch for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Income subject to slab taxation (capital gains excluded).
    pub taxable_income: Decimal,
    pub gross_tax: Decimal,
    /// Section 87A rebate.
    pub rebate_87a: Decimal,
    pub tax_after_rebate: Decimal,
    pub surcharge: Decimal,
    /// Health and education cess on tax plus surcharge.
    pub cess: Decimal,
    pub stcg_tax: Decimal,
    pub ltcg_tax: Decimal,
    pub total_tax: Decimal,
    /// Whether the liability must be paid in installments during the year.
    pub advance_tax_required: bool,
    /// Positive slab contributions, lowest slab first.
    pub tax_breakdown: Vec<TaxBreakdownEntry>,
}
