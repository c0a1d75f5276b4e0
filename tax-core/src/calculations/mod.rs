//! Stages of the liability pipeline.
//!
//! Each stage is a pure function of its inputs and the regime table; see
//! [`liability`] for how they compose.

pub mod advance_tax;
pub mod capital_gains;
pub mod common;
pub mod liability;
pub mod rebate;
pub mod slab_tax;
pub mod surcharge;
pub mod taxable_income;

pub use advance_tax::{Installment, advance_tax_schedule};
pub use capital_gains::{CapitalGainsTax, calculate_capital_gains_tax};
pub use liability::{LiabilityCalculator, compute_liability, compute_liability_with};
pub use rebate::calculate_rebate;
pub use slab_tax::{SlabTax, calculate_slab_tax};
pub use surcharge::{SurchargeCess, calculate_surcharge_and_cess, surcharge_rate};
pub use taxable_income::compute_taxable_income;
