//! Personal income-tax engine for the Indian new tax regime.
//!
//! Computation is a pure pipeline from a declared [`IncomeProfile`] and a
//! [`TaxRegimeConfig`] to a [`TaxResult`]; see [`calculations::liability`].
//! Nothing here performs I/O or keeps state between calls.

pub mod advice;
pub mod calculations;
mod error;
pub mod format;
pub mod models;
pub mod regime;

pub use calculations::{compute_liability, compute_liability_with, compute_taxable_income};
pub use error::{InvalidReason, MAX_DECLARED_AMOUNT, TaxError};
pub use models::*;
pub use regime::{RegimeRegistry, regime_for};
