//! Loaders that turn external files into `tax-core` values.
//!
//! * [`ProfileLoader`] reads declared income profiles from JSON or CSV.
//! * [`RegimeLoader`] reads custom slab tables from CSV and registers them
//!   with a [`RegimeRegistry`](tax_core::RegimeRegistry).

mod profile_loader;
mod regime_loader;

pub use profile_loader::{ProfileLoadError, ProfileLoader};
pub use regime_loader::{RegimeLoadError, RegimeLoader, RegimeRecord};
