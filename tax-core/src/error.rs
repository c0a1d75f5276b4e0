//! Error types shared by every stage of the tax computation.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::RegimeConfigError;

/// Why a declared input value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The value parsed, but income figures may not be negative.
    Negative(Decimal),

    /// The raw text could not be read as a number.
    NotNumeric(String),

    /// The value exceeds [`MAX_DECLARED_AMOUNT`].
    OutOfRange(Decimal),

    /// The field does not exist for the profile's employment category.
    UnknownField,
}

/// Largest amount accepted for any declared field, Rs. 10^15.
///
/// Every sum and product in the pipeline stays far inside `Decimal`'s range
/// while each input is at or below this ceiling.
pub const MAX_DECLARED_AMOUNT: Decimal = dec!(1000000000000000);

impl fmt::Display for InvalidReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Negative(value) => write!(f, "must not be negative, got {value}"),
            Self::NotNumeric(raw) => write!(f, "'{raw}' is not a number"),
            Self::OutOfRange(value) => {
                write!(f, "{value} exceeds the maximum of {MAX_DECLARED_AMOUNT}")
            }
            Self::UnknownField => write!(f, "no such field for this category"),
        }
    }
}

/// Errors returned by the tax computation engine.
///
/// Every variant is terminal for the call that produced it: no partial
/// [`TaxResult`](crate::TaxResult) is ever returned alongside an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// A declared income field was negative, non-numeric, too large or unknown.
    #[error("invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: InvalidReason },

    /// No regime is registered for the requested fiscal year.
    #[error("unknown fiscal year '{0}'")]
    UnknownFiscalYear(String),

    /// A regime table failed validation.
    #[error("invalid regime configuration: {0}")]
    InvalidRegime(#[from] RegimeConfigError),
}

impl TaxError {
    pub fn negative(
        field: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: InvalidReason::Negative(value),
        }
    }

    pub fn not_numeric(
        field: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: InvalidReason::NotNumeric(raw.into()),
        }
    }

    pub fn out_of_range(
        field: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: InvalidReason::OutOfRange(value),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: InvalidReason::UnknownField,
        }
    }
}

/// Rejects a negative amount for the named field.
pub(crate) fn ensure_non_negative(
    field: &str,
    value: Decimal,
) -> Result<Decimal, TaxError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(TaxError::negative(field, value))
    } else {
        Ok(value)
    }
}

/// Rejects a declared amount that is negative or above
/// [`MAX_DECLARED_AMOUNT`].
pub(crate) fn ensure_declared_amount(
    field: &str,
    value: Decimal,
) -> Result<Decimal, TaxError> {
    let value = ensure_non_negative(field, value)?;
    if value > MAX_DECLARED_AMOUNT {
        Err(TaxError::out_of_range(field, value))
    } else {
        Ok(value)
    }
}
