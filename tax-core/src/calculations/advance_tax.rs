//! Advance-tax installment schedule under section 211.
//!
//! | Due date     | Cumulative share of liability |
//! |--------------|-------------------------------|
//! | 15 June      | 15% |
//! | 15 September | 45% |
//! | 15 December  | 75% |
//! | 15 March     | 100% |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TaxError;
use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::error::ensure_non_negative;
use crate::models::{FiscalYear, TaxResult};

const INSTALLMENTS: [(u32, u32, Decimal); 4] = [
    (6, 15, dec!(0.15)),
    (9, 15, dec!(0.45)),
    (12, 15, dec!(0.75)),
    (3, 15, dec!(1.00)),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub due_date: NaiveDate,
    pub cumulative_percent: Decimal,
    /// Total that must have been paid by `due_date`.
    pub cumulative_amount: Decimal,
    /// Amount payable on this date alone.
    pub amount: Decimal,
}

/// Installments for `result` in `fiscal_year`, net of tax already deducted
/// at source.
///
/// Empty when the result does not require advance tax or TDS already covers
/// the liability. Amounts are rounded to paise; the last installment absorbs
/// any rounding so the installments sum to the net liability.
///
/// # Errors
///
/// Returns [`TaxError::InvalidInput`] if `tds_paid` is negative.
pub fn advance_tax_schedule(
    fiscal_year: FiscalYear,
    result: &TaxResult,
    tds_paid: Decimal,
) -> Result<Vec<Installment>, TaxError> {
    let tds_paid = ensure_non_negative("tds_paid", tds_paid)?;
    let net_liability = round_half_up(floor_at_zero(result.total_tax - tds_paid));

    if !result.advance_tax_required || net_liability.is_zero() {
        debug!(%fiscal_year, %net_liability, "no advance tax installments due");
        return Ok(Vec::new());
    }

    let mut paid_so_far = Decimal::ZERO;
    let schedule = INSTALLMENTS
        .iter()
        .map(|&(month, day, share)| {
            let cumulative_amount = round_half_up(net_liability * share);
            let amount = cumulative_amount - paid_so_far;
            paid_so_far = cumulative_amount;
            Installment {
                due_date: fiscal_year.date(month, day),
                cumulative_percent: (share * Decimal::ONE_HUNDRED).normalize(),
                cumulative_amount,
                amount,
            }
        })
        .collect();

    debug!(%fiscal_year, %net_liability, "built advance tax schedule");
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compute_liability;
    use crate::models::{IncomeProfile, InvestorIncome};

    fn investor_result() -> TaxResult {
        let profile = IncomeProfile::Investor(InvestorIncome {
            stcg: dec!(500000),
            ltcg: dec!(1000000),
            ..Default::default()
        });
        compute_liability(&profile, "FY2025-26").unwrap()
    }

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fy() -> FiscalYear {
        FiscalYear::new(2025).unwrap()
    }

    #[test]
    fn four_installments_with_cumulative_shares() {
        let schedule = advance_tax_schedule(fy(), &investor_result(), dec!(0)).unwrap();

        let dates: Vec<_> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 6, 15),
                date(2025, 9, 15),
                date(2025, 12, 15),
                date(2026, 3, 15),
            ]
        );

        let cumulative: Vec<_> = schedule.iter().map(|i| i.cumulative_amount).collect();
        assert_eq!(
            cumulative,
            vec![dec!(31406.25), dec!(94218.75), dec!(157031.25), dec!(209375)]
        );

        let amounts: Vec<_> = schedule.iter().map(|i| i.amount).collect();
        assert_eq!(
            amounts,
            vec![dec!(31406.25), dec!(62812.50), dec!(62812.50), dec!(52343.75)]
        );
        assert_eq!(schedule[3].cumulative_percent.to_string(), "100");
    }

    #[test]
    fn tds_reduces_installments() {
        let schedule = advance_tax_schedule(fy(), &investor_result(), dec!(9375)).unwrap();

        assert_eq!(schedule[0].cumulative_amount, dec!(30000));
        assert_eq!(schedule[3].cumulative_amount, dec!(200000));
    }

    #[test]
    fn tds_covering_liability_leaves_nothing_due() {
        let schedule = advance_tax_schedule(fy(), &investor_result(), dec!(250000)).unwrap();

        assert!(schedule.is_empty());
    }

    #[test]
    fn not_required_means_empty() {
        let result = TaxResult {
            advance_tax_required: false,
            ..investor_result()
        };

        assert!(advance_tax_schedule(fy(), &result, dec!(0)).unwrap().is_empty());
    }

    #[test]
    fn installments_sum_to_net_liability() {
        let result = TaxResult {
            total_tax: dec!(12345.67),
            ..investor_result()
        };

        let schedule = advance_tax_schedule(fy(), &result, dec!(0)).unwrap();
        let total: Decimal = schedule.iter().map(|i| i.amount).sum();

        assert_eq!(total, dec!(12345.67));
    }

    #[test]
    fn negative_tds_is_rejected() {
        assert_eq!(
            advance_tax_schedule(fy(), &investor_result(), dec!(-1)),
            Err(TaxError::negative("tds_paid", dec!(-1)))
        );
    }
}
