//! Section 87A rebate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::TaxRegimeConfig;

/// Rebate under section 87A.
///
/// Income at or below `rebate_income_limit` has its tax forgiven up to
/// `rebate_max_amount`. Above the limit nothing is forgiven, not even
/// partially: one rupee over the limit forfeits the whole rebate.
pub fn calculate_rebate(
    gross_tax: Decimal,
    taxable_income: Decimal,
    regime: &TaxRegimeConfig,
) -> Decimal {
    let rebate = if taxable_income <= regime.rebate_income_limit {
        gross_tax.min(regime.rebate_max_amount)
    } else {
        Decimal::ZERO
    };

    debug!(%taxable_income, %gross_tax, %rebate, "applied section 87A");
    rebate
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::calculate_slab_tax;
    use crate::regime::{fy_2024_25, fy_2025_26};

    #[test]
    fn rebate_covers_full_tax_below_limit() {
        assert_eq!(calculate_rebate(dec!(18750), dec!(775000), &fy_2025_26()), dec!(18750));
    }

    #[test]
    fn rebate_capped_at_max_amount() {
        let regime = fy_2024_25();

        // 5% of 4L at the 7L limit is exactly the 20000 tax; cap still 25000
        assert_eq!(calculate_rebate(dec!(20000), dec!(700000), &regime), dec!(20000));
        assert_eq!(calculate_rebate(dec!(90000), dec!(700000), &regime), dec!(25000));
    }

    #[test]
    fn rebate_applies_at_limit() {
        let regime = fy_2025_26();
        let gross = calculate_slab_tax(dec!(1200000), &regime.slabs).unwrap().gross_tax;

        assert_eq!(calculate_rebate(gross, dec!(1200000), &regime), dec!(60000));
    }

    #[test]
    fn rebate_forfeited_one_rupee_over_limit() {
        let regime = fy_2025_26();
        let gross = calculate_slab_tax(dec!(1200001), &regime.slabs).unwrap().gross_tax;

        assert_eq!(calculate_rebate(gross, dec!(1200001), &regime), dec!(0));
    }

    #[test]
    fn rebate_zero_when_no_tax() {
        assert_eq!(calculate_rebate(dec!(0), dec!(0), &fy_2025_26()), dec!(0));
    }
}
