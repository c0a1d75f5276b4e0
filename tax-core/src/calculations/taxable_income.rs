//! Derivation of slab-taxable income from a declared profile.
//!
//! | Category            | Taxable income |
//! |---------------------|----------------|
//! | Salaried            | `max(0, basic_salary + hra + bonus − standard_deduction)` |
//! | Rental              | `max(0, rent_received − municipal_tax − interest_paid)` |
//! | Freelancer/Business | `net_profit` as declared |
//! | Investor            | `dividends + interest_income` |
//!
//! Declared `expenses` are not subtracted from a freelancer's or business
//! owner's net profit, and capital gains never enter slab income.

use rust_decimal::Decimal;
use tracing::debug;

use crate::TaxError;
use crate::calculations::common::floor_at_zero;
use crate::models::{IncomeProfile, TaxRegimeConfig};

/// Income subject to the slab table.
///
/// # Errors
///
/// Returns [`TaxError::InvalidInput`] if any declared field is negative or
/// above [`MAX_DECLARED_AMOUNT`](crate::MAX_DECLARED_AMOUNT).
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{IncomeProfile, SalariedIncome, compute_taxable_income, regime_for};
///
/// let profile = IncomeProfile::Salaried(SalariedIncome {
///     basic_salary: dec!(600000),
///     hra: dec!(200000),
///     bonus: dec!(50000),
///     ..Default::default()
/// });
/// let regime = regime_for("FY2025-26").unwrap();
///
/// assert_eq!(compute_taxable_income(&profile, &regime).unwrap(), dec!(775000));
/// ```
pub fn compute_taxable_income(
    profile: &IncomeProfile,
    regime: &TaxRegimeConfig,
) -> Result<Decimal, TaxError> {
    profile.validate()?;

    let taxable_income = match profile {
        IncomeProfile::Salaried(s) => {
            let gross_salary = s.basic_salary + s.hra + s.bonus;
            floor_at_zero(gross_salary - regime.standard_deduction)
        }
        IncomeProfile::Rental(r) => {
            floor_at_zero(r.rent_received - r.municipal_tax - r.interest_paid)
        }
        IncomeProfile::Freelancer(s) | IncomeProfile::Business(s) => s.net_profit,
        IncomeProfile::Investor(i) => i.dividends + i.interest_income,
    };

    debug!(category = %profile.category(), %taxable_income, "derived taxable income");
    Ok(taxable_income)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{InvestorIncome, RentalIncome, SalariedIncome, SelfEmployedIncome};
    use crate::regime::fy_2025_26;

    #[test]
    fn salaried_subtracts_standard_deduction() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(600000),
            hra: dec!(200000),
            bonus: dec!(50000),
            ..Default::default()
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(775000)));
    }

    #[test]
    fn salaried_ignores_rent_paid_pf_and_nps() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(600000),
            provident_fund: dec!(72000),
            rent_paid: dec!(180000),
            employer_nps: dec!(50000),
            ..Default::default()
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(525000)));
    }

    #[test]
    fn salaried_below_standard_deduction_is_zero() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(60000),
            ..Default::default()
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(0)));
    }

    #[test]
    fn rental_subtracts_tax_and_interest() {
        let profile = IncomeProfile::Rental(RentalIncome {
            rent_received: dec!(480000),
            municipal_tax: dec!(20000),
            interest_paid: dec!(150000),
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(310000)));
    }

    #[test]
    fn rental_loss_is_floored_at_zero() {
        let profile = IncomeProfile::Rental(RentalIncome {
            rent_received: dec!(100000),
            municipal_tax: dec!(10000),
            interest_paid: dec!(200000),
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(0)));
    }

    #[test]
    fn freelancer_expenses_are_not_subtracted() {
        let profile = IncomeProfile::Freelancer(SelfEmployedIncome {
            net_profit: dec!(900000),
            expenses: dec!(300000),
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(900000)));
    }

    #[test]
    fn business_uses_net_profit() {
        let profile = IncomeProfile::Business(SelfEmployedIncome {
            net_profit: dec!(2500000),
            expenses: dec!(0),
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(2500000)));
    }

    #[test]
    fn investor_excludes_capital_gains() {
        let profile = IncomeProfile::Investor(InvestorIncome {
            dividends: dec!(40000),
            interest_income: dec!(60000),
            stcg: dec!(500000),
            ltcg: dec!(1000000),
        });

        assert_eq!(compute_taxable_income(&profile, &fy_2025_26()), Ok(dec!(100000)));
    }

    #[test]
    fn negative_field_is_rejected() {
        let profile = IncomeProfile::Freelancer(SelfEmployedIncome {
            net_profit: dec!(-1),
            expenses: dec!(0),
        });

        assert_eq!(
            compute_taxable_income(&profile, &fy_2025_26()),
            Err(TaxError::negative("net_profit", dec!(-1)))
        );
    }

    #[test]
    fn oversized_field_is_rejected() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: Decimal::MAX,
            hra: dec!(1),
            ..Default::default()
        });

        assert_eq!(
            compute_taxable_income(&profile, &fy_2025_26()),
            Err(TaxError::out_of_range("basic_salary", Decimal::MAX))
        );
    }

    #[test]
    fn every_field_at_the_ceiling_is_accepted() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: crate::MAX_DECLARED_AMOUNT,
            hra: crate::MAX_DECLARED_AMOUNT,
            bonus: crate::MAX_DECLARED_AMOUNT,
            ..Default::default()
        });

        assert_eq!(
            compute_taxable_income(&profile, &fy_2025_26()),
            Ok(crate::MAX_DECLARED_AMOUNT * dec!(3) - dec!(75000))
        );
    }
}
