//! End-to-end properties of the liability pipeline through the public API.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    IncomeProfile, InvestorIncome, MAX_DECLARED_AMOUNT, ProfileUpdate, SalariedIncome,
    SelfEmployedIncome, TaxError, compute_liability, compute_taxable_income, regime_for,
};

fn business(net_profit: Decimal) -> IncomeProfile {
    IncomeProfile::Business(SelfEmployedIncome {
        net_profit,
        expenses: dec!(0),
    })
}

#[test]
fn salaried_scenario_matches_worked_example() {
    let profile = IncomeProfile::Salaried(SalariedIncome {
        basic_salary: dec!(600000),
        hra: dec!(200000),
        bonus: dec!(50000),
        ..Default::default()
    });

    let result = compute_liability(&profile, "FY2025-26").unwrap();

    assert_eq!(result.taxable_income, dec!(775000));
    assert_eq!(result.gross_tax, dec!(18750));
    assert_eq!(result.rebate_87a, dec!(18750));
    assert_eq!(result.tax_after_rebate, dec!(0));
    assert_eq!(result.surcharge, dec!(0));
    assert_eq!(result.cess, dec!(0));
    assert_eq!(result.total_tax, dec!(0));
    assert!(!result.advance_tax_required);
}

#[test]
fn investor_scenario_matches_worked_example() {
    let profile = IncomeProfile::Investor(InvestorIncome {
        stcg: dec!(500000),
        ltcg: dec!(1000000),
        ..Default::default()
    });

    let result = compute_liability(&profile, "FY 2025-26 / AY 2026-27").unwrap();

    assert_eq!(result.taxable_income, dec!(0));
    assert_eq!(result.gross_tax, dec!(0));
    assert_eq!(result.stcg_tax, dec!(100000));
    assert_eq!(result.ltcg_tax, dec!(109375));
    assert_eq!(result.total_tax, dec!(209375));
}

#[test]
fn gross_tax_never_decreases_with_income() {
    let mut previous = Decimal::ZERO;
    for step in 0..=400 {
        let income = Decimal::from(step) * dec!(17500);
        let result = compute_liability(&business(income), "FY2025-26").unwrap();
        assert!(result.gross_tax >= previous, "gross tax fell at {income}");
        previous = result.gross_tax;
    }
}

#[test]
fn breakdown_itemizes_only_taxed_slabs() {
    let result = compute_liability(&business(dec!(1750000)), "FY2025-26").unwrap();

    let itemized: Decimal = result
        .tax_breakdown
        .iter()
        .map(|e| e.taxable_amount_in_slab)
        .sum();

    // The 0% slab covers the first 4L and is left out of the itemization
    assert_eq!(itemized, dec!(1350000));
    assert!(result.tax_breakdown.iter().all(|e| e.tax_in_slab > Decimal::ZERO));
    assert_eq!(result.tax_breakdown.len(), 4);
}

#[test]
fn rebate_is_a_cliff() {
    let regime = regime_for("FY2025-26").unwrap();
    let limit = regime.rebate_income_limit;

    let at = compute_liability(&business(limit), "FY2025-26").unwrap();
    let over = compute_liability(&business(limit + Decimal::ONE), "FY2025-26").unwrap();

    assert_eq!(at.rebate_87a, at.gross_tax);
    assert_eq!(over.rebate_87a, dec!(0));
}

#[test]
fn surcharge_is_a_cliff() {
    let at = compute_liability(&business(dec!(5000000)), "FY2025-26").unwrap();
    let over = compute_liability(&business(dec!(5000001)), "FY2025-26").unwrap();

    assert_eq!(at.surcharge, dec!(0));
    assert_eq!(over.surcharge, over.tax_after_rebate * dec!(0.10));
}

#[test]
fn ltcg_exemption_boundary() {
    let at = IncomeProfile::Investor(InvestorIncome {
        ltcg: dec!(125000),
        ..Default::default()
    });
    let over = IncomeProfile::Investor(InvestorIncome {
        ltcg: dec!(125001),
        ..Default::default()
    });

    assert_eq!(compute_liability(&at, "FY2025-26").unwrap().ltcg_tax, dec!(0));
    assert_eq!(compute_liability(&over, "FY2025-26").unwrap().ltcg_tax, dec!(0.125));
}

#[test]
fn identical_input_gives_identical_result() {
    let profile = IncomeProfile::Salaried(SalariedIncome {
        basic_salary: dec!(2750000.75),
        hra: dec!(400000),
        bonus: dec!(123456.78),
        ..Default::default()
    });

    let first = compute_liability(&profile, "FY2025-26").unwrap();
    let second = compute_liability(&profile, "FY2025-26").unwrap();

    assert_eq!(first, second);
}

#[test]
fn rejected_update_never_reaches_computation() {
    let mut profile = IncomeProfile::empty(tax_core::EmploymentCategory::Rental);
    let update = ProfileUpdate::new().set("rent_received", "-2000");

    let err = profile.apply_update(&update).unwrap_err();

    assert!(matches!(err, TaxError::InvalidInput { .. }));
    let regime = regime_for("FY2025-26").unwrap();
    assert_eq!(compute_taxable_income(&profile, &regime), Ok(dec!(0)));
}

#[test]
fn amount_beyond_decimal_range_is_an_error() {
    let profile = IncomeProfile::Salaried(SalariedIncome {
        basic_salary: Decimal::MAX,
        hra: dec!(1),
        ..Default::default()
    });

    assert_eq!(
        compute_liability(&profile, "FY2025-26"),
        Err(TaxError::out_of_range("basic_salary", Decimal::MAX))
    );
}

#[test]
fn every_field_at_the_ceiling_computes() {
    let profile = IncomeProfile::Investor(InvestorIncome {
        dividends: MAX_DECLARED_AMOUNT,
        interest_income: MAX_DECLARED_AMOUNT,
        stcg: MAX_DECLARED_AMOUNT,
        ltcg: MAX_DECLARED_AMOUNT,
    });

    let result = compute_liability(&profile, "FY2025-26").unwrap();

    assert_eq!(result.taxable_income, MAX_DECLARED_AMOUNT * dec!(2));
    assert!(result.total_tax > MAX_DECLARED_AMOUNT / dec!(2));
    assert!(result.advance_tax_required);
}

#[test]
fn unknown_fiscal_year() {
    assert_eq!(
        compute_liability(&business(dec!(1)), "FY2031-32"),
        Err(TaxError::UnknownFiscalYear("FY2031-32".to_string()))
    );
}
