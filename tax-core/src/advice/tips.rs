//! Rule-based tax-saving tips and a one-line summary of a regime table.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{floor_at_zero, rate_to_percent};
use crate::format::format_indian_currency;
use crate::models::{IncomeProfile, TaxRegimeConfig, TaxResult};

/// Net profit ceiling for the presumptive schemes of sections 44AD/44ADA.
const PRESUMPTIVE_LIMIT: Decimal = dec!(5000000);

/// Additional NPS deduction under section 80CCD(1B).
const NPS_EXTRA_DEDUCTION: Decimal = dec!(50000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipCategory {
    Rebate,
    Deduction,
    Investment,
    CapitalGains,
    AdvanceTax,
    Scheme,
    Regime,
    MissingInfo,
}

impl TipCategory {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Rebate => "Rebates & Savings",
            Self::Deduction => "Deductions",
            Self::Investment => "Investment Opportunities",
            Self::CapitalGains => "Capital Gains",
            Self::AdvanceTax => "Tax Payments",
            Self::Scheme => "Tax Schemes",
            Self::Regime => "New Tax Regime",
            Self::MissingInfo => "Missing Information",
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub category: TipCategory,
    pub title: String,
    pub description: String,
}

impl Tip {
    fn new(
        category: TipCategory,
        title: &str,
        description: String,
    ) -> Self {
        Self {
            category,
            title: title.to_string(),
            description,
        }
    }
}

/// Context-aware advice for a computed result.
///
/// Tips come back in a fixed order: rebate, salary-specific deductions,
/// capital gains, advance tax, presumptive taxation, standard deduction, and
/// finally a summary of the regime's slabs.
pub fn smart_tips(
    profile: &IncomeProfile,
    result: &TaxResult,
    regime: &TaxRegimeConfig,
) -> Vec<Tip> {
    let mut tips = Vec::new();

    if result.rebate_87a > Decimal::ZERO {
        tips.push(Tip::new(
            TipCategory::Rebate,
            "Section 87A Rebate Applied",
            format!(
                "You're eligible for a {} rebate under Section 87A, available while taxable income stays within {}.",
                format_indian_currency(result.rebate_87a),
                format_indian_currency(regime.rebate_income_limit)
            ),
        ));
    }

    if let IncomeProfile::Salaried(salary) = profile {
        if salary.hra > Decimal::ZERO && salary.rent_paid > Decimal::ZERO {
            let exemption = salary
                .hra
                .min(salary.rent_paid - salary.basic_salary * dec!(0.10));
            if exemption > Decimal::ZERO {
                tips.push(Tip::new(
                    TipCategory::Deduction,
                    "HRA Exemption Available",
                    format!(
                        "You can claim an HRA exemption of approximately {}. Keep rent receipts and the rental agreement.",
                        format_indian_currency(exemption)
                    ),
                ));
            }
        } else if salary.hra > Decimal::ZERO {
            tips.push(Tip::new(
                TipCategory::MissingInfo,
                "Missing Rent Information",
                "You receive HRA but haven't entered rent paid. HRA exemption is only available if you pay rent.".to_string(),
            ));
        }

        if salary.employer_nps.is_zero() {
            tips.push(Tip::new(
                TipCategory::Investment,
                "NPS Investment Opportunity",
                format!(
                    "Consider investing in NPS for an additional deduction of up to {} under Section 80CCD(1B).",
                    format_indian_currency(NPS_EXTRA_DEDUCTION)
                ),
            ));
        }
    }

    let (stcg, ltcg) = profile.capital_gains();
    let gains = &regime.capital_gains;
    if stcg > Decimal::ZERO {
        tips.push(Tip::new(
            TipCategory::CapitalGains,
            "STCG Tax Applicable",
            format!(
                "Your STCG of {} is taxed at {}%.",
                format_indian_currency(stcg),
                rate_to_percent(gains.stcg_rate)
            ),
        ));
    }
    if ltcg > gains.ltcg_exemption {
        tips.push(Tip::new(
            TipCategory::CapitalGains,
            "LTCG Tax Applicable",
            format!(
                "Your LTCG of {} exceeds {}. Tax of {}% applies to the {} above the exemption.",
                format_indian_currency(ltcg),
                format_indian_currency(gains.ltcg_exemption),
                rate_to_percent(gains.ltcg_rate),
                format_indian_currency(floor_at_zero(ltcg - gains.ltcg_exemption))
            ),
        ));
    } else if ltcg > Decimal::ZERO {
        tips.push(Tip::new(
            TipCategory::CapitalGains,
            "LTCG Within Exemption Limit",
            format!(
                "Your LTCG of {} is within the {} exemption limit. No tax applies.",
                format_indian_currency(ltcg),
                format_indian_currency(gains.ltcg_exemption)
            ),
        ));
    }

    if result.advance_tax_required {
        tips.push(Tip::new(
            TipCategory::AdvanceTax,
            "Advance Tax Payment Required",
            format!(
                "Your tax liability of {} is above {} and must be paid as advance tax in installments. Missing installments attracts interest.",
                format_indian_currency(result.total_tax),
                format_indian_currency(regime.advance_tax_threshold)
            ),
        ));
    }

    if let IncomeProfile::Freelancer(s) | IncomeProfile::Business(s) = profile {
        if s.net_profit <= PRESUMPTIVE_LIMIT {
            tips.push(Tip::new(
                TipCategory::Scheme,
                "Presumptive Taxation Eligibility",
                "You may be eligible for the presumptive taxation scheme (Section 44AD/44ADA) for simplified tax calculation.".to_string(),
            ));
        }
    }

    if matches!(profile, IncomeProfile::Salaried(_)) {
        tips.push(Tip::new(
            TipCategory::Deduction,
            "Standard Deduction Applied",
            format!(
                "A standard deduction of {} has been applied to your salary income under the new tax regime.",
                format_indian_currency(regime.standard_deduction)
            ),
        ));
    }

    tips.push(Tip::new(
        TipCategory::Regime,
        "New Regime Slabs",
        regime_summary(regime),
    ));

    tips
}

/// One-line description of a regime's slabs and rebate.
pub fn regime_summary(regime: &TaxRegimeConfig) -> String {
    let bands: Vec<String> = regime
        .slabs
        .iter()
        .map(|slab| {
            let rate = rate_to_percent(slab.rate);
            match slab.upper_bound {
                Some(upper) if slab.lower_bound.is_zero() => {
                    format!("{rate}% up to {}", format_indian_currency(upper))
                }
                Some(upper) => format!(
                    "{rate}% on {} - {}",
                    format_indian_currency(slab.lower_bound),
                    format_indian_currency(upper)
                ),
                None => format!("{rate}% above {}", format_indian_currency(slab.lower_bound)),
            }
        })
        .collect();

    format!(
        "{} slabs: {}. Rebate of up to {} applies while taxable income is within {}.",
        regime.fiscal_year,
        bands.join(", "),
        format_indian_currency(regime.rebate_max_amount),
        format_indian_currency(regime.rebate_income_limit)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::compute_liability_with;
    use crate::models::{InvestorIncome, SalariedIncome, SelfEmployedIncome};
    use crate::regime::fy_2025_26;

    fn tips_for(profile: &IncomeProfile) -> Vec<Tip> {
        let regime = fy_2025_26();
        let result = compute_liability_with(profile, &regime).unwrap();
        smart_tips(profile, &result, &regime)
    }

    fn titles(tips: &[Tip]) -> Vec<&str> {
        tips.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn salaried_with_rent_gets_hra_and_rebate_tips() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(600000),
            hra: dec!(200000),
            bonus: dec!(50000),
            rent_paid: dec!(180000),
            ..Default::default()
        });

        let tips = tips_for(&profile);

        assert_eq!(
            titles(&tips),
            vec![
                "Section 87A Rebate Applied",
                "HRA Exemption Available",
                "NPS Investment Opportunity",
                "Standard Deduction Applied",
                "New Regime Slabs",
            ]
        );
        // min(200000, 180000 - 60000)
        assert!(tips[1].description.contains("Rs. 1,20,000"));
    }

    #[test]
    fn hra_without_rent_is_flagged() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(600000),
            hra: dec!(100000),
            employer_nps: dec!(30000),
            ..Default::default()
        });

        let tips = tips_for(&profile);

        assert!(tips.iter().any(|t| t.category == TipCategory::MissingInfo));
        assert!(!tips.iter().any(|t| t.category == TipCategory::Investment));
    }

    #[test]
    fn hra_exemption_skipped_when_rent_is_low() {
        let profile = IncomeProfile::Salaried(SalariedIncome {
            basic_salary: dec!(1000000),
            hra: dec!(200000),
            rent_paid: dec!(90000),
            ..Default::default()
        });

        let tips = tips_for(&profile);

        assert!(!titles(&tips).contains(&"HRA Exemption Available"));
    }

    #[test]
    fn investor_gets_capital_gains_and_advance_tax_tips() {
        let profile = IncomeProfile::Investor(InvestorIncome {
            stcg: dec!(500000),
            ltcg: dec!(1000000),
            ..Default::default()
        });

        let tips = tips_for(&profile);

        assert_eq!(
            titles(&tips),
            vec![
                "STCG Tax Applicable",
                "LTCG Tax Applicable",
                "Advance Tax Payment Required",
                "New Regime Slabs",
            ]
        );
        assert!(tips[0].description.contains("20%"));
        assert!(tips[1].description.contains("12.5%"));
        assert!(tips[2].description.contains("Rs. 2,09,375"));
    }

    #[test]
    fn ltcg_within_exemption_is_reassuring() {
        let profile = IncomeProfile::Investor(InvestorIncome {
            ltcg: dec!(125000),
            ..Default::default()
        });

        let tips = tips_for(&profile);

        assert_eq!(tips[0].title, "LTCG Within Exemption Limit");
    }

    #[test]
    fn small_business_is_pointed_at_presumptive_scheme() {
        let profile = IncomeProfile::Business(SelfEmployedIncome {
            net_profit: dec!(5000000),
            expenses: dec!(0),
        });

        assert!(tips_for(&profile).iter().any(|t| t.category == TipCategory::Scheme));
    }

    #[test]
    fn large_business_is_not_presumptive() {
        let profile = IncomeProfile::Business(SelfEmployedIncome {
            net_profit: dec!(5000001),
            expenses: dec!(0),
        });

        assert!(!tips_for(&profile).iter().any(|t| t.category == TipCategory::Scheme));
    }

    #[test]
    fn regime_summary_lists_every_slab() {
        assert_eq!(
            regime_summary(&fy_2025_26()),
            "FY2025-26 slabs: 0% up to Rs. 4,00,000, 5% on Rs. 4,00,000 - Rs. 8,00,000, \
             10% on Rs. 8,00,000 - Rs. 12,00,000, 15% on Rs. 12,00,000 - Rs. 16,00,000, \
             20% on Rs. 16,00,000 - Rs. 20,00,000, 25% on Rs. 20,00,000 - Rs. 24,00,000, \
             30% above Rs. 24,00,000. Rebate of up to Rs. 60,000 applies while taxable \
             income is within Rs. 12,00,000."
        );
    }
}
