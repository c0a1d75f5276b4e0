use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::TaxError;
use crate::error::ensure_declared_amount;

/// Employment category a profile is declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmploymentCategory {
    Salaried,
    Rental,
    Freelancer,
    Business,
    Investor,
}

impl EmploymentCategory {
    pub fn all() -> &'static [EmploymentCategory] {
        &[
            Self::Salaried,
            Self::Rental,
            Self::Freelancer,
            Self::Business,
            Self::Investor,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salaried => "Salaried",
            Self::Rental => "Rental",
            Self::Freelancer => "Freelancer",
            Self::Business => "Business",
            Self::Investor => "Investor",
        }
    }

    /// Case-insensitive parse of the category name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalariedIncome {
    pub basic_salary: Decimal,
    pub hra: Decimal,
    pub bonus: Decimal,
    pub provident_fund: Decimal,
    pub rent_paid: Decimal,
    pub employer_nps: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalIncome {
    pub rent_received: Decimal,
    pub municipal_tax: Decimal,
    pub interest_paid: Decimal,
}

/// Shared by freelancers and business owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfEmployedIncome {
    pub net_profit: Decimal,
    /// Collected for advice only; never subtracted from `net_profit`.
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestorIncome {
    pub dividends: Decimal,
    pub interest_income: Decimal,
    pub stcg: Decimal,
    pub ltcg: Decimal,
}

/// Income declared by one taxpayer, one variant per employment category.
///
/// Fields left out when deserializing default to zero.
///
/// ```
/// use tax_core::{EmploymentCategory, IncomeProfile};
///
/// let profile: IncomeProfile = serde_json::from_str(
///     r#"{"category": "Rental", "rent_received": "240000"}"#,
/// ).unwrap();
///
/// assert_eq!(profile.category(), EmploymentCategory::Rental);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum IncomeProfile {
    Salaried(SalariedIncome),
    Rental(RentalIncome),
    Freelancer(SelfEmployedIncome),
    Business(SelfEmployedIncome),
    Investor(InvestorIncome),
}

impl IncomeProfile {
    /// A profile for `category` with every amount set to zero.
    pub fn empty(category: EmploymentCategory) -> Self {
        match category {
            EmploymentCategory::Salaried => Self::Salaried(SalariedIncome::default()),
            EmploymentCategory::Rental => Self::Rental(RentalIncome::default()),
            EmploymentCategory::Freelancer => Self::Freelancer(SelfEmployedIncome::default()),
            EmploymentCategory::Business => Self::Business(SelfEmployedIncome::default()),
            EmploymentCategory::Investor => Self::Investor(InvestorIncome::default()),
        }
    }

    pub fn category(&self) -> EmploymentCategory {
        match self {
            Self::Salaried(_) => EmploymentCategory::Salaried,
            Self::Rental(_) => EmploymentCategory::Rental,
            Self::Freelancer(_) => EmploymentCategory::Freelancer,
            Self::Business(_) => EmploymentCategory::Business,
            Self::Investor(_) => EmploymentCategory::Investor,
        }
    }

    /// Every declared amount with its field name, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, Decimal)> {
        match self {
            Self::Salaried(s) => vec![
                ("basic_salary", s.basic_salary),
                ("hra", s.hra),
                ("bonus", s.bonus),
                ("provident_fund", s.provident_fund),
                ("rent_paid", s.rent_paid),
                ("employer_nps", s.employer_nps),
            ],
            Self::Rental(r) => vec![
                ("rent_received", r.rent_received),
                ("municipal_tax", r.municipal_tax),
                ("interest_paid", r.interest_paid),
            ],
            Self::Freelancer(s) | Self::Business(s) => vec![
                ("net_profit", s.net_profit),
                ("expenses", s.expenses),
            ],
            Self::Investor(i) => vec![
                ("dividends", i.dividends),
                ("interest_income", i.interest_income),
                ("stcg", i.stcg),
                ("ltcg", i.ltcg),
            ],
        }
    }

    fn field_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Decimal> {
        let field = match self {
            Self::Salaried(s) => match name {
                "basic_salary" => &mut s.basic_salary,
                "hra" => &mut s.hra,
                "bonus" => &mut s.bonus,
                "provident_fund" => &mut s.provident_fund,
                "rent_paid" => &mut s.rent_paid,
                "employer_nps" => &mut s.employer_nps,
                _ => return None,
            },
            Self::Rental(r) => match name {
                "rent_received" => &mut r.rent_received,
                "municipal_tax" => &mut r.municipal_tax,
                "interest_paid" => &mut r.interest_paid,
                _ => return None,
            },
            Self::Freelancer(s) | Self::Business(s) => match name {
                "net_profit" => &mut s.net_profit,
                "expenses" => &mut s.expenses,
                _ => return None,
            },
            Self::Investor(i) => match name {
                "dividends" => &mut i.dividends,
                "interest_income" => &mut i.interest_income,
                "stcg" => &mut i.stcg,
                "ltcg" => &mut i.ltcg,
                _ => return None,
            },
        };
        Some(field)
    }

    /// Fails with `InvalidInput` on the first field that is negative or above
    /// [`MAX_DECLARED_AMOUNT`](crate::MAX_DECLARED_AMOUNT).
    pub fn validate(&self) -> Result<(), TaxError> {
        for (name, value) in self.fields() {
            ensure_declared_amount(name, value)?;
        }
        Ok(())
    }

    /// Short- and long-term capital gains. Zero outside the investor category.
    pub fn capital_gains(&self) -> (Decimal, Decimal) {
        match self {
            Self::Investor(i) => (i.stcg, i.ltcg),
            _ => (Decimal::ZERO, Decimal::ZERO),
        }
    }

    /// Merges a partial update into this profile.
    ///
    /// Every value is parsed and checked before any field is written, so a
    /// rejected update leaves the profile untouched.
    pub fn apply_update(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<(), TaxError> {
        let parsed = update
            .iter()
            .map(|(name, raw)| {
                if self.field_mut(name).is_none() {
                    warn!(field = name, category = %self.category(), "rejected update to unknown field");
                    return Err(TaxError::unknown_field(name));
                }
                Ok((name, parse_amount(name, raw)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (name, value) in parsed {
            if let Some(field) = self.field_mut(name) {
                *field = value;
            }
        }
        Ok(())
    }
}

/// Reads a declared amount from text.
///
/// Surrounding whitespace, a leading `Rs.` or `₹`, digit-group commas
/// (Indian or western) and exponent notation are accepted.
pub fn parse_amount(
    field: &str,
    raw: &str,
) -> Result<Decimal, TaxError> {
    let trimmed = raw.trim();
    let unprefixed = trimmed
        .strip_prefix("Rs.")
        .or_else(|| trimmed.strip_prefix('₹'))
        .unwrap_or(trimmed)
        .trim();
    let cleaned: String = unprefixed.chars().filter(|c| *c != ',').collect();

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| {
            warn!(field, raw, "rejected non-numeric amount");
            TaxError::not_numeric(field, raw)
        })?;
    ensure_declared_amount(field, value)
}

/// Partial field updates produced outside the form flow, such as voice or
/// chat assistants. Values stay as raw text until applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    fields: BTreeMap<String, String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one field value.
    pub fn set(
        mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileUpdate {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
