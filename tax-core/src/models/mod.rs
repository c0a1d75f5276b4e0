mod fiscal_year;
mod income_profile;
mod tax_regime_config;
mod tax_result;

pub use fiscal_year::FiscalYear;
pub use income_profile::{
    EmploymentCategory, IncomeProfile, InvestorIncome, ProfileUpdate, RentalIncome,
    SalariedIncome, SelfEmployedIncome, parse_amount,
};
pub use tax_regime_config::{
    CapitalGainsRules, RegimeConfigError, SurchargeBracket, TaxRegimeConfig, TaxSlab,
};
pub use tax_result::{TaxBreakdownEntry, TaxResult};
