//! Market benchmark overrides.
//!
//! A benchmark provider may supply any subset of these values. They are
//! resolved once per calculation into [`Benchmarks`], falling back to the
//! built-in defaults field by field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

pub const DEFAULT_VACANCY_RATE: Rate = dec!(0.03);
pub const DEFAULT_RENT_GROWTH: Rate = dec!(0.03);
pub const DEFAULT_MANAGEMENT_FEE: Rate = dec!(0.08);
pub const DEFAULT_INTEREST_RATE: Rate = dec!(0.065);
pub const DEFAULT_CAPITAL_GROWTH: Rate = dec!(0.06);
pub const DEFAULT_COUNCIL_RATE: Rate = dec!(0.003);
pub const DEFAULT_INSURANCE_RATE: Rate = dec!(0.0025);
pub const DEFAULT_MAINTENANCE_RATE: Rate = dec!(0.01);
pub const DEFAULT_SELLING_COST_RATE: Rate = dec!(0.025);
pub const DEFAULT_MARGINAL_TAX_RATE: Rate = dec!(0.37);
pub const DEFAULT_LOAN_SETUP_RATE: Rate = dec!(0.001);
pub const DEFAULT_SHORT_STAY_OCCUPANCY: Rate = dec!(0.65);
pub const DEFAULT_SHARES_RETURN: Rate = dec!(0.072);
pub const DEFAULT_BONDS_RETURN: Rate = dec!(0.045);
pub const DEFAULT_TERM_DEPOSIT_RETURN: Rate = dec!(0.045);
pub const DEFAULT_SAVINGS_RETURN: Rate = dec!(0.04);

/// Partial override record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_growth: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_fee: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_growth: Option<Rate>,
    /// Council rates as a share of property value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub council_rate: Option<Rate>,
    /// Building insurance as a share of property value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_rate: Option<Rate>,
    /// Annual maintenance as a share of property value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_cost_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marginal_tax_rate: Option<Rate>,
    /// Variable loan establishment cost as a share of the loan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_setup_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_stay_occupancy: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_return: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonds_return: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_deposit_return: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_return: Option<Rate>,
}

/// Fully resolved benchmark set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub vacancy_rate: Rate,
    pub rent_growth: Rate,
    pub management_fee: Rate,
    pub interest_rate: Rate,
    pub capital_growth: Rate,
    pub council_rate: Rate,
    pub insurance_rate: Rate,
    pub maintenance_rate: Rate,
    pub selling_cost_rate: Rate,
    pub marginal_tax_rate: Rate,
    pub loan_setup_rate: Rate,
    pub short_stay_occupancy: Rate,
    pub shares_return: Rate,
    pub bonds_return: Rate,
    pub term_deposit_return: Rate,
    pub savings_return: Rate,
}

impl Default for Benchmarks {
    fn default() -> Self {
        BenchmarkOverrides::default().resolve()
    }
}

impl BenchmarkOverrides {
    pub fn is_empty(&self) -> bool {
        *self == BenchmarkOverrides::default()
    }

    /// Fill every field left empty here from `other`.
    pub fn fill_from(&mut self, other: &BenchmarkOverrides) {
        macro_rules! fill {
            ($($field:ident),* $(,)?) => {
                $( if self.$field.is_none() { self.$field = other.$field; } )*
            };
        }
        fill!(
            vacancy_rate,
            rent_growth,
            management_fee,
            interest_rate,
            capital_growth,
            council_rate,
            insurance_rate,
            maintenance_rate,
            selling_cost_rate,
            marginal_tax_rate,
            loan_setup_rate,
            short_stay_occupancy,
            shares_return,
            bonds_return,
            term_deposit_return,
            savings_return,
        );
    }

    pub fn resolve(&self) -> Benchmarks {
        Benchmarks {
            vacancy_rate: self.vacancy_rate.unwrap_or(DEFAULT_VACANCY_RATE),
            rent_growth: self.rent_growth.unwrap_or(DEFAULT_RENT_GROWTH),
            management_fee: self.management_fee.unwrap_or(DEFAULT_MANAGEMENT_FEE),
            interest_rate: self.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE),
            capital_growth: self.capital_growth.unwrap_or(DEFAULT_CAPITAL_GROWTH),
            council_rate: self.council_rate.unwrap_or(DEFAULT_COUNCIL_RATE),
            insurance_rate: self.insurance_rate.unwrap_or(DEFAULT_INSURANCE_RATE),
            maintenance_rate: self.maintenance_rate.unwrap_or(DEFAULT_MAINTENANCE_RATE),
            selling_cost_rate: self.selling_cost_rate.unwrap_or(DEFAULT_SELLING_COST_RATE),
            marginal_tax_rate: self.marginal_tax_rate.unwrap_or(DEFAULT_MARGINAL_TAX_RATE),
            loan_setup_rate: self.loan_setup_rate.unwrap_or(DEFAULT_LOAN_SETUP_RATE),
            short_stay_occupancy: self
                .short_stay_occupancy
                .unwrap_or(DEFAULT_SHORT_STAY_OCCUPANCY)
                .clamp(Decimal::ZERO, Decimal::ONE),
            shares_return: self.shares_return.unwrap_or(DEFAULT_SHARES_RETURN),
            bonds_return: self.bonds_return.unwrap_or(DEFAULT_BONDS_RETURN),
            term_deposit_return: self
                .term_deposit_return
                .unwrap_or(DEFAULT_TERM_DEPOSIT_RETURN),
            savings_return: self.savings_return.unwrap_or(DEFAULT_SAVINGS_RETURN),
        }
    }
}
