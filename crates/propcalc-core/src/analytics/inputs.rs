use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::benchmarks::{BenchmarkOverrides, Benchmarks};
use crate::error::PropCalcError;
use crate::loan::LoanType;
use crate::types::{Currency, Money, Rate};
use crate::PropCalcResult;

pub const MAX_HOLD_YEARS: u32 = 30;

fn default_loan_term() -> u32 {
    30
}

fn default_hold_period() -> u32 {
    10
}

/// Rental and financing assumptions for an investment analysis.
///
/// Optional rates resolve in order: the value given here, then
/// `benchmarks`, then the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInputs {
    pub weekly_rent: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancy_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_growth: Option<Rate>,
    /// Property manager's fee as a share of collected rent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_fee: Option<Rate>,
    #[serde(default)]
    pub self_managed: bool,
    #[serde(default)]
    pub loan_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    #[serde(default = "default_loan_term")]
    pub loan_term_years: u32,
    #[serde(default)]
    pub loan_type: LoanType,
    #[serde(default)]
    pub interest_only_years: u32,
    #[serde(default = "default_hold_period")]
    pub hold_period_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_growth: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marginal_tax_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_cost_rate: Option<Rate>,
    /// Annual strata / body corporate levies
    #[serde(default)]
    pub annual_strata: Money,
    /// Building age at purchase, in whole years
    #[serde(default)]
    pub building_age: u32,
    /// Foreign resident for tax purposes (no CGT discount)
    #[serde(default)]
    pub foreign_resident_for_tax: bool,
    /// Buyer's home currency for the conversion summary
    #[serde(default)]
    pub currency: Currency,
    /// Units of `currency` per AUD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "BenchmarkOverrides::is_empty")]
    pub benchmarks: BenchmarkOverrides,
}

impl InvestmentInputs {
    /// Inputs with every optional rate left to the benchmarks.
    pub fn new(weekly_rent: Money, loan_amount: Money, hold_period_years: u32) -> Self {
        InvestmentInputs {
            weekly_rent,
            vacancy_rate: None,
            rent_growth: None,
            management_fee: None,
            self_managed: false,
            loan_amount,
            interest_rate: None,
            loan_term_years: default_loan_term(),
            loan_type: LoanType::default(),
            interest_only_years: 0,
            hold_period_years,
            capital_growth: None,
            marginal_tax_rate: None,
            selling_cost_rate: None,
            annual_strata: Decimal::ZERO,
            building_age: 0,
            foreign_resident_for_tax: false,
            currency: Currency::default(),
            exchange_rate: None,
            benchmarks: BenchmarkOverrides::default(),
        }
    }

    pub fn validate(&self, property_value: Money) -> PropCalcResult<()> {
        if property_value <= Decimal::ZERO {
            return Err(PropCalcError::invalid(
                "property_value",
                "Property value must be positive",
            ));
        }
        if self.hold_period_years == 0 || self.hold_period_years > MAX_HOLD_YEARS {
            return Err(PropCalcError::invalid(
                "hold_period_years",
                format!("Hold period must be between 1 and {MAX_HOLD_YEARS} years"),
            ));
        }
        if self.weekly_rent < Decimal::ZERO {
            return Err(PropCalcError::invalid("weekly_rent", "Weekly rent cannot be negative"));
        }
        if self.annual_strata < Decimal::ZERO {
            return Err(PropCalcError::invalid("annual_strata", "Strata levies cannot be negative"));
        }
        if self.loan_amount < Decimal::ZERO {
            return Err(PropCalcError::invalid("loan_amount", "Loan amount cannot be negative"));
        }
        if self.loan_amount > property_value {
            return Err(PropCalcError::invalid(
                "loan_amount",
                "Loan amount cannot exceed the property value",
            ));
        }
        if self.loan_term_years == 0 {
            return Err(PropCalcError::invalid(
                "loan_term_years",
                "Loan term must be at least 1 year",
            ));
        }
        // Only a principal and interest loan is fully repaid by the end of its term
        if self.loan_amount > Decimal::ZERO
            && self.loan_type != LoanType::PrincipalAndInterest
            && self.hold_period_years > self.loan_term_years
        {
            return Err(PropCalcError::invalid(
                "hold_period_years",
                "Hold period cannot outlast an interest-only or hybrid loan term; \
                 the balance would fall due as a lump sum",
            ));
        }
        if let Some(fx) = self.exchange_rate {
            if fx <= Decimal::ZERO {
                return Err(PropCalcError::invalid(
                    "exchange_rate",
                    "Exchange rate must be positive",
                ));
            }
        }

        let r = self.resolve();
        let unit_rates = [
            ("vacancy_rate", r.vacancy_rate),
            ("management_fee", r.management_fee),
            ("interest_rate", r.interest_rate),
            ("marginal_tax_rate", r.marginal_tax_rate),
            ("selling_cost_rate", r.selling_cost_rate),
        ];
        for (field, rate) in unit_rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(PropCalcError::invalid(field, "Rate must be in [0, 1)"));
            }
        }
        let growth_rates = [
            ("rent_growth", r.rent_growth),
            ("capital_growth", r.capital_growth),
        ];
        for (field, rate) in growth_rates {
            if rate <= -Decimal::ONE || rate >= Decimal::ONE {
                return Err(PropCalcError::invalid(field, "Growth rate must be in (-1, 1)"));
            }
        }
        Ok(())
    }

    /// Every rate made concrete, benchmarks resolved once.
    pub(crate) fn resolve(&self) -> ResolvedInputs {
        let benchmarks = self.benchmarks.resolve();
        ResolvedInputs {
            weekly_rent: self.weekly_rent,
            vacancy_rate: self.vacancy_rate.unwrap_or(benchmarks.vacancy_rate),
            rent_growth: self.rent_growth.unwrap_or(benchmarks.rent_growth),
            management_fee: if self.self_managed {
                Decimal::ZERO
            } else {
                self.management_fee.unwrap_or(benchmarks.management_fee)
            },
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate.unwrap_or(benchmarks.interest_rate),
            loan_term_years: self.loan_term_years,
            loan_type: self.loan_type,
            interest_only_years: self.interest_only_years,
            hold_period_years: self.hold_period_years,
            capital_growth: self.capital_growth.unwrap_or(benchmarks.capital_growth),
            marginal_tax_rate: self.marginal_tax_rate.unwrap_or(benchmarks.marginal_tax_rate),
            selling_cost_rate: self.selling_cost_rate.unwrap_or(benchmarks.selling_cost_rate),
            annual_strata: self.annual_strata,
            building_age: self.building_age,
            foreign_resident_for_tax: self.foreign_resident_for_tax,
            benchmarks,
        }
    }
}

/// Inputs with all fallbacks applied. Sensitivity runs vary one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    pub weekly_rent: Money,
    pub vacancy_rate: Rate,
    pub rent_growth: Rate,
    /// Zero when self-managed
    pub management_fee: Rate,
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub loan_type: LoanType,
    pub interest_only_years: u32,
    pub hold_period_years: u32,
    pub capital_growth: Rate,
    pub marginal_tax_rate: Rate,
    pub selling_cost_rate: Rate,
    pub annual_strata: Money,
    pub building_age: u32,
    pub foreign_resident_for_tax: bool,
    pub benchmarks: Benchmarks,
}
