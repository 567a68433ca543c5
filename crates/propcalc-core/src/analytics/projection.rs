use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::inputs::ResolvedInputs;
use crate::costs::CostBreakdown;
use crate::loan::amortize;
use crate::tax::{deductions, tax_benefit, DeductionInput, Deductions};
use crate::time_value::compound_factor;
use crate::types::{Money, PropertyType, Rate};
use crate::PropCalcResult;

/// Annual inflation applied to operating expenses.
pub const EXPENSE_INFLATION: Rate = dec!(0.025);

const WEEKS_PER_YEAR: u32 = 52;

/// One year of the hold period. Every money field is rounded to cents so
/// the accounting identities between rows hold exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub property_value: Money,
    pub loan_balance: Money,
    pub equity: Money,
    pub gross_rent: Money,
    /// Gross rent after vacancy
    pub rental_income: Money,
    pub operating_expenses: Money,
    pub management_fee: Money,
    pub loan_interest: Money,
    pub loan_principal: Money,
    pub total_expenses: Money,
    pub deductions: Money,
    pub tax_benefit: Money,
    pub cash_flow_before_tax: Money,
    pub cash_flow_after_tax: Money,
    pub cumulative_cash_flow: Money,
    /// Equity plus cumulative after-tax cash flow, less cash invested
    pub cumulative_return: Money,
}

/// Full projection over the hold period.
#[derive(Debug, Clone)]
pub(crate) struct Projection {
    pub rows: Vec<YearlyProjection>,
    pub first_year_deductions: Deductions,
    pub cash_invested: Money,
}

impl Projection {
    pub fn first(&self) -> &YearlyProjection {
        // hold period is validated to be at least one year
        &self.rows[0]
    }

    pub fn last(&self) -> &YearlyProjection {
        &self.rows[self.rows.len() - 1]
    }

    /// First year whose after-tax cash flow is non-negative.
    pub fn years_to_positive_cash_flow(&self) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.cash_flow_after_tax >= Decimal::ZERO)
            .map(|r| r.year)
    }

    /// First year whose cumulative return is non-negative.
    pub fn years_to_break_even(&self) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.cumulative_return >= Decimal::ZERO)
            .map(|r| r.year)
    }
}

/// Cash the buyer puts in: everything paid at purchase less the loan.
pub(crate) fn cash_invested(costs: &CostBreakdown, loan_amount: Money) -> Money {
    costs.total_investment_cost - loan_amount
}

pub(crate) fn project(
    inputs: &ResolvedInputs,
    property_value: Money,
    property_type: PropertyType,
    costs: &CostBreakdown,
) -> PropCalcResult<Projection> {
    let years = inputs.hold_period_years;
    let loan_schedule = amortize(
        inputs.loan_amount,
        inputs.interest_rate,
        inputs.loan_term_years,
        inputs.loan_type,
        inputs.interest_only_years,
        years,
    )?;

    let ongoing = &costs.ongoing;
    let cash_invested = cash_invested(costs, inputs.loan_amount);
    let annual_rent = inputs.weekly_rent * Decimal::from(WEEKS_PER_YEAR);

    let mut rows = Vec::with_capacity(years as usize);
    let mut first_year_deductions = None;
    let mut cumulative_cash_flow = Decimal::ZERO;

    for year in 1..=years {
        let rent_factor = compound_factor(inputs.rent_growth, year - 1);
        let inflation = compound_factor(EXPENSE_INFLATION, year - 1);
        let inflate = |amount: Money| (amount * inflation).round_dp(2);

        let gross_rent = (annual_rent * rent_factor).round_dp(2);
        let rental_income = (gross_rent * (Decimal::ONE - inputs.vacancy_rate)).round_dp(2);
        let operating_expenses = inflate(ongoing.total + inputs.annual_strata);
        let management_fee = (rental_income * inputs.management_fee).round_dp(2);

        let (loan_interest, loan_principal, loan_balance) =
            match loan_schedule.get(year as usize - 1) {
                Some(state) => (state.interest_paid, state.principal_paid, state.closing_balance),
                None => (
                    Decimal::ZERO,
                    Decimal::ZERO,
                    loan_schedule
                        .last()
                        .map(|s| s.closing_balance)
                        .unwrap_or(inputs.loan_amount),
                ),
            };

        let property_value_y =
            (property_value * compound_factor(inputs.capital_growth, year)).round_dp(2);
        let equity = property_value_y - loan_balance;

        let total_expenses = operating_expenses + management_fee + loan_interest + loan_principal;
        let cash_flow_before_tax = rental_income - total_expenses;

        let year_deductions = deductions(&DeductionInput {
            loan_interest,
            council_rates: inflate(ongoing.council_rates),
            land_tax: inflate(ongoing.land_tax),
            management_fees: management_fee,
            maintenance: inflate(ongoing.maintenance),
            insurance: inflate(ongoing.insurance),
            strata: inflate(inputs.annual_strata),
            other: inflate(ongoing.vacancy_fee),
            property_value,
            property_type,
            building_age: inputs.building_age + year - 1,
        });
        let total_deductions = year_deductions.total.round_dp(2);
        let benefit =
            tax_benefit(total_deductions, rental_income, inputs.marginal_tax_rate).round_dp(2);
        if first_year_deductions.is_none() {
            first_year_deductions = Some(year_deductions);
        }

        let cash_flow_after_tax = cash_flow_before_tax + benefit;
        cumulative_cash_flow += cash_flow_after_tax;
        let cumulative_return = equity + cumulative_cash_flow - cash_invested;

        rows.push(YearlyProjection {
            year,
            property_value: property_value_y,
            loan_balance,
            equity,
            gross_rent,
            rental_income,
            operating_expenses,
            management_fee,
            loan_interest,
            loan_principal,
            total_expenses,
            deductions: total_deductions,
            tax_benefit: benefit,
            cash_flow_before_tax,
            cash_flow_after_tax,
            cumulative_cash_flow,
            cumulative_return,
        });
    }

    let first_year_deductions = first_year_deductions.unwrap_or_else(|| {
        deductions(&DeductionInput {
            loan_interest: Decimal::ZERO,
            council_rates: Decimal::ZERO,
            land_tax: Decimal::ZERO,
            management_fees: Decimal::ZERO,
            maintenance: Decimal::ZERO,
            insurance: Decimal::ZERO,
            strata: Decimal::ZERO,
            other: Decimal::ZERO,
            property_value,
            property_type,
            building_age: inputs.building_age,
        })
    });

    Ok(Projection {
        rows,
        first_year_deductions,
        cash_invested,
    })
}
