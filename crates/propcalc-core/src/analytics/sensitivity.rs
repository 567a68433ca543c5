use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::inputs::ResolvedInputs;
use super::projection::project;
use crate::costs::CostBreakdown;
use crate::time_value::annualized_return;
use crate::types::{Money, PropertyType, Rate};
use crate::PropCalcResult;

pub const VACANCY_SCENARIOS: [Rate; 4] = [dec!(0), dec!(0.05), dec!(0.10), dec!(0.15)];
pub const INTEREST_SCENARIOS: [Rate; 4] = [dec!(0.055), dec!(0.065), dec!(0.075), dec!(0.085)];
pub const GROWTH_SCENARIOS: [Rate; 3] = [dec!(0.04), dec!(0.06), dec!(0.08)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// Value of the varied input
    pub rate: Rate,
    /// Year-one after-tax cash flow
    pub annual_cash_flow: Money,
    /// Cumulative return at the end of the hold
    pub total_return: Money,
    pub annualized_roi: Rate,
}

/// One-at-a-time sensitivity: each table varies a single input with every
/// other input held at the base case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    pub vacancy_rate: Vec<SensitivityRow>,
    pub interest_rate: Vec<SensitivityRow>,
    pub capital_growth: Vec<SensitivityRow>,
}

pub(crate) fn sensitivity(
    base: &ResolvedInputs,
    property_value: Money,
    property_type: PropertyType,
    costs: &CostBreakdown,
) -> PropCalcResult<SensitivityAnalysis> {
    let run = |rate: Rate, apply: fn(&mut ResolvedInputs, Rate)| -> PropCalcResult<SensitivityRow> {
        let mut inputs = base.clone();
        apply(&mut inputs, rate);
        let p = project(&inputs, property_value, property_type, costs)?;
        let total_return = p.last().cumulative_return;
        Ok(SensitivityRow {
            rate,
            annual_cash_flow: p.first().cash_flow_after_tax,
            total_return,
            annualized_roi: annualized_return(
                p.cash_invested,
                p.cash_invested + total_return,
                inputs.hold_period_years,
            ),
        })
    };

    Ok(SensitivityAnalysis {
        vacancy_rate: VACANCY_SCENARIOS
            .iter()
            .map(|r| run(*r, |i, r| i.vacancy_rate = r))
            .collect::<PropCalcResult<_>>()?,
        interest_rate: INTEREST_SCENARIOS
            .iter()
            .map(|r| run(*r, |i, r| i.interest_rate = r))
            .collect::<PropCalcResult<_>>()?,
        capital_growth: GROWTH_SCENARIOS
            .iter()
            .map(|r| run(*r, |i, r| i.capital_growth = r))
            .collect::<PropCalcResult<_>>()?,
    })
}
