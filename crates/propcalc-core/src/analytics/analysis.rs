use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::comparisons::{compare_assets, AssetComparison};
use super::inputs::InvestmentInputs;
use super::projection::{project, YearlyProjection};
use super::recommendations::{recommend, Recommendation, RecommendationFacts};
use super::scoring::{score, verdict, InvestmentScore};
use super::sensitivity::{sensitivity, SensitivityAnalysis};
use crate::costs::{compute_costs, CostBreakdown, CostOptions};
use crate::loan::{monthly_repayments, Repayments};
use crate::profiles::{BuyerProfile, PropertyProfile};
use crate::tax::{capital_gains_tax, CgtInput, CgtResult, Deductions};
use crate::time_value::{annualized_return, irr, npv};
use crate::types::{
    with_metadata, CitizenshipStatus, ComputationOutput, Currency, Jurisdiction, Money,
    PropertyType, Rate,
};
use crate::PropCalcResult;

const IRR_GUESS: Rate = dec!(0.08);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalYield {
    /// Year-one gross rent over property value
    pub gross: Rate,
    /// Year-one rent after vacancy, operating costs and management over value
    pub net: Rate,
    /// As `net`, over total investment cost
    pub net_on_cost: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub annual_before_tax: Money,
    pub annual_after_tax: Money,
    pub monthly_after_tax: Money,
    pub weekly_after_tax: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub cash_invested: Money,
    /// Cumulative return at the end of the hold
    pub total_return: Money,
    pub roi_on_cash: Rate,
    pub annualized_roi: Rate,
    /// Year-one after-tax cash flow over cash invested
    pub cash_on_cash: Rate,
    pub equity_multiple: Decimal,
    /// `None` when the cash flows admit no solution
    pub irr: Option<Rate>,
    /// Opportunity cost of the cash invested: the shares benchmark return
    pub discount_rate: Rate,
    /// Equity cash flows (including net exit equity) discounted at `discount_rate`
    pub npv: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGrowthSummary {
    pub initial_value: Money,
    pub final_value: Money,
    pub total_growth: Money,
    pub annual_growth_rate: Rate,
    pub initial_equity: Money,
    pub final_equity: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanMetrics {
    pub loan_amount: Money,
    pub lvr: Rate,
    pub interest_rate: Rate,
    pub repayments: Repayments,
    pub first_year_repayment: Money,
    pub interest_over_hold: Money,
    pub balance_at_exit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitAnalysis {
    pub sale_price: Money,
    pub selling_costs: Money,
    pub cgt: CgtResult,
    pub loan_payout: Money,
    /// Sale price less selling costs, CGT and loan payout
    pub net_exit_equity: Money,
    /// Net exit equity plus cumulative cash flow, less cash invested
    pub net_profit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAnalysis {
    pub first_year_deductions: Deductions,
    pub first_year_tax_benefit: Money,
    pub total_tax_benefit: Money,
    /// Deductions exceeded rental income in year one
    pub negatively_geared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEven {
    pub years_to_positive_cash_flow: Option<u32>,
    pub years_to_break_even: Option<u32>,
}

/// Headline figures restated in the buyer's home currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub currency: Currency,
    /// Units of `currency` per AUD
    pub exchange_rate: Rate,
    pub total_investment_cost: Money,
    pub cash_invested: Money,
    pub annual_cash_flow: Money,
    pub net_exit_equity: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentAnalytics {
    pub jurisdiction: Jurisdiction,
    pub property_type: PropertyType,
    pub rental_yield: RentalYield,
    pub cash_flow: CashFlowSummary,
    pub returns: ReturnMetrics,
    pub capital_growth: CapitalGrowthSummary,
    pub loan: LoanMetrics,
    pub exit: ExitAnalysis,
    pub tax: TaxAnalysis,
    pub break_even: BreakEven,
    pub projections: Vec<YearlyProjection>,
    pub comparisons: Vec<AssetComparison>,
    pub sensitivity: SensitivityAnalysis,
    pub score: InvestmentScore,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_conversion: Option<CurrencyConversion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub buyer: BuyerProfile,
    pub property: PropertyProfile,
    pub investment: InvestmentInputs,
    /// Purchase cost settings; the loan amount always comes from `investment`
    #[serde(default)]
    pub cost_options: CostOptions,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Multi-year investment analysis from already computed purchase costs.
pub fn analyze(
    inputs: &InvestmentInputs,
    property_value: Money,
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    costs: &CostBreakdown,
) -> PropCalcResult<InvestmentAnalytics> {
    inputs.validate(property_value)?;
    let resolved = inputs.resolve();
    let hold = resolved.hold_period_years;

    let projection = project(&resolved, property_value, property_type, costs)?;
    let first = projection.first();
    let last = projection.last();
    let cash_invested = projection.cash_invested;

    // Yield
    let net_income = first.rental_income - first.operating_expenses - first.management_fee;
    let rental_yield = RentalYield {
        gross: first.gross_rent / property_value,
        net: net_income / property_value,
        net_on_cost: ratio(net_income, costs.total_investment_cost),
    };

    let cash_flow = CashFlowSummary {
        annual_before_tax: first.cash_flow_before_tax,
        annual_after_tax: first.cash_flow_after_tax,
        monthly_after_tax: (first.cash_flow_after_tax / dec!(12)).round_dp(2),
        weekly_after_tax: (first.cash_flow_after_tax / dec!(52)).round_dp(2),
    };

    // Exit
    let sale_price = last.property_value;
    let selling_costs = (sale_price * resolved.selling_cost_rate).round_dp(2);
    let cgt = capital_gains_tax(&CgtInput {
        sale_price,
        original_price: property_value,
        purchase_costs: costs.upfront.total,
        selling_costs,
        foreign_resident: resolved.foreign_resident_for_tax,
        marginal_tax_rate: resolved.marginal_tax_rate,
    });
    let loan_payout = last.loan_balance;
    let net_exit_equity = sale_price - selling_costs - cgt.cgt_payable.round_dp(2) - loan_payout;
    let exit = ExitAnalysis {
        sale_price,
        selling_costs,
        net_profit: net_exit_equity + last.cumulative_cash_flow - cash_invested,
        cgt,
        loan_payout,
        net_exit_equity,
    };

    // Returns
    let total_return = last.cumulative_return;
    let mut flows = Vec::with_capacity(hold as usize + 1);
    flows.push(-cash_invested);
    flows.extend(projection.rows.iter().map(|r| r.cash_flow_after_tax));
    if let Some(final_flow) = flows.last_mut() {
        *final_flow += net_exit_equity;
    }
    let irr = match irr(&flows, IRR_GUESS) {
        Ok(rate) => Some(rate),
        Err(e) => {
            warn!(error = %e, "IRR did not converge");
            None
        }
    };
    let discount_rate = resolved.benchmarks.shares_return;
    let net_present_value = npv(discount_rate, &flows).ok().map(|v| v.round_dp(2));
    let returns = ReturnMetrics {
        cash_invested,
        total_return,
        roi_on_cash: ratio(total_return, cash_invested),
        annualized_roi: annualized_return(cash_invested, cash_invested + total_return, hold),
        cash_on_cash: ratio(first.cash_flow_after_tax, cash_invested),
        equity_multiple: ratio(cash_invested + total_return, cash_invested),
        irr,
        discount_rate,
        npv: net_present_value,
    };

    let initial_equity = property_value - resolved.loan_amount;
    let capital_growth = CapitalGrowthSummary {
        initial_value: property_value,
        final_value: last.property_value,
        total_growth: last.property_value - property_value,
        annual_growth_rate: resolved.capital_growth,
        initial_equity,
        final_equity: last.equity,
    };

    let repayments = monthly_repayments(
        resolved.loan_amount,
        resolved.interest_rate,
        resolved.loan_term_years,
        resolved.loan_type,
        resolved.interest_only_years,
    )?;
    let loan = LoanMetrics {
        loan_amount: resolved.loan_amount,
        lvr: resolved.loan_amount / property_value,
        interest_rate: resolved.interest_rate,
        repayments,
        first_year_repayment: first.loan_interest + first.loan_principal,
        interest_over_hold: projection.rows.iter().map(|r| r.loan_interest).sum(),
        balance_at_exit: last.loan_balance,
    };

    let pre_tax_loss = (first.deductions - first.rental_income).max(Decimal::ZERO);
    let tax = TaxAnalysis {
        first_year_deductions: projection.first_year_deductions.clone(),
        first_year_tax_benefit: first.tax_benefit,
        total_tax_benefit: projection.rows.iter().map(|r| r.tax_benefit).sum(),
        negatively_geared: pre_tax_loss > Decimal::ZERO,
    };

    let break_even = BreakEven {
        years_to_positive_cash_flow: projection.years_to_positive_cash_flow(),
        years_to_break_even: projection.years_to_break_even(),
    };

    let comparisons = compare_assets(cash_invested, hold, total_return, &resolved.benchmarks);
    let sensitivity = sensitivity(&resolved, property_value, property_type, costs)?;

    let score = score(
        rental_yield.gross,
        resolved.capital_growth,
        returns.cash_on_cash,
        pre_tax_loss,
        first.tax_benefit,
    );
    let recommendation = recommend(&RecommendationFacts {
        verdict: verdict(score.overall),
        overall_score: score.overall,
        hold_years: hold,
        gross_yield: rental_yield.gross,
        capital_growth: resolved.capital_growth,
        first_year_cash_flow: first.cash_flow_after_tax,
        first_year_tax_benefit: first.tax_benefit,
        annualized_roi: returns.annualized_roi,
        years_to_positive_cash_flow: break_even.years_to_positive_cash_flow,
        years_to_break_even: break_even.years_to_break_even,
    });

    let currency_conversion = match (&inputs.currency, inputs.exchange_rate) {
        (Currency::AUD, _) | (_, None) => None,
        (currency, Some(fx)) => {
            let convert = |amount: Money| (amount * fx).round_dp(2);
            Some(CurrencyConversion {
                currency: currency.clone(),
                exchange_rate: fx,
                total_investment_cost: convert(costs.total_investment_cost),
                cash_invested: convert(cash_invested),
                annual_cash_flow: convert(first.cash_flow_after_tax),
                net_exit_equity: convert(net_exit_equity),
            })
        }
    };

    Ok(InvestmentAnalytics {
        jurisdiction,
        property_type,
        rental_yield,
        cash_flow,
        returns,
        capital_growth,
        loan,
        exit,
        tax,
        break_even,
        projections: projection.rows,
        comparisons,
        sensitivity,
        score,
        recommendation,
        currency_conversion,
    })
}

/// Purchase costs and investment analysis wrapped in the standard output
/// envelope.
pub fn analyze_investment(
    input: &AnalysisInput,
) -> PropCalcResult<ComputationOutput<InvestmentAnalytics>> {
    let property = &input.property;
    debug!(
        jurisdiction = %property.jurisdiction(),
        hold = input.investment.hold_period_years,
        "analyzing investment"
    );

    let mut investment = input.investment.clone();
    investment.benchmarks.fill_from(&input.cost_options.benchmarks);

    let mut options = input.cost_options.clone();
    options.loan_amount = Some(investment.loan_amount);
    options.benchmarks = investment.benchmarks.clone();

    investment.validate(property.value())?;
    let costs = compute_costs(&input.buyer, property, &options)?;
    let analytics = analyze(
        &investment,
        property.value(),
        property.jurisdiction(),
        property.property_type(),
        &costs,
    )?;

    let mut warnings = Vec::new();
    if analytics.returns.irr.is_none() {
        warnings.push("IRR could not be determined for these cash flows".into());
    }
    if input.buyer.effective_status() == CitizenshipStatus::TemporaryResident {
        warnings.push(
            "Temporary residents must occupy the dwelling; rental projections are illustrative"
                .into(),
        );
    }
    if input.buyer.effective_status() == CitizenshipStatus::ForeignNational
        && !investment.foreign_resident_for_tax
    {
        warnings.push(
            "Buyer is a foreign person but is analysed as an Australian tax resident".into(),
        );
    }
    if investment.currency != Currency::AUD && investment.exchange_rate.is_none() {
        warnings.push("No exchange rate supplied; currency conversion omitted".into());
    }
    if analytics.loan.lvr > dec!(0.80) {
        warnings.push("LVR above 80%; lenders mortgage insurance is not modelled".into());
    }

    Ok(with_metadata(
        "Multi-year property investment projection (yield, geared cash flow, negative gearing, CGT on exit, IRR, sensitivity)",
        input,
        warnings,
        analytics,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ratio(numerator: Money, denominator: Money) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
