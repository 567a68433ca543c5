use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Gross yield that earns a full yield score.
const TARGET_YIELD: Rate = dec!(0.05);
/// Capital growth that earns a full growth score.
const TARGET_GROWTH: Rate = dec!(0.07);
/// Tax score when there is no rental loss to offset.
const NEUTRAL_TAX_SCORE: Decimal = dec!(7);
const RISK_BASELINE: Decimal = dec!(7);
const MAX_SCORE: Decimal = dec!(10);

/// Five sub-scores on a 0-10 scale and their unweighted mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentScore {
    pub rental_yield: Decimal,
    pub capital_growth: Decimal,
    pub cash_flow: Decimal,
    pub tax_efficiency: Decimal,
    pub risk: Decimal,
    pub overall: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    Moderate,
    Poor,
    NotRecommended,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Moderate => "Moderate",
            Verdict::Poor => "Poor",
            Verdict::NotRecommended => "Not Recommended",
        };
        f.write_str(s)
    }
}

fn clamp(score: Decimal) -> Decimal {
    score.clamp(Decimal::ZERO, MAX_SCORE).round_dp(2)
}

/// `pre_tax_loss` is the year-one excess of deductions over rental income
/// (zero when there is none).
pub fn score(
    gross_yield: Rate,
    capital_growth: Rate,
    cash_on_cash: Rate,
    pre_tax_loss: Money,
    tax_benefit: Money,
) -> InvestmentScore {
    let rental_yield = clamp(gross_yield / TARGET_YIELD * MAX_SCORE);
    let growth = clamp(capital_growth / TARGET_GROWTH * MAX_SCORE);
    let cash_flow = clamp(dec!(5) + cash_on_cash * dec!(100));
    let tax_efficiency = if pre_tax_loss <= Decimal::ZERO {
        NEUTRAL_TAX_SCORE
    } else {
        clamp(tax_benefit / pre_tax_loss * dec!(20))
    };
    let risk = RISK_BASELINE;

    let overall =
        ((rental_yield + growth + cash_flow + tax_efficiency + risk) / dec!(5)).round_dp(2);

    InvestmentScore {
        rental_yield,
        capital_growth: growth,
        cash_flow,
        tax_efficiency,
        risk,
        overall,
    }
}

pub fn verdict(overall: Decimal) -> Verdict {
    if overall >= dec!(8) {
        Verdict::Excellent
    } else if overall >= dec!(7) {
        Verdict::Good
    } else if overall >= dec!(5.5) {
        Verdict::Moderate
    } else if overall >= dec!(4) {
        Verdict::Poor
    } else {
        Verdict::NotRecommended
    }
}
