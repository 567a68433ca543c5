use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::scoring::Verdict;
use crate::types::{Money, Rate};

const STRONG_YIELD: Rate = dec!(0.05);
const WEAK_YIELD: Rate = dec!(0.035);
const STRONG_GROWTH: Rate = dec!(0.06);
const WEAK_GROWTH: Rate = dec!(0.04);
const STRONG_ROI: Rate = dec!(0.08);
const WEAK_ROI: Rate = dec!(0.04);

/// Advisory text derived from fixed thresholds. Figures appear only as
/// percentages or years; currency formatting is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub key_takeaways: Vec<String>,
}

/// Headline figures the recommendation is built from.
#[derive(Debug, Clone)]
pub(crate) struct RecommendationFacts {
    pub verdict: Verdict,
    pub overall_score: Decimal,
    pub hold_years: u32,
    pub gross_yield: Rate,
    pub capital_growth: Rate,
    pub first_year_cash_flow: Money,
    pub first_year_tax_benefit: Money,
    pub annualized_roi: Rate,
    pub years_to_positive_cash_flow: Option<u32>,
    pub years_to_break_even: Option<u32>,
}

fn pct(rate: Rate) -> String {
    format!("{:.1}%", rate * dec!(100))
}

pub(crate) fn recommend(facts: &RecommendationFacts) -> Recommendation {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut key_takeaways = Vec::new();

    if facts.gross_yield >= STRONG_YIELD {
        strengths.push(format!("Strong gross rental yield of {}", pct(facts.gross_yield)));
    } else if facts.gross_yield < WEAK_YIELD {
        weaknesses.push(format!(
            "Low gross rental yield of {}; returns rely on capital growth",
            pct(facts.gross_yield)
        ));
    }

    if facts.capital_growth >= STRONG_GROWTH {
        strengths.push(format!(
            "Assumed capital growth of {} a year is above the long-run average",
            pct(facts.capital_growth)
        ));
    } else if facts.capital_growth < WEAK_GROWTH {
        weaknesses.push(format!(
            "Assumed capital growth of {} a year limits equity gains",
            pct(facts.capital_growth)
        ));
    }

    if facts.first_year_cash_flow >= Decimal::ZERO {
        strengths.push("Cash flow positive after tax from the first year".into());
    } else {
        weaknesses.push(
            "Negative after-tax cash flow in the first year; ongoing contributions are needed"
                .into(),
        );
    }

    if facts.first_year_tax_benefit > Decimal::ZERO {
        strengths.push("Negative gearing deductions reduce taxable income".into());
    }

    if facts.annualized_roi >= STRONG_ROI {
        strengths.push(format!(
            "Annualised return on cash invested of {}",
            pct(facts.annualized_roi)
        ));
    } else if facts.annualized_roi < WEAK_ROI {
        weaknesses.push(format!(
            "Annualised return on cash invested of only {}",
            pct(facts.annualized_roi)
        ));
    }

    match facts.years_to_positive_cash_flow {
        Some(1) => {}
        Some(y) => key_takeaways.push(format!("After-tax cash flow turns positive in year {y}")),
        None => key_takeaways.push(format!(
            "After-tax cash flow stays negative for the whole {}-year hold",
            facts.hold_years
        )),
    }
    match facts.years_to_break_even {
        Some(y) => key_takeaways.push(format!("Cumulative return breaks even in year {y}")),
        None => key_takeaways.push(format!(
            "Cumulative return does not break even within {} years",
            facts.hold_years
        )),
    }
    key_takeaways.push(match facts.verdict {
        Verdict::Excellent | Verdict::Good => {
            "Fundamentals support proceeding, subject to due diligence on the property".into()
        }
        Verdict::Moderate => {
            "Viable, but check the interest rate and vacancy sensitivity before committing".into()
        }
        Verdict::Poor | Verdict::NotRecommended => {
            "Consider a different property, price or financing structure".into()
        }
    });

    let summary = format!(
        "{} investment: overall score {:.1} out of 10 over a {}-year hold",
        facts.verdict, facts.overall_score, facts.hold_years
    );

    Recommendation {
        verdict: facts.verdict,
        summary,
        strengths,
        weaknesses,
        key_takeaways,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts() -> RecommendationFacts {
        RecommendationFacts {
            verdict: Verdict::Moderate,
            overall_score: dec!(6.2),
            hold_years: 10,
            gross_yield: dec!(0.031),
            capital_growth: dec!(0.07),
            first_year_cash_flow: dec!(-8_450.25),
            first_year_tax_benefit: dec!(4_100),
            annualized_roi: dec!(0.09),
            years_to_positive_cash_flow: None,
            years_to_break_even: Some(4),
        }
    }

    #[test]
    fn test_text_from_thresholds() {
        let r = recommend(&facts());
        assert_eq!(r.verdict, Verdict::Moderate);
        assert!(r.weaknesses.iter().any(|w| w.contains("3.1%")));
        assert!(r.strengths.iter().any(|s| s.contains("Negative gearing")));
        assert!(r.key_takeaways.iter().any(|t| t.contains("year 4")));
        assert!(r.summary.starts_with("Moderate investment"));
    }

    #[test]
    fn test_no_currency_in_text() {
        let r = recommend(&facts());
        let all = std::iter::once(&r.summary)
            .chain(&r.strengths)
            .chain(&r.weaknesses)
            .chain(&r.key_takeaways);
        for line in all {
            assert!(!line.contains('$'), "{line}");
            assert!(!line.contains("8450"), "{line}");
        }
    }
}
