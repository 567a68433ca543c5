use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::InvestmentInputs;
use crate::costs::{compute_costs, CostBreakdown, CostOptions};
use crate::profiles::{BuyerProfile, PropertyProfile};
use crate::types::{
    with_metadata, CitizenshipStatus, ComputationOutput, Jurisdiction, Money, PropertyType, Rate,
};
use crate::PropCalcResult;

/// Nightly rate premium over the weekly long-term rent per night.
const NIGHTLY_PREMIUM: Decimal = dec!(1.75);
const PLATFORM_FEE_RATE: Rate = dec!(0.15);
const SHORT_STAY_MANAGEMENT_RATE: Rate = dec!(0.20);
const CLEANING_PER_TURNOVER: Money = dec!(120);
const AVERAGE_STAY_NIGHTS: Decimal = dec!(3);
const NIGHTS_PER_YEAR: Decimal = dec!(365);
/// Margin short-stay must beat long-term by before it is recommended outright.
const SHORT_STAY_MARGIN: Rate = dec!(0.20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Local short-stay rules supplied by a regulation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortStayRegulations {
    pub permitted: bool,
    /// Cap on nights let per year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_days_per_year: Option<u32>,
    pub licensing_required: bool,
    pub annual_licence_fee: Money,
    /// One-off compliance costs (fire safety, registration), amortised
    /// over the hold period
    pub compliance_costs: Money,
}

impl Default for ShortStayRegulations {
    fn default() -> Self {
        ShortStayRegulations {
            permitted: true,
            max_days_per_year: None,
            licensing_required: false,
            annual_licence_fee: Decimal::ZERO,
            compliance_costs: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    LongTerm,
    ShortStay,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongTermIncome {
    pub gross_rent: Money,
    /// Rent after vacancy
    pub rental_income: Money,
    pub management_fee: Money,
    pub ongoing_costs: Money,
    pub net_income: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortStayIncome {
    pub permitted: bool,
    pub nightly_rate: Money,
    pub occupancy_rate: Rate,
    pub nights_booked: Decimal,
    pub gross_income: Money,
    pub platform_fees: Money,
    pub cleaning_costs: Money,
    pub management_fee: Money,
    /// Amortised one-off costs plus any annual licence fee
    pub compliance_costs: Money,
    pub ongoing_costs: Money,
    pub net_income: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseComparison {
    pub jurisdiction: Jurisdiction,
    pub long_term: LongTermIncome,
    pub short_stay: ShortStayIncome,
    /// Short-stay net income less long-term net income
    pub difference: Money,
    pub recommendation: UseCase,
    pub reasoning: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseInput {
    pub buyer: BuyerProfile,
    pub property: PropertyProfile,
    pub investment: InvestmentInputs,
    #[serde(default)]
    pub cost_options: CostOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulations: Option<ShortStayRegulations>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Year-one net income as a long-term rental versus short-stay letting.
/// Without regulations short-stay is assumed permitted with no cap.
pub fn compare(
    inputs: &InvestmentInputs,
    property_value: Money,
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    costs: &CostBreakdown,
    regulations: Option<&ShortStayRegulations>,
) -> PropCalcResult<UseCaseComparison> {
    inputs.validate(property_value)?;
    let resolved = inputs.resolve();
    let defaults = ShortStayRegulations::default();
    let regulations = regulations.unwrap_or(&defaults);
    let ongoing_costs = costs.ongoing.total;

    // Long-term
    let gross_rent = inputs.weekly_rent * dec!(52);
    let rental_income = (gross_rent * (Decimal::ONE - resolved.vacancy_rate)).round_dp(2);
    let lt_management = (rental_income * resolved.management_fee).round_dp(2);
    let long_term = LongTermIncome {
        gross_rent,
        rental_income,
        management_fee: lt_management,
        ongoing_costs,
        net_income: rental_income - ongoing_costs - lt_management,
    };

    // Short-stay
    let mut reasoning = Vec::new();
    let is_dwelling = matches!(
        property_type,
        PropertyType::NewDwelling | PropertyType::EstablishedDwelling
    );
    let permitted = regulations.permitted && is_dwelling;
    if !is_dwelling {
        reasoning.push(format!("Short-stay letting does not apply to {property_type}"));
    } else if !regulations.permitted {
        reasoning.push(format!(
            "Short-stay letting is not permitted at this {jurisdiction} location"
        ));
    }

    let occupancy_rate = resolved.benchmarks.short_stay_occupancy;
    let nightly_rate = (inputs.weekly_rent / dec!(7) * NIGHTLY_PREMIUM).round_dp(2);
    let mut nights_booked = if permitted {
        (NIGHTS_PER_YEAR * occupancy_rate).round_dp(0)
    } else {
        Decimal::ZERO
    };
    if let Some(cap) = regulations.max_days_per_year {
        let cap = Decimal::from(cap);
        if nights_booked > cap {
            reasoning.push(format!(
                "Bookings capped at {cap} nights a year by local regulation"
            ));
            nights_booked = cap;
        }
    }

    let gross_income = nightly_rate * nights_booked;
    let platform_fees = (gross_income * PLATFORM_FEE_RATE).round_dp(2);
    let turnovers = (nights_booked / AVERAGE_STAY_NIGHTS).ceil();
    let cleaning_costs = turnovers * CLEANING_PER_TURNOVER;
    let ss_management = (gross_income * SHORT_STAY_MANAGEMENT_RATE).round_dp(2);
    let compliance_costs = if permitted {
        let amortised =
            (regulations.compliance_costs / Decimal::from(resolved.hold_period_years)).round_dp(2);
        let licence = if regulations.licensing_required {
            regulations.annual_licence_fee
        } else {
            Decimal::ZERO
        };
        amortised + licence
    } else {
        Decimal::ZERO
    };
    let ss_net = gross_income
        - platform_fees
        - cleaning_costs
        - ss_management
        - compliance_costs
        - ongoing_costs;

    let short_stay = ShortStayIncome {
        permitted,
        nightly_rate,
        occupancy_rate,
        nights_booked,
        gross_income,
        platform_fees,
        cleaning_costs,
        management_fee: ss_management,
        compliance_costs,
        ongoing_costs,
        net_income: ss_net,
    };

    let lt_net = long_term.net_income;
    let hurdle = lt_net + lt_net.abs() * SHORT_STAY_MARGIN;
    let recommendation = if !permitted || ss_net <= lt_net {
        if permitted {
            reasoning.push("Short-stay income does not exceed long-term rental income".into());
        }
        UseCase::LongTerm
    } else if ss_net > hurdle {
        reasoning.push(
            "Short-stay net income exceeds long-term by more than 20% after platform, cleaning \
             and management costs"
                .into(),
        );
        UseCase::ShortStay
    } else {
        reasoning.push(
            "Short-stay is only marginally better; a mix of lease terms balances income \
             against vacancy and management effort"
                .into(),
        );
        UseCase::Mixed
    };

    if regulations.licensing_required && permitted {
        reasoning.push("A short-stay licence or registration is required".into());
    }

    Ok(UseCaseComparison {
        jurisdiction,
        long_term,
        short_stay,
        difference: ss_net - lt_net,
        recommendation,
        reasoning,
    })
}

/// Use-case comparison wrapped in the standard output envelope. Purchase
/// costs are computed from the profiles.
pub fn compare_use_cases(
    input: &UseCaseInput,
) -> PropCalcResult<ComputationOutput<UseCaseComparison>> {
    let property = &input.property;
    debug!(jurisdiction = %property.jurisdiction(), "comparing use cases");

    let mut investment = input.investment.clone();
    investment.benchmarks.fill_from(&input.cost_options.benchmarks);

    let mut options = input.cost_options.clone();
    options.loan_amount = Some(investment.loan_amount);
    options.benchmarks = investment.benchmarks.clone();

    investment.validate(property.value())?;
    let costs = compute_costs(&input.buyer, property, &options)?;
    let comparison = compare(
        &investment,
        property.value(),
        property.jurisdiction(),
        property.property_type(),
        &costs,
        input.regulations.as_ref(),
    )?;

    let mut warnings = Vec::new();
    if input.regulations.is_none() {
        warnings.push(format!(
            "No short-stay regulations supplied for {}; assumed permitted without a night cap",
            property.jurisdiction()
        ));
    }
    if input.buyer.effective_status() == CitizenshipStatus::TemporaryResident {
        warnings.push(
            "Temporary residents must occupy the dwelling and cannot let it on either basis"
                .into(),
        );
    }

    Ok(with_metadata(
        "Year-one long-term rental versus short-stay net income",
        input,
        warnings,
        comparison,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::{OngoingCosts, UpfrontCosts};

    fn costs(ongoing: Money) -> CostBreakdown {
        CostBreakdown {
            upfront: UpfrontCosts {
                property_price: dec!(700_000),
                firb_fee: Decimal::ZERO,
                stamp_duty: dec!(25_000),
                foreign_surcharge: Decimal::ZERO,
                legal_fees: dec!(2_200),
                inspection_fees: dec!(400),
                loan_costs: Decimal::ZERO,
                total: dec!(27_600),
            },
            ongoing: OngoingCosts {
                land_tax: Decimal::ZERO,
                council_rates: ongoing,
                insurance: Decimal::ZERO,
                maintenance: Decimal::ZERO,
                vacancy_fee: Decimal::ZERO,
                total: ongoing,
            },
            total_investment_cost: dec!(727_600),
        }
    }

    fn inputs(weekly: Money) -> InvestmentInputs {
        let mut i = InvestmentInputs::new(weekly, Decimal::ZERO, 5);
        i.vacancy_rate = Some(dec!(0.04));
        i.management_fee = Some(dec!(0.08));
        i
    }

    #[test]
    fn test_short_stay_figures() {
        let c = compare(
            &inputs(dec!(700)),
            dec!(700_000),
            Jurisdiction::QLD,
            PropertyType::NewDwelling,
            &costs(dec!(10_000)),
            None,
        )
        .unwrap();
        let ss = &c.short_stay;
        assert_eq!(ss.nightly_rate, dec!(175));
        assert_eq!(ss.nights_booked, dec!(237));
        assert_eq!(ss.gross_income, dec!(41_475));
        assert_eq!(ss.cleaning_costs, dec!(9_480));
        // long-term: 36,400 * 0.96 = 34,944; fee 2,795.52
        assert_eq!(c.long_term.net_income, dec!(34_944) - dec!(10_000) - dec!(2_795.52));
    }

    #[test]
    fn test_barred_is_long_term() {
        let regs = ShortStayRegulations {
            permitted: false,
            ..Default::default()
        };
        let c = compare(
            &inputs(dec!(900)),
            dec!(700_000),
            Jurisdiction::NSW,
            PropertyType::EstablishedDwelling,
            &costs(dec!(8_000)),
            Some(&regs),
        )
        .unwrap();
        assert_eq!(c.recommendation, UseCase::LongTerm);
        assert_eq!(c.short_stay.nights_booked, Decimal::ZERO);
        assert!(!c.reasoning.is_empty());
    }

    #[test]
    fn test_cap_limits_nights() {
        let regs = ShortStayRegulations {
            max_days_per_year: Some(180),
            licensing_required: true,
            annual_licence_fee: dec!(500),
            compliance_costs: dec!(5_000),
            ..Default::default()
        };
        let c = compare(
            &inputs(dec!(700)),
            dec!(700_000),
            Jurisdiction::NSW,
            PropertyType::NewDwelling,
            &costs(dec!(10_000)),
            Some(&regs),
        )
        .unwrap();
        assert_eq!(c.short_stay.nights_booked, dec!(180));
        assert_eq!(c.short_stay.compliance_costs, dec!(1_500));
    }

    #[test]
    fn test_recommendation_bands() {
        let mut busy = inputs(dec!(2_000));
        busy.benchmarks.short_stay_occupancy = Some(dec!(0.95));

        // 347 nights: net 88,855 against long-term 81,852.80
        let c = compare(
            &busy,
            dec!(700_000),
            Jurisdiction::VIC,
            PropertyType::NewDwelling,
            &costs(dec!(10_000)),
            None,
        )
        .unwrap();
        assert_eq!(c.short_stay.net_income, dec!(88_855));
        assert_eq!(c.recommendation, UseCase::Mixed);
        assert_eq!(c.difference, c.short_stay.net_income - c.long_term.net_income);

        // Heavy long-term vacancy pushes long-term net to 56,976
        busy.vacancy_rate = Some(dec!(0.30));
        let c = compare(
            &busy,
            dec!(700_000),
            Jurisdiction::VIC,
            PropertyType::NewDwelling,
            &costs(dec!(10_000)),
            None,
        )
        .unwrap();
        assert_eq!(c.long_term.net_income, dec!(56_976));
        assert_eq!(c.recommendation, UseCase::ShortStay);
    }

    #[test]
    fn test_vacant_land_not_applicable() {
        let c = compare(
            &inputs(dec!(100)),
            dec!(700_000),
            Jurisdiction::WA,
            PropertyType::VacantLand,
            &costs(dec!(1_800)),
            None,
        )
        .unwrap();
        assert!(!c.short_stay.permitted);
        assert_eq!(c.recommendation, UseCase::LongTerm);
    }
}
