use pretty_assertions::assert_eq;
use propcalc_core::analytics::{analyze, analyze_investment, AnalysisInput, InvestmentInputs};
use propcalc_core::costs::{compute_costs, CostBreakdown, CostOptions, OngoingCosts, UpfrontCosts};
use propcalc_core::loan::{amortize, LoanType};
use propcalc_core::profiles::{BuyerProfile, PropertyProfile};
use propcalc_core::tax::{capital_gains_tax, CgtInput};
use propcalc_core::time_value::npv;
use propcalc_core::types::{CitizenshipStatus, Currency, Jurisdiction, PropertyType};
use propcalc_core::use_case::{compare_use_cases, UseCaseInput};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_input() -> AnalysisInput {
    let mut investment = InvestmentInputs::new(dec!(750), dec!(640_000), 10);
    investment.interest_rate = Some(dec!(0.064));
    investment.annual_strata = dec!(2_400);
    investment.foreign_resident_for_tax = true;
    AnalysisInput {
        buyer: BuyerProfile::individual(CitizenshipStatus::ForeignNational),
        property: PropertyProfile::new(PropertyType::NewDwelling, Jurisdiction::VIC, dec!(800_000))
            .unwrap(),
        investment,
        cost_options: CostOptions::default(),
    }
}

// ===========================================================================
// Scenario checks
// ===========================================================================

#[test]
fn test_analysis_shape() {
    let out = analyze_investment(&sample_input()).unwrap();
    let a = &out.result;
    assert_eq!(a.projections.len(), 10);
    assert_eq!(a.sensitivity.vacancy_rate.len(), 4);
    assert_eq!(a.sensitivity.interest_rate.len(), 4);
    assert_eq!(a.sensitivity.capital_growth.len(), 3);
    assert_eq!(a.comparisons.len(), 4);
    assert_eq!(a.loan.lvr, dec!(0.8));
    assert!(a.score.overall >= Decimal::ZERO && a.score.overall <= dec!(10));
    assert_eq!(a.returns.total_return, a.projections[9].cumulative_return);
    assert_eq!(a.exit.cgt.discount_factor, Decimal::ONE);
}

#[test]
fn test_sensitivity_directions() {
    let a = analyze_investment(&sample_input()).unwrap().result;
    let v = &a.sensitivity.vacancy_rate;
    assert!(v[0].annual_cash_flow > v[3].annual_cash_flow);
    let i = &a.sensitivity.interest_rate;
    assert!(i[0].annual_cash_flow > i[3].annual_cash_flow);
    let g = &a.sensitivity.capital_growth;
    assert!(g[0].total_return < g[2].total_return);
}

#[test]
fn test_analysis_idempotent() {
    let input = sample_input();
    let a = serde_json::to_string(&analyze_investment(&input).unwrap()).unwrap();
    let b = serde_json::to_string(&analyze_investment(&input).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_recommendation_has_no_currency() {
    let a = analyze_investment(&sample_input()).unwrap().result;
    let r = &a.recommendation;
    let text = std::iter::once(&r.summary)
        .chain(&r.strengths)
        .chain(&r.weaknesses)
        .chain(&r.key_takeaways);
    for line in text {
        assert!(!line.contains('$'), "{line}");
    }
}

#[test]
fn test_currency_conversion() {
    let mut input = sample_input();
    input.investment.currency = Currency::USD;
    input.investment.exchange_rate = Some(dec!(0.65));
    let a = analyze_investment(&input).unwrap().result;
    let fx = a.currency_conversion.unwrap();
    assert_eq!(fx.currency, Currency::USD);
    assert_eq!(fx.cash_invested, (a.returns.cash_invested * dec!(0.65)).round_dp(2));
}

#[test]
fn test_hold_out_of_range_rejected() {
    let mut input = sample_input();
    input.investment.hold_period_years = 0;
    assert!(analyze_investment(&input).is_err());
    input.investment.hold_period_years = 31;
    assert!(analyze_investment(&input).is_err());
}

#[test]
fn test_loan_above_value_rejected() {
    let mut input = sample_input();
    input.investment.loan_amount = dec!(800_001);
    assert!(analyze_investment(&input).is_err());
}

#[test]
fn test_zero_net_cash_flow_is_positive_year_one() {
    let value = dec!(500_000);
    let costs = CostBreakdown {
        upfront: UpfrontCosts {
            property_price: value,
            firb_fee: Decimal::ZERO,
            stamp_duty: dec!(17_000),
            foreign_surcharge: Decimal::ZERO,
            legal_fees: dec!(2_000),
            inspection_fees: dec!(600),
            loan_costs: Decimal::ZERO,
            total: dec!(19_600),
        },
        ongoing: OngoingCosts {
            land_tax: dec!(400),
            council_rates: dec!(1_500),
            insurance: dec!(1_250),
            maintenance: dec!(2_050),
            vacancy_fee: Decimal::ZERO,
            total: dec!(5_200),
        },
        total_investment_cost: value + dec!(19_600),
    };

    let mut inputs = InvestmentInputs::new(dec!(100), Decimal::ZERO, 5);
    inputs.vacancy_rate = Some(Decimal::ZERO);
    inputs.rent_growth = Some(Decimal::ZERO);
    inputs.capital_growth = Some(Decimal::ZERO);
    inputs.self_managed = true;

    let a = analyze(
        &inputs,
        value,
        Jurisdiction::SA,
        PropertyType::EstablishedDwelling,
        &costs,
    )
    .unwrap();
    assert_eq!(a.projections[0].cash_flow_after_tax, Decimal::ZERO);
    assert_eq!(a.projections[0].tax_benefit, Decimal::ZERO);
    assert_eq!(a.break_even.years_to_positive_cash_flow, Some(1));
    // Expenses inflate while rent is flat, so later years turn negative
    assert!(a.projections[1].cash_flow_after_tax < Decimal::ZERO);
}

fn flat_costs(value: Decimal, council_rates: Decimal) -> CostBreakdown {
    CostBreakdown {
        upfront: UpfrontCosts {
            property_price: value,
            firb_fee: Decimal::ZERO,
            stamp_duty: dec!(17_000),
            foreign_surcharge: Decimal::ZERO,
            legal_fees: dec!(2_000),
            inspection_fees: dec!(600),
            loan_costs: Decimal::ZERO,
            total: dec!(19_600),
        },
        ongoing: OngoingCosts {
            land_tax: Decimal::ZERO,
            council_rates,
            insurance: Decimal::ZERO,
            maintenance: Decimal::ZERO,
            vacancy_fee: Decimal::ZERO,
            total: council_rates,
        },
        total_investment_cost: value + dec!(19_600),
    }
}

#[test]
fn test_geared_zero_net_cash_flow_excludes_principal_from_deductions() {
    let value = dec!(500_000);
    let loan = dec!(100_000);
    let rate = dec!(0.06);

    let schedule = amortize(loan, rate, 30, LoanType::PrincipalAndInterest, 0, 1).unwrap();
    let debt_service = schedule[0].interest_paid + schedule[0].principal_paid;
    // Rent of 300 a week covers debt service and outgoings exactly
    let annual_rent = dec!(15_600);
    let outgoings = annual_rent - debt_service;

    let mut inputs = InvestmentInputs::new(dec!(300), loan, 5);
    inputs.interest_rate = Some(rate);
    inputs.vacancy_rate = Some(Decimal::ZERO);
    inputs.rent_growth = Some(Decimal::ZERO);
    inputs.capital_growth = Some(Decimal::ZERO);
    inputs.self_managed = true;

    let a = analyze(
        &inputs,
        value,
        Jurisdiction::SA,
        PropertyType::EstablishedDwelling,
        &flat_costs(value, outgoings),
    )
    .unwrap();
    let y1 = &a.projections[0];

    assert_eq!(y1.loan_interest, schedule[0].interest_paid);
    assert_eq!(y1.loan_principal, schedule[0].principal_paid);
    assert!(y1.loan_principal > Decimal::ZERO);
    assert_eq!(y1.cash_flow_before_tax, Decimal::ZERO);
    assert_eq!(y1.deductions, outgoings + y1.loan_interest);
    assert!(y1.deductions < y1.rental_income);
    assert_eq!(y1.tax_benefit, Decimal::ZERO);
    assert_eq!(y1.cash_flow_after_tax, Decimal::ZERO);
    assert_eq!(a.break_even.years_to_positive_cash_flow, Some(1));
}

#[test]
fn test_interest_only_term_shorter_than_hold_rejected() {
    let mut input = sample_input();
    input.investment.loan_type = LoanType::InterestOnly;
    input.investment.loan_term_years = 5;
    input.investment.hold_period_years = 10;
    assert!(analyze_investment(&input).is_err());

    input.investment.hold_period_years = 5;
    let a = analyze_investment(&input).unwrap().result;
    assert!(a.projections.iter().all(|r| r.loan_principal.is_zero()));
    assert!(a.projections.iter().all(|r| r.loan_interest > Decimal::ZERO));
}

#[test]
fn test_npv_at_shares_benchmark() {
    let a = analyze_investment(&sample_input()).unwrap().result;

    let mut flows = vec![-a.returns.cash_invested];
    flows.extend(a.projections.iter().map(|r| r.cash_flow_after_tax));
    if let Some(last) = flows.last_mut() {
        *last += a.exit.net_exit_equity;
    }
    let expected = npv(a.returns.discount_rate, &flows).unwrap().round_dp(2);
    assert_eq!(a.returns.npv, Some(expected));

    if let Some(irr) = a.returns.irr {
        if irr > a.returns.discount_rate {
            assert!(expected > Decimal::ZERO);
        } else if irr < a.returns.discount_rate {
            assert!(expected < Decimal::ZERO);
        }
    }
}

#[test]
fn test_cgt_discount_asymmetry() {
    let base = CgtInput {
        sale_price: dec!(1_500_000),
        original_price: dec!(900_000),
        purchase_costs: dec!(60_000),
        selling_costs: dec!(37_500),
        foreign_resident: false,
        marginal_tax_rate: dec!(0.45),
    };
    let resident = capital_gains_tax(&base);
    let foreign = capital_gains_tax(&CgtInput {
        foreign_resident: true,
        ..base
    });
    assert_eq!(foreign.taxable_gain, resident.taxable_gain * dec!(2));
    assert_eq!(foreign.withholding_amount, resident.withholding_amount);
}

#[test]
fn test_use_case_envelope() {
    let input = UseCaseInput {
        buyer: BuyerProfile::individual(CitizenshipStatus::ForeignNational),
        property: PropertyProfile::new(
            PropertyType::NewDwelling,
            Jurisdiction::QLD,
            dec!(650_000),
        )
        .unwrap(),
        investment: InvestmentInputs::new(dec!(680), dec!(450_000), 10),
        cost_options: CostOptions::default(),
        regulations: None,
    };
    let out = compare_use_cases(&input).unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert!(!out.result.reasoning.is_empty());
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(24))]

    #[test]
    fn prop_identities_hold_and_output_is_repeatable(
        value_k in 300u32..3_000,
        lvr_pct in 0u32..91,
        rent_pct_of_value in 2u32..7,
        growth_bp in -300i32..1_000,
        rate_bp in 300u32..1_000,
        hold in 1u32..31,
        pt_idx in 0usize..4,
    ) {
        let value = Decimal::from(value_k) * dec!(1000);
        let loan = (value * Decimal::from(lvr_pct) / dec!(100)).round_dp(0);
        let weekly = (value * Decimal::from(rent_pct_of_value) / dec!(100) / dec!(52)).round_dp(0);
        let pt = PropertyType::ALL[pt_idx];

        let mut inputs = InvestmentInputs::new(weekly, loan, hold);
        inputs.capital_growth = Some(Decimal::new(growth_bp as i64, 4));
        inputs.interest_rate = Some(Decimal::new(rate_bp as i64, 4));

        let buyer = BuyerProfile::individual(CitizenshipStatus::PermanentResident);
        let property = PropertyProfile::new(pt, Jurisdiction::NSW, value).unwrap();
        let options = CostOptions { loan_amount: Some(loan), ..Default::default() };
        let costs = compute_costs(&buyer, &property, &options).unwrap();

        let a = analyze(&inputs, value, Jurisdiction::NSW, pt, &costs).unwrap();
        prop_assert_eq!(a.projections.len() as u32, hold);

        let again = analyze(&inputs, value, Jurisdiction::NSW, pt, &costs).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&again).unwrap()
        );

        let cash_invested = costs.total_investment_cost - loan;
        let mut prev_equity = value - loan;
        let mut prev_return = prev_equity - cash_invested;
        for row in &a.projections {
            prop_assert_eq!(row.equity, row.property_value - row.loan_balance);
            prop_assert_eq!(
                row.cumulative_return,
                prev_return + row.cash_flow_after_tax + (row.equity - prev_equity)
            );
            prop_assert!(row.loan_balance >= Decimal::ZERO);
            prev_equity = row.equity;
            prev_return = row.cumulative_return;
        }
    }
}
