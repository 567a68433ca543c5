use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::estimates::{
    estimate_first_home_concession, estimate_vacancy_fee, FIRST_HOME_CONCESSION_CEILING,
};
use crate::benchmarks::{BenchmarkOverrides, Benchmarks};
use crate::error::PropCalcError;
use crate::profiles::{BuyerProfile, PropertyProfile};
use crate::rules::purchase_rights::{allowed_property_types, approval_required};
use crate::rules::{firb, land_tax, stamp_duty};
use crate::types::{with_metadata, ComputationOutput, Money, PropertyType, Rate};
use crate::PropCalcResult;

/// Flat legal fee component.
const LEGAL_BASE: Money = dec!(1_500);
/// Legal fee component proportional to value.
const LEGAL_RATE: Rate = dec!(0.001);
const LEGAL_CAP: Money = dec!(5_000);

/// Application, valuation and settlement fees charged on any new loan.
const LOAN_FIXED_COSTS: Money = dec!(1_200);

/// Land component of a property's value when not supplied.
const DEFAULT_LAND_SHARE: Rate = dec!(0.30);

const INSURANCE_CAP: Money = dec!(3_000);

const VACANT_LAND_COUNCIL_RATES: Money = dec!(1_000);
const VACANT_LAND_INSURANCE: Money = dec!(300);
const VACANT_LAND_MAINTENANCE: Money = dec!(500);

/// Loan-to-value ratio above which lenders mortgage insurance is likely.
const HIGH_LVR: Rate = dec!(0.80);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Purchase-specific settings that are not part of either profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOptions {
    /// Expedited FIRB processing doubles the application fee
    pub expedited: bool,
    /// Share of the price paid from the buyer's own funds (0.20 = 20%)
    pub deposit_rate: Rate,
    /// Explicit loan amount; derived from `deposit_rate` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    /// Assessed land value for land tax; 30% of value when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_value: Option<Money>,
    #[serde(skip_serializing_if = "BenchmarkOverrides::is_empty")]
    pub benchmarks: BenchmarkOverrides,
}

impl Default for CostOptions {
    fn default() -> Self {
        CostOptions {
            expedited: false,
            deposit_rate: dec!(0.20),
            loan_amount: None,
            land_value: None,
            benchmarks: BenchmarkOverrides::default(),
        }
    }
}

/// One-off costs at purchase. `total` excludes the price itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpfrontCosts {
    pub property_price: Money,
    pub firb_fee: Money,
    pub stamp_duty: Money,
    pub foreign_surcharge: Money,
    pub legal_fees: Money,
    pub inspection_fees: Money,
    pub loan_costs: Money,
    pub total: Money,
}

/// Annual holding costs in the first year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingCosts {
    /// General land tax plus any foreign owner surcharge
    pub land_tax: Money,
    pub council_rates: Money,
    pub insurance: Money,
    pub maintenance: Money,
    pub vacancy_fee: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub upfront: UpfrontCosts,
    pub ongoing: OngoingCosts,
    /// Price plus all upfront costs
    pub total_investment_cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInput {
    pub buyer: BuyerProfile,
    pub property: PropertyProfile,
    #[serde(default)]
    pub options: CostOptions,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full upfront and ongoing cost breakdown for one purchase.
pub fn compute_costs(
    buyer: &BuyerProfile,
    property: &PropertyProfile,
    options: &CostOptions,
) -> PropCalcResult<CostBreakdown> {
    let value = property.value();
    let loan = loan_amount(value, options)?;
    let benchmarks = options.benchmarks.resolve();

    let upfront = upfront_costs(buyer, property, options, loan, &benchmarks);
    let ongoing = ongoing_costs(buyer, property, options, &benchmarks)?;
    let total_investment_cost = value + upfront.total;

    Ok(CostBreakdown {
        upfront,
        ongoing,
        total_investment_cost,
    })
}

/// Cost breakdown wrapped in the standard output envelope.
pub fn calculate_costs(input: &CostInput) -> PropCalcResult<ComputationOutput<CostBreakdown>> {
    debug!(
        jurisdiction = %input.property.jurisdiction(),
        property_type = ?input.property.property_type(),
        "calculating purchase costs"
    );
    let breakdown = compute_costs(&input.buyer, &input.property, &input.options)?;

    let mut warnings = Vec::new();
    let property_type = input.property.property_type();
    if !allowed_property_types(input.buyer.effective_status()).contains(&property_type) {
        warnings.push(format!(
            "This buyer is not permitted to purchase {property_type}; costs are indicative only"
        ));
    }
    if input.property.first_home() && input.property.value() > FIRST_HOME_CONCESSION_CEILING {
        warnings.push(
            "First home flag ignored: value exceeds the first home concession ceiling".into(),
        );
    }
    let loan = loan_amount(input.property.value(), &input.options)?;
    let lvr = loan / input.property.value();
    if lvr > HIGH_LVR {
        warnings.push(format!(
            "LVR of {:.1}% exceeds 80%; lenders mortgage insurance is not included",
            lvr * dec!(100)
        ));
    }

    Ok(with_metadata(
        "Upfront and ongoing purchase costs (FIRB fee, transfer duty, foreign surcharges, land tax)",
        input,
        warnings,
        breakdown,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn loan_amount(value: Money, options: &CostOptions) -> PropCalcResult<Money> {
    if options.deposit_rate < Decimal::ZERO || options.deposit_rate > Decimal::ONE {
        return Err(PropCalcError::invalid(
            "deposit_rate",
            "Deposit rate must be between 0 and 1",
        ));
    }
    match options.loan_amount {
        Some(loan) if loan < Decimal::ZERO => Err(PropCalcError::invalid(
            "loan_amount",
            "Loan amount cannot be negative",
        )),
        Some(loan) if loan > value => Err(PropCalcError::invalid(
            "loan_amount",
            "Loan amount cannot exceed the property value",
        )),
        Some(loan) => Ok(loan),
        None => Ok(value * (Decimal::ONE - options.deposit_rate)),
    }
}

fn upfront_costs(
    buyer: &BuyerProfile,
    property: &PropertyProfile,
    options: &CostOptions,
    loan: Money,
    benchmarks: &Benchmarks,
) -> UpfrontCosts {
    let value = property.value();
    let jurisdiction = property.jurisdiction();

    let firb_fee = if approval_required(buyer.effective_status()) {
        let fee = firb::application_fee(property.property_type(), value);
        if options.expedited {
            fee * dec!(2)
        } else {
            fee
        }
    } else {
        Decimal::ZERO
    };

    let general_duty = stamp_duty::transfer_duty(jurisdiction, value);
    let stamp_duty = estimate_first_home_concession(general_duty, value, property.first_home());
    if stamp_duty != general_duty {
        debug!(%general_duty, %stamp_duty, "first home concession estimate applied");
    }

    let foreign_surcharge = if buyer.is_foreign_for_fees() {
        value * stamp_duty::foreign_surcharge_rate(jurisdiction)
    } else {
        Decimal::ZERO
    };

    let legal_fees = (LEGAL_BASE + value * LEGAL_RATE).min(LEGAL_CAP);
    let inspection_fees = inspection_fee(property.property_type());

    let loan_costs = if loan > Decimal::ZERO {
        LOAN_FIXED_COSTS + loan * benchmarks.loan_setup_rate
    } else {
        Decimal::ZERO
    };

    let total = firb_fee + stamp_duty + foreign_surcharge + legal_fees + inspection_fees + loan_costs;

    UpfrontCosts {
        property_price: value,
        firb_fee,
        stamp_duty,
        foreign_surcharge,
        legal_fees,
        inspection_fees,
        loan_costs,
        total,
    }
}

fn ongoing_costs(
    buyer: &BuyerProfile,
    property: &PropertyProfile,
    options: &CostOptions,
    benchmarks: &Benchmarks,
) -> PropCalcResult<OngoingCosts> {
    let value = property.value();
    let jurisdiction = property.jurisdiction();

    let land_value = match options.land_value {
        Some(lv) if lv < Decimal::ZERO => {
            return Err(PropCalcError::invalid(
                "land_value",
                "Land value cannot be negative",
            ));
        }
        Some(lv) => lv,
        None => value * DEFAULT_LAND_SHARE,
    };

    let mut land_tax = land_tax::general_land_tax(jurisdiction, land_value);
    if buyer.is_foreign_for_fees() {
        land_tax += land_value * land_tax::foreign_land_tax_surcharge_rate(jurisdiction);
    }

    let (council_rates, insurance, maintenance) =
        if property.property_type() == PropertyType::VacantLand {
            (
                VACANT_LAND_COUNCIL_RATES,
                VACANT_LAND_INSURANCE,
                VACANT_LAND_MAINTENANCE,
            )
        } else {
            (
                value * benchmarks.council_rate,
                (value * benchmarks.insurance_rate).min(INSURANCE_CAP),
                value * benchmarks.maintenance_rate,
            )
        };

    let vacancy_fee = estimate_vacancy_fee(buyer, value);
    let total = land_tax + council_rates + insurance + maintenance + vacancy_fee;

    Ok(OngoingCosts {
        land_tax,
        council_rates,
        insurance,
        maintenance,
        vacancy_fee,
        total,
    })
}

fn inspection_fee(property_type: PropertyType) -> Money {
    match property_type {
        PropertyType::NewDwelling => dec!(400),
        PropertyType::EstablishedDwelling => dec!(600),
        PropertyType::VacantLand => dec!(300),
        PropertyType::Commercial => dec!(1_500),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CitizenshipStatus, Jurisdiction};

    fn property(pt: PropertyType, j: Jurisdiction, value: Money) -> PropertyProfile {
        PropertyProfile::new(pt, j, value).unwrap()
    }

    #[test]
    fn test_foreign_national_nsw_new_dwelling() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::ForeignNational);
        let p = property(PropertyType::NewDwelling, Jurisdiction::NSW, dec!(1_000_000));
        let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();

        assert_eq!(c.upfront.firb_fee, dec!(15_100));
        assert_eq!(c.upfront.foreign_surcharge, dec!(80_000));
        assert_eq!(c.upfront.stamp_duty, dec!(39_530));
        assert_eq!(c.upfront.legal_fees, dec!(2_500));
        assert_eq!(c.upfront.inspection_fees, dec!(400));
        // 1,200 + 800,000 * 0.001
        assert_eq!(c.upfront.loan_costs, dec!(2_000));
        assert_eq!(c.total_investment_cost, dec!(1_000_000) + c.upfront.total);
        assert!(c.total_investment_cost >= dec!(1_095_100));
    }

    #[test]
    fn test_citizen_pays_no_foreign_items() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::Citizen);
        let p = property(PropertyType::EstablishedDwelling, Jurisdiction::VIC, dec!(750_000));
        let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();
        assert_eq!(c.upfront.firb_fee, Decimal::ZERO);
        assert_eq!(c.upfront.foreign_surcharge, Decimal::ZERO);
        assert_eq!(c.ongoing.vacancy_fee, Decimal::ZERO);
    }

    #[test]
    fn test_expedited_doubles_fee() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::TemporaryResident);
        let p = property(PropertyType::NewDwelling, Jurisdiction::QLD, dec!(600_000));
        let opts = CostOptions {
            expedited: true,
            ..Default::default()
        };
        let c = compute_costs(&buyer, &p, &opts).unwrap();
        assert_eq!(c.upfront.firb_fee, dec!(30_200));
    }

    #[test]
    fn test_full_deposit_has_no_loan_costs() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::Citizen);
        let p = property(PropertyType::NewDwelling, Jurisdiction::WA, dec!(500_000));
        let opts = CostOptions {
            deposit_rate: Decimal::ONE,
            ..Default::default()
        };
        let c = compute_costs(&buyer, &p, &opts).unwrap();
        assert_eq!(c.upfront.loan_costs, Decimal::ZERO);
    }

    #[test]
    fn test_legal_fee_capped() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::Citizen);
        let p = property(PropertyType::Commercial, Jurisdiction::SA, dec!(9_000_000));
        let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();
        assert_eq!(c.upfront.legal_fees, dec!(5_000));
        assert_eq!(c.upfront.inspection_fees, dec!(1_500));
    }

    #[test]
    fn test_vacant_land_flat_ongoing() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::PermanentResident);
        let p = property(PropertyType::VacantLand, Jurisdiction::TAS, dec!(300_000));
        let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();
        assert_eq!(c.ongoing.council_rates, dec!(1_000));
        assert_eq!(c.ongoing.insurance, dec!(300));
        assert_eq!(c.ongoing.maintenance, dec!(500));
    }

    #[test]
    fn test_insurance_capped() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::Citizen);
        let p = property(PropertyType::NewDwelling, Jurisdiction::NT, dec!(2_000_000));
        let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();
        assert_eq!(c.ongoing.insurance, dec!(3_000));
        // NT levies no land tax
        assert_eq!(c.ongoing.land_tax, Decimal::ZERO);
    }

    #[test]
    fn test_foreign_land_tax_surcharge_added() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::ForeignNational);
        let p = property(PropertyType::NewDwelling, Jurisdiction::VIC, dec!(1_000_000));
        let opts = CostOptions {
            land_value: Some(dec!(400_000)),
            ..Default::default()
        };
        let c = compute_costs(&buyer, &p, &opts).unwrap();
        let general = land_tax::general_land_tax(crate::types::Jurisdiction::VIC, dec!(400_000));
        assert_eq!(c.ongoing.land_tax, general + dec!(16_000));
        assert_eq!(c.ongoing.vacancy_fee, dec!(7_500));
    }

    #[test]
    fn test_all_fields_non_negative() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::ForeignNational);
        for j in Jurisdiction::ALL {
            for pt in PropertyType::ALL {
                let p = property(pt, j, dec!(850_000));
                let c = compute_costs(&buyer, &p, &CostOptions::default()).unwrap();
                let items = [
                    c.upfront.firb_fee,
                    c.upfront.stamp_duty,
                    c.upfront.foreign_surcharge,
                    c.upfront.legal_fees,
                    c.upfront.inspection_fees,
                    c.upfront.loan_costs,
                    c.ongoing.land_tax,
                    c.ongoing.council_rates,
                    c.ongoing.insurance,
                    c.ongoing.maintenance,
                    c.ongoing.vacancy_fee,
                ];
                assert!(items.iter().all(|v| *v >= Decimal::ZERO), "{j} {pt}");
            }
        }
    }

    #[test]
    fn test_bad_options_rejected() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::Citizen);
        let p = property(PropertyType::NewDwelling, Jurisdiction::NSW, dec!(500_000));
        let over = CostOptions {
            deposit_rate: dec!(1.2),
            ..Default::default()
        };
        assert!(compute_costs(&buyer, &p, &over).is_err());
        let big_loan = CostOptions {
            loan_amount: Some(dec!(600_000)),
            ..Default::default()
        };
        assert!(compute_costs(&buyer, &p, &big_loan).is_err());
    }

    #[test]
    fn test_envelope_warnings() {
        let input = CostInput {
            buyer: BuyerProfile::individual(CitizenshipStatus::TemporaryResident),
            property: property(PropertyType::EstablishedDwelling, Jurisdiction::NSW, dec!(900_000))
                .with_first_home(true),
            options: CostOptions {
                deposit_rate: dec!(0.10),
                ..Default::default()
            },
        };
        let out = calculate_costs(&input).unwrap();
        assert_eq!(out.warnings.len(), 3);
    }
}
