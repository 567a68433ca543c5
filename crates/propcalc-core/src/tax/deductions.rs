use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PropertyType, Rate};

/// Share of a new dwelling's value attributed to the building structure.
const BUILDING_SHARE: Rate = dec!(0.70);
/// Capital works deduction rate on the building share.
const BUILDING_RATE: Rate = dec!(0.025);
/// Capital works deductions stop once the building reaches this age.
const BUILDING_LIFE_YEARS: u32 = 40;

/// Share of value attributed to plant and equipment.
const PLANT_SHARE: Rate = dec!(0.10);
const PLANT_RATE: Rate = dec!(0.20);
const PLANT_LIFE_YEARS: u32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Annual deductible outgoings for one year of ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionInput {
    pub loan_interest: Money,
    pub council_rates: Money,
    pub land_tax: Money,
    pub management_fees: Money,
    pub maintenance: Money,
    pub insurance: Money,
    #[serde(default)]
    pub strata: Money,
    /// Any other deductible outgoing passed through unchanged
    #[serde(default)]
    pub other: Money,
    pub property_value: Money,
    pub property_type: PropertyType,
    /// Age of the building in whole years at the start of the tax year
    #[serde(default)]
    pub building_age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Depreciation {
    pub building: Money,
    pub plant: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub loan_interest: Money,
    pub council_rates: Money,
    pub land_tax: Money,
    pub management_fees: Money,
    pub maintenance: Money,
    pub insurance: Money,
    pub strata: Money,
    pub other: Money,
    pub depreciation: Depreciation,
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Depreciation claimable in a year. Only new dwellings qualify.
pub fn depreciation(value: Money, property_type: PropertyType, building_age: u32) -> Depreciation {
    if property_type != PropertyType::NewDwelling {
        return Depreciation {
            building: Decimal::ZERO,
            plant: Decimal::ZERO,
            total: Decimal::ZERO,
        };
    }

    let building = if building_age < BUILDING_LIFE_YEARS {
        value * BUILDING_SHARE * BUILDING_RATE
    } else {
        Decimal::ZERO
    };

    let plant = if building_age < PLANT_LIFE_YEARS {
        let remaining = Decimal::ONE - Decimal::from(building_age) * PLANT_RATE;
        value * PLANT_SHARE * PLANT_RATE * remaining
    } else {
        Decimal::ZERO
    };

    Depreciation {
        building,
        plant,
        total: building + plant,
    }
}

pub fn deductions(input: &DeductionInput) -> Deductions {
    let depreciation = depreciation(input.property_value, input.property_type, input.building_age);
    let total = input.loan_interest
        + input.council_rates
        + input.land_tax
        + input.management_fees
        + input.maintenance
        + input.insurance
        + input.strata
        + input.other
        + depreciation.total;

    Deductions {
        loan_interest: input.loan_interest,
        council_rates: input.council_rates,
        land_tax: input.land_tax,
        management_fees: input.management_fees,
        maintenance: input.maintenance,
        insurance: input.insurance,
        strata: input.strata,
        other: input.other,
        depreciation,
        total,
    }
}

/// Negative gearing relief: the net rental loss times the marginal rate.
/// Zero when rental income covers the deductions.
pub fn tax_benefit(total_deductions: Money, rental_income: Money, marginal_rate: Rate) -> Money {
    (total_deductions - rental_income).max(Decimal::ZERO) * marginal_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pt: PropertyType, age: u32) -> DeductionInput {
        DeductionInput {
            loan_interest: dec!(30_000),
            council_rates: dec!(2_000),
            land_tax: dec!(1_000),
            management_fees: dec!(2_500),
            maintenance: dec!(5_000),
            insurance: dec!(1_500),
            strata: dec!(3_000),
            other: Decimal::ZERO,
            property_value: dec!(600_000),
            property_type: pt,
            building_age: age,
        }
    }

    #[test]
    fn test_new_dwelling_depreciation() {
        let d = deductions(&input(PropertyType::NewDwelling, 0));
        // 600k * 0.7 * 0.025
        assert_eq!(d.depreciation.building, dec!(10_500));
        // 600k * 0.1 * 0.2
        assert_eq!(d.depreciation.plant, dec!(12_000));
        assert_eq!(d.total, dec!(45_000) + dec!(22_500));
    }

    #[test]
    fn test_plant_scaled_by_age() {
        let d = depreciation(dec!(600_000), PropertyType::NewDwelling, 2);
        assert_eq!(d.plant, dec!(7_200));
        let d = depreciation(dec!(600_000), PropertyType::NewDwelling, 5);
        assert_eq!(d.plant, Decimal::ZERO);
        assert_eq!(d.building, dec!(10_500));
    }

    #[test]
    fn test_old_building_no_capital_works() {
        let d = depreciation(dec!(600_000), PropertyType::NewDwelling, 40);
        assert_eq!(d.total, Decimal::ZERO);
    }

    #[test]
    fn test_established_passes_through() {
        let d = deductions(&input(PropertyType::EstablishedDwelling, 0));
        assert_eq!(d.depreciation.total, Decimal::ZERO);
        assert_eq!(d.total, dec!(45_000));
    }

    #[test]
    fn test_tax_benefit() {
        assert_eq!(tax_benefit(dec!(50_000), dec!(40_000), dec!(0.37)), dec!(3_700));
        assert_eq!(tax_benefit(dec!(30_000), dec!(40_000), dec!(0.37)), Decimal::ZERO);
    }
}
