//! Foreign investment application fee schedules (residential, 2025/26).
//!
//! Established dwellings carry three times the new-dwelling fee following the
//! 2025 reform. Commercial acquisitions are priced on the new-dwelling
//! schedule as a simplification.

use rust_decimal_macros::dec;

use super::brackets::{bracket, lookup_bracket, BracketTable};
use crate::types::{Money, PropertyType};

pub static NEW_DWELLING_FEES: BracketTable<Money> = BracketTable {
    name: "FIRB application fee (new dwelling, vacant land)",
    bounded: &[
        bracket(dec!(75_000), dec!(4_500)),
        bracket(dec!(1_000_000), dec!(15_100)),
        bracket(dec!(2_000_000), dec!(30_300)),
        bracket(dec!(3_000_000), dec!(60_600)),
        bracket(dec!(4_000_000), dec!(91_000)),
        bracket(dec!(5_000_000), dec!(121_300)),
        bracket(dec!(6_000_000), dec!(151_700)),
        bracket(dec!(7_000_000), dec!(182_000)),
        bracket(dec!(8_000_000), dec!(212_400)),
        bracket(dec!(9_000_000), dec!(242_700)),
        bracket(dec!(10_000_000), dec!(273_100)),
    ],
    top: dec!(303_400),
};

pub static ESTABLISHED_DWELLING_FEES: BracketTable<Money> = BracketTable {
    name: "FIRB application fee (established dwelling)",
    bounded: &[
        bracket(dec!(75_000), dec!(13_500)),
        bracket(dec!(1_000_000), dec!(45_300)),
        bracket(dec!(2_000_000), dec!(90_900)),
        bracket(dec!(3_000_000), dec!(181_800)),
        bracket(dec!(4_000_000), dec!(273_000)),
        bracket(dec!(5_000_000), dec!(363_900)),
        bracket(dec!(6_000_000), dec!(455_100)),
        bracket(dec!(7_000_000), dec!(546_000)),
        bracket(dec!(8_000_000), dec!(637_200)),
        bracket(dec!(9_000_000), dec!(728_100)),
        bracket(dec!(10_000_000), dec!(819_300)),
    ],
    top: dec!(910_200),
};

/// Fee schedule for a property type.
pub fn fee_table(property_type: PropertyType) -> &'static BracketTable<Money> {
    match property_type {
        PropertyType::EstablishedDwelling => &ESTABLISHED_DWELLING_FEES,
        PropertyType::NewDwelling | PropertyType::VacantLand | PropertyType::Commercial => {
            &NEW_DWELLING_FEES
        }
    }
}

/// Standard (non-expedited) application fee.
pub fn application_fee(property_type: PropertyType, value: Money) -> Money {
    *lookup_bracket(fee_table(property_type), value)
}
