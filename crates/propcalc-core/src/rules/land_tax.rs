//! Annual land tax schedules (individual owners) and foreign owner surcharges.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::brackets::{bracket, lookup_bracket, BracketTable, DutyBracket};
use crate::types::{Jurisdiction, Money, Rate};

const fn tax(base: Money, rate: Rate, threshold: Money) -> DutyBracket {
    DutyBracket {
        base,
        rate,
        threshold,
    }
}

const NIL: DutyBracket = DutyBracket::flat(Decimal::ZERO);

pub static NSW_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "NSW land tax",
    bounded: &[
        bracket(dec!(1_075_000), NIL),
        bracket(dec!(6_571_000), tax(dec!(100), dec!(0.016), dec!(1_075_000))),
    ],
    top: tax(dec!(88_036), dec!(0.02), dec!(6_571_000)),
};

pub static VIC_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "VIC land tax",
    bounded: &[
        bracket(dec!(50_000), NIL),
        bracket(dec!(100_000), tax(dec!(500), dec!(0), dec!(0))),
        bracket(dec!(300_000), tax(dec!(975), dec!(0), dec!(0))),
        bracket(dec!(600_000), tax(dec!(1_350), dec!(0.003), dec!(300_000))),
        bracket(dec!(1_000_000), tax(dec!(2_250), dec!(0.006), dec!(600_000))),
        bracket(dec!(1_800_000), tax(dec!(4_650), dec!(0.009), dec!(1_000_000))),
        bracket(dec!(3_000_000), tax(dec!(11_850), dec!(0.0165), dec!(1_800_000))),
    ],
    top: tax(dec!(31_650), dec!(0.0265), dec!(3_000_000)),
};

pub static QLD_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "QLD land tax",
    bounded: &[
        bracket(dec!(600_000), NIL),
        bracket(dec!(1_000_000), tax(dec!(500), dec!(0.01), dec!(600_000))),
        bracket(dec!(3_000_000), tax(dec!(4_500), dec!(0.0165), dec!(1_000_000))),
        bracket(dec!(5_000_000), tax(dec!(37_500), dec!(0.0125), dec!(3_000_000))),
        bracket(dec!(10_000_000), tax(dec!(62_500), dec!(0.0175), dec!(5_000_000))),
    ],
    top: tax(dec!(150_000), dec!(0.0225), dec!(10_000_000)),
};

pub static WA_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "WA land tax",
    bounded: &[
        bracket(dec!(300_000), NIL),
        bracket(dec!(420_000), tax(dec!(300), dec!(0), dec!(0))),
        bracket(dec!(1_000_000), tax(dec!(300), dec!(0.0025), dec!(420_000))),
        bracket(dec!(1_800_000), tax(dec!(1_750), dec!(0.009), dec!(1_000_000))),
        bracket(dec!(5_000_000), tax(dec!(8_950), dec!(0.018), dec!(1_800_000))),
        bracket(dec!(11_000_000), tax(dec!(66_550), dec!(0.02), dec!(5_000_000))),
    ],
    top: tax(dec!(186_550), dec!(0.0267), dec!(11_000_000)),
};

pub static SA_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "SA land tax",
    bounded: &[
        bracket(dec!(751_000), NIL),
        bracket(dec!(1_227_000), tax(dec!(0), dec!(0.005), dec!(751_000))),
        bracket(dec!(1_713_000), tax(dec!(2_380), dec!(0.01), dec!(1_227_000))),
        bracket(dec!(2_200_000), tax(dec!(7_240), dec!(0.02), dec!(1_713_000))),
    ],
    top: tax(dec!(16_980), dec!(0.024), dec!(2_200_000)),
};

pub static TAS_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "TAS land tax",
    bounded: &[
        bracket(dec!(125_000), NIL),
        bracket(dec!(500_000), tax(dec!(50), dec!(0.0055), dec!(125_000))),
    ],
    top: tax(dec!(2_112.50), dec!(0.015), dec!(500_000)),
};

/// ACT rented residential land: fixed charge plus marginal rates from zero.
pub static ACT_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "ACT land tax (rented residential)",
    bounded: &[
        bracket(dec!(150_000), tax(dec!(1_750), dec!(0.0054), dec!(0))),
        bracket(dec!(275_000), tax(dec!(2_560), dec!(0.0064), dec!(150_000))),
        bracket(dec!(2_000_000), tax(dec!(3_360), dec!(0.0112), dec!(275_000))),
    ],
    top: tax(dec!(22_680), dec!(0.0115), dec!(2_000_000)),
};

pub static NT_LAND_TAX: BracketTable<DutyBracket> = BracketTable {
    name: "NT (no land tax)",
    bounded: &[],
    top: NIL,
};

pub fn land_tax_table(jurisdiction: Jurisdiction) -> &'static BracketTable<DutyBracket> {
    match jurisdiction {
        Jurisdiction::NSW => &NSW_LAND_TAX,
        Jurisdiction::VIC => &VIC_LAND_TAX,
        Jurisdiction::QLD => &QLD_LAND_TAX,
        Jurisdiction::WA => &WA_LAND_TAX,
        Jurisdiction::SA => &SA_LAND_TAX,
        Jurisdiction::TAS => &TAS_LAND_TAX,
        Jurisdiction::ACT => &ACT_LAND_TAX,
        Jurisdiction::NT => &NT_LAND_TAX,
    }
}

/// General land tax on the given land value.
pub fn general_land_tax(jurisdiction: Jurisdiction, land_value: Money) -> Money {
    let land_value = land_value.max(Decimal::ZERO);
    lookup_bracket(land_tax_table(jurisdiction), land_value).apply(land_value)
}

/// Absentee / foreign owner land tax surcharge, charged on the full land value.
pub fn foreign_land_tax_surcharge_rate(jurisdiction: Jurisdiction) -> Rate {
    match jurisdiction {
        Jurisdiction::NSW => dec!(0.05),
        Jurisdiction::VIC => dec!(0.04),
        Jurisdiction::QLD => dec!(0.03),
        Jurisdiction::TAS => dec!(0.02),
        Jurisdiction::ACT => dec!(0.0075),
        Jurisdiction::WA | Jurisdiction::SA | Jurisdiction::NT => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::brackets::is_well_formed;

    #[test]
    fn test_below_threshold_is_nil() {
        assert!(general_land_tax(Jurisdiction::NSW, dec!(300_000)).is_zero());
        assert!(general_land_tax(Jurisdiction::QLD, dec!(600_000)).is_zero());
    }

    #[test]
    fn test_vic_fixed_bands() {
        assert_eq!(general_land_tax(Jurisdiction::VIC, dec!(80_000)), dec!(500));
        assert_eq!(general_land_tax(Jurisdiction::VIC, dec!(300_000)), dec!(975));
    }

    #[test]
    fn test_tas_and_act() {
        assert_eq!(general_land_tax(Jurisdiction::TAS, dec!(300_000)), dec!(1_012.5));
        assert_eq!(general_land_tax(Jurisdiction::ACT, dec!(300_000)), dec!(3_640));
    }

    #[test]
    fn test_nt_has_no_land_tax() {
        assert!(general_land_tax(Jurisdiction::NT, dec!(50_000_000)).is_zero());
        assert!(foreign_land_tax_surcharge_rate(Jurisdiction::NT).is_zero());
    }

    #[test]
    fn test_tables_well_formed() {
        for j in Jurisdiction::ALL {
            assert!(is_well_formed(land_tax_table(j)), "{j} land tax table malformed");
        }
    }
}
