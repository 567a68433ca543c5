//! Transfer (stamp) duty and foreign purchaser surcharge schedules.
//!
//! General rates for investment purchases. Where a jurisdiction switches to a
//! flat percentage of the whole value, the bracket has zero base and zero
//! threshold. ACT's top bracket is expressed marginally so the schedule never
//! decreases at the 1.455m boundary. NT's sliding formula below 525k is
//! approximated with two linear segments that meet it at 300k and 525k.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::brackets::{bracket, lookup_bracket, BracketTable, DutyBracket};
use crate::types::{Jurisdiction, Money, Rate};

const fn duty(base: Money, rate: Rate, threshold: Money) -> DutyBracket {
    DutyBracket {
        base,
        rate,
        threshold,
    }
}

pub static NSW_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "NSW transfer duty",
    bounded: &[
        bracket(dec!(17_000), duty(dec!(0), dec!(0.0125), dec!(0))),
        bracket(dec!(36_000), duty(dec!(212.50), dec!(0.015), dec!(17_000))),
        bracket(dec!(97_000), duty(dec!(497.50), dec!(0.0175), dec!(36_000))),
        bracket(dec!(364_000), duty(dec!(1_565), dec!(0.035), dec!(97_000))),
        bracket(dec!(1_212_000), duty(dec!(10_910), dec!(0.045), dec!(364_000))),
        bracket(dec!(3_636_000), duty(dec!(49_070), dec!(0.055), dec!(1_212_000))),
    ],
    top: duty(dec!(182_390), dec!(0.07), dec!(3_636_000)),
};

pub static VIC_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "VIC land transfer duty",
    bounded: &[
        bracket(dec!(25_000), duty(dec!(0), dec!(0.014), dec!(0))),
        bracket(dec!(130_000), duty(dec!(350), dec!(0.024), dec!(25_000))),
        bracket(dec!(960_000), duty(dec!(2_870), dec!(0.06), dec!(130_000))),
        bracket(dec!(2_000_000), DutyBracket::flat(dec!(0.055))),
    ],
    top: duty(dec!(110_000), dec!(0.065), dec!(2_000_000)),
};

pub static QLD_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "QLD transfer duty",
    bounded: &[
        bracket(dec!(5_000), DutyBracket::flat(dec!(0))),
        bracket(dec!(75_000), duty(dec!(0), dec!(0.015), dec!(5_000))),
        bracket(dec!(540_000), duty(dec!(1_050), dec!(0.035), dec!(75_000))),
        bracket(dec!(1_000_000), duty(dec!(17_325), dec!(0.045), dec!(540_000))),
    ],
    top: duty(dec!(38_025), dec!(0.0575), dec!(1_000_000)),
};

pub static WA_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "WA transfer duty",
    bounded: &[
        bracket(dec!(120_000), duty(dec!(0), dec!(0.019), dec!(0))),
        bracket(dec!(150_000), duty(dec!(2_280), dec!(0.0285), dec!(120_000))),
        bracket(dec!(360_000), duty(dec!(3_135), dec!(0.038), dec!(150_000))),
        bracket(dec!(725_000), duty(dec!(11_115), dec!(0.0475), dec!(360_000))),
    ],
    top: duty(dec!(28_452.50), dec!(0.0515), dec!(725_000)),
};

pub static SA_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "SA stamp duty on conveyances",
    bounded: &[
        bracket(dec!(12_000), duty(dec!(0), dec!(0.01), dec!(0))),
        bracket(dec!(30_000), duty(dec!(120), dec!(0.02), dec!(12_000))),
        bracket(dec!(50_000), duty(dec!(480), dec!(0.03), dec!(30_000))),
        bracket(dec!(100_000), duty(dec!(1_080), dec!(0.035), dec!(50_000))),
        bracket(dec!(200_000), duty(dec!(2_830), dec!(0.04), dec!(100_000))),
        bracket(dec!(250_000), duty(dec!(6_830), dec!(0.0425), dec!(200_000))),
        bracket(dec!(300_000), duty(dec!(8_955), dec!(0.0475), dec!(250_000))),
        bracket(dec!(500_000), duty(dec!(11_330), dec!(0.05), dec!(300_000))),
    ],
    top: duty(dec!(21_330), dec!(0.055), dec!(500_000)),
};

pub static TAS_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "TAS conveyance duty",
    bounded: &[
        bracket(dec!(3_000), duty(dec!(50), dec!(0), dec!(0))),
        bracket(dec!(25_000), duty(dec!(50), dec!(0.0175), dec!(3_000))),
        bracket(dec!(75_000), duty(dec!(435), dec!(0.0225), dec!(25_000))),
        bracket(dec!(200_000), duty(dec!(1_560), dec!(0.035), dec!(75_000))),
        bracket(dec!(375_000), duty(dec!(5_935), dec!(0.04), dec!(200_000))),
        bracket(dec!(725_000), duty(dec!(12_935), dec!(0.0425), dec!(375_000))),
    ],
    top: duty(dec!(27_810), dec!(0.045), dec!(725_000)),
};

pub static ACT_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "ACT conveyance duty (non-owner-occupier)",
    bounded: &[
        bracket(dec!(200_000), duty(dec!(0), dec!(0.012), dec!(0))),
        bracket(dec!(300_000), duty(dec!(2_400), dec!(0.022), dec!(200_000))),
        bracket(dec!(500_000), duty(dec!(4_600), dec!(0.034), dec!(300_000))),
        bracket(dec!(750_000), duty(dec!(11_400), dec!(0.0432), dec!(500_000))),
        bracket(dec!(1_000_000), duty(dec!(22_200), dec!(0.059), dec!(750_000))),
        bracket(dec!(1_455_000), duty(dec!(36_950), dec!(0.064), dec!(1_000_000))),
    ],
    top: duty(dec!(66_070), dec!(0.0454), dec!(1_455_000)),
};

pub static NT_DUTY: BracketTable<DutyBracket> = BracketTable {
    name: "NT stamp duty",
    bounded: &[
        bracket(dec!(300_000), duty(dec!(0), dec!(0.0347), dec!(0))),
        bracket(dec!(525_000), duty(dec!(10_410), dec!(0.0692), dec!(300_000))),
        bracket(dec!(3_000_000), DutyBracket::flat(dec!(0.0495))),
        bracket(dec!(5_000_000), DutyBracket::flat(dec!(0.0575))),
    ],
    top: DutyBracket::flat(dec!(0.0595)),
};

pub fn duty_table(jurisdiction: Jurisdiction) -> &'static BracketTable<DutyBracket> {
    match jurisdiction {
        Jurisdiction::NSW => &NSW_DUTY,
        Jurisdiction::VIC => &VIC_DUTY,
        Jurisdiction::QLD => &QLD_DUTY,
        Jurisdiction::WA => &WA_DUTY,
        Jurisdiction::SA => &SA_DUTY,
        Jurisdiction::TAS => &TAS_DUTY,
        Jurisdiction::ACT => &ACT_DUTY,
        Jurisdiction::NT => &NT_DUTY,
    }
}

/// General transfer duty before concessions or surcharges.
pub fn transfer_duty(jurisdiction: Jurisdiction, value: Money) -> Money {
    let value = value.max(Decimal::ZERO);
    lookup_bracket(duty_table(jurisdiction), value).apply(value)
}

/// Foreign purchaser additional duty rate.
pub fn foreign_surcharge_rate(jurisdiction: Jurisdiction) -> Rate {
    match jurisdiction {
        Jurisdiction::NSW => dec!(0.08),
        Jurisdiction::VIC => dec!(0.08),
        Jurisdiction::QLD => dec!(0.08),
        Jurisdiction::WA => dec!(0.07),
        Jurisdiction::SA => dec!(0.07),
        Jurisdiction::TAS => dec!(0.08),
        Jurisdiction::ACT => Decimal::ZERO,
        Jurisdiction::NT => Decimal::ZERO,
    }
}
