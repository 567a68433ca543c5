//! Approximations that stand in for state-specific programs.
//!
//! Real first-home concessions and vacancy fee schedules vary by state and
//! change often. These are flat estimates and named as such.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::profiles::BuyerProfile;
use crate::types::{CitizenshipStatus, Money, Rate};

/// Highest purchase price that still receives the first-home estimate.
pub const FIRST_HOME_CONCESSION_CEILING: Money = dec!(800_000);

/// Share of duty still payable once the concession applies.
pub const FIRST_HOME_DUTY_FACTOR: Rate = dec!(0.5);

/// Annual vacancy fee as a share of property value.
pub const VACANCY_FEE_RATE: Rate = dec!(0.0075);

/// Duty after the estimated first-home concession. Duty is returned
/// unchanged when the flag is off or the value exceeds the ceiling.
pub fn estimate_first_home_concession(duty: Money, value: Money, first_home: bool) -> Money {
    if first_home && value <= FIRST_HOME_CONCESSION_CEILING {
        duty * FIRST_HOME_DUTY_FACTOR
    } else {
        duty
    }
}

/// Annual vacancy fee exposure. Only foreign nationals (after the
/// ordinary-residence rule) are liable.
pub fn estimate_vacancy_fee(buyer: &BuyerProfile, value: Money) -> Money {
    if buyer.effective_status() == CitizenshipStatus::ForeignNational {
        value * VACANCY_FEE_RATE
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concession_halves_below_ceiling() {
        assert_eq!(
            estimate_first_home_concession(dec!(20_000), dec!(600_000), true),
            dec!(10_000)
        );
        assert_eq!(
            estimate_first_home_concession(dec!(20_000), dec!(800_000), true),
            dec!(10_000)
        );
    }

    #[test]
    fn test_concession_not_applied() {
        assert_eq!(
            estimate_first_home_concession(dec!(20_000), dec!(800_001), true),
            dec!(20_000)
        );
        assert_eq!(
            estimate_first_home_concession(dec!(20_000), dec!(500_000), false),
            dec!(20_000)
        );
    }

    #[test]
    fn test_vacancy_fee_only_foreign_nationals() {
        let foreign = BuyerProfile::individual(CitizenshipStatus::ForeignNational);
        let temporary = BuyerProfile::individual(CitizenshipStatus::TemporaryResident);
        assert_eq!(estimate_vacancy_fee(&foreign, dec!(1_000_000)), dec!(7_500));
        assert_eq!(estimate_vacancy_fee(&temporary, dec!(1_000_000)), Decimal::ZERO);
    }
}
