//! Which property types each effective status may acquire, and the
//! conditions attached. This is the only copy of the matrix.

use chrono::{Datelike, NaiveDate};

use crate::types::{CitizenshipStatus, PropertyType};

/// Months a temporary resident has to sell after ceasing to hold a visa.
pub const TEMPORARY_RESIDENT_DIVESTMENT_MONTHS: u32 = 6;

/// Years a foreign purchaser of vacant land has to begin construction.
pub const VACANT_LAND_CONSTRUCTION_YEARS: u32 = 4;

/// First and last day (inclusive) of the established-dwelling purchase ban
/// for foreign persons, as (year, month, day).
pub const ESTABLISHED_BAN_START: (i32, u32, u32) = (2025, 4, 1);
pub const ESTABLISHED_BAN_END: (i32, u32, u32) = (2027, 3, 31);

/// Exemption categories to the temporary ban. Reported as text only.
pub const ESTABLISHED_BAN_EXEMPTIONS: &[&str] = &[
    "Acquisitions that significantly increase housing supply (e.g. redevelopment adding dwellings)",
    "Build-to-rent and other large-scale housing developments",
    "Housing for workers in remote or regional areas",
    "Interests acquired by Pacific and Timor-Leste labour mobility scheme employers",
    "Foreign persons with a close connection to Australian citizens or permanent residents (e.g. spouses)",
];

const ALL_TYPES: &[PropertyType] = &[
    PropertyType::NewDwelling,
    PropertyType::EstablishedDwelling,
    PropertyType::VacantLand,
    PropertyType::Commercial,
];

const TEMPORARY_RESIDENT_TYPES: &[PropertyType] = &[PropertyType::NewDwelling];

const FOREIGN_NATIONAL_TYPES: &[PropertyType] =
    &[PropertyType::NewDwelling, PropertyType::VacantLand];

pub fn approval_required(status: CitizenshipStatus) -> bool {
    status.is_foreign_person()
}

pub fn allowed_property_types(status: CitizenshipStatus) -> &'static [PropertyType] {
    match status {
        CitizenshipStatus::Citizen | CitizenshipStatus::PermanentResident => ALL_TYPES,
        CitizenshipStatus::TemporaryResident => TEMPORARY_RESIDENT_TYPES,
        CitizenshipStatus::ForeignNational => FOREIGN_NATIONAL_TYPES,
    }
}

/// Whether a purchase on `date` falls inside the ban. An unknown date is
/// treated as inside it.
pub fn in_established_ban_window(date: Option<NaiveDate>) -> bool {
    match date {
        None => true,
        Some(d) => {
            let key = (d.year(), d.month(), d.day());
            key >= ESTABLISHED_BAN_START && key <= ESTABLISHED_BAN_END
        }
    }
}

/// Guidance for commonly held visa subclasses.
pub fn visa_guidance(subclass: &str) -> Option<&'static str> {
    let code = subclass.trim().trim_start_matches("subclass").trim();
    match code {
        "500" => Some(
            "Student visa holders may buy one new dwelling to live in while studying; \
             it must be sold when the visa ends",
        ),
        "482" | "494" => Some(
            "Employer-sponsored visa holders are temporary residents; the property \
             must be the principal place of residence",
        ),
        "485" => Some(
            "Graduate visa holders are temporary residents; plan for divestment if \
             permanent residency is not granted",
        ),
        "820" | "309" => Some(
            "Partner visa holders purchasing with an Australian citizen or permanent \
             resident spouse as joint tenants may be exempt from approval",
        ),
        "188" | "888" => Some(
            "Business innovation visa holders: permanent residency on grant of 888 \
             removes the approval requirement",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix() {
        assert_eq!(allowed_property_types(CitizenshipStatus::Citizen).len(), 4);
        assert_eq!(
            allowed_property_types(CitizenshipStatus::TemporaryResident),
            &[PropertyType::NewDwelling]
        );
        assert!(!allowed_property_types(CitizenshipStatus::ForeignNational)
            .contains(&PropertyType::EstablishedDwelling));
        assert!(approval_required(CitizenshipStatus::ForeignNational));
        assert!(!approval_required(CitizenshipStatus::PermanentResident));
    }

    #[test]
    fn test_ban_window_bounds() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert!(!in_established_ban_window(d(2025, 3, 31)));
        assert!(in_established_ban_window(d(2025, 4, 1)));
        assert!(in_established_ban_window(d(2027, 3, 31)));
        assert!(!in_established_ban_window(d(2027, 4, 1)));
        assert!(in_established_ban_window(None));
    }

    #[test]
    fn test_visa_guidance_lookup() {
        assert!(visa_guidance("500").is_some());
        assert!(visa_guidance("subclass 482").is_some());
        assert!(visa_guidance("999").is_none());
    }
}
