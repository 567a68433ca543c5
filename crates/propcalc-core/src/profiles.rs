//! Buyer and property profiles.
//!
//! Both types can only be built through validating constructors; serde
//! deserialisation goes through the same checks via `try_from`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::types::{
    CitizenshipStatus, EntityType, Jurisdiction, Money, PropertyClassification, PropertyType,
};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// BuyerProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BuyerProfileRecord")]
pub struct BuyerProfile {
    citizenship_status: CitizenshipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    visa_subclass: Option<String>,
    ordinarily_resident: bool,
    entity_type: EntityType,
}

#[derive(Debug, Clone, Deserialize)]
struct BuyerProfileRecord {
    citizenship_status: CitizenshipStatus,
    #[serde(default)]
    visa_subclass: Option<String>,
    #[serde(default = "default_true")]
    ordinarily_resident: bool,
    #[serde(default)]
    entity_type: EntityType,
}

fn default_true() -> bool {
    true
}

impl TryFrom<BuyerProfileRecord> for BuyerProfile {
    type Error = PropCalcError;

    fn try_from(r: BuyerProfileRecord) -> Result<Self, Self::Error> {
        BuyerProfile::new(
            r.citizenship_status,
            r.visa_subclass,
            r.ordinarily_resident,
            r.entity_type,
        )
    }
}

impl BuyerProfile {
    pub fn new(
        citizenship_status: CitizenshipStatus,
        visa_subclass: Option<String>,
        ordinarily_resident: bool,
        entity_type: EntityType,
    ) -> PropCalcResult<Self> {
        let visa_subclass = match visa_subclass {
            Some(v) if v.trim().is_empty() => {
                return Err(PropCalcError::invalid(
                    "visa_subclass",
                    "Visa subclass must not be empty when provided",
                ));
            }
            Some(v) => Some(v.trim().to_string()),
            None => None,
        };

        Ok(BuyerProfile {
            citizenship_status,
            visa_subclass,
            ordinarily_resident,
            entity_type,
        })
    }

    /// An individual with the given status, ordinarily resident.
    pub fn individual(status: CitizenshipStatus) -> Self {
        BuyerProfile {
            citizenship_status: status,
            visa_subclass: None,
            ordinarily_resident: true,
            entity_type: EntityType::Individual,
        }
    }

    pub fn citizenship_status(&self) -> CitizenshipStatus {
        self.citizenship_status
    }

    pub fn visa_subclass(&self) -> Option<&str> {
        self.visa_subclass.as_deref()
    }

    pub fn ordinarily_resident(&self) -> bool {
        self.ordinarily_resident
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Status used by every downstream rule. Citizens and permanent residents
    /// who are not ordinarily resident are treated as foreign nationals.
    pub fn effective_status(&self) -> CitizenshipStatus {
        match self.citizenship_status {
            CitizenshipStatus::Citizen | CitizenshipStatus::PermanentResident
                if !self.ordinarily_resident =>
            {
                CitizenshipStatus::ForeignNational
            }
            status => status,
        }
    }

    /// Foreign person for approval, surcharge and fee purposes.
    pub fn is_foreign_for_fees(&self) -> bool {
        self.effective_status().is_foreign_person()
    }
}

// ---------------------------------------------------------------------------
// PropertyProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PropertyProfileRecord")]
pub struct PropertyProfile {
    property_type: PropertyType,
    jurisdiction: Jurisdiction,
    value: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<PropertyClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bedrooms: Option<u32>,
    first_home: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
struct PropertyProfileRecord {
    property_type: PropertyType,
    jurisdiction: Jurisdiction,
    value: Money,
    #[serde(default)]
    classification: Option<PropertyClassification>,
    #[serde(default)]
    bedrooms: Option<u32>,
    #[serde(default)]
    first_home: bool,
    #[serde(default)]
    purchase_date: Option<NaiveDate>,
}

impl TryFrom<PropertyProfileRecord> for PropertyProfile {
    type Error = PropCalcError;

    fn try_from(r: PropertyProfileRecord) -> Result<Self, Self::Error> {
        let mut profile = PropertyProfile::new(r.property_type, r.jurisdiction, r.value)?;
        profile.classification = r.classification;
        profile.bedrooms = r.bedrooms;
        profile.first_home = r.first_home;
        profile.purchase_date = r.purchase_date;
        Ok(profile)
    }
}

impl PropertyProfile {
    pub fn new(
        property_type: PropertyType,
        jurisdiction: Jurisdiction,
        value: Money,
    ) -> PropCalcResult<Self> {
        if value <= Decimal::ZERO {
            return Err(PropCalcError::invalid(
                "value",
                "Property value must be positive",
            ));
        }
        Ok(PropertyProfile {
            property_type,
            jurisdiction,
            value,
            classification: None,
            bedrooms: None,
            first_home: false,
            purchase_date: None,
        })
    }

    pub fn with_classification(mut self, classification: PropertyClassification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn with_first_home(mut self, first_home: bool) -> Self {
        self.first_home = first_home;
        self
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn classification(&self) -> Option<PropertyClassification> {
        self.classification
    }

    pub fn bedrooms(&self) -> Option<u32> {
        self.bedrooms
    }

    pub fn first_home(&self) -> bool {
        self.first_home
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_resident_citizen_is_foreign() {
        let buyer =
            BuyerProfile::new(CitizenshipStatus::Citizen, None, false, EntityType::Individual)
                .unwrap();
        assert_eq!(buyer.effective_status(), CitizenshipStatus::ForeignNational);
        assert!(buyer.is_foreign_for_fees());
    }

    #[test]
    fn test_resident_pr_keeps_status() {
        let buyer = BuyerProfile::individual(CitizenshipStatus::PermanentResident);
        assert_eq!(buyer.effective_status(), CitizenshipStatus::PermanentResident);
        assert!(!buyer.is_foreign_for_fees());
    }

    #[test]
    fn test_temporary_resident_stays_temporary_even_if_absent() {
        let buyer = BuyerProfile::new(
            CitizenshipStatus::TemporaryResident,
            Some("482".into()),
            false,
            EntityType::Individual,
        )
        .unwrap();
        assert_eq!(buyer.effective_status(), CitizenshipStatus::TemporaryResident);
    }

    #[test]
    fn test_blank_visa_rejected() {
        let err = BuyerProfile::new(
            CitizenshipStatus::TemporaryResident,
            Some("  ".into()),
            true,
            EntityType::Individual,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_zero_value_property_rejected() {
        assert!(PropertyProfile::new(PropertyType::NewDwelling, Jurisdiction::NSW, dec!(0)).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"property_type":"new_dwelling","jurisdiction":"VIC","value":"-5"}"#;
        assert!(serde_json::from_str::<PropertyProfile>(bad).is_err());

        let good = r#"{"property_type":"vacant_land","jurisdiction":"QLD","value":"450000","first_home":true}"#;
        let p: PropertyProfile = serde_json::from_str(good).unwrap();
        assert_eq!(p.value(), dec!(450000));
        assert!(p.first_home());
        assert_eq!(p.property_type(), PropertyType::VacantLand);
    }

    #[test]
    fn test_buyer_defaults_when_deserializing() {
        let b: BuyerProfile =
            serde_json::from_str(r#"{"citizenship_status":"foreign_national"}"#).unwrap();
        assert!(b.ordinarily_resident());
        assert_eq!(b.entity_type(), EntityType::Individual);
    }
}
