use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profiles::BuyerProfile;
use crate::rules::purchase_rights::{
    allowed_property_types, approval_required, in_established_ban_window, visa_guidance,
    ESTABLISHED_BAN_EXEMPTIONS, TEMPORARY_RESIDENT_DIVESTMENT_MONTHS,
    VACANT_LAND_CONSTRUCTION_YEARS,
};
use crate::types::{with_metadata, CitizenshipStatus, ComputationOutput, EntityType, PropertyType};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub buyer: BuyerProfile,
    pub property_type: PropertyType,
    /// Contract date; unknown dates are treated as inside the temporary ban.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Status after the ordinary-residence rule is applied
    pub effective_status: CitizenshipStatus,
    pub approval_required: bool,
    pub allowed_property_types: Vec<PropertyType>,
    /// Whether the requested property type is in `allowed_property_types`
    pub can_purchase: bool,
    /// Foreign person purchasing inside the established-dwelling ban window
    pub established_ban_applies: bool,
    /// Advisory text only
    pub restrictions: Vec<String>,
    /// Advisory text only
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Determine approval requirement and purchasable property types.
pub fn evaluate(
    buyer: &BuyerProfile,
    property_type: PropertyType,
    purchase_date: Option<NaiveDate>,
) -> EligibilityResult {
    let status = buyer.effective_status();
    let approval_required = approval_required(status);
    let allowed = allowed_property_types(status).to_vec();
    let can_purchase = allowed.contains(&property_type);
    let established_ban_applies =
        status.is_foreign_person() && in_established_ban_window(purchase_date);

    let mut restrictions = Vec::new();
    let mut recommendations = Vec::new();

    if status != buyer.citizenship_status() {
        restrictions.push(
            "Not ordinarily resident in Australia: treated as a foreign person for approval, \
             surcharge and fee purposes"
                .to_string(),
        );
    }

    match status {
        CitizenshipStatus::Citizen | CitizenshipStatus::PermanentResident => {
            recommendations
                .push("No foreign investment approval is required for this purchase".to_string());
        }
        CitizenshipStatus::TemporaryResident => {
            restrictions.push(
                "Foreign investment approval is required before purchase".to_string(),
            );
            restrictions.push("Only new dwellings may be purchased".to_string());
            restrictions.push(
                "The dwelling must be your principal place of residence and cannot be rented out"
                    .to_string(),
            );
            restrictions.push(format!(
                "The dwelling must be sold within {TEMPORARY_RESIDENT_DIVESTMENT_MONTHS} months \
                 of ceasing to hold a temporary visa or leaving Australia"
            ));
            recommendations.push(
                "Consider new or off-the-plan dwellings, which are the only eligible category"
                    .to_string(),
            );
        }
        CitizenshipStatus::ForeignNational => {
            restrictions.push(
                "Foreign investment approval is required before purchase".to_string(),
            );
            restrictions.push(
                "Established dwellings may only be acquired under narrow exemptions, such as \
                 redevelopment that increases housing supply"
                    .to_string(),
            );
            restrictions.push(format!(
                "Vacant land approval requires construction to begin within \
                 {VACANT_LAND_CONSTRUCTION_YEARS} years"
            ));
            recommendations.push(
                "An annual vacancy fee applies if the dwelling is not occupied or genuinely \
                 available for rent for at least 6 months each year"
                    .to_string(),
            );
        }
    }

    if approval_required {
        recommendations.push(
            "Lodge the foreign investment application and pay the fee before exchanging \
             contracts, or make the contract conditional on approval"
                .to_string(),
        );
        recommendations.push(
            "Budget for foreign purchaser duty and land tax surcharges in the chosen state"
                .to_string(),
        );
    }

    if established_ban_applies && property_type == PropertyType::EstablishedDwelling {
        debug!(?status, "established dwelling ban applied");
        restrictions.push(
            "Temporary ban from 1 April 2025 to 31 March 2027 on foreign persons purchasing \
             established dwellings"
                .to_string(),
        );
        for exemption in ESTABLISHED_BAN_EXEMPTIONS {
            restrictions.push(format!("Ban exemption category: {exemption}"));
        }
    }

    if !can_purchase {
        restrictions.push(format!(
            "Purchase of {property_type} is not permitted for this buyer"
        ));
    }

    match buyer.entity_type() {
        EntityType::Individual => {}
        EntityType::Company | EntityType::Trust if status.is_foreign_person() => {
            restrictions.push(
                "The purchasing entity is a foreign person; approval conditions attach to the \
                 entity and its substantial interest holders"
                    .to_string(),
            );
        }
        EntityType::Company | EntityType::Trust => {
            recommendations.push(
                "Check whether foreign persons hold a substantial interest (20% or more) in the \
                 entity; if so it is itself a foreign person"
                    .to_string(),
            );
        }
    }

    if status == CitizenshipStatus::TemporaryResident {
        if let Some(guidance) = buyer.visa_subclass().and_then(visa_guidance) {
            recommendations.push(guidance.to_string());
        }
    }

    EligibilityResult {
        effective_status: status,
        approval_required,
        allowed_property_types: allowed,
        can_purchase,
        established_ban_applies,
        restrictions,
        recommendations,
    }
}

/// Eligibility assessment wrapped in the standard output envelope.
pub fn assess_eligibility(
    input: &EligibilityInput,
) -> PropCalcResult<ComputationOutput<EligibilityResult>> {
    debug!(property_type = ?input.property_type, "assessing eligibility");
    let result = evaluate(&input.buyer, input.property_type, input.purchase_date);

    let mut warnings = Vec::new();
    if !result.can_purchase {
        warnings.push(format!(
            "This buyer cannot purchase {} without a specific exemption",
            input.property_type
        ));
    }

    Ok(with_metadata(
        "Foreign investment eligibility (effective status, property type matrix, temporary ban)",
        input,
        warnings,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
