use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in AUD unless a field says otherwise.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Australian state or territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    NSW,
    VIC,
    QLD,
    WA,
    SA,
    TAS,
    ACT,
    NT,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::NSW,
        Jurisdiction::VIC,
        Jurisdiction::QLD,
        Jurisdiction::WA,
        Jurisdiction::SA,
        Jurisdiction::TAS,
        Jurisdiction::ACT,
        Jurisdiction::NT,
    ];
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Jurisdiction::NSW => "NSW",
            Jurisdiction::VIC => "VIC",
            Jurisdiction::QLD => "QLD",
            Jurisdiction::WA => "WA",
            Jurisdiction::SA => "SA",
            Jurisdiction::TAS => "TAS",
            Jurisdiction::ACT => "ACT",
            Jurisdiction::NT => "NT",
        };
        f.write_str(code)
    }
}

/// Property category as used by the foreign investment framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    NewDwelling,
    EstablishedDwelling,
    VacantLand,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::NewDwelling,
        PropertyType::EstablishedDwelling,
        PropertyType::VacantLand,
        PropertyType::Commercial,
    ];
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyType::NewDwelling => "new dwelling",
            PropertyType::EstablishedDwelling => "established dwelling",
            PropertyType::VacantLand => "vacant land",
            PropertyType::Commercial => "commercial property",
        };
        f.write_str(name)
    }
}

/// Citizenship or residency status of the purchaser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenshipStatus {
    Citizen,
    PermanentResident,
    TemporaryResident,
    ForeignNational,
}

impl CitizenshipStatus {
    /// Temporary residents and foreign nationals are foreign persons for
    /// approval, surcharge and fee purposes.
    pub fn is_foreign_person(self) -> bool {
        matches!(
            self,
            CitizenshipStatus::TemporaryResident | CitizenshipStatus::ForeignNational
        )
    }
}

/// Legal form of the purchasing entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[default]
    Individual,
    Company,
    Trust,
}

/// Dwelling form, used only for descriptive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyClassification {
    Unit,
    House,
}

/// Currency code for the buyer's home currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    AUD,
    USD,
    GBP,
    EUR,
    CNY,
    HKD,
    SGD,
    NZD,
    INR,
    JPY,
    Other(String),
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation. Deliberately free of timings so that
/// identical inputs serialize to identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
    pub rule_set: String,
}

/// Fee and tax schedules bundled with this build.
pub const RULE_SET: &str = "AU 2025/26 estimate";

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
            rule_set: RULE_SET.to_string(),
        },
    }
}
