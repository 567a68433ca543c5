use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::rules::{lookup_rule_table, RuleTableId, RuleTableInput};
use propcalc_core::types::{Jurisdiction, PropertyType};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum TableKind {
    FirbFee,
    StampDuty,
    ForeignSurcharge,
    LandTax,
    ForeignLandTaxSurcharge,
}

/// Arguments for a rule table lookup
#[derive(Args)]
pub struct RuleTableArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Schedule to evaluate
    #[arg(long, value_enum)]
    pub table: Option<TableKind>,

    /// State or territory (e.g. NSW), for duty and land tax tables
    #[arg(long, value_parser = parse_jurisdiction)]
    pub jurisdiction: Option<Jurisdiction>,

    /// Property type (e.g. new-dwelling), for FIRB fee tables
    #[arg(long, value_parser = parse_property_type)]
    pub property_type: Option<PropertyType>,

    /// Property or land value to evaluate
    #[arg(long)]
    pub value: Option<Decimal>,
}

pub fn run_rule_table(args: RuleTableArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table_input: RuleTableInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.table.is_none() {
        input::load(None)?
    } else {
        RuleTableInput {
            table: table_id(&args)?,
            value: args.value.ok_or("--value is required (or provide --input)")?,
        }
    };
    let result = lookup_rule_table(&table_input)?;
    Ok(serde_json::to_value(result)?)
}

fn table_id(args: &RuleTableArgs) -> Result<RuleTableId, Box<dyn std::error::Error>> {
    let jurisdiction = || args.jurisdiction.ok_or("--jurisdiction is required for this table");
    let id = match args.table {
        Some(TableKind::FirbFee) => RuleTableId::FirbFee(
            args.property_type
                .ok_or("--property-type is required for the FIRB fee table")?,
        ),
        Some(TableKind::StampDuty) => RuleTableId::StampDuty(jurisdiction()?),
        Some(TableKind::ForeignSurcharge) => RuleTableId::ForeignSurcharge(jurisdiction()?),
        Some(TableKind::LandTax) => RuleTableId::LandTax(jurisdiction()?),
        Some(TableKind::ForeignLandTaxSurcharge) => {
            RuleTableId::ForeignLandTaxSurcharge(jurisdiction()?)
        }
        None => return Err("--table is required (or provide --input)".into()),
    };
    Ok(id)
}

fn parse_jurisdiction(s: &str) -> Result<Jurisdiction, String> {
    serde_json::from_value(Value::String(s.to_uppercase()))
        .map_err(|_| format!("unknown jurisdiction '{s}'"))
}

fn parse_property_type(s: &str) -> Result<PropertyType, String> {
    serde_json::from_value(Value::String(s.to_lowercase().replace('-', "_")))
        .map_err(|_| format!("unknown property type '{s}'"))
}
