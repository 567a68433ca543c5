use clap::Args;
use serde_json::Value;

use propcalc_core::eligibility::{assess_eligibility, EligibilityInput};

use crate::input;

/// Arguments for an eligibility assessment
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON or YAML input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let eligibility_input: EligibilityInput = input::load(args.input.as_deref())?;
    let result = assess_eligibility(&eligibility_input)?;
    Ok(serde_json::to_value(result)?)
}
