use clap::Args;
use serde_json::Value;

use propcalc_core::benchmarks::BenchmarkOverrides;
use propcalc_core::costs::{calculate_costs, CostInput};

use crate::input;

/// Arguments for purchase cost calculation
#[derive(Args)]
pub struct CostsArgs {
    /// Path to JSON or YAML input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_costs(
    args: CostsArgs,
    benchmarks: &BenchmarkOverrides,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cost_input: CostInput = input::load(args.input.as_deref())?;
    cost_input.options.benchmarks.fill_from(benchmarks);
    let result = calculate_costs(&cost_input)?;
    Ok(serde_json::to_value(result)?)
}
