use clap::Args;
use serde_json::Value;

use propcalc_core::analytics::{analyze_investment, AnalysisInput};
use propcalc_core::benchmarks::BenchmarkOverrides;

use crate::input;

/// Arguments for a multi-year investment analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the hold period in years
    #[arg(long)]
    pub hold_years: Option<u32>,
}

pub fn run_analyze(
    args: AnalyzeArgs,
    benchmarks: &BenchmarkOverrides,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut analysis_input: AnalysisInput = input::load(args.input.as_deref())?;
    analysis_input.investment.benchmarks.fill_from(benchmarks);
    if let Some(years) = args.hold_years {
        analysis_input.investment.hold_period_years = years;
    }
    let result = analyze_investment(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
