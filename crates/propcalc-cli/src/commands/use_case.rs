use clap::Args;
use serde_json::Value;

use propcalc_core::benchmarks::BenchmarkOverrides;
use propcalc_core::use_case::{compare_use_cases, ShortStayRegulations, UseCaseInput};

use crate::input;

/// Arguments for the long-term versus short-stay comparison
#[derive(Args)]
pub struct UseCaseArgs {
    /// Path to JSON or YAML input file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Separate JSON or YAML file of short-stay regulations for the jurisdiction
    #[arg(long)]
    pub regulations: Option<String>,
}

pub fn run_use_case(
    args: UseCaseArgs,
    benchmarks: &BenchmarkOverrides,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut use_case_input: UseCaseInput = input::load(args.input.as_deref())?;
    use_case_input.investment.benchmarks.fill_from(benchmarks);
    if let Some(ref path) = args.regulations {
        let regulations: ShortStayRegulations = input::file::read_input(path)?;
        use_case_input.regulations = Some(regulations);
    }
    let result = compare_use_cases(&use_case_input)?;
    Ok(serde_json::to_value(result)?)
}
