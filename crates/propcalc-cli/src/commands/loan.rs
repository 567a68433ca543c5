use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::loan::{build_loan_schedule, LoanInput, LoanType};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum LoanTypeArg {
    PrincipalAndInterest,
    InterestOnly,
    Hybrid,
}

impl From<LoanTypeArg> for LoanType {
    fn from(arg: LoanTypeArg) -> Self {
        match arg {
            LoanTypeArg::PrincipalAndInterest => LoanType::PrincipalAndInterest,
            LoanTypeArg::InterestOnly => LoanType::InterestOnly,
            LoanTypeArg::Hybrid => LoanType::Hybrid,
        }
    }
}

/// Arguments for a loan schedule
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (e.g. 0.06 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,

    /// Repayment structure
    #[arg(long, value_enum, default_value = "principal-and-interest")]
    pub loan_type: LoanTypeArg,

    /// Interest-only period for hybrid loans
    #[arg(long, default_value_t = 0)]
    pub interest_only_years: u32,

    /// Years of schedule to report (full term when omitted)
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.principal.is_none() {
        input::load(None)?
    } else {
        LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term_years,
            loan_type: args.loan_type.into(),
            interest_only_years: args.interest_only_years,
            projection_years: args.years,
        }
    };
    let result = build_loan_schedule(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
