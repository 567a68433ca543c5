mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use propcalc_core::benchmarks::BenchmarkOverrides;

use commands::analytics::AnalyzeArgs;
use commands::costs::CostsArgs;
use commands::eligibility::EligibilityArgs;
use commands::loan::LoanArgs;
use commands::rules::RuleTableArgs;
use commands::tax::CgtArgs;
use commands::use_case::UseCaseArgs;

/// Foreign-buyer property cost, tax and investment calculations
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Foreign-buyer property cost, tax and investment calculations",
    long_about = "A CLI for estimating the cost and investment performance of an \
                  Australian property purchase by a foreign or temporary-resident buyer, \
                  with decimal precision. Covers FIRB eligibility and fees, stamp duty and \
                  surcharges, land tax, loan schedules, CGT on exit, multi-year investment \
                  projections and long-term versus short-stay letting."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file of benchmark overrides, applied where the input leaves a field empty
    #[arg(long, global = true)]
    benchmarks: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess FIRB approval and purchase eligibility
    Eligibility(EligibilityArgs),
    /// Upfront and ongoing purchase costs
    Costs(CostsArgs),
    /// Loan repayments and amortization schedule
    Loan(LoanArgs),
    /// Capital gains tax and withholding on sale
    Cgt(CgtArgs),
    /// Multi-year investment analysis
    Analyze(AnalyzeArgs),
    /// Compare long-term rental against short-stay letting
    UseCase(UseCaseArgs),
    /// Look up a fee, duty or tax schedule
    RuleTable(RuleTableArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Eligibility(_) => "eligibility",
            Commands::Costs(_) => "costs",
            Commands::Loan(_) => "loan",
            Commands::Cgt(_) => "cgt",
            Commands::Analyze(_) => "analyze",
            Commands::UseCase(_) => "use-case",
            Commands::RuleTable(_) => "rule-table",
            Commands::Version => "version",
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_benchmarks(path: Option<&str>) -> Result<BenchmarkOverrides, Box<dyn std::error::Error>> {
    match path {
        Some(p) => input::file::read_input(p),
        None => Ok(BenchmarkOverrides::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let benchmarks = match load_benchmarks(cli.benchmarks.as_deref()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    tracing::debug!(
        command = cli.command.name(),
        output = ?cli.output,
        benchmarks_file = cli.benchmarks.as_deref().unwrap_or("-"),
        "dispatching command"
    );
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::Costs(args) => commands::costs::run_costs(args, &benchmarks),
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Cgt(args) => commands::tax::run_cgt(args),
        Commands::Analyze(args) => commands::analytics::run_analyze(args, &benchmarks),
        Commands::UseCase(args) => commands::use_case::run_use_case(args, &benchmarks),
        Commands::RuleTable(args) => commands::rules::run_rule_table(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
