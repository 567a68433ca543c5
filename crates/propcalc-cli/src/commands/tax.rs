use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::tax::{calculate_cgt, CgtInput};

use crate::input;

/// Arguments for capital gains tax on sale
#[derive(Args)]
pub struct CgtArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Sale price
    #[arg(long)]
    pub sale_price: Option<Decimal>,

    /// Original purchase price
    #[arg(long)]
    pub original_price: Option<Decimal>,

    /// Acquisition costs (duty, legal, fees)
    #[arg(long, default_value = "0")]
    pub purchase_costs: Decimal,

    /// Selling costs (agent, marketing, legal)
    #[arg(long, default_value = "0")]
    pub selling_costs: Decimal,

    /// Seller is a foreign resident for tax purposes
    #[arg(long)]
    pub foreign_resident: bool,

    /// Marginal tax rate (e.g. 0.37 for 37%)
    #[arg(long)]
    pub marginal_tax_rate: Option<Decimal>,
}

pub fn run_cgt(args: CgtArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cgt_input: CgtInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.sale_price.is_none() {
        input::load(None)?
    } else {
        CgtInput {
            sale_price: args
                .sale_price
                .ok_or("--sale-price is required (or provide --input)")?,
            original_price: args
                .original_price
                .ok_or("--original-price is required (or provide --input)")?,
            purchase_costs: args.purchase_costs,
            selling_costs: args.selling_costs,
            foreign_resident: args.foreign_resident,
            marginal_tax_rate: args
                .marginal_tax_rate
                .ok_or("--marginal-tax-rate is required (or provide --input)")?,
        }
    };
    let result = calculate_cgt(&cgt_input)?;
    Ok(serde_json::to_value(result)?)
}
