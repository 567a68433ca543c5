use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropCalcResult;

/// Share of a gain that is taxable for residents after the 50% discount.
const RESIDENT_DISCOUNT_FACTOR: Rate = dec!(0.5);

const WITHHOLDING_THRESHOLD: Money = dec!(750_000);
const WITHHOLDING_RATE_HIGH: Rate = dec!(0.125);
const WITHHOLDING_RATE_LOW: Rate = dec!(0.10);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgtInput {
    pub sale_price: Money,
    pub original_price: Money,
    /// Acquisition costs added to the cost base (duty, legal, fees)
    pub purchase_costs: Money,
    pub selling_costs: Money,
    /// Foreign residents are not entitled to the 50% discount
    pub foreign_resident: bool,
    pub marginal_tax_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CgtResult {
    pub cost_base: Money,
    pub capital_gain: Money,
    /// Share of the gain that is taxable (1.0 foreign, 0.5 resident)
    pub discount_factor: Rate,
    pub taxable_gain: Money,
    pub cgt_payable: Money,
    pub withholding_rate: Rate,
    /// Clearance withholding retained at settlement, credited at assessment
    pub withholding_amount: Money,
    /// Withholding less the CGT liability; positive means refundable
    pub withholding_credit_balance: Money,
    /// Sale price less selling costs and CGT. Withholding is not deducted.
    pub net_proceeds: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn capital_gains_tax(input: &CgtInput) -> CgtResult {
    let cost_base = input.original_price + input.purchase_costs + input.selling_costs;
    let capital_gain = (input.sale_price - cost_base).max(Decimal::ZERO);

    let discount_factor = if input.foreign_resident {
        Decimal::ONE
    } else {
        RESIDENT_DISCOUNT_FACTOR
    };
    let taxable_gain = capital_gain * discount_factor;
    let cgt_payable = taxable_gain * input.marginal_tax_rate;

    let withholding_rate = if input.sale_price >= WITHHOLDING_THRESHOLD {
        WITHHOLDING_RATE_HIGH
    } else {
        WITHHOLDING_RATE_LOW
    };
    let withholding_amount = input.sale_price * withholding_rate;

    CgtResult {
        cost_base,
        capital_gain,
        discount_factor,
        taxable_gain,
        cgt_payable,
        withholding_rate,
        withholding_amount,
        withholding_credit_balance: withholding_amount - cgt_payable,
        net_proceeds: input.sale_price - input.selling_costs - cgt_payable,
    }
}

/// CGT calculation wrapped in the standard output envelope.
pub fn calculate_cgt(input: &CgtInput) -> PropCalcResult<ComputationOutput<CgtResult>> {
    debug!(sale_price = %input.sale_price, foreign = input.foreign_resident, "calculating CGT");
    validate(input)?;

    let result = capital_gains_tax(input);

    let mut warnings = Vec::new();
    if result.capital_gain.is_zero() && input.sale_price < input.original_price {
        warnings.push("Capital loss: no CGT payable; the loss may offset other gains".into());
    }
    if result.withholding_credit_balance > Decimal::ZERO {
        warnings.push(
            "Withholding exceeds the estimated CGT liability; the excess is refundable on assessment"
                .into(),
        );
    }

    Ok(with_metadata(
        "Capital gains tax on sale (cost base, residency discount, clearance withholding)",
        input,
        warnings,
        result,
    ))
}

fn validate(input: &CgtInput) -> PropCalcResult<()> {
    let non_negative = [
        ("sale_price", input.sale_price),
        ("original_price", input.original_price),
        ("purchase_costs", input.purchase_costs),
        ("selling_costs", input.selling_costs),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(PropCalcError::invalid(field, "Must be non-negative"));
        }
    }
    if input.marginal_tax_rate < Decimal::ZERO || input.marginal_tax_rate >= Decimal::ONE {
        return Err(PropCalcError::invalid(
            "marginal_tax_rate",
            "Marginal tax rate must be in [0, 1)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(foreign: bool) -> CgtInput {
        CgtInput {
            sale_price: dec!(1_200_000),
            original_price: dec!(800_000),
            purchase_costs: dec!(50_000),
            selling_costs: dec!(30_000),
            foreign_resident: foreign,
            marginal_tax_rate: dec!(0.37),
        }
    }

    #[test]
    fn test_resident_discount() {
        let r = capital_gains_tax(&sale(false));
        assert_eq!(r.cost_base, dec!(880_000));
        assert_eq!(r.capital_gain, dec!(320_000));
        assert_eq!(r.taxable_gain, dec!(160_000));
        assert_eq!(r.cgt_payable, dec!(59_200));
    }

    #[test]
    fn test_foreign_no_discount() {
        let f = capital_gains_tax(&sale(true));
        let r = capital_gains_tax(&sale(false));
        assert_eq!(f.taxable_gain, r.taxable_gain * dec!(2));
        assert_eq!(f.cgt_payable, dec!(118_400));
    }

    #[test]
    fn test_withholding_not_in_net_proceeds() {
        let r = capital_gains_tax(&sale(true));
        assert_eq!(r.withholding_rate, dec!(0.125));
        assert_eq!(r.withholding_amount, dec!(150_000));
        assert_eq!(r.net_proceeds, dec!(1_200_000) - dec!(30_000) - dec!(118_400));
        assert_eq!(r.withholding_credit_balance, dec!(31_600));
    }

    #[test]
    fn test_withholding_low_rate_below_threshold() {
        let mut input = sale(false);
        input.sale_price = dec!(749_999);
        let r = capital_gains_tax(&input);
        assert_eq!(r.withholding_rate, dec!(0.10));
        assert_eq!(r.capital_gain, Decimal::ZERO);
        assert_eq!(r.cgt_payable, Decimal::ZERO);
    }

    #[test]
    fn test_envelope_rejects_bad_rate() {
        let mut input = sale(false);
        input.marginal_tax_rate = dec!(37);
        assert!(calculate_cgt(&input).is_err());
    }

    #[test]
    fn test_envelope_loss_warning() {
        let mut input = sale(false);
        input.sale_price = dec!(700_000);
        let out = calculate_cgt(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Capital loss")));
    }
}
