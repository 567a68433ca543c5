use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PropCalcError;
use crate::types::{Money, Rate};
use crate::PropCalcResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// `(1 + rate)^periods` by repeated multiplication, exact for whole periods.
pub fn compound_factor(rate: Rate, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor *= Decimal::ONE + rate;
    }
    factor
}

/// Level payment that amortises `principal` over `periods` at `periodic_rate`:
/// P * r(1+r)^n / ((1+r)^n - 1). Returned as a positive amount.
pub fn annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> PropCalcResult<Money> {
    if periods == 0 {
        return Err(PropCalcError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let compound = compound_factor(periodic_rate, periods);
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PropCalcError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(principal * periodic_rate * compound / denominator)
}

/// Net Present Value of annual cash flows, first flow at t = 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> PropCalcResult<Money> {
    if rate <= dec!(-1) {
        return Err(PropCalcError::invalid(
            "rate",
            "Discount rate must be greater than -100%",
        ));
    }

    npv_and_derivative(cash_flows, rate)
        .map(|(value, _)| value)
        .ok_or_else(|| PropCalcError::DivisionByZero {
            context: "NPV discounting overflowed".into(),
        })
}

/// Internal Rate of Return using Newton-Raphson
pub fn irr(cash_flows: &[Money], guess: Rate) -> PropCalcResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(PropCalcError::invalid(
            "cash_flows",
            "IRR requires at least 2 cash flows",
        ));
    }

    let mut rate = guess;
    let mut last_delta = Decimal::MAX;

    for i in 0..MAX_IRR_ITERATIONS {
        let Some((npv_val, dnpv)) = npv_and_derivative(cash_flows, rate) else {
            return Err(PropCalcError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta,
            });
        };
        last_delta = npv_val;

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }

        if dnpv.is_zero() {
            return Err(PropCalcError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(10.0) {
            rate = dec!(10.0);
        }
    }

    Err(PropCalcError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta,
    })
}

/// NPV and its derivative with respect to the rate. `None` when discounting
/// leaves the representable range, which happens for long horizons near -100%.
fn npv_and_derivative(cash_flows: &[Money], rate: Rate) -> Option<(Decimal, Decimal)> {
    let one_plus_r = Decimal::ONE + rate;
    let mut npv_val = Decimal::ZERO;
    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        let pv = cf.checked_mul(discount)?;
        npv_val = npv_val.checked_add(pv)?;
        if t > 0 {
            let term = Decimal::from(t as i64).checked_mul(pv)?.checked_div(one_plus_r)?;
            dnpv = dnpv.checked_sub(term)?;
        }
        discount = discount.checked_div(one_plus_r)?;
    }

    Some((npv_val, dnpv))
}

/// Compound annual rate that turns `start` into `end` over `years`.
/// A total loss (end <= 0) maps to -100%.
pub fn annualized_return(start: Money, end: Money, years: u32) -> Rate {
    if start <= Decimal::ZERO || years == 0 {
        return Decimal::ZERO;
    }
    if end <= Decimal::ZERO {
        return dec!(-1);
    }
    let multiple = end / start;
    if years == 1 {
        return multiple - Decimal::ONE;
    }
    let exponent = Decimal::ONE / Decimal::from(years);
    multiple.powd(exponent) - Decimal::ONE
}
