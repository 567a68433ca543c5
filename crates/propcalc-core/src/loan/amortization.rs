use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PropCalcError;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropCalcResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Repayment structure of a loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Level monthly payments that clear the loan over its term
    #[default]
    PrincipalAndInterest,
    /// Interest only for the whole term; the balance never falls
    InterestOnly,
    /// Interest only for `interest_only_years`, then principal and interest
    Hybrid,
}

/// One year of the repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanState {
    pub year: u32,
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub total_repayment: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
    /// Every month of this year was interest only
    pub interest_only: bool,
}

/// Monthly repayment in each phase of a loan. A phase that never occurs
/// is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repayments {
    pub interest_only: Option<Money>,
    pub principal_and_interest: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual interest rate (0.06 = 6%)
    pub annual_rate: Rate,
    pub term_years: u32,
    #[serde(default)]
    pub loan_type: LoanType,
    /// Only meaningful for hybrid loans
    #[serde(default)]
    pub interest_only_years: u32,
    /// Years to report; the full term when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_years: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleOutput {
    pub repayments: Repayments,
    /// Interest over the reported years
    pub total_interest: Money,
    /// Principal over the reported years
    pub total_principal: Money,
    pub closing_balance: Money,
    pub schedule: Vec<LoanState>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Year-by-year schedule, simulated month by month.
///
/// Monthly interest and level payments are rounded to cents. The last month
/// of a principal and interest term repays whatever balance remains, so the
/// principal paid over a full term equals the amount borrowed exactly.
/// The schedule is truncated to `min(projection_years, term_years)` years.
pub fn amortize(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    loan_type: LoanType,
    interest_only_years: u32,
    projection_years: u32,
) -> PropCalcResult<Vec<LoanState>> {
    validate(principal, annual_rate, term_years, loan_type, interest_only_years)?;

    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    let total_months = term_years * MONTHS_PER_YEAR;
    let io_months = io_years(loan_type, term_years, interest_only_years) * MONTHS_PER_YEAR;
    let years = projection_years.min(term_years);

    let mut schedule = Vec::with_capacity(years as usize);
    let mut balance = principal;
    let mut payment: Option<Money> = None;
    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_interest = Decimal::ZERO;

    for year in 1..=years {
        let opening_balance = balance;
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for m in 1..=MONTHS_PER_YEAR {
            let month = (year - 1) * MONTHS_PER_YEAR + m;
            let interest = (balance * monthly_rate).round_dp(2);
            interest_paid += interest;

            if month <= io_months {
                continue;
            }

            let level = match payment {
                Some(p) => p,
                None => {
                    let remaining = total_months - month + 1;
                    let p = annuity_payment(balance, monthly_rate, remaining)?.round_dp(2);
                    payment = Some(p);
                    p
                }
            };

            let mut repaid = level - interest;
            if month == total_months || repaid > balance {
                repaid = balance;
            }
            balance -= repaid;
            principal_paid += repaid;
        }

        cumulative_principal += principal_paid;
        cumulative_interest += interest_paid;

        schedule.push(LoanState {
            year,
            opening_balance,
            closing_balance: balance,
            principal_paid,
            interest_paid,
            total_repayment: principal_paid + interest_paid,
            cumulative_principal,
            cumulative_interest,
            interest_only: year * MONTHS_PER_YEAR <= io_months,
        });
    }

    Ok(schedule)
}

/// Monthly repayment in the interest-only and principal-and-interest phases.
pub fn monthly_repayments(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    loan_type: LoanType,
    interest_only_years: u32,
) -> PropCalcResult<Repayments> {
    validate(principal, annual_rate, term_years, loan_type, interest_only_years)?;

    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    let io = io_years(loan_type, term_years, interest_only_years);

    let interest_only = if io > 0 {
        Some((principal * monthly_rate).round_dp(2))
    } else {
        None
    };
    let principal_and_interest = if io < term_years {
        let months = (term_years - io) * MONTHS_PER_YEAR;
        Some(annuity_payment(principal, monthly_rate, months)?.round_dp(2))
    } else {
        None
    };

    Ok(Repayments {
        interest_only,
        principal_and_interest,
    })
}

/// Repayment schedule wrapped in the standard output envelope.
pub fn build_loan_schedule(
    input: &LoanInput,
) -> PropCalcResult<ComputationOutput<LoanScheduleOutput>> {
    debug!(
        principal = %input.principal,
        loan_type = ?input.loan_type,
        "building loan schedule"
    );
    let mut warnings = Vec::new();

    if input.loan_type != LoanType::Hybrid && input.interest_only_years > 0 {
        warnings.push(format!(
            "interest_only_years ignored for {:?} loans",
            input.loan_type
        ));
    }
    let projection_years = input.projection_years.unwrap_or(input.term_years);
    if projection_years > input.term_years {
        warnings.push("Projection truncated to the loan term".into());
    }

    let schedule = amortize(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.loan_type,
        input.interest_only_years,
        projection_years,
    )?;
    let repayments = monthly_repayments(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.loan_type,
        input.interest_only_years,
    )?;

    let total_interest = schedule.iter().map(|s| s.interest_paid).sum();
    let total_principal = schedule.iter().map(|s| s.principal_paid).sum();
    let closing_balance = schedule
        .last()
        .map(|s| s.closing_balance)
        .unwrap_or(input.principal);

    let output = LoanScheduleOutput {
        repayments,
        total_interest,
        total_principal,
        closing_balance,
        schedule,
    };

    Ok(with_metadata(
        "Monthly amortization aggregated by year (annuity payment, cent rounding, final-month residual)",
        input,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    loan_type: LoanType,
    interest_only_years: u32,
) -> PropCalcResult<()> {
    if principal < Decimal::ZERO {
        return Err(PropCalcError::invalid("principal", "Principal cannot be negative"));
    }
    if annual_rate < Decimal::ZERO {
        return Err(PropCalcError::invalid("annual_rate", "Interest rate cannot be negative"));
    }
    if term_years == 0 {
        return Err(PropCalcError::invalid("term_years", "Loan term must be at least 1 year"));
    }
    if loan_type == LoanType::Hybrid && interest_only_years > term_years {
        return Err(PropCalcError::invalid(
            "interest_only_years",
            "Interest-only period cannot exceed the loan term",
        ));
    }
    Ok(())
}

fn io_years(loan_type: LoanType, term_years: u32, interest_only_years: u32) -> u32 {
    match loan_type {
        LoanType::PrincipalAndInterest => 0,
        LoanType::InterestOnly => term_years,
        LoanType::Hybrid => interest_only_years.min(term_years),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pi_year_one_interest() {
        let s = amortize(dec!(500_000), dec!(0.06), 30, LoanType::PrincipalAndInterest, 0, 30)
            .unwrap();
        assert_eq!(s.len(), 30);
        assert!(s[0].interest_paid > dec!(29_600) && s[0].interest_paid < dec!(30_000));
        for w in s.windows(2) {
            assert!(w[1].interest_paid < w[0].interest_paid);
        }
    }

    #[test]
    fn test_pi_conserves_principal() {
        let s = amortize(dec!(432_100), dec!(0.0725), 25, LoanType::PrincipalAndInterest, 0, 25)
            .unwrap();
        let last = s.last().unwrap();
        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert_eq!(last.cumulative_principal, dec!(432_100));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let s = amortize(dec!(360_000), Decimal::ZERO, 30, LoanType::PrincipalAndInterest, 0, 2)
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].principal_paid, dec!(12_000));
        assert_eq!(s[0].interest_paid, Decimal::ZERO);
    }

    #[test]
    fn test_interest_only_balance_flat() {
        let s = amortize(dec!(400_000), dec!(0.06), 5, LoanType::InterestOnly, 0, 10).unwrap();
        assert_eq!(s.len(), 5);
        for st in &s {
            assert!(st.interest_only);
            assert_eq!(st.principal_paid, Decimal::ZERO);
            assert_eq!(st.closing_balance, dec!(400_000));
            assert_eq!(st.interest_paid, dec!(24_000));
        }
    }

    #[test]
    fn test_hybrid_switches_after_io_period() {
        let s = amortize(dec!(300_000), dec!(0.05), 30, LoanType::Hybrid, 5, 30).unwrap();
        assert!(s[4].interest_only);
        assert_eq!(s[4].closing_balance, dec!(300_000));
        assert!(!s[5].interest_only);
        assert!(s[5].principal_paid > Decimal::ZERO);
        assert_eq!(s.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_closing_equals_opening_less_principal() {
        let s = amortize(dec!(650_000), dec!(0.061), 30, LoanType::Hybrid, 3, 30).unwrap();
        for st in &s {
            assert_eq!(st.closing_balance, st.opening_balance - st.principal_paid);
            assert!(st.closing_balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_repayments_by_phase() {
        let r = monthly_repayments(dec!(500_000), dec!(0.06), 30, LoanType::Hybrid, 5).unwrap();
        assert_eq!(r.interest_only, Some(dec!(2_500)));
        assert!(r.principal_and_interest.unwrap() > dec!(3_000));

        let r = monthly_repayments(dec!(500_000), dec!(0.06), 30, LoanType::PrincipalAndInterest, 0)
            .unwrap();
        assert_eq!(r.interest_only, None);
        assert_eq!(r.principal_and_interest, Some(dec!(2_997.75)));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(amortize(dec!(-1), dec!(0.05), 30, LoanType::PrincipalAndInterest, 0, 1).is_err());
        assert!(amortize(dec!(1), dec!(0.05), 0, LoanType::PrincipalAndInterest, 0, 1).is_err());
        assert!(amortize(dec!(1), dec!(0.05), 10, LoanType::Hybrid, 11, 1).is_err());
    }

    #[test]
    fn test_envelope_totals() {
        let input = LoanInput {
            principal: dec!(200_000),
            annual_rate: dec!(0.05),
            term_years: 10,
            loan_type: LoanType::PrincipalAndInterest,
            interest_only_years: 2,
            projection_years: Some(15),
        };
        let out = build_loan_schedule(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.result.schedule.len(), 10);
        assert_eq!(out.result.total_principal, dec!(200_000));
        assert_eq!(out.result.closing_balance, Decimal::ZERO);
    }
}
