//! Mortgage repayment schedules.

pub mod amortization;

pub use amortization::{
    amortize, build_loan_schedule, monthly_repayments, LoanInput, LoanScheduleOutput, LoanState,
    LoanType, Repayments,
};
