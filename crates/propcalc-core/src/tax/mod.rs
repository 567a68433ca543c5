//! Rental deductions, negative gearing and capital gains on sale.

pub mod cgt;
pub mod deductions;

pub use cgt::{calculate_cgt, capital_gains_tax, CgtInput, CgtResult};
pub use deductions::{deductions, depreciation, tax_benefit, DeductionInput, Deductions, Depreciation};
