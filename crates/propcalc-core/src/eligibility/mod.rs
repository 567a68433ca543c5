//! Foreign investment eligibility: approval requirement, purchasable
//! property types and advisory restrictions.

pub mod assessment;

pub use assessment::{assess_eligibility, evaluate, EligibilityInput, EligibilityResult};
