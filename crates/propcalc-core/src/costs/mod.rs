//! Upfront and recurring costs of a purchase.

pub mod breakdown;
pub mod estimates;

pub use breakdown::{
    calculate_costs, compute_costs, CostBreakdown, CostInput, CostOptions, OngoingCosts,
    UpfrontCosts,
};
pub use estimates::{estimate_first_home_concession, estimate_vacancy_fee};
