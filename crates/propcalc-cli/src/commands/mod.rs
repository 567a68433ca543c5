pub mod analytics;
pub mod costs;
pub mod eligibility;
pub mod loan;
pub mod rules;
pub mod tax;
pub mod use_case;
