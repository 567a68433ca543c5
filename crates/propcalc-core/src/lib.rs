pub mod benchmarks;
pub mod error;
pub mod profiles;
pub mod rules;
pub mod time_value;
pub mod types;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "costs")]
pub mod costs;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "use_case")]
pub mod use_case;

pub use error::PropCalcError;
pub use types::*;

/// Standard result type for all property calculations
pub type PropCalcResult<T> = Result<T, PropCalcError>;
