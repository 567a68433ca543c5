//! Multi-year investment analysis: projections, returns, exit, sensitivity,
//! scoring and advisory text.

pub mod analysis;
pub mod comparisons;
pub mod inputs;
pub mod projection;
pub mod recommendations;
pub mod scoring;
pub mod sensitivity;

pub use analysis::{analyze, analyze_investment, AnalysisInput, InvestmentAnalytics};
pub use inputs::InvestmentInputs;
pub use projection::YearlyProjection;
pub use scoring::{InvestmentScore, Verdict};
