//! Long-term rental versus short-stay letting.

pub mod comparator;

pub use comparator::{
    compare, compare_use_cases, LongTermIncome, ShortStayIncome, ShortStayRegulations, UseCase,
    UseCaseComparison, UseCaseInput,
};
