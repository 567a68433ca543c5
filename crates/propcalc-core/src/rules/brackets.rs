//! Bracket tables and lookup.
//!
//! A table is a run of bounded brackets, each with an inclusive upper bound,
//! followed by one open-ended bracket. Lookup scans in ascending order and
//! returns the first bracket whose bound is at or above the value, so a value
//! sitting exactly on a bound belongs to the lower bracket.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Money, Rate};

/// A bracket with an inclusive upper bound.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bracket<T> {
    pub upper_bound: Money,
    pub value: T,
}

/// Shorthand constructor for static tables.
pub const fn bracket<T>(upper_bound: Money, value: T) -> Bracket<T> {
    Bracket { upper_bound, value }
}

/// Ordered bracket set terminated by an unbounded top bracket.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BracketTable<T: 'static> {
    pub name: &'static str,
    pub bounded: &'static [Bracket<T>],
    pub top: T,
}

/// Marginal schedule entry: `base + (value - threshold) * rate`.
///
/// Flat-on-total brackets use `threshold = 0` and `base = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DutyBracket {
    pub base: Money,
    pub rate: Rate,
    pub threshold: Money,
}

impl DutyBracket {
    pub const fn flat(rate: Rate) -> Self {
        DutyBracket {
            base: Decimal::ZERO,
            rate,
            threshold: Decimal::ZERO,
        }
    }

    pub fn apply(&self, value: Money) -> Money {
        let excess = (value - self.threshold).max(Decimal::ZERO);
        self.base + excess * self.rate
    }
}

/// Select the bracket that applies to `value`.
pub fn lookup_bracket<T>(table: &BracketTable<T>, value: Money) -> &T {
    table
        .bounded
        .iter()
        .find(|b| value <= b.upper_bound)
        .map(|b| &b.value)
        .unwrap_or(&table.top)
}

/// Index of the applicable bracket (bounded brackets first, top last).
pub fn bracket_index<T>(table: &BracketTable<T>, value: Money) -> usize {
    table
        .bounded
        .iter()
        .position(|b| value <= b.upper_bound)
        .unwrap_or(table.bounded.len())
}

/// Upper bounds strictly increase and are non-negative.
pub fn is_well_formed<T>(table: &BracketTable<T>) -> bool {
    let mut prev: Option<Money> = None;
    for b in table.bounded {
        if b.upper_bound < Decimal::ZERO {
            return false;
        }
        if let Some(p) = prev {
            if b.upper_bound <= p {
                return false;
            }
        }
        prev = Some(b.upper_bound);
    }
    true
}
