use serde::{Deserialize, Serialize};

use crate::benchmarks::Benchmarks;
use crate::time_value::compound_factor;
use crate::types::{Money, Rate};

/// The buyer's cash invested in another asset class over the same hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetComparison {
    pub asset: String,
    pub annual_return: Rate,
    pub final_value: Money,
    pub total_return: Money,
    /// Property total return less this asset's total return
    pub property_advantage: Money,
}

pub(crate) fn compare_assets(
    cash_invested: Money,
    hold_years: u32,
    property_total_return: Money,
    benchmarks: &Benchmarks,
) -> Vec<AssetComparison> {
    [
        ("shares", benchmarks.shares_return),
        ("bonds", benchmarks.bonds_return),
        ("term_deposit", benchmarks.term_deposit_return),
        ("savings", benchmarks.savings_return),
    ]
    .into_iter()
    .map(|(asset, rate)| {
        let final_value = (cash_invested * compound_factor(rate, hold_years)).round_dp(2);
        let total_return = final_value - cash_invested;
        AssetComparison {
            asset: asset.to_string(),
            annual_return: rate,
            final_value,
            total_return,
            property_advantage: property_total_return - total_return,
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compounding_and_advantage() {
        let rows = compare_assets(dec!(100_000), 2, dec!(20_000), &Benchmarks::default());
        assert_eq!(rows.len(), 4);
        let savings = rows.iter().find(|r| r.asset == "savings").unwrap();
        // 100k * 1.04^2
        assert_eq!(savings.final_value, dec!(108_160));
        assert_eq!(savings.property_advantage, dec!(11_840));
    }
}
