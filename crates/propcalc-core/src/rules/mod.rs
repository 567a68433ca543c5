//! Static fee, duty and tax schedules.
//!
//! Every table can be addressed through [`RuleTableId`], so callers that only
//! need "what does table X charge on value V" do not have to know how the
//! table is stored.

pub mod brackets;
pub mod firb;
pub mod land_tax;
pub mod purchase_rights;
pub mod stamp_duty;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Jurisdiction, Money, PropertyType, Rate};
use crate::PropCalcResult;
use brackets::{bracket_index, BracketTable, DutyBracket};

/// Identifies one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTableId {
    FirbFee(PropertyType),
    StampDuty(Jurisdiction),
    ForeignSurcharge(Jurisdiction),
    LandTax(Jurisdiction),
    ForeignLandTaxSurcharge(Jurisdiction),
}

/// Uniform view of one bracket. Fixed-fee brackets report the fee as `base`
/// with a zero rate; flat-rate tables are a single unbounded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRow {
    /// Inclusive upper bound; `None` for the open-ended top bracket.
    pub upper_bound: Option<Money>,
    pub base: Money,
    pub rate: Rate,
    pub threshold: Money,
}

/// Amount the table yields for `value` (fee, duty or tax).
pub fn evaluate_table(id: RuleTableId, value: Money) -> Money {
    let value = value.max(Decimal::ZERO);
    match id {
        RuleTableId::FirbFee(pt) => firb::application_fee(pt, value),
        RuleTableId::StampDuty(j) => stamp_duty::transfer_duty(j, value),
        RuleTableId::ForeignSurcharge(j) => value * stamp_duty::foreign_surcharge_rate(j),
        RuleTableId::LandTax(j) => land_tax::general_land_tax(j, value),
        RuleTableId::ForeignLandTaxSurcharge(j) => {
            value * land_tax::foreign_land_tax_surcharge_rate(j)
        }
    }
}

/// Human-readable name of a table.
pub fn table_name(id: RuleTableId) -> String {
    match id {
        RuleTableId::FirbFee(pt) => firb::fee_table(pt).name.to_string(),
        RuleTableId::StampDuty(j) => stamp_duty::duty_table(j).name.to_string(),
        RuleTableId::ForeignSurcharge(j) => format!("{j} foreign purchaser surcharge"),
        RuleTableId::LandTax(j) => land_tax::land_tax_table(j).name.to_string(),
        RuleTableId::ForeignLandTaxSurcharge(j) => format!("{j} foreign owner land tax surcharge"),
    }
}

/// All brackets of a table, ascending.
pub fn table_rows(id: RuleTableId) -> Vec<BracketRow> {
    match id {
        RuleTableId::FirbFee(pt) => fee_rows(firb::fee_table(pt)),
        RuleTableId::StampDuty(j) => duty_rows(stamp_duty::duty_table(j)),
        RuleTableId::LandTax(j) => duty_rows(land_tax::land_tax_table(j)),
        RuleTableId::ForeignSurcharge(j) => {
            flat_rows(stamp_duty::foreign_surcharge_rate(j))
        }
        RuleTableId::ForeignLandTaxSurcharge(j) => {
            flat_rows(land_tax::foreign_land_tax_surcharge_rate(j))
        }
    }
}

fn fee_rows(table: &BracketTable<Money>) -> Vec<BracketRow> {
    let row = |upper_bound: Option<Money>, fee: Money| BracketRow {
        upper_bound,
        base: fee,
        rate: Decimal::ZERO,
        threshold: Decimal::ZERO,
    };
    table
        .bounded
        .iter()
        .map(|b| row(Some(b.upper_bound), b.value))
        .chain(std::iter::once(row(None, table.top)))
        .collect()
}

fn duty_rows(table: &BracketTable<DutyBracket>) -> Vec<BracketRow> {
    let row = |upper_bound: Option<Money>, d: &DutyBracket| BracketRow {
        upper_bound,
        base: d.base,
        rate: d.rate,
        threshold: d.threshold,
    };
    table
        .bounded
        .iter()
        .map(|b| row(Some(b.upper_bound), &b.value))
        .chain(std::iter::once(row(None, &table.top)))
        .collect()
}

fn flat_rows(rate: Rate) -> Vec<BracketRow> {
    vec![BracketRow {
        upper_bound: None,
        base: Decimal::ZERO,
        rate,
        threshold: Decimal::ZERO,
    }]
}

fn applicable_index(id: RuleTableId, value: Money) -> usize {
    match id {
        RuleTableId::FirbFee(pt) => bracket_index(firb::fee_table(pt), value),
        RuleTableId::StampDuty(j) => bracket_index(stamp_duty::duty_table(j), value),
        RuleTableId::LandTax(j) => bracket_index(land_tax::land_tax_table(j), value),
        RuleTableId::ForeignSurcharge(_) | RuleTableId::ForeignLandTaxSurcharge(_) => 0,
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableInput {
    pub table: RuleTableId,
    pub value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableOutput {
    pub table: RuleTableId,
    pub name: String,
    pub value: Money,
    pub amount: Money,
    pub applied_bracket: BracketRow,
    pub brackets: Vec<BracketRow>,
}

/// Evaluate one schedule at a value and return the whole table alongside.
pub fn lookup_rule_table(
    input: &RuleTableInput,
) -> PropCalcResult<ComputationOutput<RuleTableOutput>> {
    if input.value < Decimal::ZERO {
        return Err(PropCalcError::invalid("value", "Value must be non-negative"));
    }

    let brackets = table_rows(input.table);
    let idx = applicable_index(input.table, input.value).min(brackets.len() - 1);
    let applied_bracket = brackets[idx].clone();

    let output = RuleTableOutput {
        table: input.table,
        name: table_name(input.table),
        value: input.value,
        amount: evaluate_table(input.table, input.value),
        applied_bracket,
        brackets,
    };

    Ok(with_metadata(
        "Rule table bracket lookup (first bracket whose inclusive bound covers the value)",
        input,
        Vec::new(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_evaluate_by_id() {
        assert_eq!(
            evaluate_table(RuleTableId::FirbFee(PropertyType::NewDwelling), dec!(1_000_000)),
            dec!(15_100)
        );
        assert_eq!(
            evaluate_table(RuleTableId::ForeignSurcharge(Jurisdiction::NSW), dec!(1_000_000)),
            dec!(80_000)
        );
        assert_eq!(
            evaluate_table(RuleTableId::StampDuty(Jurisdiction::NSW), dec!(1_000_000)),
            dec!(39_530)
        );
    }

    #[test]
    fn test_rows_end_open() {
        let rows = table_rows(RuleTableId::LandTax(Jurisdiction::VIC));
        assert!(rows.last().unwrap().upper_bound.is_none());
        assert!(rows[..rows.len() - 1].iter().all(|r| r.upper_bound.is_some()));
    }

    #[test]
    fn test_lookup_envelope_reports_bracket() {
        let input = RuleTableInput {
            table: RuleTableId::FirbFee(PropertyType::EstablishedDwelling),
            value: dec!(75_000),
        };
        let out = lookup_rule_table(&input).unwrap().result;
        assert_eq!(out.amount, dec!(13_500));
        assert_eq!(out.applied_bracket.upper_bound, Some(dec!(75_000)));
        assert_eq!(out.brackets.len(), 12);
    }

    #[test]
    fn test_negative_value_rejected() {
        let input = RuleTableInput {
            table: RuleTableId::LandTax(Jurisdiction::NSW),
            value: dec!(-1),
        };
        assert!(lookup_rule_table(&input).is_err());
    }

    #[test]
    fn test_serde_id_shape() {
        let id: RuleTableId = serde_json::from_str(r#"{"stamp_duty":"QLD"}"#).unwrap();
        assert_eq!(id, RuleTableId::StampDuty(Jurisdiction::QLD));
    }
}
