use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{de::DeserializeOwned, Serialize};

use propcalc_core::PropCalcResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse the JSON input, run the calculation and serialise the envelope.
fn call<I, O>(input_json: &str, f: impl FnOnce(&I) -> PropCalcResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = f(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_eligibility(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::eligibility::assess_eligibility)
}

#[napi]
pub fn calculate_costs(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::costs::calculate_costs)
}

#[napi]
pub fn lookup_rule_table(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::rules::lookup_rule_table)
}

// ---------------------------------------------------------------------------
// Finance and tax
// ---------------------------------------------------------------------------

#[napi]
pub fn build_loan_schedule(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::loan::build_loan_schedule)
}

#[napi]
pub fn calculate_cgt(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::tax::calculate_cgt)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::analytics::analyze_investment)
}

#[napi]
pub fn compare_use_cases(input_json: String) -> NapiResult<String> {
    call(&input_json, propcalc_core::use_case::compare_use_cases)
}
