use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use sucessao_core::itcmd::rates::{self, Jurisdiction, RegimeSelection};
use sucessao_core::session::rate_sync::RateSyncState;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Succession pipeline
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_succession_cost(input_json: String) -> NapiResult<String> {
    let input: sucessao_core::succession::pipeline::SuccessionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sucessao_core::succession::pipeline::estimate_succession_cost(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Opening session state for a regime selection, as JSON.
#[napi]
pub fn initial_state(selection_json: String) -> NapiResult<String> {
    let selection: RegimeSelection =
        serde_json::from_str(&selection_json).map_err(to_napi_error)?;
    serde_json::to_string(&RateSyncState::initial(&selection)).map_err(to_napi_error)
}

/// One live recomputation. The caller keeps `state` from the returned pass
/// and hands it back on the next call.
#[napi]
pub fn simulate_step(input_json: String, state_json: String) -> NapiResult<String> {
    let input: sucessao_core::succession::pipeline::SuccessionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let state: RateSyncState = serde_json::from_str(&state_json).map_err(to_napi_error)?;
    let pass = sucessao_core::succession::pipeline::simulate_succession(&input, state)
        .map_err(to_napi_error)?;
    serde_json::to_string(&pass).map_err(to_napi_error)
}

#[napi]
pub fn replay_session(script_json: String) -> NapiResult<String> {
    let script: sucessao_core::session::replay::SessionScript =
        serde_json::from_str(&script_json).map_err(to_napi_error)?;
    let steps =
        sucessao_core::session::replay::replay_session(&script).map_err(to_napi_error)?;
    serde_json::to_string(&steps).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// ITCMD and insurance
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SuggestRateRequest {
    #[serde(default)]
    jurisdiction: Jurisdiction,
    #[serde(default)]
    use_proposed_law: bool,
    taxable_base: Decimal,
}

#[napi]
pub fn suggest_rate(input_json: String) -> NapiResult<String> {
    let req: SuggestRateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    sucessao_core::types::validate_amount("taxable_base", req.taxable_base)
        .map_err(to_napi_error)?;
    let rate = rates::suggest_rate(req.jurisdiction, req.use_proposed_law, req.taxable_base);
    serde_json::to_string(&serde_json::json!({ "suggested_rate": rate })).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct LeverageRequest {
    coverage: Decimal,
    annual_premium: Decimal,
    years: u32,
}

#[napi]
pub fn compute_leverage(input_json: String) -> NapiResult<String> {
    let req: LeverageRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let plan = sucessao_core::insurance::leverage::checked_leverage(
        req.coverage,
        req.annual_premium,
        req.years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&plan).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Benchmark and sensitivity
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_global(input_json: String) -> NapiResult<String> {
    let input: sucessao_core::benchmark::global::GlobalBenchmarkInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        sucessao_core::benchmark::global::compare_global(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_cost_sensitivity(input_json: String) -> NapiResult<String> {
    let input: sucessao_core::scenarios::sensitivity::CostSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sucessao_core::scenarios::sensitivity::sweep_cost_sensitivity(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
