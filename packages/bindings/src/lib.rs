use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_core::scenario::{JsonFileStore, SavedScenario, ScenarioStore};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_breakdown(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::payment::compute_breakdown(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::schedule::compute_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison & refinance
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_rates(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::comparison::RateComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::comparison::compute_rate_comparisons(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_refinance(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::refinance::analyze_refinance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario store
// ---------------------------------------------------------------------------

#[napi]
pub fn scenario_list(store_path: String) -> NapiResult<String> {
    let store = JsonFileStore::new(&store_path);
    let scenarios = store.list().map_err(to_napi_error)?;
    serde_json::to_string(&scenarios).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ScenarioSaveInput {
    name: String,
    params: mortgage_core::params::LoanParameters,
}

#[napi]
pub fn scenario_insert(store_path: String, input_json: String) -> NapiResult<String> {
    let input: ScenarioSaveInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let scenario = SavedScenario::new(&input.name, input.params).map_err(to_napi_error)?;
    let mut store = JsonFileStore::new(&store_path);
    store.insert(scenario.clone()).map_err(to_napi_error)?;
    serde_json::to_string(&scenario).map_err(to_napi_error)
}

#[napi]
pub fn scenario_delete(store_path: String, id: String) -> NapiResult<()> {
    let mut store = JsonFileStore::new(&store_path);
    store.delete(&id).map_err(to_napi_error)
}
