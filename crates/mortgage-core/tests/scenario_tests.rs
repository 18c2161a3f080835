use mortgage_core::params::LoanParameters;
use mortgage_core::scenario::{JsonFileStore, SavedScenario, ScenarioStore};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::fs;

fn sample_params() -> LoanParameters {
    LoanParameters::new(dec!(400_000), dec!(80_000))
        .with_rate(dec!(6.48))
        .with_term_years(30)
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.json");
    let mut store = JsonFileStore::new(&path);

    let scenario = SavedScenario::new("Starter home", sample_params()).unwrap();
    let id = scenario.id.clone();
    store.insert(scenario.clone()).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], scenario);

    // Reload produces an equal but fresh copy.
    let reloaded = JsonFileStore::new(&path);
    assert_eq!(reloaded.list().unwrap(), vec![scenario]);

    store.delete(&id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("never-written.json"));
    assert!(store.list().unwrap().is_empty());
    assert!(store.take_diagnostics().is_empty());
}

#[test]
fn test_file_store_corrupt_blob_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.json");
    fs::write(&path, "{ not json []").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.list().unwrap().is_empty());

    let diags = store.take_diagnostics();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].contains("Malformed"));
}

#[test]
fn test_file_store_non_array_blob_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.json");
    fs::write(&path, r#"{"id": "1"}"#).unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.list().unwrap().is_empty());
    assert!(!store.take_diagnostics().is_empty());
}

#[test]
fn test_file_store_delete_absent_id_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenarios.json");
    let mut store = JsonFileStore::new(&path);

    store
        .insert(SavedScenario::new("kept", sample_params()).unwrap())
        .unwrap();
    store.delete("missing-id").unwrap();
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_file_store_rejects_blank_name_on_insert() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("scenarios.json"));

    // Construct a scenario that bypassed SavedScenario::new validation.
    let mut scenario = SavedScenario::new("temp", sample_params()).unwrap();
    scenario.name = "   ".into();
    assert!(store.insert(scenario).is_err());
}

#[test]
fn test_saved_scenario_params_are_a_copy() {
    let params = sample_params();
    let scenario = SavedScenario::new("copy", params.clone()).unwrap();

    // Mutating the caller's parameters does not touch the stored record.
    let modified = params.with_rate(dec!(9.99));
    assert_eq!(scenario.params.interest_rate, dec!(6.48));
    assert_ne!(scenario.params.interest_rate, modified.interest_rate);
}
