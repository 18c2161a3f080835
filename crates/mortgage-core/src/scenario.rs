//! Saved scenarios: named loan parameter sets behind a small key-value store.
//!
//! The whole collection is one JSON array blob, rewritten atomically on every
//! change. A corrupt or missing blob degrades to an empty list with a
//! diagnostic; it never fails the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::MortgageError;
use crate::params::LoanParameters;
use crate::MortgageResult;

// Disambiguates ids created within the same millisecond.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A saved loan parameter set. Never mutated after creation; loading yields a
/// fresh copy of the parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub id: String,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub params: LoanParameters,
}

impl SavedScenario {
    /// Create a scenario with a generation-time id. The name is trimmed and
    /// must be non-empty.
    pub fn new(name: &str, params: LoanParameters) -> MortgageResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MortgageError::InvalidInput {
                field: "name".into(),
                reason: "Scenario name cannot be empty".into(),
            });
        }
        let now = Utc::now();
        let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Ok(Self {
            id: format!("{}-{}", now.timestamp_millis(), seq),
            name: name.to_string(),
            saved_at: now,
            params,
        })
    }
}

/// The store contract the calculator consumes. One writer at a time; every
/// write replaces the whole collection.
pub trait ScenarioStore {
    fn list(&self) -> MortgageResult<Vec<SavedScenario>>;
    fn insert(&mut self, scenario: SavedScenario) -> MortgageResult<()>;
    /// No-op when the id is absent.
    fn delete(&mut self, id: &str) -> MortgageResult<()>;
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// File-backed store: the collection serialized as a single JSON array.
pub struct JsonFileStore {
    path: PathBuf,
    diagnostics: RefCell<Vec<String>>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Non-fatal issues recorded since the last call (e.g. a corrupt blob
    /// that was treated as an empty collection).
    pub fn take_diagnostics(&self) -> Vec<String> {
        self.diagnostics.borrow_mut().drain(..).collect()
    }

    fn load(&self) -> Vec<SavedScenario> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                self.diagnostics
                    .borrow_mut()
                    .push(format!("Failed to read {}: {e}", self.path.display()));
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SavedScenario>>(&contents) {
            Ok(scenarios) => scenarios,
            Err(e) => {
                self.diagnostics.borrow_mut().push(format!(
                    "Malformed scenario blob in {}; treating as empty: {e}",
                    self.path.display()
                ));
                Vec::new()
            }
        }
    }

    fn save(&self, scenarios: &[SavedScenario]) -> MortgageResult<()> {
        let blob = serde_json::to_string_pretty(scenarios)?;
        // Write-then-rename keeps the blob replacement atomic.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScenarioStore for JsonFileStore {
    fn list(&self) -> MortgageResult<Vec<SavedScenario>> {
        Ok(self.load())
    }

    fn insert(&mut self, scenario: SavedScenario) -> MortgageResult<()> {
        if scenario.name.trim().is_empty() {
            return Err(MortgageError::InvalidInput {
                field: "name".into(),
                reason: "Scenario name cannot be empty".into(),
            });
        }
        let mut scenarios = self.load();
        scenarios.push(scenario);
        self.save(&scenarios)
    }

    fn delete(&mut self, id: &str) -> MortgageResult<()> {
        let mut scenarios = self.load();
        let before = scenarios.len();
        scenarios.retain(|s| s.id != id);
        if scenarios.len() == before {
            return Ok(());
        }
        self.save(&scenarios)
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory substitute for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scenarios: Vec<SavedScenario>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for MemoryStore {
    fn list(&self) -> MortgageResult<Vec<SavedScenario>> {
        Ok(self.scenarios.clone())
    }

    fn insert(&mut self, scenario: SavedScenario) -> MortgageResult<()> {
        if scenario.name.trim().is_empty() {
            return Err(MortgageError::InvalidInput {
                field: "name".into(),
                reason: "Scenario name cannot be empty".into(),
            });
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> MortgageResult<()> {
        self.scenarios.retain(|s| s.id != id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_params() -> LoanParameters {
        LoanParameters::new(dec!(400_000), dec!(80_000)).with_rate(dec!(6.48))
    }

    #[test]
    fn test_new_trims_name() {
        let s = SavedScenario::new("  Lake house  ", sample_params()).unwrap();
        assert_eq!(s.name, "Lake house");
    }

    #[test]
    fn test_new_rejects_blank_name() {
        assert!(SavedScenario::new("   ", sample_params()).is_err());
    }

    #[test]
    fn test_ids_are_unique_within_a_burst() {
        let a = SavedScenario::new("a", sample_params()).unwrap();
        let b = SavedScenario::new("b", sample_params()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        let scenario = SavedScenario::new("First", sample_params()).unwrap();
        let id = scenario.id.clone();

        store.insert(scenario.clone()).unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], scenario);

        store.delete(&id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_memory_delete_absent_is_noop() {
        let mut store = MemoryStore::new();
        store
            .insert(SavedScenario::new("kept", sample_params()).unwrap())
            .unwrap();
        store.delete("no-such-id").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
