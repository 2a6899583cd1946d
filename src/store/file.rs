//! JSON file backend.
//!
//! The whole [`PayrollState`] lives in one pretty-printed JSON document. Saves
//! go through a uniquely named temporary file in the same directory that is
//! synced and then renamed over the target, so a reader sees either the old
//! document or the new one, even when several processes save concurrently.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::{EntityStore, PayrollState};

/// Stores the payroll state as a JSON document on disk.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::store::{EntityStore, JsonFileStore};
///
/// let store = JsonFileStore::new("data.json");
/// let state = store.load()?;
/// store.save(&state)?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the document at `path`.
    ///
    /// Nothing is read or created until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl ToString) -> EngineError {
        EngineError::Storage {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl EntityStore for JsonFileStore {
    fn load(&self) -> EngineResult<PayrollState> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No payroll document yet, starting fresh");
                return Ok(PayrollState::default());
            }
            Err(err) => return Err(self.storage_error(err)),
        };

        serde_json::from_slice(&bytes).map_err(|e| self.storage_error(e))
    }

    fn save(&self, state: &PayrollState) -> EngineResult<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(|e| self.storage_error(e))?;

        let dir = self.directory();
        fs::create_dir_all(dir).map_err(|e| self.storage_error(e))?;

        // Dropping the temp file on any failure below removes it.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.storage_error(e))?;
        tmp.write_all(&bytes).map_err(|e| self.storage_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.storage_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.storage_error(e.error))?;

        debug!(
            path = %self.path.display(),
            employees = state.employees.len(),
            pay_records = state.pay_records.len(),
            "Saved payroll document"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_pay;
    use crate::models::{EmployeeDraft, PayRecordDraft};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use std::thread;
    use tempfile::tempdir;

    fn directory_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn populated_state() -> PayrollState {
        let mut state = PayrollState::default();
        state.add_employee(
            EmployeeDraft {
                name: "Alice".to_string(),
                pay_rate: Decimal::new(2000, 2),
            },
            Utc::now(),
        );
        let draft = PayRecordDraft {
            employee_id: 1,
            period_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            hours_worked: Decimal::new(40, 0),
            overtime_hours: Decimal::new(5, 0),
            deductions: Decimal::new(50, 0),
            notes: Some("first week, \"busy\"".to_string()),
        };
        let pay = compute_pay(
            Decimal::new(2000, 2),
            draft.hours_worked,
            draft.overtime_hours,
            draft.deductions,
        )
        .unwrap();
        state.add_pay_record(draft, pay, Utc::now());
        state
    }

    #[test]
    fn test_load_missing_file_returns_fresh_state() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        let state = store.load().unwrap();
        assert_eq!(state, PayrollState::default());
    }

    #[test]
    fn test_load_after_save_returns_equal_state() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        let state = populated_state();

        store.save(&state).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/data.json"));

        store.save(&PayrollState::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_leaves_no_temporary_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        store.save(&populated_state()).unwrap();
        assert_eq!(directory_entries(dir.path()), vec!["data.json".to_string()]);
    }

    #[test]
    fn test_concurrent_saves_to_one_path_leave_valid_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let full = populated_state();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = JsonFileStore::new(&path);
                let state = if i % 2 == 0 {
                    full.clone()
                } else {
                    PayrollState::default()
                };
                let full = full.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.save(&state).unwrap();
                        let loaded = store.load().unwrap();
                        assert!(loaded == full || loaded == PayrollState::default());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert!(loaded == full || loaded == PayrollState::default());
        assert_eq!(directory_entries(dir.path()), vec!["data.json".to_string()]);
    }

    #[test]
    fn test_bare_file_name_saves_next_to_it() {
        let store = JsonFileStore::new("data.json");
        assert_eq!(store.directory(), Path::new("."));
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        store.save(&populated_state()).unwrap();
        store.save(&PayrollState::default()).unwrap();

        assert_eq!(store.load().unwrap(), PayrollState::default());
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"{ not json").unwrap();

        match JsonFileStore::new(&path).load() {
            Err(EngineError::Storage { path: p, .. }) => assert!(p.ends_with("data.json")),
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwritable_target_is_storage_error() {
        let dir = tempdir().unwrap();
        // A directory where the document should be makes the rename fail.
        let path = dir.path().join("data.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupant"), b"x").unwrap();

        let result = JsonFileStore::new(&path).save(&PayrollState::default());
        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }

    #[test]
    fn test_document_is_pretty_printed_json() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.save(&populated_state()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["next_employee_id"], 2);
        let gross: Decimal = value["pay_records"][0]["gross_pay"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(gross, Decimal::new(950, 0));
        assert!(text.contains('\n'));
    }
}
