//! In-process backend.

use std::sync::{Mutex, PoisonError};

use crate::error::EngineResult;

use super::{EntityStore, PayrollState};

/// Keeps the payroll state in memory.
///
/// Loads hand out a copy of the last saved state, so mutations only become
/// visible after `save`, the same as with the file backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PayrollState>>,
}

impl MemoryStore {
    /// Creates an empty store. The first load returns a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `state`.
    pub fn with_state(state: PayrollState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }
}

impl EntityStore for MemoryStore {
    fn load(&self) -> EngineResult<PayrollState> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, state: &PayrollState) -> EngineResult<()> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(state.clone());
        Ok(())
    }
}
