//! Entity storage for the Payroll Engine.
//!
//! Every operation loads the full [`PayrollState`], mutates it in memory and,
//! for writes, saves it back. Backends implement [`EntityStore`]; nothing
//! else in the crate depends on how the state is persisted.

mod file;
mod memory;
mod state;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use state::{PayrollState, UNKNOWN_EMPLOYEE_NAME, resolve_employee_name};

use crate::error::EngineResult;

/// A persistence backend for the payroll state.
pub trait EntityStore: Send + Sync {
    /// Reads the full state.
    ///
    /// A missing backing resource is a first run and yields
    /// [`PayrollState::default`], never an error.
    fn load(&self) -> EngineResult<PayrollState>;

    /// Overwrites the full state. Readers never observe a partial write.
    fn save(&self, state: &PayrollState) -> EngineResult<()>;
}
