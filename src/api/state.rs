//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::service::PayrollService;

/// Shared application state.
///
/// Holds the payroll service that every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }

    /// Runs a service operation on the blocking thread pool.
    ///
    /// Service operations read and write the backing store synchronously, so
    /// they must not run on an async worker. A panic inside `f` surfaces as
    /// `EngineError::TaskFailed`.
    pub async fn run<T, F>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&PayrollService) -> EngineResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || f(&service))
            .await
            .map_err(|e| EngineError::TaskFailed {
                message: e.to_string(),
            })?
    }
}
