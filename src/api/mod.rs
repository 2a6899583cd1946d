//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST endpoints for managing employees and pay
//! records, querying the pay record listing and downloading the CSV export.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{EMPLOYEES_PATH, PAY_RECORDS_PATH, create_router};
pub use request::{EmployeeRequest, ListParams, PayRecordRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
