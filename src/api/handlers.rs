//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::export::EXPORT_FILE_NAME;
use crate::models::{EmployeeDraft, PayRecordDraft};

use super::request::{EmployeeRequest, ListParams, PayRecordRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Listing that missing-employee lookups redirect to.
pub const EMPLOYEES_PATH: &str = "/employees";
/// Listing that missing-pay-record lookups redirect to.
pub const PAY_RECORDS_PATH: &str = "/pay-records";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(EMPLOYEES_PATH, get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(PAY_RECORDS_PATH, get(list_pay_records).post(create_pay_record))
        .route("/pay-records/export", get(export_pay_records))
        .route(
            "/pay-records/:id",
            get(get_pay_record)
                .put(update_pay_record)
                .delete(delete_pay_record),
        )
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Redirects a missing-employee lookup to the employee listing.
fn employee_failure(err: EngineError, correlation_id: Uuid) -> Response {
    match err {
        EngineError::EmployeeNotFound { id } => {
            info!(
                correlation_id = %correlation_id,
                employee_id = id,
                "Employee not found, redirecting to listing"
            );
            Redirect::to(EMPLOYEES_PATH).into_response()
        }
        err => error_response(err, correlation_id),
    }
}

/// Redirects a missing-pay-record lookup to the pay record listing.
fn pay_record_failure(err: EngineError, correlation_id: Uuid) -> Response {
    match err {
        EngineError::PayRecordNotFound { id } => {
            info!(
                correlation_id = %correlation_id,
                record_id = id,
                "Pay record not found, redirecting to listing"
            );
            Redirect::to(PAY_RECORDS_PATH).into_response()
        }
        err => error_response(err, correlation_id),
    }
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.run(move |service| service.list_employees()).await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /employees.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add employee request");

    let request = match json_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let draft = EmployeeDraft::from(request);
    match state.run(move |service| service.add_employee(draft)).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /employees/:id.
async fn get_employee(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.run(move |service| service.employee(id)).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => employee_failure(err, correlation_id),
    }
}

/// Handler for PUT /employees/:id.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Processing edit employee request");

    let request = match json_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let draft = EmployeeDraft::from(request);
    match state.run(move |service| service.update_employee(id, draft)).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => employee_failure(err, correlation_id),
    }
}

/// Handler for DELETE /employees/:id.
async fn delete_employee(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.run(move |service| service.delete_employee(id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /pay-records.
///
/// Accepts `name`, `start_date`, `end_date` and `page` query parameters.
async fn list_pay_records(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (filter, page) = match params.into_query() {
        Ok(query) => query,
        Err(err) => return error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    match state.run(move |service| service.query_pay_records(&filter, page)).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                page = result.page,
                total = result.total,
                duration_us = start_time.elapsed().as_micros(),
                "Pay record query completed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /pay-records.
async fn create_pay_record(
    State(state): State<AppState>,
    payload: Result<Json<PayRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add pay record request");

    let request = match json_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let draft = PayRecordDraft::from(request);
    match state.run(move |service| service.add_pay_record(draft)).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /pay-records/:id, the payslip view.
async fn get_pay_record(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.run(move |service| service.payslip(id)).await {
        Ok(payslip) => (StatusCode::OK, Json(payslip)).into_response(),
        Err(err) => pay_record_failure(err, correlation_id),
    }
}

/// Handler for PUT /pay-records/:id.
async fn update_pay_record(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<PayRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = id, "Processing edit pay record request");

    let request = match json_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let draft = PayRecordDraft::from(request);
    match state.run(move |service| service.update_pay_record(id, draft)).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => pay_record_failure(err, correlation_id),
    }
}

/// Handler for DELETE /pay-records/:id.
async fn delete_pay_record(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.run(move |service| service.delete_pay_record(id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /pay-records/export.
async fn export_pay_records(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();

    match state.run(move |service| service.export_csv()).await {
        Ok(bytes) => {
            info!(
                correlation_id = %correlation_id,
                bytes = bytes.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Pay record export completed"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}
