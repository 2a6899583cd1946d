//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while storing, calculating,
//! querying and exporting pay records.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { id: 7 };
/// assert_eq!(error.to_string(), "Employee not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or held invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The backing store could not be read or written.
    #[error("Storage failure at '{path}': {message}")]
    Storage {
        /// The location of the backing resource.
        path: String,
        /// A description of the underlying I/O or decode failure.
        message: String,
    },

    /// A caller-supplied value was outside its documented domain.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was looked up.
        id: u64,
    },

    /// The referenced pay record does not exist.
    #[error("Pay record not found: {id}")]
    PayRecordNotFound {
        /// The pay record id that was looked up.
        id: u64,
    },

    /// Export encoding failed.
    #[error("Serialization error: {message}")]
    Serialization {
        /// A description of the encoding failure.
        message: String,
    },
    /// A blocking service task panicked or was cancelled.
    #[error("Background task failed: {message}")]
    TaskFailed {
        /// The join failure reported by the runtime.
        message: String,
    },
}

impl EngineError {
    /// Builds an `InvalidInput` error for the given field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
