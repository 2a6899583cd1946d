//! Employee model and its input draft.
//!
//! This module defines the stored [`Employee`] and the [`EmployeeDraft`]
//! supplied by callers when adding or editing an employee.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee whose pay records are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The employee's display name.
    pub name: String,
    /// The hourly pay rate.
    pub pay_rate: Decimal,
    /// When the employee was added. Preserved across edits.
    pub added_at: DateTime<Utc>,
}

/// Caller-supplied employee fields, used for both add and edit.
///
/// Edits are full-field replacements, so the same draft shape serves both.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::EmployeeDraft;
/// use rust_decimal::Decimal;
///
/// let draft = EmployeeDraft {
///     name: "Alice".to_string(),
///     pay_rate: Decimal::new(20, 0),
/// };
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// The employee's display name. Must not be blank.
    pub name: String,
    /// The hourly pay rate. Must not be negative.
    pub pay_rate: Decimal,
}

impl EmployeeDraft {
    /// Rejects a blank name or a negative pay rate.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_input("name", "must not be empty"));
        }
        if self.pay_rate < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "pay_rate",
                format!("must not be negative, got {}", self.pay_rate),
            ));
        }
        Ok(())
    }
}
