//! Pay record model and its input draft.
//!
//! A [`PayRecord`] captures the hours an employee worked over a pay period
//! together with the pay figures derived from them. Callers never supply
//! `gross_pay` or `net_pay`; those come from the pay calculator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayBreakdown;
use crate::error::{EngineError, EngineResult};

/// A stored pay record for one employee and one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayRecord;
///
/// let json = r#"{
///     "id": 1,
///     "employee_id": 1,
///     "period_start": "2026-01-05",
///     "period_end": "2026-01-11",
///     "hours_worked": "40",
///     "gross_pay": "800",
///     "net_pay": "800",
///     "added_at": "2026-01-12T08:00:00Z"
/// }"#;
/// let record: PayRecord = serde_json::from_str(json).unwrap();
/// assert!(record.overtime_hours.is_zero());
/// assert!(record.notes.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRecord {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The employee this record belongs to. May reference a deleted employee.
    pub employee_id: u64,
    /// First day of the pay period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the pay period (inclusive).
    pub period_end: NaiveDate,
    /// Ordinary hours worked in the period.
    pub hours_worked: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Amount deducted from gross pay.
    #[serde(default)]
    pub deductions: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Derived gross pay, including the overtime premium.
    pub gross_pay: Decimal,
    /// Derived net pay. May be negative.
    pub net_pay: Decimal,
    /// When the record was created. Never changes.
    pub added_at: DateTime<Utc>,
}

impl PayRecord {
    /// Builds a new record from a validated draft and its computed pay.
    pub fn new(id: u64, draft: PayRecordDraft, pay: PayBreakdown, added_at: DateTime<Utc>) -> Self {
        Self {
            id,
            employee_id: draft.employee_id,
            period_start: draft.period_start,
            period_end: draft.period_end,
            hours_worked: draft.hours_worked,
            overtime_hours: draft.overtime_hours,
            deductions: draft.deductions,
            notes: normalize_notes(draft.notes),
            gross_pay: pay.gross_pay,
            net_pay: pay.net_pay,
            added_at,
        }
    }

    /// Replaces every caller-editable field, keeping `id` and `added_at`.
    pub fn replace(&mut self, draft: PayRecordDraft, pay: PayBreakdown) {
        self.employee_id = draft.employee_id;
        self.period_start = draft.period_start;
        self.period_end = draft.period_end;
        self.hours_worked = draft.hours_worked;
        self.overtime_hours = draft.overtime_hours;
        self.deductions = draft.deductions;
        self.notes = normalize_notes(draft.notes);
        self.gross_pay = pay.gross_pay;
        self.net_pay = pay.net_pay;
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

/// Caller-supplied pay record fields, used for both add and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRecordDraft {
    /// The employee the record belongs to.
    pub employee_id: u64,
    /// First day of the pay period.
    pub period_start: NaiveDate,
    /// Last day of the pay period.
    pub period_end: NaiveDate,
    /// Ordinary hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours worked, defaulting to zero.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Deductions, defaulting to zero.
    #[serde(default)]
    pub deductions: Decimal,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl PayRecordDraft {
    /// Rejects negative hours or deductions.
    ///
    /// The period bounds are deliberately not compared: a period whose start
    /// falls after its end is accepted as given.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("hours_worked", self.hours_worked),
            ("overtime_hours", self.overtime_hours),
            ("deductions", self.deductions),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
        }
        Ok(())
    }
}
