//! The persisted payroll state and its in-memory mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::PayBreakdown;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeDraft, PayRecord, PayRecordDraft};

/// Display name used for pay records whose employee no longer exists.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown";

/// The complete state held by an [`EntityStore`](super::EntityStore).
///
/// Ids are taken from the two counters and never reused, even after the
/// highest id has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollState {
    /// The id the next added employee receives.
    pub next_employee_id: u64,
    /// The id the next added pay record receives.
    pub next_record_id: u64,
    /// All employees in insertion order.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// All pay records in insertion order.
    #[serde(default)]
    pub pay_records: Vec<PayRecord>,
}

impl Default for PayrollState {
    fn default() -> Self {
        Self {
            next_employee_id: 1,
            next_record_id: 1,
            employees: Vec::new(),
            pay_records: Vec::new(),
        }
    }
}

impl PayrollState {
    /// Looks up an employee by id.
    pub fn employee(&self, id: u64) -> EngineResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    /// Resolves an employee's display name, falling back to "Unknown".
    pub fn employee_name(&self, id: u64) -> &str {
        resolve_employee_name(&self.employees, id)
    }

    /// Appends a new employee with the next id and returns it.
    pub fn add_employee(&mut self, draft: EmployeeDraft, added_at: DateTime<Utc>) -> &Employee {
        let id = self.next_employee_id;
        self.next_employee_id += 1;
        self.employees.push(Employee {
            id,
            name: draft.name,
            pay_rate: draft.pay_rate,
            added_at,
        });
        &self.employees[self.employees.len() - 1]
    }

    /// Replaces an employee's name and rate.
    ///
    /// Existing pay records keep the figures computed at their last edit.
    pub fn update_employee(&mut self, id: u64, draft: EmployeeDraft) -> EngineResult<&Employee> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        employee.name = draft.name;
        employee.pay_rate = draft.pay_rate;
        Ok(employee)
    }

    /// Removes an employee, leaving any pay records that reference it in place.
    ///
    /// Returns whether an employee was removed.
    pub fn delete_employee(&mut self, id: u64) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        self.employees.len() != before
    }

    /// Looks up a pay record by id.
    pub fn pay_record(&self, id: u64) -> EngineResult<&PayRecord> {
        self.pay_records
            .iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::PayRecordNotFound { id })
    }

    /// Appends a new pay record with the next id and returns it.
    pub fn add_pay_record(
        &mut self,
        draft: PayRecordDraft,
        pay: PayBreakdown,
        added_at: DateTime<Utc>,
    ) -> &PayRecord {
        let id = self.next_record_id;
        self.next_record_id += 1;
        self.pay_records.push(PayRecord::new(id, draft, pay, added_at));
        &self.pay_records[self.pay_records.len() - 1]
    }

    /// Replaces every editable field of a pay record.
    pub fn update_pay_record(
        &mut self,
        id: u64,
        draft: PayRecordDraft,
        pay: PayBreakdown,
    ) -> EngineResult<&PayRecord> {
        let record = self
            .pay_records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::PayRecordNotFound { id })?;
        record.replace(draft, pay);
        Ok(record)
    }

    /// Removes a pay record. Returns whether a record was removed.
    pub fn delete_pay_record(&mut self, id: u64) -> bool {
        let before = self.pay_records.len();
        self.pay_records.retain(|r| r.id != id);
        self.pay_records.len() != before
    }
}

/// Dangling-safe employee name lookup shared by the query engine and export.
pub fn resolve_employee_name(employees: &[Employee], id: u64) -> &str {
    employees
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.as_str())
        .unwrap_or(UNKNOWN_EMPLOYEE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn employee_draft(name: &str, rate: i64) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            pay_rate: Decimal::new(rate, 0),
        }
    }

    fn record_draft(employee_id: u64) -> PayRecordDraft {
        PayRecordDraft {
            employee_id,
            period_start: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            hours_worked: Decimal::new(40, 0),
            overtime_hours: Decimal::ZERO,
            deductions: Decimal::ZERO,
            notes: None,
        }
    }

    fn flat_pay(amount: i64) -> PayBreakdown {
        PayBreakdown {
            ordinary_pay: Decimal::new(amount, 0),
            overtime_pay: Decimal::ZERO,
            gross_pay: Decimal::new(amount, 0),
            net_pay: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn test_fresh_state_starts_counters_at_one() {
        let state = PayrollState::default();
        assert_eq!(state.next_employee_id, 1);
        assert_eq!(state.next_record_id, 1);
        assert!(state.employees.is_empty());
        assert!(state.pay_records.is_empty());
    }

    #[test]
    fn test_add_employee_assigns_sequential_ids() {
        let mut state = PayrollState::default();
        let first = state.add_employee(employee_draft("Alice", 20), Utc::now()).id;
        let second = state.add_employee(employee_draft("Bob", 25), Utc::now()).id;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(state.next_employee_id, 3);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut state = PayrollState::default();
        state.add_employee(employee_draft("Alice", 20), Utc::now());
        assert!(state.delete_employee(1));

        let id = state.add_employee(employee_draft("Bob", 25), Utc::now()).id;
        assert_eq!(id, 2);
    }

    #[test]
    fn test_update_employee_preserves_id_and_added_at() {
        let mut state = PayrollState::default();
        let added_at = Utc::now();
        state.add_employee(employee_draft("Alice", 20), added_at);

        let updated = state
            .update_employee(1, employee_draft("Alicia", 22))
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.pay_rate, Decimal::new(22, 0));
        assert_eq!(updated.added_at, added_at);
    }

    #[test]
    fn test_update_missing_employee_is_not_found() {
        let mut state = PayrollState::default();
        let result = state.update_employee(5, employee_draft("Ghost", 1));
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { id: 5 })));
    }

    #[test]
    fn test_delete_employee_leaves_records_dangling() {
        let mut state = PayrollState::default();
        state.add_employee(employee_draft("Alice", 20), Utc::now());
        state.add_pay_record(record_draft(1), flat_pay(800), Utc::now());

        assert!(state.delete_employee(1));
        assert_eq!(state.pay_records.len(), 1);
        assert_eq!(state.employee_name(1), UNKNOWN_EMPLOYEE_NAME);
    }

    #[test]
    fn test_delete_missing_employee_is_a_no_op() {
        let mut state = PayrollState::default();
        assert!(!state.delete_employee(42));
    }

    #[test]
    fn test_pay_record_lifecycle() {
        let mut state = PayrollState::default();
        let added_at = Utc::now();
        let id = state.add_pay_record(record_draft(1), flat_pay(800), added_at).id;
        assert_eq!(id, 1);
        assert_eq!(state.next_record_id, 2);

        let updated = state.update_pay_record(1, record_draft(2), flat_pay(500)).unwrap();
        assert_eq!(updated.employee_id, 2);
        assert_eq!(updated.gross_pay, Decimal::new(500, 0));
        assert_eq!(updated.added_at, added_at);

        assert!(state.delete_pay_record(1));
        assert!(matches!(
            state.pay_record(1),
            Err(EngineError::PayRecordNotFound { id: 1 })
        ));
    }

    #[test]
    fn test_update_missing_pay_record_is_not_found() {
        let mut state = PayrollState::default();
        let result = state.update_pay_record(3, record_draft(1), flat_pay(1));
        assert!(matches!(result, Err(EngineError::PayRecordNotFound { id: 3 })));
    }

    #[test]
    fn test_deserialize_state_document() {
        let json = r#"{
            "next_employee_id": 2,
            "next_record_id": 1,
            "employees": [
                {"id": 1, "name": "Alice", "pay_rate": "20", "added_at": "2026-01-01T00:00:00Z"}
            ]
        }"#;
        let state: PayrollState = serde_json::from_str(json).unwrap();
        assert_eq!(state.employees.len(), 1);
        assert!(state.pay_records.is_empty());
        assert_eq!(state.employee_name(1), "Alice");
    }
}
