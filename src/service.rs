//! Payroll operations over an [`EntityStore`].
//!
//! Each operation loads the full state, validates its input, applies the pay
//! calculator or query engine, and saves the state back when it changed. The
//! whole cycle runs under one lock so that concurrent callers sharing a
//! service cannot interleave their load and save steps.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use crate::calculation::compute_pay;
use crate::error::{EngineError, EngineResult};
use crate::export::export_pay_records_csv;
use crate::models::{Employee, EmployeeDraft, PayRecord, PayRecordDraft, Payslip};
use crate::query::{PayRecordFilter, PayRecordPage, query_pay_records};
use crate::store::{EntityStore, PayrollState};

/// Entry point for every payroll operation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeDraft;
/// use payroll_engine::service::PayrollService;
/// use payroll_engine::store::MemoryStore;
/// use rust_decimal::Decimal;
///
/// let service = PayrollService::new(MemoryStore::new(), 6);
/// let alice = service
///     .add_employee(EmployeeDraft {
///         name: "Alice".to_string(),
///         pay_rate: Decimal::new(20, 0),
///     })
///     .unwrap();
/// assert_eq!(alice.id, 1);
/// ```
pub struct PayrollService {
    store: Box<dyn EntityStore>,
    page_size: usize,
    lock: Mutex<()>,
}

impl PayrollService {
    /// Creates a service over `store`, listing `page_size` records per page.
    pub fn new(store: impl EntityStore + 'static, page_size: usize) -> Self {
        Self {
            store: Box::new(store),
            page_size,
            lock: Mutex::new(()),
        }
    }

    /// Returns the configured listing page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn read<T>(&self, f: impl FnOnce(&PayrollState) -> EngineResult<T>) -> EngineResult<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let state = self.store.load()?;
        f(&state)
    }

    /// Runs `f` against freshly loaded state and saves it if `f` reports a change.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut PayrollState) -> EngineResult<(T, bool)>,
    ) -> EngineResult<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut state = self.store.load()?;
        let (value, changed) = f(&mut state)?;
        if changed {
            self.store.save(&state)?;
        }
        Ok(value)
    }

    /// Lists all employees in store order.
    pub fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.read(|state| Ok(state.employees.clone()))
    }

    /// Returns one employee, or `EmployeeNotFound`.
    pub fn employee(&self, id: u64) -> EngineResult<Employee> {
        self.read(|state| state.employee(id).cloned())
    }

    /// Validates and adds an employee.
    pub fn add_employee(&self, draft: EmployeeDraft) -> EngineResult<Employee> {
        draft.validate()?;
        let employee =
            self.write(|state| Ok((state.add_employee(draft, Utc::now()).clone(), true)))?;
        info!(employee_id = employee.id, "Employee added");
        Ok(employee)
    }

    /// Validates and replaces an employee's name and rate.
    ///
    /// Existing pay records are not recomputed.
    pub fn update_employee(&self, id: u64, draft: EmployeeDraft) -> EngineResult<Employee> {
        draft.validate()?;
        let employee = self.write(|state| Ok((state.update_employee(id, draft)?.clone(), true)))?;
        info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    /// Deletes an employee. Its pay records stay and resolve to "Unknown".
    ///
    /// Returns whether an employee was removed; deleting an absent id succeeds.
    pub fn delete_employee(&self, id: u64) -> EngineResult<bool> {
        let removed = self.write(|state| {
            let removed = state.delete_employee(id);
            Ok((removed, removed))
        })?;
        if removed {
            info!(employee_id = id, "Employee deleted");
        } else {
            debug!(employee_id = id, "Delete requested for absent employee");
        }
        Ok(removed)
    }

    /// Returns one page of the filtered pay record listing.
    pub fn query_pay_records(
        &self,
        filter: &PayRecordFilter,
        page: i64,
    ) -> EngineResult<PayRecordPage> {
        self.read(|state| {
            Ok(query_pay_records(
                &state.pay_records,
                &state.employees,
                filter,
                page,
                self.page_size,
            ))
        })
    }

    /// Returns a pay record joined with its employee.
    pub fn payslip(&self, id: u64) -> EngineResult<Payslip> {
        self.read(|state| {
            let record = state.pay_record(id)?.clone();
            let employee_name = state.employee_name(record.employee_id).to_string();

            let (pay_rate, ordinary_pay, overtime_pay) = match state.employee(record.employee_id) {
                Ok(employee) => {
                    // Stored hours are non-negative, so only overflow fails here.
                    let split = match compute_pay(
                        employee.pay_rate,
                        record.hours_worked,
                        record.overtime_hours,
                        record.deductions,
                    ) {
                        Ok(pay) => Some(pay),
                        Err(EngineError::InvalidInput { .. }) => None,
                        Err(err) => return Err(err),
                    };
                    (
                        Some(employee.pay_rate),
                        split.map(|pay| pay.ordinary_pay),
                        split.map(|pay| pay.overtime_pay),
                    )
                }
                Err(EngineError::EmployeeNotFound { .. }) => (None, None, None),
                Err(err) => return Err(err),
            };

            Ok(Payslip {
                record,
                employee_name,
                pay_rate,
                ordinary_pay,
                overtime_pay,
            })
        })
    }

    /// Validates a draft, computes its pay at the employee's rate and adds it.
    ///
    /// Fails with `EmployeeNotFound` if the referenced employee does not exist.
    pub fn add_pay_record(&self, draft: PayRecordDraft) -> EngineResult<PayRecord> {
        draft.validate()?;
        let record = self.write(|state| {
            let rate = state.employee(draft.employee_id)?.pay_rate;
            let pay = compute_pay(
                rate,
                draft.hours_worked,
                draft.overtime_hours,
                draft.deductions,
            )?;
            Ok((state.add_pay_record(draft, pay, Utc::now()).clone(), true))
        })?;
        info!(
            record_id = record.id,
            employee_id = record.employee_id,
            gross_pay = %record.gross_pay,
            net_pay = %record.net_pay,
            "Pay record added"
        );
        Ok(record)
    }

    /// Validates a draft and replaces an existing pay record, recomputing pay.
    pub fn update_pay_record(&self, id: u64, draft: PayRecordDraft) -> EngineResult<PayRecord> {
        draft.validate()?;
        let record = self.write(|state| {
            state.pay_record(id)?;
            let rate = state.employee(draft.employee_id)?.pay_rate;
            let pay = compute_pay(
                rate,
                draft.hours_worked,
                draft.overtime_hours,
                draft.deductions,
            )?;
            Ok((state.update_pay_record(id, draft, pay)?.clone(), true))
        })?;
        info!(
            record_id = id,
            employee_id = record.employee_id,
            gross_pay = %record.gross_pay,
            net_pay = %record.net_pay,
            "Pay record updated"
        );
        Ok(record)
    }

    /// Deletes a pay record. Returns whether a record was removed.
    pub fn delete_pay_record(&self, id: u64) -> EngineResult<bool> {
        let removed = self.write(|state| {
            let removed = state.delete_pay_record(id);
            Ok((removed, removed))
        })?;
        if removed {
            info!(record_id = id, "Pay record deleted");
        } else {
            debug!(record_id = id, "Delete requested for absent pay record");
        }
        Ok(removed)
    }

    /// Renders every pay record as CSV.
    pub fn export_csv(&self) -> EngineResult<Vec<u8>> {
        self.read(|state| export_pay_records_csv(&state.pay_records, &state.employees))
    }
}
