//! Core data models for the Payroll Engine.
//!
//! This module contains the domain models used throughout the engine.

mod employee;
mod pay_record;
mod payslip;

pub use employee::{Employee, EmployeeDraft};
pub use pay_record::{PayRecord, PayRecordDraft};
pub use payslip::Payslip;
