//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure pay calculation: gross pay with the
//! overtime premium, and net pay after deductions.

mod pay;

pub use pay::{OVERTIME_MULTIPLIER, PayBreakdown, compute_pay};
