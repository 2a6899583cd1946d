//! Gross and net pay calculation.
//!
//! This module derives the pay figures stored on every pay record from the
//! employee's hourly rate and the record's hours and deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Multiplier applied to the hourly rate for overtime hours (150%).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The pay figures derived for a pay record.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayBreakdown;
/// use rust_decimal::Decimal;
///
/// let pay = PayBreakdown {
///     ordinary_pay: Decimal::new(800, 0),
///     overtime_pay: Decimal::new(150, 0),
///     gross_pay: Decimal::new(950, 0),
///     net_pay: Decimal::new(900, 0),
/// };
/// assert_eq!(pay.ordinary_pay + pay.overtime_pay, pay.gross_pay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Pay for ordinary hours (`hours_worked * pay_rate`).
    pub ordinary_pay: Decimal,
    /// Pay for overtime hours including the premium.
    pub overtime_pay: Decimal,
    /// Ordinary plus overtime pay.
    pub gross_pay: Decimal,
    /// Gross pay minus deductions. Not floored at zero.
    pub net_pay: Decimal,
}

/// Computes gross and net pay.
///
/// `gross_pay = hours_worked * pay_rate + overtime_hours * pay_rate * 1.5` and
/// `net_pay = gross_pay - deductions`. Deductions larger than gross pay yield
/// a negative net pay rather than an error.
///
/// # Arguments
///
/// * `pay_rate` - The employee's hourly rate
/// * `hours_worked` - Ordinary hours in the period
/// * `overtime_hours` - Overtime hours in the period
/// * `deductions` - Amount deducted from gross pay
///
/// # Returns
///
/// A [`PayBreakdown`], or `InvalidInput` naming the first negative argument.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_pay;
/// use rust_decimal::Decimal;
///
/// let pay = compute_pay(
///     Decimal::new(20, 0),
///     Decimal::new(40, 0),
///     Decimal::new(5, 0),
///     Decimal::new(50, 0),
/// )
/// .unwrap();
///
/// assert_eq!(pay.gross_pay, Decimal::new(950, 0));
/// assert_eq!(pay.net_pay, Decimal::new(900, 0));
/// ```
pub fn compute_pay(
    pay_rate: Decimal,
    hours_worked: Decimal,
    overtime_hours: Decimal,
    deductions: Decimal,
) -> EngineResult<PayBreakdown> {
    let inputs = [
        ("pay_rate", pay_rate),
        ("hours_worked", hours_worked),
        ("overtime_hours", overtime_hours),
        ("deductions", deductions),
    ];
    for (field, value) in inputs {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                field,
                format!("must not be negative, got {}", value),
            ));
        }
    }

    let overflow = |field: &str| {
        EngineError::invalid_input(field, "pay amount exceeds the representable range")
    };

    let ordinary_pay = hours_worked
        .checked_mul(pay_rate)
        .ok_or_else(|| overflow("hours_worked"))?;
    let overtime_pay = overtime_hours
        .checked_mul(pay_rate)
        .and_then(|pay| pay.checked_mul(OVERTIME_MULTIPLIER))
        .ok_or_else(|| overflow("overtime_hours"))?;
    let gross_pay = ordinary_pay
        .checked_add(overtime_pay)
        .ok_or_else(|| overflow("overtime_hours"))?;
    let net_pay = gross_pay
        .checked_sub(deductions)
        .ok_or_else(|| overflow("deductions"))?;

    Ok(PayBreakdown {
        ordinary_pay,
        overtime_pay,
        gross_pay,
        net_pay,
    })
}
