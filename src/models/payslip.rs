//! Payslip view of a single pay record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayRecord;

/// A pay record joined with its employee for display.
///
/// `pay_rate`, `ordinary_pay` and `overtime_pay` are only present while the
/// employee still exists; they reflect the employee's current rate applied to
/// the stored hours. The stored `gross_pay` and `net_pay` are left untouched
/// and stay authoritative: once the rate changes after the record was saved,
/// `ordinary_pay + overtime_pay` no longer equals `gross_pay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// The stored pay record.
    #[serde(flatten)]
    pub record: PayRecord,
    /// The employee's name, or "Unknown" if the employee was deleted.
    pub employee_name: String,
    /// The employee's current hourly rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_rate: Option<Decimal>,
    /// Pay for ordinary hours at the current rate, not the rate the record
    /// was computed with. Absent if the amount is not representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinary_pay: Option<Decimal>,
    /// Pay for overtime hours at the current rate, including the premium.
    /// Absent if the amount is not representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_pay: Option<Decimal>,
}
