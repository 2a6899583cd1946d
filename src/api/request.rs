//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON bodies for creating and editing employees and
//! pay records, and the query-string parameters of the pay record listing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeDraft, PayRecordDraft};
use crate::query::PayRecordFilter;

/// Request body for creating or replacing an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee's display name.
    pub name: String,
    /// The hourly pay rate.
    pub pay_rate: Decimal,
}

/// Request body for creating or replacing a pay record.
///
/// Gross and net pay are not accepted; they are always computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRecordRequest {
    /// The employee the record belongs to.
    pub employee_id: u64,
    /// First day of the pay period.
    pub period_start: NaiveDate,
    /// Last day of the pay period.
    pub period_end: NaiveDate,
    /// Ordinary hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Deductions from gross pay.
    #[serde(default)]
    pub deductions: Decimal,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query-string parameters of `GET /pay-records`.
///
/// Values arrive as raw strings so that blank form fields can be told apart
/// from malformed ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Employee name substring.
    pub name: Option<String>,
    /// Earliest period start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Latest period end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// 1-indexed page number.
    pub page: Option<String>,
}

impl ListParams {
    /// Converts the raw parameters into a filter and page number.
    ///
    /// Blank values count as absent. A malformed date is `InvalidInput`; a
    /// malformed page number falls back to page 1.
    pub fn into_query(self) -> EngineResult<(PayRecordFilter, i64)> {
        let filter = PayRecordFilter {
            name: non_blank(self.name),
            start_date: parse_date("start_date", self.start_date)?,
            end_date: parse_date("end_date", self.end_date)?,
        };
        let page = non_blank(self.page)
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Ok((filter, page))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> EngineResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                EngineError::invalid_input(field, format!("'{}' is not a YYYY-MM-DD date", raw))
            })
        })
        .transpose()
}

impl From<EmployeeRequest> for EmployeeDraft {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeDraft {
            name: req.name,
            pay_rate: req.pay_rate,
        }
    }
}

impl From<PayRecordRequest> for PayRecordDraft {
    fn from(req: PayRecordRequest) -> Self {
        PayRecordDraft {
            employee_id: req.employee_id,
            period_start: req.period_start,
            period_end: req.period_end,
            hours_worked: req.hours_worked,
            overtime_hours: req.overtime_hours,
            deductions: req.deductions,
            notes: req.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        name: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
        page: Option<&str>,
    ) -> ListParams {
        ListParams {
            name: name.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_deserialize_pay_record_request_with_defaults() {
        let json = r#"{
            "employee_id": 1,
            "period_start": "2026-01-05",
            "period_end": "2026-01-11",
            "hours_worked": 40
        }"#;

        let request: PayRecordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, 1);
        assert_eq!(request.hours_worked, Decimal::new(40, 0));
        assert_eq!(request.overtime_hours, Decimal::ZERO);
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_pay_record_conversion() {
        let request = PayRecordRequest {
            employee_id: 2,
            period_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
            hours_worked: Decimal::new(38, 0),
            overtime_hours: Decimal::new(2, 0),
            deductions: Decimal::new(10, 0),
            notes: Some("ok".to_string()),
        };

        let draft: PayRecordDraft = request.into();
        assert_eq!(draft.employee_id, 2);
        assert_eq!(draft.overtime_hours, Decimal::new(2, 0));
        assert_eq!(draft.notes.as_deref(), Some("ok"));
    }

    #[test]
    fn test_employee_conversion() {
        let draft: EmployeeDraft = EmployeeRequest {
            name: "Alice".to_string(),
            pay_rate: Decimal::new(20, 0),
        }
        .into();
        assert_eq!(draft.name, "Alice");
    }

    #[test]
    fn test_empty_params_mean_no_filter_and_first_page() {
        let (filter, page) = ListParams::default().into_query().unwrap();
        assert_eq!(filter, PayRecordFilter::default());
        assert_eq!(page, 1);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let (filter, page) = params(Some(""), Some(" "), Some(""), Some("")).into_query().unwrap();
        assert_eq!(filter, PayRecordFilter::default());
        assert_eq!(page, 1);
    }

    #[test]
    fn test_dates_and_page_are_parsed() {
        let (filter, page) = params(Some("ali"), Some("2026-01-01"), Some("2026-01-31"), Some("3"))
            .into_query()
            .unwrap();
        assert_eq!(filter.name.as_deref(), Some("ali"));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(page, 3);
    }

    #[test]
    fn test_negative_page_passes_through_for_clamping() {
        let (_, page) = params(None, None, None, Some("-2")).into_query().unwrap();
        assert_eq!(page, -2);
    }

    #[test]
    fn test_malformed_page_falls_back_to_first() {
        let (_, page) = params(None, None, None, Some("two")).into_query().unwrap();
        assert_eq!(page, 1);
    }

    #[test]
    fn test_malformed_date_is_invalid_input() {
        match params(None, Some("01/02/2026"), None, None).into_query() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "start_date");
                assert!(message.contains("01/02/2026"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_impossible_date_is_invalid_input() {
        let result = params(None, None, Some("2026-02-30"), None).into_query();
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }
}
