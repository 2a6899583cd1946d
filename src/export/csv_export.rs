//! CSV rendering of the pay record collection.

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayRecord};
use crate::query::enrich_pay_records;

/// File name offered to clients downloading the export.
pub const EXPORT_FILE_NAME: &str = "pay_records.csv";

/// Column headings of the export, in order.
pub const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Employee Name",
    "Period Start",
    "Period End",
    "Hours Worked",
    "Overtime Hours",
    "Gross Pay",
    "Deductions",
    "Net Pay",
    "Notes",
];

/// Renders every pay record as CSV, in collection order.
///
/// Records are neither filtered nor re-sorted. Each row carries the
/// employee's current name, or "Unknown" if the employee was deleted.
///
/// # Errors
///
/// Returns `Serialization` if the CSV writer fails.
///
/// # Examples
///
/// ```
/// use payroll_engine::export::export_pay_records_csv;
///
/// let bytes = export_pay_records_csv(&[], &[]).unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "ID,Employee Name,Period Start,Period End,Hours Worked,Overtime Hours,Gross Pay,Deductions,Net Pay,Notes\n"
/// );
/// ```
pub fn export_pay_records_csv(
    records: &[PayRecord],
    employees: &[Employee],
) -> EngineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS).map_err(serialization_error)?;

    for row in enrich_pay_records(records, employees) {
        let record = &row.record;
        writer
            .write_record([
                record.id.to_string(),
                row.employee_name,
                record.period_start.to_string(),
                record.period_end.to_string(),
                record.hours_worked.to_string(),
                record.overtime_hours.to_string(),
                record.gross_pay.to_string(),
                record.deductions.to_string(),
                record.net_pay.to_string(),
                record.notes.clone().unwrap_or_default(),
            ])
            .map_err(serialization_error)?;
    }

    writer.into_inner().map_err(|e| EngineError::Serialization {
        message: e.to_string(),
    })
}

fn serialization_error(err: csv::Error) -> EngineError {
    EngineError::Serialization {
        message: err.to_string(),
    }
}
