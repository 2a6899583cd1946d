//! Tabular export of pay records.

mod csv_export;

pub use csv_export::{EXPORT_FILE_NAME, EXPORT_HEADERS, export_pay_records_csv};
