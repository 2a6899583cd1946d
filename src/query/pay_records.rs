//! Filtering, sorting and pagination of pay records.
//!
//! Records are joined with their employee's name, filtered by name substring
//! and period bounds, sorted newest period first, then sliced into pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, PayRecord};
use crate::store::resolve_employee_name;

/// Number of records per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// A pay record joined with its employee's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPayRecord {
    /// The stored pay record.
    #[serde(flatten)]
    pub record: PayRecord,
    /// The employee's name, or "Unknown" for a deleted employee.
    pub employee_name: String,
}

/// Criteria narrowing the pay record listing. All present criteria must match.
///
/// # Example
///
/// ```
/// use payroll_engine::query::PayRecordFilter;
///
/// let filter = PayRecordFilter {
///     name: Some("ali".to_string()),
///     ..Default::default()
/// };
/// assert!(filter.matches_name("Alice"));
/// assert!(filter.matches_name("NATALIE"));
/// assert!(!filter.matches_name("Bob"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRecordFilter {
    /// Case-insensitive substring of the employee name.
    ///
    /// A value made only of whitespace counts as no filter, the same as an
    /// empty form field, rather than matching names that contain spaces.
    pub name: Option<String>,
    /// Keep records whose period starts on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Keep records whose period ends on or before this date.
    pub end_date: Option<NaiveDate>,
}

impl PayRecordFilter {
    /// Returns true if `employee_name` satisfies the name criterion.
    pub fn matches_name(&self, employee_name: &str) -> bool {
        match self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(needle) => employee_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }

    /// Returns true if the record's period satisfies both date bounds.
    pub fn matches_period(&self, record: &PayRecord) -> bool {
        self.start_date.is_none_or(|start| record.period_start >= start)
            && self.end_date.is_none_or(|end| record.period_end <= end)
    }

    fn matches(&self, row: &EnrichedPayRecord) -> bool {
        self.matches_name(&row.employee_name) && self.matches_period(&row.record)
    }
}

/// One page of the filtered, sorted pay record listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRecordPage {
    /// The records on this page.
    pub records: Vec<EnrichedPayRecord>,
    /// The 1-indexed page number actually served.
    pub page: usize,
    /// The page size used for slicing.
    pub page_size: usize,
    /// Number of records matching the filter across all pages.
    pub total: usize,
    /// Whether a later page holds more records.
    pub has_more: bool,
}

/// Joins every record with its employee's name, keeping collection order.
pub fn enrich_pay_records(records: &[PayRecord], employees: &[Employee]) -> Vec<EnrichedPayRecord> {
    records
        .iter()
        .map(|record| EnrichedPayRecord {
            record: record.clone(),
            employee_name: resolve_employee_name(employees, record.employee_id).to_string(),
        })
        .collect()
}

/// Applies `filter` and sorts by `period_start`, newest first.
///
/// The sort is stable: records sharing a start date keep their collection
/// order.
pub fn filter_pay_records(
    records: &[PayRecord],
    employees: &[Employee],
    filter: &PayRecordFilter,
) -> Vec<EnrichedPayRecord> {
    let mut rows: Vec<EnrichedPayRecord> = enrich_pay_records(records, employees)
        .into_iter()
        .filter(|row| filter.matches(row))
        .collect();
    rows.sort_by(|a, b| b.record.period_start.cmp(&a.record.period_start));
    rows
}

/// Filters, sorts and paginates pay records.
///
/// # Arguments
///
/// * `records` - The full pay record collection
/// * `employees` - The employees used to resolve names
/// * `filter` - Name and period criteria
/// * `page` - 1-indexed page number; zero or negative is served as page 1
/// * `page_size` - Records per page; zero is served as 1
///
/// # Returns
///
/// The requested page. A page past the end is empty with `has_more = false`.
///
/// # Examples
///
/// ```
/// use payroll_engine::query::{PayRecordFilter, query_pay_records};
///
/// let page = query_pay_records(&[], &[], &PayRecordFilter::default(), 3, 6);
/// assert!(page.records.is_empty());
/// assert!(!page.has_more);
/// ```
pub fn query_pay_records(
    records: &[PayRecord],
    employees: &[Employee],
    filter: &PayRecordFilter,
    page: i64,
    page_size: usize,
) -> PayRecordPage {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let page_size = page_size.max(1);

    let rows = filter_pay_records(records, employees, filter);
    let total = rows.len();
    let offset = page_size.saturating_mul(page - 1);
    let has_more = page_size.saturating_mul(page) < total;

    let records = rows.into_iter().skip(offset).take(page_size).collect();

    PayRecordPage {
        records,
        page,
        page_size,
        total,
        has_more,
    }
}
