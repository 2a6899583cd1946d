//! Read-side queries over the pay record collection.

mod pay_records;

pub use pay_records::{
    DEFAULT_PAGE_SIZE, EnrichedPayRecord, PayRecordFilter, PayRecordPage, enrich_pay_records,
    filter_pay_records, query_pay_records,
};
