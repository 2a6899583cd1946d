//! Payroll Engine
//!
//! This crate keeps a small payroll ledger: employees with hourly pay rates and
//! the pay records computed for them each pay period. It provides pay
//! computation, a filtered and paginated pay record listing, CSV export and a
//! JSON-file backed entity store, exposed over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod service;
pub mod store;
