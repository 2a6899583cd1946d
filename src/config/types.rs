//! Configuration types for the Payroll Engine.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the YAML configuration file.

use serde::Deserialize;
use std::path::PathBuf;

use crate::query::DEFAULT_PAGE_SIZE;

/// Application configuration.
///
/// Every field is optional in the YAML file and falls back to its default.
///
/// # Example
///
/// ```
/// use payroll_engine::config::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.page_size, 6);
/// assert_eq!(config.data_path.to_str(), Some("data.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Location of the JSON document holding employees and pay records.
    pub data_path: PathBuf,
    /// Number of pay records per listing page. Must be at least 1.
    pub page_size: usize,
    /// Socket address the HTTP server binds to.
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            page_size: DEFAULT_PAGE_SIZE,
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}
