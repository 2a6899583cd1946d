//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads the application configuration (storage location, page
//! size and bind address) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Page size: {}", config.config().page_size);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::AppConfig;
