//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! application configuration from a YAML file.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads and provides access to the application configuration.
///
/// # File Format
///
/// ```text
/// data_path: /var/lib/payroll/data.json
/// page_size: 6
/// bind_address: 0.0.0.0:3000
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Storing payroll data in {}", loader.config().data_path.display());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown keys (`ConfigParseError`)
    /// - `page_size` is zero or `bind_address` is not a socket address
    ///   (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` names the source in errors.
    pub fn from_yaml(content: &str, origin: &str) -> EngineResult<Self> {
        let parse_error = |message: String| EngineError::ConfigParseError {
            path: origin.to_string(),
            message,
        };

        // An empty file is valid and means "all defaults".
        let config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        };

        if config.page_size == 0 {
            return Err(parse_error("page_size must be at least 1".to_string()));
        }
        if config.bind_address.parse::<SocketAddr>().is_err() {
            return Err(parse_error(format!(
                "bind_address '{}' is not a socket address",
                config.bind_address
            )));
        }

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/payroll.yaml"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap().into_config();
        assert_eq!(config.data_path, PathBuf::from("data.json"));
        assert_eq!(config.page_size, 6);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/payroll.yaml") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loader = ConfigLoader::from_yaml("page_size: 10\n", "inline").unwrap();
        assert_eq!(loader.config().page_size, 10);
        assert_eq!(loader.config().data_path, PathBuf::from("data.json"));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let loader = ConfigLoader::from_yaml("", "inline").unwrap();
        assert_eq!(loader.config(), &AppConfig::default());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        match ConfigLoader::from_yaml("page_size: 0\n", "inline") {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, "inline");
                assert!(message.contains("page_size"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_bind_address_is_rejected() {
        let result = ConfigLoader::from_yaml("bind_address: not-an-address\n", "inline");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = ConfigLoader::from_yaml("page_sise: 4\n", "inline");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let result = ConfigLoader::from_yaml("page_size: [1, 2", "inline");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }
}
