//! Configuration management for the Tour Sales Assistant.
//!
//! Configuration is read once at the binary boundary and handed to the core as
//! plain values; nothing below `main` touches the environment. The .env file is
//! loaded with `dotenvy`, which never prints to stdout (MCP uses stdout).

use crate::error::{ConfigError, ConfigResult};
use crate::matching::MatchMode;
use std::env;

/// Default Google Drive v3 endpoint.
pub const DEFAULT_DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";

/// Default Google Sheets v4 endpoint.
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Configuration for the Tour Sales Assistant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for Google Drive and Sheets
    pub google_access_token: String,

    /// Spreadsheet holding the tour catalog
    pub tour_sheet_id: String,

    /// A1 range read from the tour sheet (default: "A:ZZ")
    pub tour_sheet_range: String,

    /// Drive folder holding company documents
    pub knowledge_folder_id: String,

    /// API key for the language model; empty disables model calls
    pub openai_api_key: String,

    /// Chat model name (default: "gpt-4o-mini")
    pub openai_model: String,

    /// Drive API base URL
    pub drive_api_url: String,

    /// Sheets API base URL
    pub sheets_api_url: String,

    /// Language model API base URL
    pub openai_api_url: String,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Retries for transient HTTP failures (default: 2)
    pub max_retries: u32,

    /// Characters kept on each side of a context anchor (default: 3000)
    pub context_radius: usize,

    /// Maximum number of suggested tours (default: 10, 0 = unlimited)
    pub max_match_results: usize,

    /// Which part of a catalog row is matched (default: full record)
    pub match_mode: MatchMode,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GOOGLE_ACCESS_TOKEN`: bearer token for Drive and Sheets
    /// - `TOUR_SHEET_ID`: catalog spreadsheet id
    /// - `KNOWLEDGE_FOLDER_ID`: Drive folder id with company documents
    ///
    /// Optional environment variables:
    /// - `TOUR_SHEET_RANGE` (default: "A:ZZ")
    /// - `OPENAI_API_KEY` (default: empty), `OPENAI_MODEL` (default: "gpt-4o-mini")
    /// - `DRIVE_API_BASE_URL`, `SHEETS_API_BASE_URL`, `OPENAI_API_BASE_URL`
    /// - `REQUEST_TIMEOUT` seconds (default: 30), `MAX_RETRIES` (default: 2)
    /// - `CONTEXT_RADIUS` (default: 3000), `MAX_MATCH_RESULTS` (default: 10)
    /// - `MATCH_MODE` ("full" or "name", default: "full"), `NAME_FIELD` (default: "Tour")
    /// - `LOG_LEVEL` (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let google_access_token = Self::required("GOOGLE_ACCESS_TOKEN")?;
        let tour_sheet_id = Self::required("TOUR_SHEET_ID")?;
        let knowledge_folder_id = Self::required("KNOWLEDGE_FOLDER_ID")?;

        let drive_api_url = Self::parse_env_url("DRIVE_API_BASE_URL", DEFAULT_DRIVE_API_URL)?;
        let sheets_api_url = Self::parse_env_url("SHEETS_API_BASE_URL", DEFAULT_SHEETS_API_URL)?;
        let openai_api_url = Self::parse_env_url("OPENAI_API_BASE_URL", DEFAULT_OPENAI_API_URL)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let max_retries = Self::parse_env_u64("MAX_RETRIES", 2)?;
        if max_retries > 10 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_RETRIES".to_string(),
                reason: "Must be between 0 and 10".to_string(),
            });
        }

        let context_radius = Self::parse_env_usize("CONTEXT_RADIUS", 3000)?;
        if context_radius == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CONTEXT_RADIUS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let max_match_results = Self::parse_env_usize("MAX_MATCH_RESULTS", 10)?;
        let match_mode = Self::parse_match_mode()?;

        Ok(Config {
            google_access_token,
            tour_sheet_id,
            tour_sheet_range: env::var("TOUR_SHEET_RANGE").unwrap_or_else(|_| "A:ZZ".to_string()),
            knowledge_folder_id,
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            drive_api_url,
            sheets_api_url,
            openai_api_url,
            request_timeout,
            max_retries: max_retries as u32,
            context_radius,
            max_match_results,
            match_mode,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()),
        })
    }

    /// Read a required, non-blank environment variable.
    fn required(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Read an optional base URL, validating its scheme.
    fn parse_env_url(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        Ok(url)
    }

    /// Parse `MATCH_MODE` and `NAME_FIELD` into a [`MatchMode`].
    fn parse_match_mode() -> ConfigResult<MatchMode> {
        let mode = env::var("MATCH_MODE").unwrap_or_else(|_| "full".to_string());

        match mode.trim().to_lowercase().as_str() {
            "full" => Ok(MatchMode::FullRecord),
            "name" => Ok(MatchMode::NameOnly {
                field: env::var("NAME_FIELD").unwrap_or_else(|_| "Tour".to_string()),
            }),
            other => Err(ConfigError::InvalidValue {
                var: "MATCH_MODE".to_string(),
                reason: format!("Expected \"full\" or \"name\", got: {}", other),
            }),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_access_token: String::new(),
            tour_sheet_id: String::new(),
            tour_sheet_range: "A:ZZ".to_string(),
            knowledge_folder_id: String::new(),
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            drive_api_url: DEFAULT_DRIVE_API_URL.to_string(),
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            request_timeout: 30,
            max_retries: 2,
            context_radius: 3000,
            max_match_results: 10,
            match_mode: MatchMode::FullRecord,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: &[&str] = &[
        "GOOGLE_ACCESS_TOKEN",
        "TOUR_SHEET_ID",
        "KNOWLEDGE_FOLDER_ID",
        "TOUR_SHEET_RANGE",
        "OPENAI_API_KEY",
        "OPENAI_MODEL",
        "DRIVE_API_BASE_URL",
        "SHEETS_API_BASE_URL",
        "OPENAI_API_BASE_URL",
        "REQUEST_TIMEOUT",
        "MAX_RETRIES",
        "CONTEXT_RADIUS",
        "MAX_MATCH_RESULTS",
        "MATCH_MODE",
        "NAME_FIELD",
        "LOG_LEVEL",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            // Start from a clean slate so a developer's .env cannot leak in
            for var in ALL_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }

        fn set_required(&mut self) {
            self.set("GOOGLE_ACCESS_TOKEN", "test-token");
            self.set("TOUR_SHEET_ID", "sheet-123");
            self.set("KNOWLEDGE_FOLDER_ID", "folder-456");
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.context_radius, 3000);
        assert_eq!(config.max_match_results, 10);
        assert_eq!(config.match_mode, MatchMode::FullRecord);
        assert_eq!(config.openai_model, "gpt-4o-mini");
    }

    #[test]
    #[serial]
    fn test_required_var_missing() {
        let _guard = EnvGuard::new();

        let result = Config::required("GOOGLE_ACCESS_TOKEN");
        match result {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "GOOGLE_ACCESS_TOKEN"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_blank_token() {
        let mut guard = EnvGuard::new();
        guard.set_required();
        guard.set("GOOGLE_ACCESS_TOKEN", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "GOOGLE_ACCESS_TOKEN"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set_required();
        guard.set("DRIVE_API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DRIVE_API_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set_required();
        guard.set("CONTEXT_RADIUS", "1500");
        guard.set("MAX_MATCH_RESULTS", "3");
        guard.set("MATCH_MODE", "name");
        guard.set("NAME_FIELD", "Tên tour");

        let result = Config::from_env();
        assert!(result.is_ok(), "Config should be valid: {:?}", result);

        let config = result.unwrap();
        assert_eq!(config.google_access_token, "test-token");
        assert_eq!(config.tour_sheet_id, "sheet-123");
        assert_eq!(config.knowledge_folder_id, "folder-456");
        assert_eq!(config.context_radius, 1500);
        assert_eq!(config.max_match_results, 3);
        assert_eq!(
            config.match_mode,
            MatchMode::NameOnly {
                field: "Tên tour".to_string()
            }
        );
        assert_eq!(config.drive_api_url, DEFAULT_DRIVE_API_URL);
        assert!(config.openai_api_key.is_empty());
    }

    #[test]
    #[serial]
    fn test_config_invalid_match_mode() {
        let mut guard = EnvGuard::new();
        guard.set_required();
        guard.set("MATCH_MODE", "semantic");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MATCH_MODE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_radius_rejected() {
        let mut guard = EnvGuard::new();
        guard.set_required();
        guard.set("CONTEXT_RADIUS", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CONTEXT_RADIUS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
