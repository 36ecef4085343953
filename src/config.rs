//! Configuration management for the contacts pipeline.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file is honoured when present; it is read with
//! `dotenvy`, which never writes to stdout (stdout carries the JSON lines).

use crate::error::{ConfigError, ConfigResult};
use crate::merging::MergePolicy;
use crate::sorting::SortPolicy;
use std::env;
use std::path::PathBuf;

/// Configuration for the contacts pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding contact sources and records
    pub contacts_file: PathBuf,

    /// Sort policy applied on startup and used for the sort badge (default: BY_NAME)
    pub default_sort_policy: SortPolicy,

    /// Identity keys used when merging records (default: number,email,full_name)
    pub merge_policy: MergePolicy,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CONTACTS_DATA_FILE`: Path of the contacts JSON file
    ///
    /// Optional environment variables:
    /// - `DEFAULT_SORT_POLICY`: One of BY_NAME, BY_NAME_REVERSED, BY_SURNAME, BY_SURNAME_REVERSED
    /// - `MERGE_KEYS`: Comma separated merge keys (default: "number,email,full_name")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let contacts_file = env::var("CONTACTS_DATA_FILE")
            .map_err(|_| ConfigError::MissingVar("CONTACTS_DATA_FILE".to_string()))?;

        if contacts_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_DATA_FILE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let default_sort_policy = match env::var("DEFAULT_SORT_POLICY") {
            Ok(val) => val.parse::<SortPolicy>().map_err(|e| ConfigError::InvalidValue {
                var: "DEFAULT_SORT_POLICY".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => SortPolicy::default(),
        };

        let merge_policy = match env::var("MERGE_KEYS") {
            Ok(val) => MergePolicy::parse(&val).map_err(|reason| ConfigError::InvalidValue {
                var: "MERGE_KEYS".to_string(),
                reason,
            })?,
            Err(_) => MergePolicy::default(),
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            contacts_file: PathBuf::from(contacts_file),
            default_sort_policy,
            merge_policy,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contacts_file: PathBuf::new(),
            default_sort_policy: SortPolicy::default(),
            merge_policy: MergePolicy::default(),
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merging::MergeKey;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 4] = [
        "CONTACTS_DATA_FILE",
        "DEFAULT_SORT_POLICY",
        "MERGE_KEYS",
        "LOG_LEVEL",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard;

    impl EnvGuard {
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_sort_policy, SortPolicy::ByName);
        assert_eq!(config.merge_policy, MergePolicy::default());
        assert_eq!(config.log_level, "error");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACTS_DATA_FILE", "/tmp/contacts.json");
        guard.set("DEFAULT_SORT_POLICY", "BY_SURNAME");
        guard.set("MERGE_KEYS", "email,number");

        let config = Config::from_env().unwrap();
        assert_eq!(config.contacts_file, PathBuf::from("/tmp/contacts.json"));
        assert_eq!(config.default_sort_policy, SortPolicy::BySurname);
        assert_eq!(
            config.merge_policy.keys(),
            &[MergeKey::Email, MergeKey::NormalizedNumber]
        );
    }

    #[test]
    #[serial]
    fn test_config_defaults_for_optional_vars() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACTS_DATA_FILE", "contacts.json");

        let config = Config::from_env().unwrap();
        assert_eq!(config.default_sort_policy, SortPolicy::ByName);
        assert_eq!(config.merge_policy, MergePolicy::default());
    }

    #[test]
    #[serial]
    fn test_config_empty_contacts_file() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACTS_DATA_FILE", "  ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "CONTACTS_DATA_FILE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_sort_policy() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACTS_DATA_FILE", "contacts.json");
        guard.set("DEFAULT_SORT_POLICY", "BY_AGE");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "DEFAULT_SORT_POLICY");
                assert!(reason.contains("BY_AGE"));
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_merge_keys() {
        let mut guard = EnvGuard::new();
        guard.set("CONTACTS_DATA_FILE", "contacts.json");
        guard.set("MERGE_KEYS", "email,email");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MERGE_KEYS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }
}
