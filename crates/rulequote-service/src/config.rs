//! # Service Configuration
//!
//! Configuration management for RuleQuote.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RULEQUOTE_DISCOUNTS_ENABLED=false                                  │
//! │     RULEQUOTE_OUTPUT_DIR=/var/lib/rulequote/documents                  │
//! │     RULEQUOTE_VALID_DAYS=14                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path> / RULEQUOTE_CONFIG                                 │
//! │     ~/.config/rulequote/rulequote.toml (Linux)                         │
//! │     ~/Library/Application Support/com.rulequote.rulequote/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in pricing rules, 30 valid days                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # rulequote.toml
//! [quotes]
//! default_valid_days = 30
//!
//! [documents]
//! output_dir = "./documents"
//!
//! [rules.discounts]
//! enabled = true
//!
//! [rules.discounts.standard]
//! threshold = 500
//! percentage = 0.05
//!
//! [rules.discounts.premium]
//! threshold = 100
//! percentage = 0.10
//!
//! [rules.tax_rates]
//! standard = 0.10
//! premium = 0.08
//! ```

use rulequote_core::RulesConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "rulequote.toml";

/// Longest validity window a quote may default to.
pub const MAX_VALID_DAYS: u32 = 365;

// =============================================================================
// Quote Settings
// =============================================================================

/// Settings for new quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Days until a quote expires when the payload gives no `validUntil`.
    #[serde(default = "default_valid_days")]
    pub default_valid_days: u32,
}

fn default_valid_days() -> u32 {
    30
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            default_valid_days: default_valid_days(),
        }
    }
}

// =============================================================================
// Document Settings
// =============================================================================

/// Settings for rendered quote documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Directory rendered documents are written to. Created on first use.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rulequote", "rulequote")
        .map(|dirs| dirs.data_dir().join("documents"))
        .unwrap_or_else(|| PathBuf::from("documents"))
}

impl Default for DocumentSettings {
    fn default() -> Self {
        DocumentSettings {
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Pricing rules loaded at start.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Quote defaults.
    #[serde(default)]
    pub quotes: QuoteSettings,

    /// Document output.
    #[serde(default)]
    pub documents: DocumentSettings,
}

impl ServiceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or `rulequote.toml` in the platform
    ///    config directory)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(ServiceError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> ServiceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ServiceResult<()> {
        self.rules.validate()?;

        let days = self.quotes.default_valid_days;
        if days == 0 || days > MAX_VALID_DAYS {
            return Err(ServiceError::Config(format!(
                "quotes.default_valid_days must be between 1 and {}, got {}",
                MAX_VALID_DAYS, days
            )));
        }

        if self.documents.output_dir.as_os_str().is_empty() {
            return Err(ServiceError::Config(
                "documents.output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> ServiceResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ServiceConfig::load`]).
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var("RULEQUOTE_DISCOUNTS_ENABLED") {
            match parse_bool(&value) {
                Some(enabled) => {
                    debug!(enabled, "Overriding discount switch from environment");
                    self.rules.discounts.enabled = enabled;
                }
                None => warn!(value = %value, "Ignoring invalid RULEQUOTE_DISCOUNTS_ENABLED"),
            }
        }

        if let Some(dir) = var("RULEQUOTE_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.documents.output_dir = PathBuf::from(dir);
        }

        if let Some(days) = var("RULEQUOTE_VALID_DAYS") {
            match days.trim().parse::<u32>() {
                Ok(d) => self.quotes.default_valid_days = d,
                Err(_) => warn!(value = %days, "Ignoring invalid RULEQUOTE_VALID_DAYS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rulequote", "rulequote")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulequote_core::CustomerTier;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.quotes.default_valid_days, 30);
        assert!(config.rules.discounts.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [quotes]
            default_valid_days = 14

            [documents]
            output_dir = "/tmp/quotes"

            [rules.discounts.standard]
            threshold = 250
            percentage = "0.07"

            [rules.tax_rates]
            standard = "0.0825"
            "#,
        )
        .unwrap();

        assert_eq!(config.quotes.default_valid_days, 14);
        assert_eq!(config.documents.output_dir, PathBuf::from("/tmp/quotes"));

        let standard = config.rules.discounts.rule_for(CustomerTier::Standard);
        assert_eq!(standard.threshold, dec!(250));
        assert_eq!(standard.percentage.value(), dec!(0.07));
        assert_eq!(
            config.rules.tax_rates.rate_for(CustomerTier::Standard).value(),
            dec!(0.0825)
        );
        // Untouched sections keep their defaults
        assert_eq!(
            config.rules.tax_rates.rate_for(CustomerTier::Premium).value(),
            dec!(0.08)
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(env(&[
            ("RULEQUOTE_DISCOUNTS_ENABLED", "false"),
            ("RULEQUOTE_OUTPUT_DIR", "/srv/docs"),
            ("RULEQUOTE_VALID_DAYS", "7"),
        ]));

        assert!(!config.rules.discounts.enabled);
        assert_eq!(config.documents.output_dir, PathBuf::from("/srv/docs"));
        assert_eq!(config.quotes.default_valid_days, 7);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(env(&[
            ("RULEQUOTE_DISCOUNTS_ENABLED", "maybe"),
            ("RULEQUOTE_VALID_DAYS", "soon"),
        ]));
        assert!(config.rules.discounts.enabled);
        assert_eq!(config.quotes.default_valid_days, 30);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServiceConfig::default();
        config.quotes.default_valid_days = 0;
        assert!(matches!(config.validate(), Err(ServiceError::Config(_))));

        config.quotes.default_valid_days = 30;
        config.rules.discounts.premium.threshold = dec!(-5);
        assert!(matches!(config.validate(), Err(ServiceError::Core(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[quotes]\ndefault_valid_days = 45\n").unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(config.quotes.default_valid_days, 45);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServiceConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_load_rejects_bad_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[rules.tax_rates]\nstandard = \"1.5\"\n").unwrap();

        assert!(matches!(
            ServiceConfig::from_file(&path),
            Err(ServiceError::Toml(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let config = ServiceConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[quotes]"));
        assert!(toml_str.contains("[rules.discounts]"));
    }
}
