use crate::utils::error::{HrError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

/// Connection settings for the hosted record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HrError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` with environment values.
    /// Unknown variables are left in place.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HrError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            logging: None,
        })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HrError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("STAFFHUB_BASE_URL").ok();
        let project_id = std::env::var("STAFFHUB_PROJECT_ID").ok();
        let public_key = std::env::var("STAFFHUB_PUBLIC_KEY").ok();

        let timeout_seconds = match std::env::var("STAFFHUB_TIMEOUT_SECONDS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                HrError::InvalidConfigValueError {
                    field: "STAFFHUB_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            base_url: validate_required_field("STAFFHUB_BASE_URL", &base_url)?.clone(),
            project_id: validate_required_field("STAFFHUB_PROJECT_ID", &project_id)?.clone(),
            public_key: validate_required_field("STAFFHUB_PUBLIC_KEY", &public_key)?.clone(),
            timeout_seconds,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        validate_url("store.base_url", &self.base_url)?;
        validate_non_empty_string("store.project_id", &self.project_id)?;
        validate_non_empty_string("store.public_key", &self.public_key)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("store.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(HrError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }
        Ok(())
    }
}
