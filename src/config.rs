//! Validator configuration.
//!
//! Controls how [`RuleValidator`](crate::validator::RuleValidator) words the
//! [`ValidationFailure`](crate::failure::ValidationFailure) it raises. Config
//! can be built in code or loaded from YAML; unknown fields in the YAML are
//! ignored for forward compatibility and missing fields take their defaults.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};
use crate::failure::{DEFAULT_MESSAGE, join_errors};
use crate::rule::ValidationError;

/// Configuration for a rule validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Message of the raised failure.
    pub failure_message: Cow<'static, str>,

    /// Whether to append the errors to the failure message.
    pub list_errors_in_message: bool,

    /// Separator between errors when they are listed in the message.
    pub error_separator: Cow<'static, str>,
}

impl Config {
    /// The default configuration, usable in `const` contexts.
    pub const DEFAULT: Config = Config {
        failure_message: Cow::Borrowed(DEFAULT_MESSAGE),
        list_errors_in_message: false,
        error_separator: Cow::Borrowed(", "),
    };

    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(RuleError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RuleError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RuleError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RuleError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// - `failure_message` must be non-empty
    /// - `error_separator` must be non-empty when errors are listed
    pub fn validate(&self) -> Result<()> {
        if self.failure_message.trim().is_empty() {
            return Err(RuleError::Config(
                "config validation failed: failure_message must be non-empty".to_string(),
            ));
        }

        if self.list_errors_in_message && self.error_separator.is_empty() {
            return Err(RuleError::Config(
                "config validation failed: error_separator must be non-empty when list_errors_in_message is set"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Build the failure message for `errors`.
    pub fn failure_message_for<'a, E, I>(&self, errors: I) -> String
    where
        E: ValidationError,
        I: IntoIterator<Item = &'a E>,
    {
        if !self.list_errors_in_message {
            return self.failure_message.to_string();
        }

        format!(
            "{}: {}",
            self.failure_message
                .strip_suffix('.')
                .unwrap_or(&self.failure_message),
            join_errors(errors, &self.error_separator)
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
