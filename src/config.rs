//! Configuration System
//!
//! Layered configuration for the client: built-in defaults, the user's global
//! config file, an optional explicit file, then `OC_CLIENT__*` environment
//! variables. The `[defaults]` table seeds the process-wide context defaults
//! that back every scope chain.

use crate::context::defaults::{install_defaults, Defaults};
use crate::error::ClientError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Highest `--loglevel` the CLI accepts.
pub const MAX_LOGLEVEL: u8 = 10;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Process-wide context defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fallback context values used when no scope sets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub loglevel: Option<u8>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Defaults(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Defaults(msg) => write!(f, "Defaults: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DefaultsConfig {
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("cluster", &self.cluster),
            ("project", &self.project),
            ("token", &self.token),
        ];
        for (name, value) in named {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(format!("{} cannot be empty when set", name));
            }
        }
        if let Some(level) = self.loglevel {
            if level > MAX_LOGLEVEL {
                return Err(format!(
                    "loglevel {} exceeds maximum of {}",
                    level, MAX_LOGLEVEL
                ));
            }
        }
        Ok(())
    }
}

impl From<&DefaultsConfig> for Defaults {
    fn from(config: &DefaultsConfig) -> Self {
        Defaults {
            cluster: config.cluster.clone(),
            project: config.project.clone(),
            token: config.token.clone(),
            loglevel: config.loglevel,
        }
    }
}

impl ClientConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.defaults.validate() {
            errors.push(ValidationError::Defaults(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, then make `[defaults]` the process-wide context defaults.
    pub fn install_defaults(&self) -> Result<(), ClientError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ClientError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        debug!(
            cluster = self.defaults.cluster.as_deref().unwrap_or(""),
            project = self.defaults.project.as_deref().unwrap_or(""),
            "Installing context defaults"
        );
        install_defaults(Defaults::from(&self.defaults));
        Ok(())
    }
}
