//! Config loading facade: assemble sources in precedence order and deserialize.

use super::merge::merge_policy;
use super::sources::{env, explicit_file, global_file};
use super::ClientConfig;
use config::ConfigError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Built-in defaults → global file → `explicit` (if any) → environment.
    pub fn load(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = env::add_to_builder(builder)?;

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        debug!(
            explicit = explicit.map(|p| p.display().to_string()).unwrap_or_default(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Built-in defaults overlaid with a single file; no global file, no environment.
    pub fn load_from_file(path: &Path) -> Result<ClientConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, path)?;
        builder.build()?.try_deserialize()
    }

    /// Configuration with only built-in defaults applied.
    pub fn default() -> ClientConfig {
        merge_policy::builder_with_defaults()
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap_or_default()
    }
}
