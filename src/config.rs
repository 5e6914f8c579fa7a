use crate::constants::{defaults, env};
use crate::error::{AsyncForError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Defaults applied to runs started from a configured handle or options value
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AsyncForConfig {
    /// Maximum in-flight items; `<= 0` means unbounded
    pub concurrency_limit: i32,
    pub run_synchronously: bool,
    /// Message carried by progress notifications
    pub message: Option<String>,
}

impl Default for AsyncForConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: defaults::CONCURRENCY_LIMIT,
            run_synchronously: defaults::RUN_SYNCHRONOUSLY,
            message: None,
        }
    }
}

impl AsyncForConfig {
    /// Load from `TASKER_ASYNC_FOR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(env::CONFIG_PREFIX))
    }

    /// Load from a prepared environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        Self::build(
            config::Config::builder().add_source(environment.prefix_separator("_").try_parsing(true)),
        )
    }

    /// Load from a TOML, YAML or JSON file; the format follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading async-for configuration file");
        Self::build(config::Config::builder().add_source(config::File::from(path)))
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| AsyncForError::ConfigurationError(e.to_string()))?;

        debug!(
            concurrency_limit = config.concurrency_limit,
            run_synchronously = config.run_synchronously,
            "Async-for configuration loaded"
        );

        Ok(config)
    }
}
