//! `strata.toml` loading for the scaffolding tools.
//!
//! ```toml
//! [connection]
//! connection_string = "Server=.;Database=Blogging"
//! command_timeout_secs = 30
//!
//! [scaffold]
//! module = "blogging"
//! context = "BloggingContext"
//! dialect = "sql_server"
//! ```

use serde::Deserialize;
use std::{fmt, fs, io, path::Path, time::Duration};
use thiserror::Error as ThisError;

/// File name looked up when no explicit config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "strata.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config field '{0}' must not be empty")]
    EmptyField(&'static str),
}

///
/// StrataConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StrataConfig {
    pub connection: ConnectionConfig,
    pub scaffold: ScaffoldConfig,
}

impl StrataConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("connection.connection_string", &self.connection.connection_string),
            ("scaffold.module", &self.scaffold.module),
            ("scaffold.context", &self.scaffold.context),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }

        Ok(())
    }
}

///
/// ConnectionConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub connection_string: String,

    #[serde(default)]
    pub command_timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

///
/// ScaffoldConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    pub module: String,
    pub context: String,

    #[serde(default)]
    pub dialect: Dialect,
}

///
/// Dialect
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    SqlServer,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SqlServer => "sql_server",
        };
        write!(f, "{label}")
    }
}

/// Read and validate the config file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<StrataConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&text)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<StrataConfig, ConfigError> {
    let config: StrataConfig = toml::from_str(text)?;
    config.validate()?;

    Ok(config)
}
