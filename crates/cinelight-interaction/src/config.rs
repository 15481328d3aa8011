//! Client configuration for the OMDb service.
//!
//! Values are resolved per field with priority:
//! 1. explicit overrides (command-line flags)
//! 2. environment variables (`OMDB_API_KEY`, `OMDB_BASE_URL`, `OMDB_TIMEOUT_SECS`)
//! 3. `~/.config/cinelight/config.toml`, table `[omdb]`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_API_KEY: &str = "OMDB_API_KEY";
const ENV_BASE_URL: &str = "OMDB_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "OMDB_TIMEOUT_SECS";

/// Errors that can occur while resolving the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OMDb API key not found: pass --api-key, set OMDB_API_KEY, or add api_key to the [omdb] table of the config file"
    )]
    MissingApiKey,

    #[error("Failed to read configuration file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid request timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub omdb: OmdbSection,
}

/// `[omdb]` table. Every field is optional; missing ones fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Per-field overrides from one configuration source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            api_key: env::var(ENV_API_KEY).ok(),
            base_url: env::var(ENV_BASE_URL).ok(),
            timeout_secs,
        })
    }
}

impl From<OmdbSection> for ConfigOverrides {
    fn from(section: OmdbSection) -> Self {
        Self {
            api_key: section.api_key,
            base_url: section.base_url,
            timeout_secs: section.timeout_secs,
        }
    }
}

/// Fully resolved OMDb client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OmdbConfig {
    /// Creates a config with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolves the configuration from flags, environment and the default
    /// config file.
    pub fn resolve(cli: ConfigOverrides) -> Result<Self, ConfigError> {
        let file = match default_config_path() {
            Some(path) => load_config_file(&path)?,
            None => ConfigFile::default(),
        };
        let env = ConfigOverrides::from_env()?;

        Self::resolve_from([cli, env, file.omdb.into()])
    }

    /// Merges sources in priority order; the first source that sets a field wins.
    pub fn resolve_from(
        sources: impl IntoIterator<Item = ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut api_key = None;
        let mut base_url = None;
        let mut timeout_secs = None;

        for source in sources {
            api_key = api_key.or(source.api_key.filter(|k| !k.trim().is_empty()));
            base_url = base_url.or(source.base_url.filter(|u| !u.trim().is_empty()));
            timeout_secs = timeout_secs.or(source.timeout_secs);
        }

        let api_key = api_key.ok_or(ConfigError::MissingApiKey)?;
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs.to_string()));
        }

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Returns the path to the configuration file: ~/.config/cinelight/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("cinelight").join("config.toml"))
}

/// Loads a config file. A missing file is not an error and yields defaults.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        tracing::debug!("No configuration file at {}", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
