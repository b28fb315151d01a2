//! Layered settings: built-in defaults, then a TOML file, then `FORMCRAFT_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_DATA_DIR: &str = "FORMCRAFT_DATA_DIR";
pub const ENV_USER: &str = "FORMCRAFT_USER";
pub const ENV_LOCALE: &str = "FORMCRAFT_LOCALE";

const DEFAULT_USER: &str = "local";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormcraftConfig {
    /// Directory holding the form store.
    pub data_dir: PathBuf,
    /// Identity used for owner-scoped operations.
    pub user: String,
    pub locale: Option<String>,
    /// `tracing` filter used when neither `FORMCRAFT_LOG` nor `RUST_LOG` is set.
    pub log_filter: String,
    /// Maximum number of forms returned by a listing.
    pub page_size: usize,
}

impl Default for FormcraftConfig {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".formcraft")),
            user: DEFAULT_USER.to_string(),
            locale: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            page_size: form_store::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub locale: Option<String>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "formcraft", "formcraft")
}

impl FormcraftConfig {
    /// `<config dir>/formcraft/config.toml` for the current platform.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `FORMCRAFT_*` variables read through `lookup`. Empty values
    /// are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(dir) = read(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(user) = read(ENV_USER) {
            self.user = user;
        }
        if let Some(locale) = read(ENV_LOCALE) {
            self.locale = Some(locale);
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(user) = &overrides.user {
            self.user = user.clone();
        }
        if let Some(locale) = &overrides.locale {
            self.locale = Some(locale.clone());
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.user.trim().is_empty() {
            return Err(ConfigError::Invalid("user must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(())
    }
}
