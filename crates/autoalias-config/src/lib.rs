use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DICTIONARY_PAGE: &str = "roam-autoalias";
pub const DEFAULT_STORAGE_KEY: &str = "roam-autoalias_dictionary";
pub const DEFAULT_STORAGE_DIR: &str = "~/.local/share/autoalias";
pub const DEFAULT_REWRITE_DELAY_MS: u64 = 500;
pub const DEFAULT_REBUILD_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for hosting the alias engine in an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title of the page whose blocks define aliases.
    pub dictionary_page: String,
    /// Key the dictionary blob is stored under.
    pub storage_key: String,
    /// Directory holding the stored dictionary.
    pub storage_dir: PathBuf,
    /// Pause in typing before an edited buffer is rewritten. Committing a
    /// line with Enter rewrites without waiting.
    pub rewrite_delay_ms: u64,
    /// Pause in typing on the dictionary page before it is rebuilt.
    pub rebuild_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let storage_dir = PathBuf::from(DEFAULT_STORAGE_DIR);
        Self {
            dictionary_page: DEFAULT_DICTIONARY_PAGE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: Self::expand_path(&storage_dir).unwrap_or(storage_dir),
            rewrite_delay_ms: DEFAULT_REWRITE_DELAY_MS,
            rebuild_delay_ms: DEFAULT_REBUILD_DELAY_MS,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded storage path
        config.storage_dir = Self::expand_path(&config.storage_dir).unwrap_or(config.storage_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/autoalias");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn rewrite_delay(&self) -> Duration {
        Duration::from_millis(self.rewrite_delay_ms)
    }

    pub fn rebuild_delay(&self) -> Duration {
        Duration::from_millis(self.rebuild_delay_ms)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
