//! Application configuration for OKR Copilot.
//!
//! User config lives at `~/.okrcopilot/okrcopilot.toml`.
//! CLI flags override the `PORT` env var, which overrides config file values,
//! which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OkrError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "okrcopilot.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".okrcopilot";

/// Environment variable overriding `server.port`.
pub const PORT_ENV_VAR: &str = "PORT";

// ---------------------------------------------------------------------------
// Config structs (matching okrcopilot.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Published-OKR store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Artificial wait before answering a process request, in ms.
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,

    /// Allowed CORS origins. Empty disables the CORS layer.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            processing_delay_ms: default_processing_delay(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3000
}
fn default_processing_delay() -> u64 {
    1000
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file for published OKRs. A leading `~` is expanded.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Maximum number of published OKRs retained.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            capacity: default_capacity(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.okrcopilot/published.db".into()
}
fn default_capacity() -> usize {
    50
}

impl StorageConfig {
    /// Resolve `path`, expanding a leading `~` to the home directory.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        expand_home(&self.path)
    }
}

fn expand_home(raw: &str) -> Result<PathBuf> {
    match raw.strip_prefix('~') {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| OkrError::config("could not determine home directory"))?;
            Ok(home.join(rest.trim_start_matches(['/', '\\'])))
        }
        None => Ok(PathBuf::from(raw)),
    }
}

impl AppConfig {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.storage.capacity == 0 {
            return Err(OkrError::config("storage.capacity must be at least 1"));
        }
        if self.server.host.trim().is_empty() {
            return Err(OkrError::config("server.host must not be empty"));
        }
        Ok(())
    }

    /// Apply the `PORT` override, if set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(PORT_ENV_VAR) {
            self.apply_port_override(&raw)?;
        }
        Ok(())
    }

    fn apply_port_override(&mut self, raw: &str) -> Result<()> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }
        self.server.port = raw
            .parse()
            .map_err(|e| OkrError::config(format!("invalid {PORT_ENV_VAR} '{raw}': {e}")))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.okrcopilot/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| OkrError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.okrcopilot/okrcopilot.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::debug!(?path, "config file not found, using defaults");
        AppConfig::default()
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OkrError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| OkrError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| OkrError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| OkrError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| OkrError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
