use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::i18n::Lang;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the Gestelit backend API.
    pub base_url: String,
    /// Bearer token; also settable via `GESTELIT__SERVER__TOKEN`.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7031/api".to_string(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display language for all chrome and messages.
    #[serde(default)]
    pub language: Lang,
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
    /// Rows per page in entity tables.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_refresh_rate() -> u64 {
    250
}

fn default_page_size() -> usize {
    20
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            refresh_rate_ms: default_refresh_rate(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// TUI mode writes to a file; CLI mode always logs to stderr.
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Local state directory (logs live under it).
    pub state: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let state = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gestelit");
        Self {
            state: state.to_string_lossy().to_string(),
        }
    }
}

impl Config {
    /// Layered load: embedded defaults, then the user config file, then an
    /// explicit `--config` path, then `GESTELIT__`-prefixed environment
    /// variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/gestelit/
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("gestelit").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with GESTELIT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("GESTELIT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save to ~/.config/gestelit/config.toml.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::user_config_path()
            .context("No config directory available on this platform")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        std::fs::write(&config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gestelit").join("config.toml"))
    }

    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.state)
    }

    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}
