//! Simple CLI configuration loader for rotta
//!
//! Implements single-source priority loading with env and flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./rotta.json or ./.rotta/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/rotta/config.json or the platform config dir
//! 4. Built-in defaults (no files)
//!
//! `BASE_URL` from the environment is applied on top of the file, and
//! command-line flags are applied last.

use anyhow::{anyhow, Context, Result};
use rotta_core::config::BASE_URL_ENV;
use rotta_core::{HistoryMode, RouterSettings, TableVersion};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration loader
#[derive(Debug, Clone, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_override: Option<String>,
    history_override: Option<HistoryMode>,
    table_override: Option<TableVersion>,
    fallback_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base URL override
    pub fn with_base_override(mut self, base: String) -> Self {
        self.base_override = Some(base);
        self
    }

    /// Set history mode override
    pub fn with_history_override(mut self, history: HistoryMode) -> Self {
        self.history_override = Some(history);
        self
    }

    /// Set route table version override
    pub fn with_table_override(mut self, table: TableVersion) -> Self {
        self.table_override = Some(table);
        self
    }

    /// Set fallback route override
    pub fn with_fallback_override(mut self, fallback: String) -> Self {
        self.fallback_override = Some(fallback);
        self
    }

    /// Load and resolve settings
    pub async fn load(&self) -> Result<RouterSettings> {
        // Step 1: Find and load base configuration
        let settings = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Environment, then flag overrides
        let mut settings = settings.with_base_url_from(std::env::var(BASE_URL_ENV).ok());
        if let Some(base) = &self.base_override {
            settings.base_url = base.clone();
        }
        if let Some(history) = self.history_override {
            settings.history = history;
        }
        if let Some(table) = self.table_override {
            settings.table = table;
        }
        if let Some(fallback) = &self.fallback_override {
            settings.fallback = Some(fallback.clone());
        }

        // Step 3: Validate
        settings
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        debug!(
            history = %settings.history,
            base_url = %settings.base_url,
            table = %settings.table,
            "settings resolved"
        );
        Ok(settings)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RouterSettings> {
        // 1. Current working directory
        if let Some(settings) = self.try_load_cwd().await? {
            return Ok(settings);
        }

        // 2. XDG config directory
        if let Some(settings) = self.try_load_xdg().await? {
            return Ok(settings);
        }

        // 3. Defaults
        debug!("no config file found, using defaults");
        Ok(RouterSettings::default())
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<RouterSettings>> {
        let cwd = std::env::current_dir()?;

        // Try ./rotta.json first
        let rotta_json = cwd.join("rotta.json");
        if rotta_json.exists() {
            return Ok(Some(self.load_file(&rotta_json).await?));
        }

        // Try ./.rotta/config.json
        let rotta_dir_config = cwd.join(".rotta").join("config.json");
        if rotta_dir_config.exists() {
            return Ok(Some(self.load_file(&rotta_dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RouterSettings>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("rotta").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RouterSettings> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RouterSettings> {
        debug!(path = %path.display(), "loading config file");
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
            _ => dirs::config_dir(),
        }
    }
}
