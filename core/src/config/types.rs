//! Controller settings
//!
//! Core only accepts plain settings values. File discovery and flag
//! overrides happen in the CLI layer.

use crate::app::TableVersion;
use crate::error::ConfigError;
use crate::router::{BasePath, FallbackPolicy, HistoryMode, MatchOptions, RouteId};
use serde::{Deserialize, Serialize};

/// Environment variable holding the application's base URL
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Default number of history entries kept by the controller
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Settings used to construct a navigation controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// History strategy
    pub history: HistoryMode,
    /// Base URL the application is served under
    pub base_url: String,
    /// Route table version to load
    pub table: TableVersion,
    /// Route name used when nothing matches (None = surface NotFound)
    pub fallback: Option<String>,
    /// Case-sensitive path matching
    pub sensitive: bool,
    /// Trailing slash is significant
    pub strict: bool,
    /// Maximum number of history entries
    pub max_history: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            history: HistoryMode::Web,
            base_url: "/".to_string(),
            table: TableVersion::default(),
            fallback: None,
            sensitive: false,
            strict: false,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl RouterSettings {
    /// Default settings with the base URL taken from `BASE_URL`
    pub fn from_env() -> Self {
        Self::default().with_base_url_from(std::env::var(BASE_URL_ENV).ok())
    }

    /// Override the base URL when a value is present
    pub fn with_base_url_from(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|b| !b.trim().is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    pub fn with_table(mut self, table: TableVersion) -> Self {
        self.table = table;
        self
    }

    pub fn with_fallback(mut self, name: impl Into<String>) -> Self {
        self.fallback = Some(name.into());
        self
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        match &self.fallback {
            Some(name) => FallbackPolicy::Redirect(RouteId::new(name.clone())),
            None => FallbackPolicy::Reject,
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            sensitive: self.sensitive,
            strict: self.strict,
        }
    }

    /// Validate the settings that do not depend on the route table
    pub fn validate(&self) -> Result<(), ConfigError> {
        BasePath::parse(&self.base_url)?;
        if let Some(name) = &self.fallback {
            if name.trim().is_empty() {
                return Err(ConfigError::UnknownFallback { name: name.clone() });
            }
        }
        Ok(())
    }
}
