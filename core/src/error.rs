//! Error types and handling for rotta core

use thiserror::Error;

/// Result type alias for rotta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rotta core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Route table or controller configuration defects
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Navigation failures
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

/// Configuration defects, raised while the table or controller is being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duplicate route path '{path}' (already registered by '{existing}')")]
    DuplicatePath { path: String, existing: String },

    #[error("Duplicate route name '{name}'")]
    DuplicateName { name: String },

    #[error("Route name must not be empty (path '{path}')")]
    EmptyName { path: String },

    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid base path '{base}': {reason}")]
    InvalidBase { base: String, reason: String },

    #[error("Fallback route '{name}' is not registered")]
    UnknownFallback { name: String },

    #[error("Fallback route '{name}' has parameters and cannot be used as a fallback")]
    FallbackHasParams { name: String },

    #[error("Unknown route table version '{version}'")]
    UnknownTableVersion { version: String },
}

/// Navigation failures surfaced to the application shell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches location '{location}'")]
    NotFound { location: String },

    #[error("No route named '{name}'")]
    UnknownRoute { name: String },

    #[error("Route '{name}' requires parameter '{param}'")]
    MissingParam { name: String, param: String },
}

impl NavigationError {
    /// Whether this is the unresolved-route condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationError::NotFound { .. })
    }
}
