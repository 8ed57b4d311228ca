//! Route definitions and utilities
//!
//! This module defines the route descriptor and the identifiers it carries.

use super::pattern::PathPattern;
use crate::error::ConfigError;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Unique symbolic identifier for a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl RouteId {
    /// Create a new route ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a view definition owned by the application shell.
///
/// The route table only carries the handle; mounting and rendering the view
/// is up to whoever consumes the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ViewRef(&'static str);

impl ViewRef {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Route definition: a path pattern, a symbolic name and the view to mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Path pattern matched against locations
    pub path: PathPattern,
    /// Symbolic identifier, used instead of literal paths
    pub name: RouteId,
    /// View rendered when the path matches
    pub view: ViewRef,
    /// Additional metadata for the route
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl RouteDescriptor {
    /// Create a new route descriptor, validating the path and name
    pub fn new(
        path: &str,
        name: impl Into<RouteId>,
        view: ViewRef,
    ) -> Result<Self, ConfigError> {
        let path = PathPattern::parse(path)?;
        let name = name.into();
        if name.0.trim().is_empty() {
            return Err(ConfigError::EmptyName {
                path: path.as_str().to_string(),
            });
        }
        Ok(Self {
            path,
            name,
            view,
            meta: BTreeMap::new(),
        })
    }

    /// Add metadata to this route
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Title metadata, if any
    pub fn title(&self) -> Option<&str> {
        self.meta.get("title").map(String::as_str)
    }
}
