//! Route table and its registration builder

use super::pattern::{MatchOptions, Params};
use super::route::{RouteDescriptor, RouteId, ViewRef};
use crate::error::ConfigError;
use std::collections::HashMap;
use tracing::debug;

/// Immutable, ordered collection of every route known to the application
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    by_name: HashMap<RouteId, usize>,
    by_key: HashMap<String, usize>,
}

impl RouteTable {
    /// Start an empty builder
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Look up a route by its symbolic name
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// Find the most specific route matching a route path.
    ///
    /// Candidates are ranked by pattern score, so the result does not depend
    /// on declaration order.
    pub fn match_path(
        &self,
        path: &str,
        options: MatchOptions,
    ) -> Option<(&RouteDescriptor, Params)> {
        let found = self
            .routes
            .iter()
            .filter_map(|route| {
                route
                    .path
                    .match_path(path, options)
                    .map(|params| (route, params))
            })
            .max_by(|(a, _), (b, _)| a.path.score().cmp(&b.path.score()));

        if let Some((route, _)) = &found {
            debug!(path, route = %route.name, "matched route");
        }
        found
    }

    /// Whether this table is a monotonic extension of `other`: every route of
    /// `other` is present unchanged and in the same relative order.
    pub fn extends(&self, other: &RouteTable) -> bool {
        let mut remaining = self.routes.iter();
        other
            .routes
            .iter()
            .all(|wanted| remaining.any(|route| route == wanted))
    }

    /// Strict extension: `extends` and adds at least one route
    pub fn strictly_extends(&self, other: &RouteTable) -> bool {
        self.len() > other.len() && self.extends(other)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDescriptor;
    type IntoIter = std::slice::Iter<'a, RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Builder enforcing path and name uniqueness at registration time
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    table: RouteTable,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue registering on top of an existing table
    pub fn extend(table: RouteTable) -> Self {
        Self { table }
    }

    /// Register a route, failing fast on a duplicate path or name
    pub fn register_route(mut self, route: RouteDescriptor) -> Result<Self, ConfigError> {
        let key = route.path.uniqueness_key();
        if let Some(&idx) = self.table.by_key.get(&key) {
            return Err(ConfigError::DuplicatePath {
                path: route.path.as_str().to_string(),
                existing: self.table.routes[idx].name.to_string(),
            });
        }
        if self.table.by_name.contains_key(&route.name) {
            return Err(ConfigError::DuplicateName {
                name: route.name.to_string(),
            });
        }

        let idx = self.table.routes.len();
        self.table.by_key.insert(key, idx);
        self.table.by_name.insert(route.name.clone(), idx);
        self.table.routes.push(route);
        Ok(self)
    }

    /// Shorthand for registering a route without metadata
    pub fn route(
        self,
        path: &str,
        name: impl Into<RouteId>,
        view: ViewRef,
    ) -> Result<Self, ConfigError> {
        self.register_route(RouteDescriptor::new(path, name, view)?)
    }

    pub fn build(self) -> RouteTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ViewRef = ViewRef::new("A");
    const B: ViewRef = ViewRef::new("B");

    fn table() -> RouteTable {
        RouteTable::builder()
            .route("/", "root", A)
            .and_then(|b| b.route("/paesi/:codice", "paese", B))
            .and_then(|b| b.route("/paesi/italia", "italia", B))
            .unwrap()
            .build()
    }

    #[test]
    fn test_register_rejects_duplicate_path() {
        let err = RouteTable::builder()
            .route("/preferiti", "a", A)
            .and_then(|b| b.route("/Preferiti/", "b", B))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicatePath {
                path: "/Preferiti/".to_string(),
                existing: "a".to_string()
            }
        );
    }

    #[test]
    fn test_register_rejects_unicode_case_variants() {
        for (first, second) in [("/À", "/à"), ("/à", "/À")] {
            let err = RouteTable::builder()
                .route(first, "first", A)
                .and_then(|b| b.route(second, "second", B))
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::DuplicatePath {
                    path: second.to_string(),
                    existing: "first".to_string()
                }
            );
        }
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let err = RouteTable::builder()
            .route("/", "Home", A)
            .and_then(|b| b.route("/altro", "Home", B))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateName {
                name: "Home".to_string()
            }
        );
    }

    #[test]
    fn test_static_route_wins_regardless_of_order() {
        let table = table();
        let (route, params) = table
            .match_path("/paesi/italia", MatchOptions::default())
            .unwrap();
        assert_eq!(route.name.as_str(), "italia");
        assert!(params.is_empty());

        let (route, params) = table
            .match_path("/paesi/FR", MatchOptions::default())
            .unwrap();
        assert_eq!(route.name.as_str(), "paese");
        assert_eq!(params.get("codice").map(String::as_str), Some("FR"));
    }

    #[test]
    fn test_lookups() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.by_name("paese").unwrap().path.as_str(), "/paesi/:codice");
        assert!(table.by_name("missing").is_none());
        assert!(table.match_path("/nope", MatchOptions::default()).is_none());
    }

    #[test]
    fn test_extends() {
        let base = RouteTable::builder().route("/", "root", A).unwrap().build();
        let bigger = RouteTableBuilder::extend(base.clone())
            .route("/x", "x", B)
            .unwrap()
            .build();
        assert!(bigger.extends(&base));
        assert!(bigger.strictly_extends(&base));
        assert!(!base.strictly_extends(&bigger));
        assert!(!base.extends(&bigger));
    }
}
