//! History strategies and navigation state
//!
//! A history mode decides how a browser location encodes the route path:
//! - `Web`: the URL path itself, below the base prefix
//! - `Hash`: the part after `#`, so the server only ever sees the base
//! - `Memory`: the location is the route path, nothing touches the URL

use super::pattern::{fold_case, MatchOptions};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// History-management strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Web,
    Hash,
    Memory,
}

impl HistoryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryMode::Web => "web",
            HistoryMode::Hash => "hash",
            HistoryMode::Memory => "memory",
        }
    }

    /// Extract the route location (path, query, fragment) from a raw location.
    ///
    /// The base prefix is compared with the same case rule as route paths.
    pub fn route_location(&self, base: &BasePath, raw: &str, options: MatchOptions) -> Location {
        match self {
            HistoryMode::Web => {
                let location = Location::parse(strip_origin(raw));
                Location {
                    path: base.strip(&location.path, options.sensitive),
                    ..location
                }
            }
            HistoryMode::Hash => {
                let raw = strip_origin(raw);
                match raw.split_once('#') {
                    Some((_, route)) if !route.is_empty() => {
                        let location = Location::parse(route);
                        Location {
                            fragment: None,
                            ..location
                        }
                    }
                    _ => Location::root(),
                }
            }
            HistoryMode::Memory => Location::parse(raw),
        }
    }

    /// Build the full location string for a concrete route path
    pub fn href(&self, base: &BasePath, route_path: &str) -> String {
        match self {
            HistoryMode::Web | HistoryMode::Memory => base.join(route_path),
            HistoryMode::Hash => {
                let prefix = if base.is_root() {
                    String::from("/")
                } else {
                    format!("{}/", base.as_str())
                };
                format!("{}#{}", prefix, route_path)
            }
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" | "html5" => Ok(HistoryMode::Web),
            "hash" => Ok(HistoryMode::Hash),
            "memory" | "abstract" => Ok(HistoryMode::Memory),
            other => Err(format!(
                "unknown history mode '{}' (expected web, hash or memory)",
                other
            )),
        }
    }
}

/// Normalized base path: starts with `/`, no trailing slash except for root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parse a base URL such as `/`, `/app/` or `app`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBase {
            base: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.contains(['?', '#']) {
            return Err(invalid("base must not contain a query or fragment"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("base must not contain whitespace"));
        }

        let body = strip_origin(trimmed).trim_matches('/');
        if body.split('/').any(str::is_empty) && !body.is_empty() {
            return Err(invalid("base must not contain empty segments"));
        }
        if body.is_empty() {
            Ok(Self::root())
        } else {
            Ok(Self(format!("/{}", body)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Remove the base prefix from a URL path; paths outside the base are
    /// returned unchanged.
    pub fn strip(&self, path: &str, sensitive: bool) -> String {
        if self.is_root() {
            return path.to_string();
        }
        let prefix_len = self.0.len();
        let rest = match path.get(..prefix_len) {
            Some(head) if sensitive && head == self.0 => &path[prefix_len..],
            Some(head) if !sensitive && fold_case(head) == fold_case(&self.0) => {
                &path[prefix_len..]
            }
            _ => return path.to_string(),
        };
        if rest.is_empty() {
            "/".to_string()
        } else if rest.starts_with('/') {
            rest.to_string()
        } else {
            path.to_string()
        }
    }

    /// Prefix a route path with the base
    pub fn join(&self, route_path: &str) -> String {
        if self.is_root() {
            route_path.to_string()
        } else if route_path == "/" {
            format!("{}/", self.0)
        } else {
            format!("{}{}", self.0, route_path)
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A route location split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl Location {
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            fragment: None,
        }
    }

    /// Split `path?query#fragment`; an empty path becomes `/`
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            path,
            query: query.filter(|q| !q.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Drop `scheme://host[:port]` from an absolute URL
fn strip_origin(raw: &str) -> &str {
    match raw.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            match rest.find('/') {
                Some(idx) => &rest[idx..],
                None => "/",
            }
        }
        _ => raw,
    }
}

/// Navigation history with a cursor, capped at `max_entries`
#[derive(Debug, Clone)]
pub struct NavigationState<T> {
    entries: Vec<T>,
    cursor: usize,
    max_entries: usize,
}

impl<T> NavigationState<T> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Push a new entry, dropping any forward entries
    pub fn push(&mut self, entry: T) -> &T {
        if !self.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);

        // Trim history if it exceeds max size
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
        &self.entries[self.cursor]
    }

    /// Replace the current entry, or push if there is none
    pub fn replace(&mut self, entry: T) -> &T {
        if self.is_empty() {
            return self.push(entry);
        }
        self.entries[self.cursor] = entry;
        &self.entries[self.cursor]
    }

    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Go back to the previous entry
    pub fn back(&mut self) -> Option<&T> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Go forward to the next entry
    pub fn forward(&mut self) -> Option<&T> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_normalization() {
        assert_eq!(BasePath::parse("").unwrap().as_str(), "/");
        assert_eq!(BasePath::parse("/").unwrap().as_str(), "/");
        assert_eq!(BasePath::parse("/app/").unwrap().as_str(), "/app");
        assert_eq!(BasePath::parse("app").unwrap().as_str(), "/app");
        assert_eq!(
            BasePath::parse("https://example.com/app/").unwrap().as_str(),
            "/app"
        );
        assert!(BasePath::parse("/app?x").is_err());
        assert!(BasePath::parse("/a//b").is_err());
    }

    #[test]
    fn test_base_strip_and_join() {
        let base = BasePath::parse("/app/").unwrap();
        assert_eq!(base.strip("/app", true), "/");
        assert_eq!(base.strip("/app/preferiti", true), "/preferiti");
        assert_eq!(base.strip("/application", true), "/application");
        assert_eq!(base.strip("/APP/preferiti", false), "/preferiti");
        assert_eq!(base.strip("/APP/preferiti", true), "/APP/preferiti");
        assert_eq!(base.strip("/àpp", false), "/àpp");
        assert_eq!(base.join("/"), "/app/");
        assert_eq!(base.join("/preferiti"), "/app/preferiti");
    }

    #[test]
    fn test_location_parse() {
        let location = Location::parse("/preferiti?ordine=nome#lista");
        assert_eq!(location.path, "/preferiti");
        assert_eq!(location.query.as_deref(), Some("ordine=nome"));
        assert_eq!(location.fragment.as_deref(), Some("lista"));
        assert_eq!(location.to_string(), "/preferiti?ordine=nome#lista");
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?").query, None);
    }

    #[test]
    fn test_web_mode_strips_base_and_origin() {
        let base = BasePath::parse("/app/").unwrap();
        let location = HistoryMode::Web.route_location(
            &base,
            "http://localhost:8080/app/mappamondo?z=2",
            MatchOptions::default(),
        );
        assert_eq!(location.path, "/mappamondo");
        assert_eq!(location.query.as_deref(), Some("z=2"));
    }

    #[test]
    fn test_web_mode_base_follows_case_option() {
        let base = BasePath::parse("/app/").unwrap();
        let loose = MatchOptions::default();
        let sensitive = MatchOptions {
            sensitive: true,
            strict: false,
        };
        assert_eq!(
            HistoryMode::Web.route_location(&base, "/APP/preferiti", loose).path,
            "/preferiti"
        );
        assert_eq!(
            HistoryMode::Web.route_location(&base, "/APP/preferiti", sensitive).path,
            "/APP/preferiti"
        );
    }

    #[test]
    fn test_hash_mode_reads_after_hash() {
        let base = BasePath::parse("/app/").unwrap();
        let location = HistoryMode::Hash.route_location(
            &base,
            "/app/#/preferiti?x=1",
            MatchOptions::default(),
        );
        assert_eq!(location.path, "/preferiti");
        assert_eq!(location.query.as_deref(), Some("x=1"));
        let empty = HistoryMode::Hash.route_location(&base, "/app/", MatchOptions::default());
        assert_eq!(empty.path, "/");
        assert_eq!(HistoryMode::Hash.href(&base, "/preferiti"), "/app/#/preferiti");
        assert_eq!(HistoryMode::Hash.href(&BasePath::root(), "/"), "/#/");
    }

    #[test]
    fn test_memory_mode_ignores_base() {
        let base = BasePath::parse("/app").unwrap();
        let location = HistoryMode::Memory.route_location(
            &base,
            "/app/preferiti",
            MatchOptions::default(),
        );
        assert_eq!(location.path, "/app/preferiti");
    }

    #[test]
    fn test_history_mode_from_str() {
        assert_eq!("HASH".parse::<HistoryMode>(), Ok(HistoryMode::Hash));
        assert_eq!("html5".parse::<HistoryMode>(), Ok(HistoryMode::Web));
        assert!("pushstate".parse::<HistoryMode>().is_err());
    }

    #[test]
    fn test_navigation_state_back_forward() {
        let mut state = NavigationState::new(10);
        assert!(state.current().is_none());
        state.push("a");
        state.push("b");
        state.push("c");
        assert_eq!(state.back(), Some(&"b"));
        assert_eq!(state.back(), Some(&"a"));
        assert_eq!(state.back(), None);
        assert_eq!(state.forward(), Some(&"b"));

        // Pushing drops the forward entries
        state.push("d");
        assert!(!state.can_go_forward());
        assert_eq!(state.len(), 3);
        assert_eq!(state.current(), Some(&"d"));
    }

    #[test]
    fn test_navigation_state_replace_on_empty_pushes() {
        let mut state = NavigationState::new(10);
        assert!(state.is_empty());
        assert_eq!(state.replace("a"), &"a");
        assert!(!state.is_empty());
        assert_eq!(state.replace("b"), &"b");
        assert_eq!(state.len(), 1);
        assert!(!state.can_go_back());
    }

    #[test]
    fn test_navigation_state_cap() {
        let mut state = NavigationState::new(2);
        state.push(1);
        state.push(2);
        state.push(3);
        assert_eq!(state.len(), 2);
        assert_eq!(state.back(), Some(&2));
        assert!(!state.can_go_back());
        assert_eq!(state.replace(9), &9);
        assert_eq!(state.forward(), Some(&3));
    }
}
