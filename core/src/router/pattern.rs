//! Path patterns and segment matching
//!
//! A pattern is a `/`-separated list of segments. A segment is either static
//! text or a `:param` placeholder that captures exactly one location segment.

use crate::error::ConfigError;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters captured while matching a location against a pattern
pub type Params = BTreeMap<String, String>;

/// Matching options shared by every route of a controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare static segments case-sensitively
    pub sensitive: bool,
    /// Treat a trailing slash as significant
    pub strict: bool,
}

/// A single pattern segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Static(String),
    Param(String),
}

impl Segment {
    /// Ranking weight: static segments outrank parameters
    fn weight(&self) -> u8 {
        match self {
            Segment::Static(_) => 3,
            Segment::Param(_) => 2,
        }
    }
}

/// A parsed route path pattern such as `/`, `/preferiti` or `/paesi/:codice`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl PathPattern {
    /// Parse a pattern, rejecting anything that cannot be matched reliably
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("path must not be empty"));
        }
        if !raw.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }
        if raw.contains(['?', '#']) {
            return Err(invalid("path must not contain a query or fragment"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("path must not contain whitespace"));
        }

        let (segments_raw, trailing_slash) = split_segments(raw);
        let mut segments = Vec::with_capacity(segments_raw.len());
        for segment in segments_raw {
            if segment.is_empty() {
                return Err(invalid("path must not contain empty segments"));
            }
            match segment.strip_prefix(':') {
                Some(name) => {
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(invalid("parameter names must be non-empty [A-Za-z0-9_]"));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(invalid("parameter names must be unique"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(segment.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            trailing_slash,
        })
    }

    /// The pattern exactly as it was declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern has no parameters
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Static(_)))
    }

    /// Names of the parameters, in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Key used for duplicate detection.
    ///
    /// Parameter names are erased, trailing slashes dropped and case folded
    /// with the same rule as case-insensitive matching, so two patterns with
    /// the same key can match the same location under some combination of
    /// [`MatchOptions`].
    pub fn uniqueness_key(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut key = String::new();
        for segment in &self.segments {
            key.push('/');
            match segment {
                Segment::Static(text) => key.push_str(&fold_case(text)),
                Segment::Param(_) => key.push(':'),
            }
        }
        key
    }

    /// Ranking used to pick between several matching patterns
    pub fn score(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::weight).collect()
    }

    /// Match a route path (no base, query or fragment) against this pattern
    pub fn match_path(&self, path: &str, options: MatchOptions) -> Option<Params> {
        let (parts, trailing_slash) = split_segments(path);
        if parts.len() != self.segments.len() {
            return None;
        }
        if options.strict && !self.segments.is_empty() && trailing_slash != self.trailing_slash {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(text) => {
                    let equal = if options.sensitive {
                        text == part
                    } else {
                        fold_case(text) == fold_case(part)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path, substituting parameters.
    ///
    /// Returns the name of the first missing parameter on failure.
    pub fn build(&self, params: &Params) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => return Err(name.clone()),
                },
            }
        }
        if self.trailing_slash {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Case folding shared by duplicate detection and case-insensitive matching
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Split a path into segments, reporting whether it ended with a slash.
/// The root path `/` has no segments.
fn split_segments(path: &str) -> (Vec<&str>, bool) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return (Vec::new(), false);
    }
    let (body, trailing_slash) = match trimmed.strip_suffix('/') {
        Some(body) => (body, true),
        None => (trimmed, false),
    };
    (body.split('/').collect(), trailing_slash)
}
