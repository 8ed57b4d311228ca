//! Navigation controller
//!
//! Binds a route table to a history strategy and a base path, resolves
//! locations to routes and keeps the navigation history.

use super::history::{BasePath, HistoryMode, Location, NavigationState};
use super::pattern::{MatchOptions, Params};
use super::route::{RouteDescriptor, RouteId};
use super::table::RouteTable;
use crate::config::RouterSettings;
use crate::error::{ConfigError, NavigationError, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What to do when no route matches a location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Surface `NavigationError::NotFound` to the caller
    #[default]
    Reject,
    /// Resolve to the named route instead
    Redirect(RouteId),
}

/// Outcome of resolving a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub route: RouteDescriptor,
    pub params: Params,
    pub location: Location,
    /// Set when the route was chosen by the fallback policy
    pub fallback: bool,
}

impl Resolved {
    pub fn name(&self) -> &RouteId {
        &self.route.name
    }
}

/// Navigation controller handed to the application shell
#[derive(Debug, Clone)]
pub struct NavigationController {
    table: RouteTable,
    mode: HistoryMode,
    base: BasePath,
    options: MatchOptions,
    fallback: FallbackPolicy,
    state: NavigationState<Resolved>,
}

impl NavigationController {
    /// Create a controller from settings and a route table
    pub fn new(settings: &RouterSettings, table: RouteTable) -> Result<Self> {
        let base = BasePath::parse(&settings.base_url)?;
        let fallback = settings.fallback_policy();

        if let FallbackPolicy::Redirect(name) = &fallback {
            match table.by_name(name.as_str()) {
                None => {
                    return Err(ConfigError::UnknownFallback {
                        name: name.to_string(),
                    }
                    .into())
                }
                Some(route) if !route.path.is_static() => {
                    return Err(ConfigError::FallbackHasParams {
                        name: name.to_string(),
                    }
                    .into())
                }
                Some(_) => {}
            }
        }

        debug!(
            mode = %settings.history,
            base = %base,
            routes = table.len(),
            "navigation controller created"
        );

        Ok(Self {
            table,
            mode: settings.history,
            base,
            options: settings.match_options(),
            fallback,
            state: NavigationState::new(settings.max_history),
        })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn fallback(&self) -> &FallbackPolicy {
        &self.fallback
    }

    /// Resolve a location to a route without touching navigation state
    pub fn resolve(&self, location: &str) -> std::result::Result<Resolved, NavigationError> {
        let route_location = self.mode.route_location(&self.base, location, self.options);

        if let Some((route, params)) = self.table.match_path(&route_location.path, self.options) {
            return Ok(Resolved {
                route: route.clone(),
                params,
                location: route_location,
                fallback: false,
            });
        }

        match &self.fallback {
            FallbackPolicy::Reject => {
                debug!(location, "no route matched");
                Err(NavigationError::NotFound {
                    location: location.to_string(),
                })
            }
            FallbackPolicy::Redirect(name) => {
                warn!(location, fallback = %name, "no route matched, using fallback");
                let route = self.route_by_name(name.as_str())?;
                Ok(Resolved {
                    route: route.clone(),
                    params: Params::new(),
                    location: route_location,
                    fallback: true,
                })
            }
        }
    }

    /// Resolve a named route with the given parameters
    pub fn resolve_named(
        &self,
        name: &str,
        params: &Params,
    ) -> std::result::Result<Resolved, NavigationError> {
        let route = self.route_by_name(name)?;
        let path = route
            .path
            .build(params)
            .map_err(|param| NavigationError::MissingParam {
                name: name.to_string(),
                param,
            })?;
        let params = route
            .path
            .param_names()
            .filter_map(|p| params.get(p).map(|v| (p.to_string(), v.clone())))
            .collect();

        Ok(Resolved {
            route: route.clone(),
            params,
            location: Location::parse(&path),
            fallback: false,
        })
    }

    /// Full location string for a named route under the current history mode
    pub fn href(&self, name: &str, params: &Params) -> std::result::Result<String, NavigationError> {
        let resolved = self.resolve_named(name, params)?;
        Ok(self.mode.href(&self.base, &resolved.location.path))
    }

    /// Navigate to a location, recording it in history
    pub fn push(&mut self, location: &str) -> std::result::Result<&Resolved, NavigationError> {
        let resolved = self.resolve(location)?;
        info!(location, route = %resolved.name(), "navigate");
        Ok(self.state.push(resolved))
    }

    /// Navigate to a named route, recording it in history
    pub fn push_named(
        &mut self,
        name: &str,
        params: &Params,
    ) -> std::result::Result<&Resolved, NavigationError> {
        let resolved = self.resolve_named(name, params)?;
        info!(route = %resolved.name(), "navigate by name");
        Ok(self.state.push(resolved))
    }

    /// Navigate without adding a history entry
    pub fn replace(&mut self, location: &str) -> std::result::Result<&Resolved, NavigationError> {
        let resolved = self.resolve(location)?;
        info!(location, route = %resolved.name(), "replace");
        Ok(self.state.replace(resolved))
    }

    /// Go back to the previous route in history
    pub fn back(&mut self) -> Option<&Resolved> {
        self.state.back()
    }

    /// Go forward to the next route in history
    pub fn forward(&mut self) -> Option<&Resolved> {
        self.state.forward()
    }

    /// Currently active route, if any navigation happened
    pub fn current(&self) -> Option<&Resolved> {
        self.state.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    fn route_by_name(&self, name: &str) -> std::result::Result<&RouteDescriptor, NavigationError> {
        self.table
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownRoute {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route::ViewRef;
    use crate::Error;

    fn table() -> RouteTable {
        RouteTable::builder()
            .route("/", "Home", ViewRef::new("HomeView"))
            .and_then(|b| b.route("/paesi/:codice", "paese", ViewRef::new("PaeseView")))
            .unwrap()
            .build()
    }

    fn settings() -> RouterSettings {
        RouterSettings::default()
    }

    #[test]
    fn test_resolve_is_pure() {
        let controller = NavigationController::new(&settings(), table()).unwrap();
        let first = controller.resolve("/paesi/IT").unwrap();
        let second = controller.resolve("/paesi/IT").unwrap();
        assert_eq!(first, second);
        assert!(controller.current().is_none());
    }

    #[test]
    fn test_not_found_is_rejected_by_default() {
        let controller = NavigationController::new(&settings(), table()).unwrap();
        let err = controller.resolve("/does-not-exist").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_redirect_fallback() {
        let mut settings = settings();
        settings.fallback = Some("Home".to_string());
        let controller = NavigationController::new(&settings, table()).unwrap();

        let resolved = controller.resolve("/does-not-exist?x=1").unwrap();
        assert!(resolved.fallback);
        assert_eq!(resolved.name().as_str(), "Home");
        assert_eq!(resolved.location.path, "/does-not-exist");
    }

    #[test]
    fn test_fallback_must_exist_and_be_static() {
        let mut settings = settings();
        settings.fallback = Some("Nowhere".to_string());
        let err = NavigationController::new(&settings, table()).unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::UnknownFallback {
                name: "Nowhere".to_string()
            })
        );

        settings.fallback = Some("paese".to_string());
        assert!(NavigationController::new(&settings, table()).is_err());
    }

    #[test]
    fn test_href_and_named_resolution() {
        let mut settings = settings();
        settings.base_url = "/app/".to_string();
        let controller = NavigationController::new(&settings, table()).unwrap();

        let mut params = Params::new();
        params.insert("codice".to_string(), "IT".to_string());
        assert_eq!(controller.href("paese", &params).unwrap(), "/app/paesi/IT");
        assert_eq!(controller.href("Home", &Params::new()).unwrap(), "/app/");
        assert_eq!(
            controller.href("paese", &Params::new()).unwrap_err(),
            NavigationError::MissingParam {
                name: "paese".to_string(),
                param: "codice".to_string()
            }
        );
        assert!(matches!(
            controller.href("nope", &Params::new()),
            Err(NavigationError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn test_match_options_follow_settings() {
        let loose = NavigationController::new(&settings(), table()).unwrap();
        assert_eq!(loose.resolve("/PAESI/IT").unwrap().name().as_str(), "paese");
        assert_eq!(loose.resolve("/paesi/IT/").unwrap().name().as_str(), "paese");

        let mut settings = settings();
        settings.sensitive = true;
        let sensitive = NavigationController::new(&settings, table()).unwrap();
        assert!(sensitive.resolve("/PAESI/IT").unwrap_err().is_not_found());
        assert_eq!(sensitive.resolve("/paesi/IT/").unwrap().name().as_str(), "paese");

        settings.sensitive = false;
        settings.strict = true;
        let strict = NavigationController::new(&settings, table()).unwrap();
        assert!(strict.resolve("/paesi/IT/").unwrap_err().is_not_found());
        assert_eq!(strict.resolve("/PAESI/IT").unwrap().name().as_str(), "paese");
    }

    #[test]
    fn test_base_prefix_follows_case_option() {
        let mut settings = settings();
        settings.base_url = "/app/".to_string();
        let loose = NavigationController::new(&settings, table()).unwrap();
        let resolved = loose.resolve("/APP/paesi/IT").unwrap();
        assert_eq!(resolved.name().as_str(), "paese");
        assert_eq!(resolved.location.path, "/paesi/IT");

        settings.sensitive = true;
        let sensitive = NavigationController::new(&settings, table()).unwrap();
        assert!(sensitive.resolve("/APP/paesi/IT").unwrap_err().is_not_found());
        assert_eq!(sensitive.resolve("/app/paesi/IT").unwrap().name().as_str(), "paese");
    }

    #[test]
    fn test_push_back_forward() {
        let mut controller = NavigationController::new(&settings(), table()).unwrap();
        controller.push("/").unwrap();
        controller.push("/paesi/FR").unwrap();
        assert_eq!(controller.current().unwrap().name().as_str(), "paese");

        // A failed navigation leaves state untouched
        assert!(controller.push("/missing").is_err());
        assert_eq!(controller.current().unwrap().name().as_str(), "paese");

        assert_eq!(controller.back().unwrap().name().as_str(), "Home");
        assert!(!controller.can_go_back());
        assert_eq!(controller.forward().unwrap().name().as_str(), "paese");
        assert!(!controller.can_go_forward());

        controller.replace("/").unwrap();
        assert_eq!(controller.current().unwrap().name().as_str(), "Home");
        assert!(controller.can_go_back());
    }
}
