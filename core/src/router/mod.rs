//! Router module for route registration, matching and navigation
//!
//! The route table is built once through [`RouteTableBuilder`], which rejects
//! duplicate paths and names. A [`NavigationController`] binds the table to a
//! history mode and base path and resolves locations against it.

pub mod controller;
pub mod history;
pub mod pattern;
pub mod route;
pub mod table;

// Re-export commonly used types
pub use controller::{FallbackPolicy, NavigationController, Resolved};
pub use history::{BasePath, HistoryMode, Location, NavigationState};
pub use pattern::{MatchOptions, Params, PathPattern, Segment};
pub use route::{RouteDescriptor, RouteId, ViewRef};
pub use table::{RouteTable, RouteTableBuilder};
