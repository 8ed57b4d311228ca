//! # rotta Core
//!
//! Core library for rotta - the client-side route table of a single-page
//! application and the navigation controller that resolves locations
//! against it.
//!
//! The controller is constructed explicitly and handed to whatever assembles
//! the application shell:
//!
//! ```
//! use rotta_core::{create_controller, RouterSettings};
//!
//! let controller = create_controller(&RouterSettings::default()).unwrap();
//! let resolved = controller.resolve("/preferiti").unwrap();
//! assert_eq!(resolved.name().as_str(), "Preferiti");
//! ```

// Core modules
pub mod app;
pub mod config;
pub mod error;
pub mod router;

// Re-export commonly used types
pub use app::{route_table, TableVersion};
pub use config::RouterSettings;
pub use error::{ConfigError, Error, NavigationError, Result};
pub use router::{
    FallbackPolicy, HistoryMode, NavigationController, Params, Resolved, RouteDescriptor,
    RouteId, RouteTable, RouteTableBuilder, ViewRef,
};

/// Current version of the rotta-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the navigation controller for the application's route table
pub fn create_controller(settings: &RouterSettings) -> Result<NavigationController> {
    settings.validate()?;
    let table = route_table(settings.table)?;
    NavigationController::new(settings, table)
}

/// Initialize tracing with a specific debug mode.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so command output
/// stays machine-readable.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
