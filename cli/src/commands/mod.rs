//! CLI command implementations

pub mod check;
pub mod resolve;
pub mod routes;
pub mod walk;

pub use check::check_command;
pub use resolve::resolve_command;
pub use routes::routes_command;
pub use walk::walk_command;
