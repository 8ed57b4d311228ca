//! The application's own routes

pub mod routes;

pub use routes::{route_table, views, TableVersion};
