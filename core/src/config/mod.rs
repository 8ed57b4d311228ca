//! Minimal configuration module for rotta core
//!
//! Only exports plain data types. All loading logic is in the CLI layer.

pub mod types;

pub use types::{RouterSettings, BASE_URL_ENV, DEFAULT_MAX_HISTORY};
