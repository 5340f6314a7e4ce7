//! Configuration for huebox
//!
//! Provides types and loading for the `hue.toml` configuration file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
