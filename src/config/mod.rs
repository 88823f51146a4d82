//! Configuration subsystem.
//!
//! The schema lives in `schema.rs`; `env.rs` loads it from environment
//! variables through an injectable lookup so tests never touch the real
//! process environment.

pub mod env;
pub mod schema;

pub use env::ConfigError;
pub use schema::CheckConfig;
