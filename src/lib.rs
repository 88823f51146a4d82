//! Healthcheck for a containerized TCP/UDP forwarding proxy.
//!
//! The proxy itself is a group of socat worker processes managed by an
//! external supervisor; an autoheal-style orchestrator runs this crate's
//! `healthcheck` binary periodically and restarts the container on a
//! non-zero exit. Three independent checks run in sequence, stopping at
//! the first failure:
//!
//! ```text
//! START → [workers] → [resolution]? → [http probe]? → [smtp probe]? → PASS
//! ```
//!
//! - `workers`: snapshot the process table, attribute forwarding workers
//!   to their destination ports, validate counts.
//! - `resolution`: detect whether the upstream genuinely stopped resolving
//!   to the addresses workers dial, or merely rotates addresses behind
//!   load-balancing DNS (which permanently disables the check).
//! - `probe`: one bounded HTTP or SMTP request forced through loopback so
//!   it traverses the local forwarding path.

pub mod config;
pub mod error;
pub mod observability;
pub mod probe;
pub mod resolution;
pub mod runner;
pub mod workers;

pub use config::CheckConfig;
pub use error::CheckFailure;
