//! Upstream-resolution-stability detection.
//!
//! # Data Flow
//! ```text
//! Pre-resolved addresses (from worker command lines)
//!     → compare against live DNS answers (resolver.rs)
//!     → three-round confirmation protocol (detector.rs)
//!     → rotation confirmed? persist the flag (flag.rs) and stand down
//! ```
//!
//! # Design Decisions
//! - Two identical answers excluding an address mean genuine staleness;
//!   two consecutive answer changes mean rotating DNS. A single flip is
//!   treated as noise. These thresholds are deliberate and load-bearing.
//! - The flag outlives the process but not the container; it is never
//!   cleared here.

pub mod detector;
pub mod flag;
pub mod resolver;

pub use detector::check_resolution_stability;
pub use flag::{FileFlagStore, FlagStore};
pub use resolver::{DnsResolver, Resolve, ResolutionError};
