//! Worker-population checking.
//!
//! # Data Flow
//! ```text
//! Process snapshot (snapshot.rs):
//!     One refresh of the process table
//!     → pid + argv per live process
//!
//! Connect-directive grammar (directive.rs):
//!     "tcp-connect:<host>:<port>" and friends
//!     → structured { transport, host, port }
//!
//! Population check (population.rs):
//!     Classify workers by marker token
//!     → attribute each to its destination port
//!     → validate per-port counts against bounds
//! ```
//!
//! # Design Decisions
//! - Classification is a marker-token test, not an argv[0] match, since the
//!   worker binary may sit behind wrappers.
//! - A process vanishing between enumeration and inspection is an expected
//!   race, not an error.

pub mod directive;
pub mod population;
pub mod snapshot;

pub use directive::{ConnectDirective, DirectiveError, Transport};
pub use population::{check_worker_population, pre_resolved_addresses};
pub use snapshot::{ProcessList, ProcessRecord, SystemProcessList};
