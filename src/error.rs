//! Check failure taxonomy.
//!
//! Every check is strictly pass/fail per invocation: the first failure is
//! reported with enough context to diagnose without re-running, and the
//! binary exits non-zero so the supervisor can restart the container.

use std::collections::BTreeSet;
use std::net::IpAddr;

use thiserror::Error;

use crate::probe::ProbeKind;
use crate::resolution::ResolutionError;

/// Reasons a healthcheck invocation can fail.
#[derive(Debug, Error)]
pub enum CheckFailure {
    /// Fewer forwarding workers than forwarded ports; per-port attribution
    /// is meaningless below that floor.
    #[error("expected at least {expected} forwarding worker(s), found {found}")]
    InsufficientWorkers { expected: usize, found: usize },

    /// No live worker targets this forwarded port.
    #[error("missing forwarding worker(s) for port: {port}")]
    MissingWorker { port: String },

    /// More workers for a port than the configured maximum allows.
    #[error("more than {limit} forwarding worker(s) for port {port}: found {count}")]
    TooManyWorkers {
        port: String,
        count: usize,
        limit: usize,
    },

    /// A process matched the worker marker but carried no recognizable
    /// connect directive.
    #[error("worker {pid} has an unrecognized command line: {argv:?}")]
    UnrecognizedWorker { pid: u32, argv: Vec<String> },

    /// Two identical consecutive DNS answers exclude an address a worker
    /// was launched against.
    #[error("{name} no longer resolves to {address}: got {first:?}, then {second:?}")]
    StaleResolution {
        name: String,
        address: IpAddr,
        first: BTreeSet<IpAddr>,
        second: BTreeSet<IpAddr>,
    },

    /// DNS infrastructure failure (unreachable nameservers, NXDOMAIN,
    /// lookup timeout). Propagated, never swallowed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The load-balancing marker could not be written.
    #[error("failed to persist the load-balancing marker: {0}")]
    FlagPersist(#[from] std::io::Error),

    /// The probe URL template did not yield a usable host/port pair.
    #[error("invalid {kind} healthcheck url {url:?}: {reason}")]
    InvalidProbeUrl {
        kind: ProbeKind,
        url: String,
        reason: String,
    },

    /// Transport-level probe failure: refused, timed out, or the exchange
    /// broke off before a response.
    #[error("{kind} probe failed: {message}")]
    ProbeFailed { kind: ProbeKind, message: String },
}
