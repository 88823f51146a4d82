//! Typed parser for socat connect directives.
//!
//! Workers are launched with a trailing address argument in one of the
//! recognized forms:
//!
//! ```text
//! tcp-connect:<host>:<port>
//! udp-connect:<host>:<port>
//! udp-sendto:<host>:<port>
//! ```
//!
//! socat address options (`,keepalive` etc.) may trail the port and are
//! ignored. Parsing returns a structured result or a clear error instead
//! of slicing strings and hoping.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Transport of a connect directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "tcp"),
            Transport::Udp => write!(f, "udp"),
        }
    }
}

/// A parsed connect directive: where a worker sends traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectDirective {
    pub transport: Transport,
    pub host: String,
    /// Destination port, kept as the literal string the worker was
    /// configured with.
    pub port: String,
}

/// Reasons an argument is not a usable connect directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("not a connect directive")]
    NotADirective,

    #[error("missing port in {0:?}")]
    MissingPort(String),

    #[error("invalid port in {0:?}")]
    InvalidPort(String),
}

const PREFIXES: [(&str, Transport); 3] = [
    ("tcp-connect:", Transport::Tcp),
    ("udp-connect:", Transport::Udp),
    ("udp-sendto:", Transport::Udp),
];

impl FromStr for ConnectDirective {
    type Err = DirectiveError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let (rest, transport) = PREFIXES
            .iter()
            .find_map(|(prefix, transport)| {
                arg.strip_prefix(prefix).map(|rest| (rest, *transport))
            })
            .ok_or(DirectiveError::NotADirective)?;

        // Options like ",keepalive" follow the port.
        let rest = rest.split(',').next().unwrap_or(rest);
        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| DirectiveError::MissingPort(arg.to_string()))?;
        if host.is_empty() {
            return Err(DirectiveError::MissingPort(arg.to_string()));
        }
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DirectiveError::InvalidPort(arg.to_string()));
        }

        Ok(Self {
            transport,
            host: host.to_string(),
            port: port.to_string(),
        })
    }
}

/// First parsable connect directive in an argument vector, if any.
pub fn find_directive(argv: &[String]) -> Option<ConnectDirective> {
    argv.iter().find_map(|arg| arg.parse().ok())
}
