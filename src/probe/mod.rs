//! Application-liveness probing through the local forwarding path.
//!
//! # Data Flow
//! ```text
//! URL template + target name
//!     → substitute "$TARGET", parse, pick the probe port (mod.rs)
//!     → HTTP request with a loopback DNS override (http.rs)
//!     → or a raw SMTP greeting/command exchange (smtp.rs)
//! ```
//!
//! # Design Decisions
//! - The request is pinned to 127.0.0.1 so it must traverse the local
//!   forwarding workers instead of dialing the upstream directly; host
//!   header and protocol semantics keep addressing the original name.
//! - Any completed request/response cycle passes, whatever the
//!   application-level status says. Only transport failures count.

pub mod http;
pub mod smtp;

use std::fmt;

use url::Url;

use crate::error::CheckFailure;

/// Placeholder replaced by the target name in URL templates.
pub const TARGET_PLACEHOLDER: &str = "$TARGET";

/// Which protocol a probe speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Http,
    Smtp,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Http => write!(f, "http"),
            ProbeKind::Smtp => write!(f, "smtp"),
        }
    }
}

/// A fully-determined probe destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Effective URL, with the fallback port surfaced when one was chosen.
    pub url: Url,

    /// Host the request addresses (header/protocol level); the connection
    /// itself goes to loopback.
    pub host: String,

    /// Port the forwarding worker listens on locally.
    pub port: u16,
}

/// Build a probe target from a URL template.
///
/// Port selection: an explicit URL port wins; otherwise the scheme default
/// (http 80, https 443, smtp 25) when that port is among the forwarded
/// ports or no port list is supplied; otherwise the first forwarded port,
/// which is then surfaced in the effective URL.
pub fn build_target(
    kind: ProbeKind,
    template: &str,
    target: &str,
    forwarded_ports: &[String],
) -> Result<ProbeTarget, CheckFailure> {
    let substituted = template.replace(TARGET_PLACEHOLDER, target);
    let invalid = |reason: String| CheckFailure::InvalidProbeUrl {
        kind,
        url: substituted.clone(),
        reason,
    };

    let mut url = Url::parse(&substituted).map_err(|e| invalid(e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| invalid("no host".to_string()))?
        .to_string();

    let port = match url.port() {
        Some(port) => port,
        None => {
            let default = scheme_default(kind, url.scheme());
            let default_str = default.to_string();
            let default_forwarded = forwarded_ports.iter().any(|port| *port == default_str);
            if forwarded_ports.is_empty() || default_forwarded {
                default
            } else {
                let fallback: u16 = forwarded_ports[0].parse().map_err(|_| {
                    invalid(format!(
                        "forwarded port {:?} is not a valid tcp port",
                        forwarded_ports[0]
                    ))
                })?;
                url.set_port(Some(fallback))
                    .map_err(|_| invalid("cannot carry a port".to_string()))?;
                fallback
            }
        }
    };

    Ok(ProbeTarget { url, host, port })
}

fn scheme_default(kind: ProbeKind, scheme: &str) -> u16 {
    match kind {
        ProbeKind::Http if scheme == "https" => 443,
        ProbeKind::Http => 80,
        ProbeKind::Smtp => 25,
    }
}
