//! Configuration schema definitions.
//!
//! All types derive Serde traits; `Default` impls carry the documented
//! fallback values so a partially-specified environment stays predictable.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Root configuration for one healthcheck invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Upstream name (or address) the forwarding workers dial.
    pub target: String,

    /// Worker-population expectations.
    pub workers: WorkerConfig,

    /// Resolution-stability check settings.
    pub resolution: ResolutionConfig,

    /// HTTP liveness probe settings.
    pub http_probe: HttpProbeConfig,

    /// SMTP liveness probe settings.
    pub smtp_probe: SmtpProbeConfig,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            target: "localhost".to_string(),
            workers: WorkerConfig::default(),
            resolution: ResolutionConfig::default(),
            http_probe: HttpProbeConfig::default(),
            smtp_probe: SmtpProbeConfig::default(),
        }
    }
}

/// Expected forwarding-worker population.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Forwarded ports, one worker group per port.
    pub ports: Vec<String>,

    /// Maximum concurrent workers per port. One extra worker above this is
    /// tolerated while an old worker drains mid-handover.
    pub max_connections: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            ports: Vec::new(),
            max_connections: 1,
        }
    }
}

/// Settings for the upstream-resolution-stability check.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Enable the check (`PRE_RESOLVE=1`).
    pub enabled: bool,

    /// Nameservers queried for the target, in order.
    pub nameservers: Vec<IpAddr>,
}

/// Settings for the HTTP liveness probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpProbeConfig {
    /// Enable the probe (`HTTP_HEALTHCHECK=1`).
    pub enabled: bool,

    /// URL template; the literal `$TARGET` is replaced by the target name.
    pub url: String,

    /// Connect and total-operation deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost/".to_string(),
            timeout_ms: 2000,
        }
    }
}

/// Settings for the SMTP liveness probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpProbeConfig {
    /// Enable the probe (`SMTP_HEALTHCHECK=1`).
    pub enabled: bool,

    /// URL template; the literal `$TARGET` is replaced by the target name.
    pub url: String,

    /// Command sent after the server greeting.
    pub command: String,

    /// Connect and total-operation deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SmtpProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "smtp://localhost/".to_string(),
            command: "HELP".to_string(),
            timeout_ms: 2000,
        }
    }
}
