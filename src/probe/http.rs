//! HTTP liveness probe.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::CheckFailure;
use crate::probe::{ProbeKind, ProbeTarget};

/// Issue one GET against the target, pinned to loopback so the request
/// traverses the local forwarding worker.
pub async fn probe(target: &ProbeTarget, timeout: Duration) -> Result<(), CheckFailure> {
    tracing::info!(url = %target.url, "checking {} via 127.0.0.1", target.url);

    let failed = |message: String| CheckFailure::ProbeFailed {
        kind: ProbeKind::Http,
        message,
    };

    let loopback = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), target.port);
    let client = reqwest::Client::builder()
        .resolve(&target.host, loopback)
        .connect_timeout(timeout)
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client
        .get(target.url.clone())
        .send()
        .await
        .map_err(|e| failed(e.to_string()))?;

    // Any completed cycle is a pass; the worker path is alive.
    tracing::debug!(status = %response.status(), "http probe answered");
    Ok(())
}
