//! Name resolution against the configured nameservers.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

/// Per-query deadline; keeps total check latency bounded even with
/// unreachable nameservers.
const QUERY_TIMEOUT: Duration = Duration::from_millis(1500);

/// Total resolution failure: unreachable nameservers, NXDOMAIN, timeout.
#[derive(Debug, Error)]
#[error("resolving {name} failed: {message}")]
pub struct ResolutionError {
    pub name: String,
    pub message: String,
}

/// Name resolution seam, injectable for tests.
#[allow(async_fn_in_trait)]
pub trait Resolve {
    async fn resolve(&self, name: &str) -> Result<BTreeSet<IpAddr>, ResolutionError>;
}

/// Production resolver querying the configured nameservers directly.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new(nameservers: &[IpAddr]) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(nameservers, 53, true);
        let config = ResolverConfig::from_parts(None, Vec::new(), group);

        let mut opts = ResolverOpts::default();
        opts.timeout = QUERY_TIMEOUT;
        opts.attempts = 1;
        // The detector compares consecutive answers; a cache would make
        // them identical by construction.
        opts.cache_size = 0;
        opts.use_hosts_file = false;

        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

impl Resolve for DnsResolver {
    async fn resolve(&self, name: &str) -> Result<BTreeSet<IpAddr>, ResolutionError> {
        let lookup = self
            .inner
            .lookup_ip(name)
            .await
            .map_err(|e| ResolutionError {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(lookup.iter().collect())
    }
}
