//! Sequential check execution.
//!
//! Wires the production collaborators (system process table, configured
//! nameservers, temp-dir flag store) and runs the enabled checks in order,
//! returning the first failure. No state survives an invocation except the
//! load-balancing flag.

use std::time::Duration;

use crate::config::CheckConfig;
use crate::error::CheckFailure;
use crate::probe::{self, ProbeKind};
use crate::resolution::{self, DnsResolver, FileFlagStore};
use crate::workers::{self, ProcessList, SystemProcessList};

pub async fn run(config: &CheckConfig) -> Result<(), CheckFailure> {
    let snapshot = SystemProcessList::new().snapshot();

    workers::check_worker_population(
        &snapshot,
        &config.workers.ports,
        config.workers.max_connections,
    )?;

    if config.resolution.enabled {
        let resolver = DnsResolver::new(&config.resolution.nameservers);
        let flag = FileFlagStore::in_temp_dir();
        let pre_resolved = workers::pre_resolved_addresses(&snapshot);
        resolution::check_resolution_stability(&resolver, &flag, &config.target, &pre_resolved)
            .await?;
    }

    if config.http_probe.enabled {
        let target = probe::build_target(
            ProbeKind::Http,
            &config.http_probe.url,
            &config.target,
            &config.workers.ports,
        )?;
        probe::http::probe(&target, Duration::from_millis(config.http_probe.timeout_ms)).await?;
    }

    if config.smtp_probe.enabled {
        let target = probe::build_target(
            ProbeKind::Smtp,
            &config.smtp_probe.url,
            &config.target,
            &config.workers.ports,
        )?;
        probe::smtp::probe(
            &target,
            &config.smtp_probe.command,
            Duration::from_millis(config.smtp_probe.timeout_ms),
        )
        .await?;
    }

    Ok(())
}
