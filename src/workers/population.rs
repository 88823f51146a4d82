//! Worker-population validation and pre-resolved address recovery.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use crate::error::CheckFailure;
use crate::workers::directive::{self, ConnectDirective};
use crate::workers::snapshot::ProcessRecord;

/// Marker token identifying forwarding-worker processes in a command line.
pub const WORKER_MARKER: &str = "socat";

fn is_forwarding_worker(record: &ProcessRecord) -> bool {
    record.argv.iter().any(|arg| arg.contains(WORKER_MARKER))
}

/// Validate that every forwarded port is served by a sane number of workers.
///
/// Per expected port, `1 ≤ count ≤ max_connections + 1` must hold; the one
/// extra worker covers an old worker draining a request mid-handover.
pub fn check_worker_population(
    snapshot: &[ProcessRecord],
    expected_ports: &[String],
    max_connections: usize,
) -> Result<(), CheckFailure> {
    tracing::info!(
        ports = ?expected_ports,
        max_connections,
        "checking forwarding worker processes"
    );

    // Records with an empty argv are processes that exited between
    // enumeration and inspection; they never match the marker.
    let workers: Vec<&ProcessRecord> = snapshot
        .iter()
        .filter(|record| is_forwarding_worker(record))
        .collect();

    // Below one worker per port, per-port attribution is meaningless.
    if workers.len() < expected_ports.len() {
        return Err(CheckFailure::InsufficientWorkers {
            expected: expected_ports.len(),
            found: workers.len(),
        });
    }

    let mut counts: BTreeMap<&str, usize> = expected_ports
        .iter()
        .map(|port| (port.as_str(), 0usize))
        .collect();
    for worker in &workers {
        let Some(parsed) = directive::find_directive(&worker.argv) else {
            return Err(CheckFailure::UnrecognizedWorker {
                pid: worker.pid,
                argv: worker.argv.clone(),
            });
        };
        match counts.get_mut(parsed.port.as_str()) {
            Some(count) => *count += 1,
            None => tracing::debug!(
                pid = worker.pid,
                port = %parsed.port,
                "ignoring worker for a port outside the configured set"
            ),
        }
    }

    let limit = max_connections + 1;
    for port in expected_ports {
        let count = counts.get(port.as_str()).copied().unwrap_or(0);
        if count == 0 {
            return Err(CheckFailure::MissingWorker { port: port.clone() });
        }
        if count > limit {
            return Err(CheckFailure::TooManyWorkers {
                port: port.clone(),
                count,
                limit,
            });
        }
        tracing::debug!(%port, count, "worker count within bounds");
    }

    Ok(())
}

/// Addresses the workers were actually launched against: every IP-literal
/// host found in a worker connect directive. This is ground truth in use,
/// as opposed to what DNS answers now.
pub fn pre_resolved_addresses(snapshot: &[ProcessRecord]) -> BTreeSet<IpAddr> {
    snapshot
        .iter()
        .filter(|record| is_forwarding_worker(record))
        .filter_map(|record| directive::find_directive(&record.argv))
        .filter_map(|ConnectDirective { host, .. }| host.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(pid: u32, port: &str) -> ProcessRecord {
        worker_to(pid, "10.0.0.5", port)
    }

    fn worker_to(pid: u32, host: &str, port: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            argv: vec![
                "socat".to_string(),
                format!("tcp-listen:{port},fork,reuseaddr,max-children=5"),
                format!("tcp-connect:{host}:{port}"),
            ],
        }
    }

    fn bystander(pid: u32) -> ProcessRecord {
        ProcessRecord {
            pid,
            argv: vec!["sshd".to_string(), "-D".to_string()],
        }
    }

    fn ports(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_worker_per_port_passes() {
        let snapshot = vec![bystander(1), worker(10, "80"), worker(11, "443")];
        check_worker_population(&snapshot, &ports(&["80", "443"]), 5).unwrap();
    }

    #[test]
    fn test_missing_worker_for_port_fails() {
        let snapshot = vec![worker(10, "80"), worker(11, "80")];
        let err = check_worker_population(&snapshot, &ports(&["80", "443"]), 5).unwrap_err();
        match err {
            CheckFailure::MissingWorker { port } => assert_eq!(port, "443"),
            other => panic!("unexpected failure: {other}"),
        }
    }

    #[test]
    fn test_insufficient_workers_fails_fast() {
        let snapshot = vec![worker(10, "80")];
        let err = check_worker_population(&snapshot, &ports(&["80", "443"]), 5).unwrap_err();
        assert!(matches!(
            err,
            CheckFailure::InsufficientWorkers {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_handover_boundary_passes() {
        // max_connections + 1 workers: one old worker still draining.
        let snapshot: Vec<_> = (0..3).map(|i| worker(10 + i, "80")).collect();
        check_worker_population(&snapshot, &ports(&["80"]), 2).unwrap();
    }

    #[test]
    fn test_above_handover_boundary_fails() {
        let snapshot: Vec<_> = (0..4).map(|i| worker(10 + i, "80")).collect();
        let err = check_worker_population(&snapshot, &ports(&["80"]), 2).unwrap_err();
        match err {
            CheckFailure::TooManyWorkers { port, count, limit } => {
                assert_eq!(port, "80");
                assert_eq!(count, 4);
                assert_eq!(limit, 3);
            }
            other => panic!("unexpected failure: {other}"),
        }
    }

    #[test]
    fn test_port_flood_reported_for_the_right_port() {
        let mut snapshot = vec![worker(10, "80")];
        snapshot.extend((0..7).map(|i| worker(20 + i, "443")));
        let err = check_worker_population(&snapshot, &ports(&["80", "443"]), 5).unwrap_err();
        match err {
            CheckFailure::TooManyWorkers { port, .. } => assert_eq!(port, "443"),
            other => panic!("unexpected failure: {other}"),
        }
    }

    #[test]
    fn test_vanished_process_is_skipped() {
        let snapshot = vec![
            worker(10, "80"),
            ProcessRecord {
                pid: 11,
                argv: Vec::new(),
            },
        ];
        check_worker_population(&snapshot, &ports(&["80"]), 5).unwrap();
    }

    #[test]
    fn test_worker_for_unexpected_port_is_ignored_in_tally() {
        let snapshot = vec![worker(10, "80"), worker(11, "9999")];
        check_worker_population(&snapshot, &ports(&["80"]), 1).unwrap();
    }

    #[test]
    fn test_unrecognized_worker_command_fails() {
        let snapshot = vec![
            worker(10, "80"),
            ProcessRecord {
                pid: 11,
                argv: vec!["socat".to_string(), "-V".to_string()],
            },
        ];
        let err = check_worker_population(&snapshot, &ports(&["80"]), 5).unwrap_err();
        assert!(matches!(err, CheckFailure::UnrecognizedWorker { pid: 11, .. }));
    }

    #[test]
    fn test_pre_resolved_addresses_collects_ip_literals() {
        let snapshot = vec![
            bystander(1),
            worker_to(10, "10.0.0.5", "80"),
            worker_to(11, "10.0.0.5", "443"),
            worker_to(12, "10.0.0.6", "25"),
            worker_to(13, "upstream.internal", "8080"),
        ];
        let addresses = pre_resolved_addresses(&snapshot);
        assert_eq!(addresses.len(), 2);
        assert!(addresses.contains(&"10.0.0.5".parse().unwrap()));
        assert!(addresses.contains(&"10.0.0.6".parse().unwrap()));
    }
}
