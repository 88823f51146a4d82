//! Process-table snapshots.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

/// One live process as observed at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Numeric process id, unique while the process is alive.
    pub pid: u32,

    /// Full argument vector. Empty when the process exited between
    /// enumeration and inspection; such records are skipped downstream.
    pub argv: Vec<String>,
}

/// Source of process snapshots, injectable for tests.
pub trait ProcessList {
    fn snapshot(&mut self) -> Vec<ProcessRecord>;
}

/// Production process listing backed by the system process table.
pub struct SystemProcessList {
    system: System,
}

impl SystemProcessList {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SystemProcessList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessList for SystemProcessList {
    fn snapshot(&mut self) -> Vec<ProcessRecord> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
        );
        self.system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRecord {
                pid: pid.as_u32(),
                argv: process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
            })
            .collect()
    }
}
