//! Persistent load-balancing marker.
//!
//! Once rotating DNS is confirmed, a sentinel on durable local storage
//! disables the resolution check for the container's remaining lifetime.
//! Existence is the signal; the content conventionally holds the target
//! name for operators poking around the container.

use std::fs;
use std::io;
use std::path::PathBuf;

/// File name of the sentinel inside the temp directory.
pub const FLAG_FILE_NAME: &str = "load_balancing_dns_detected";

/// Marker persistence seam, injectable for tests.
pub trait FlagStore {
    fn is_set(&self) -> bool;

    /// Idempotent; last writer wins, no locking needed since only one
    /// checker runs per container.
    fn set(&self, target: &str) -> io::Result<()>;
}

/// Sentinel file in a well-known location.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    /// The conventional location: the system temp directory, which lives
    /// as long as the container does.
    pub fn in_temp_dir() -> Self {
        Self {
            path: std::env::temp_dir().join(FLAG_FILE_NAME),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FlagStore for FileFlagStore {
    fn is_set(&self) -> bool {
        self.path.exists()
    }

    fn set(&self, target: &str) -> io::Result<()> {
        fs::write(&self.path, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let flag = FileFlagStore::at(dir.path().join(FLAG_FILE_NAME));
        assert!(!flag.is_set());

        flag.set("upstream.example.com").unwrap();
        assert!(flag.is_set());

        let content = fs::read_to_string(dir.path().join(FLAG_FILE_NAME)).unwrap();
        assert_eq!(content, "upstream.example.com");
    }

    #[test]
    fn test_set_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let flag = FileFlagStore::at(dir.path().join(FLAG_FILE_NAME));
        flag.set("upstream.example.com").unwrap();
        flag.set("upstream.example.com").unwrap();
        assert!(flag.is_set());
    }

    #[test]
    fn test_set_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let flag = FileFlagStore::at(dir.path().join("nope").join(FLAG_FILE_NAME));
        assert!(flag.set("upstream.example.com").is_err());
    }
}
