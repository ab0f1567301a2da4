//! Connection bootstrap
//!
//! Startup tries an ordered list of candidate store locations. A candidate
//! that fails to open gets one repair attempt: create the database location,
//! then retry the open once. Only when every candidate is exhausted does
//! startup fail, with the last underlying cause attached.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::students::StudentStore;
use crate::{Error, Result};

/// One candidate store location attempted during bootstrap.
///
/// For an embedded engine a "server" collapses to a directory holding
/// database files, and the database name selects the file inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Directory holding database files
    pub data_dir: PathBuf,
    /// Database name; becomes `<data_dir>/<database>.db`
    pub database: String,
}

impl Candidate {
    pub fn new(data_dir: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            database: database.into(),
        }
    }

    /// Full path of the database file this candidate names
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.database))
    }

    /// Build a candidate from an explicit `name.db` file path
    pub fn from_database_path(path: &std::path::Path) -> Self {
        let data_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();
        let database = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "students".to_string());
        Self { data_dir, database }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.database_path().display())
    }
}

/// Try each candidate in order until one yields a live store.
///
/// Each successful open runs schema initialization before the store is
/// returned, so callers always receive a ready-to-use store. Failed attempts
/// are logged and kept only as the final error's cause; a later candidate
/// succeeding makes the earlier failures invisible to the caller.
pub fn connect(candidates: &[Candidate]) -> Result<StudentStore> {
    let mut last_err: Option<Error> = None;

    for candidate in candidates {
        match try_candidate(candidate) {
            Ok(store) => {
                tracing::info!(database = %candidate, "connected to student database");
                return Ok(store);
            }
            Err(e) => {
                tracing::warn!(database = %candidate, error = %e, "candidate failed");
                last_err = Some(e);
            }
        }
    }

    Err(match last_err {
        Some(e) => e,
        None => Error::Connection("no connection candidates configured".into()),
    })
}

/// Open one candidate, creating its location and retrying once on failure.
fn try_candidate(candidate: &Candidate) -> Result<StudentStore> {
    let path = candidate.database_path();

    let first_attempt = match StudentStore::open(&path) {
        Ok(store) => return Ok(store),
        Err(e) => e,
    };

    // The location may simply not exist yet; create it and retry once.
    if let Err(io_err) = std::fs::create_dir_all(&candidate.data_dir) {
        tracing::debug!(
            dir = %candidate.data_dir.display(),
            error = %io_err,
            "could not create database location"
        );
        return Err(first_attempt);
    }

    StudentStore::open(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_uses_first_working_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = Candidate::new(dir.path(), "students");

        let store = connect(std::slice::from_ref(&candidate)).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(candidate.database_path().exists());
    }

    #[test]
    fn test_connect_creates_missing_location_and_retries() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("rollbook");
        let candidate = Candidate::new(&nested, "students");

        let store = connect(std::slice::from_ref(&candidate)).unwrap();
        store.create("Asha", 14, "8A", 88.5).unwrap();
        assert!(nested.join("students.db").exists());
    }

    #[test]
    fn test_reconnect_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = Candidate::new(dir.path(), "students");

        let mut store = connect(std::slice::from_ref(&candidate)).unwrap();
        store.create("Asha", 14, "8A", 88.5).unwrap();
        store.close();

        // Reopening runs schema initialization again without disturbing data.
        let store = connect(std::slice::from_ref(&candidate)).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_connect_falls_through_failing_candidates() {
        let dir = tempfile::tempdir().unwrap();

        // A regular file where a directory is expected cannot be opened or
        // repaired, so the first three candidates all fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let candidates = vec![
            Candidate::new(blocker.join("a"), "students"),
            Candidate::new(blocker.join("b"), "students"),
            Candidate::new(&blocker, "students"),
            Candidate::new(dir.path(), "students"),
        ];

        let store = connect(&candidates).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(dir.path().join("students.db").exists());
    }

    #[test]
    fn test_connect_reports_last_cause_when_all_fail() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let candidates = vec![
            Candidate::new(blocker.join("a"), "students"),
            Candidate::new(blocker.join("b"), "students"),
        ];

        let err = connect(&candidates).unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[test]
    fn test_connect_with_no_candidates() {
        let err = connect(&[]).unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[test]
    fn test_candidate_database_path() {
        let candidate = Candidate::new("/tmp/rollbook", "students");
        assert_eq!(
            candidate.database_path(),
            PathBuf::from("/tmp/rollbook/students.db")
        );
    }

    #[test]
    fn test_candidate_from_database_path() {
        let candidate = Candidate::from_database_path(std::path::Path::new("data/roster.db"));
        assert_eq!(candidate, Candidate::new("data", "roster"));
        assert_eq!(candidate.database_path(), PathBuf::from("data/roster.db"));

        let bare = Candidate::from_database_path(std::path::Path::new("roster.db"));
        assert_eq!(bare, Candidate::new(".", "roster"));
    }
}
