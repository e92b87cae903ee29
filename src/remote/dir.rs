//! Plain-directory remote store.
//!
//! Stands in for the git backend when the "remote" is just a local
//! directory (a mounted sync folder, a test fixture).  Writes are
//! atomic via temp-file + rename, and every write appends a line to
//! `history.log` — the directory's stand-in for a commit history.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::errors::{KeyfoldError, Result};

use super::RemoteStore;

/// Filename of the append-only write history.
const HISTORY_NAME: &str = "history.log";

/// Remote store backed by a plain directory.
pub struct DirRemote {
    root: PathBuf,
}

impl DirRemote {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RemoteStore for DirRemote {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        fs::read(&path)
            .map(Some)
            .map_err(|e| KeyfoldError::FetchFailed(format!("cannot read {}: {e}", path.display())))
    }

    fn write(&self, name: &str, data: &[u8], message: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            KeyfoldError::PublishFailed(format!("cannot create {}: {e}", self.root.display()))
        })?;

        // Atomic replace: write next to the target, then rename, so a
        // concurrent reader never sees a half-written payload.
        let path = self.root.join(name);
        let tmp_path = self.root.join(format!(".{name}.tmp"));
        fs::write(&tmp_path, data)
            .and_then(|()| fs::rename(&tmp_path, &path))
            .map_err(|e| {
                KeyfoldError::PublishFailed(format!("cannot write {}: {e}", path.display()))
            })?;

        let mut history = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(HISTORY_NAME))
            .map_err(|e| KeyfoldError::PublishFailed(format!("cannot open history: {e}")))?;
        writeln!(
            history,
            "{} {message}",
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
        .map_err(|e| KeyfoldError::PublishFailed(format!("cannot append history: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_payload_returns_none() {
        let dir = TempDir::new().unwrap();
        let remote = DirRemote::new(dir.path());
        assert_eq!(remote.read("data.dat").unwrap(), None);
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = TempDir::new().unwrap();
        let remote = DirRemote::new(dir.path());

        remote.write("data.dat", b"payload", "first write").unwrap();
        assert_eq!(remote.read("data.dat").unwrap().unwrap(), b"payload");
    }

    #[test]
    fn write_records_the_message() {
        let dir = TempDir::new().unwrap();
        let remote = DirRemote::new(dir.path());

        remote.write("data.dat", b"a", "added work/email").unwrap();
        remote.write("data.dat", b"b", "deleted work/email").unwrap();

        let history = fs::read_to_string(dir.path().join("history.log")).unwrap();
        assert!(history.contains("added work/email"));
        assert!(history.contains("deleted work/email"));
        assert_eq!(history.lines().count(), 2);
    }

    #[test]
    fn write_creates_the_root_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("store/nested");
        let remote = DirRemote::new(&nested);

        remote.write("data.dat", b"x", "msg").unwrap();
        assert!(nested.join("data.dat").exists());
    }
}
