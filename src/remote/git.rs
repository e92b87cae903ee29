//! Git-backed remote store.
//!
//! Every operation works against a fresh depth-1 scratch clone in a
//! temporary directory: read clones and reads the payload file, write
//! clones, replaces the file, commits with the caller's message, and
//! pushes.  The clone is discarded either way — the remote repository
//! is the only system of record.
//!
//! Git itself is driven through the `git` binary on PATH, so whatever
//! authentication the user already has (ssh agent, credential helper)
//! just works.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use crate::errors::{KeyfoldError, Result};

use super::RemoteStore;

/// Remote store backed by a git repository.
pub struct GitRemote {
    url: String,
}

impl GitRemote {
    /// Create a remote for the given clone URL (ssh, https, or a local
    /// path git understands).
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    fn scratch_clone(&self) -> std::result::Result<TempDir, String> {
        let scratch = TempDir::new().map_err(|e| format!("cannot create scratch dir: {e}"))?;
        let dest = scratch.path().to_string_lossy().into_owned();
        run_git(None, &["clone", "--depth", "1", &self.url, &dest])?;
        Ok(scratch)
    }
}

impl RemoteStore for GitRemote {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let scratch = self.scratch_clone().map_err(KeyfoldError::FetchFailed)?;

        let payload = scratch.path().join(name);
        if !payload.exists() {
            // First use: the repository exists but holds no payload yet.
            return Ok(None);
        }
        Ok(Some(fs::read(payload)?))
    }

    fn write(&self, name: &str, data: &[u8], message: &str) -> Result<()> {
        let scratch = self.scratch_clone().map_err(KeyfoldError::PublishFailed)?;
        let dir = scratch.path();

        fs::write(dir.join(name), data)?;

        run_git(Some(dir), &["add", name]).map_err(KeyfoldError::PublishFailed)?;
        run_git(Some(dir), &["commit", "-m", message]).map_err(KeyfoldError::PublishFailed)?;
        run_git(Some(dir), &["push", "origin"]).map_err(KeyfoldError::PublishFailed)?;
        Ok(())
    }
}

/// Run a git subcommand, surfacing stderr on failure.
fn run_git(dir: Option<&Path>, args: &[&str]) -> std::result::Result<(), String> {
    let mut command = Command::new("git");
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let output = command
        .args(args)
        .output()
        .map_err(|e| format!("cannot run git: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&"?"),
            stderr.trim()
        ));
    }
    Ok(())
}
