//! `keyfold keygen` — create a fresh random AES key file.

use std::path::Path;

use crate::cli::{output, Cli};
use crate::config::Settings;
use crate::crypto::key;
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, path: &str, size: usize) -> Result<()> {
    let key = key::generate_key_file(Path::new(path), size)?;

    output::success(&format!("Key written to {path} ({size} bytes)"));
    output::info(&format!("Fingerprint: {}", key.fingerprint()));

    // Point the user at the config step unless this already is the
    // configured key location.
    let configured = crate::cli::config_path(cli)
        .and_then(|p| Settings::load(&p))
        .map(|s| s.resolved_key_path())
        .unwrap_or_default();
    if configured != path {
        output::tip(&format!(
            "Set `key_path = \"{path}\"` in {} to use it.",
            Settings::FILE_NAME
        ));
    }

    Ok(())
}
