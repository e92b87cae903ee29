//! `keyfold delete` — remove a secret and its subtree.

use dialoguer::Confirm;

use crate::cli::{open_engine, output, Cli};
use crate::errors::{KeyfoldError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, path: &str, force: bool, message: Option<&str>) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{path}' and everything beneath it?"))
            .default(false)
            .interact()
            .map_err(|e| KeyfoldError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut engine = open_engine(cli)?;
    engine.delete(path, message)?;

    output::success(&format!("Deleted '{path}'"));
    Ok(())
}
