//! `keyfold list` — show the tree of stored secrets.

use crate::cli::{open_engine, output, Cli};
use crate::errors::Result;

/// Execute the `list` command.
///
/// Values are masked unless `--all` is given.
pub fn execute(cli: &Cli, all: bool) -> Result<()> {
    let mut engine = open_engine(cli)?;
    let listing = engine.list_keys(!all)?;

    if listing.is_empty() {
        output::info("No secrets stored yet.");
        output::tip("Run `keyfold add <path>` to add your first secret.");
        return Ok(());
    }

    print!("{listing}");
    Ok(())
}
