//! `keyfold get` — retrieve a single secret's value.

use crate::cli::{open_engine, output, Cli};
use crate::errors::{KeyfoldError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, path: &str, copy: bool) -> Result<()> {
    let mut engine = open_engine(cli)?;

    let value = engine
        .get(path)?
        .ok_or_else(|| KeyfoldError::NotFound(path.to_string()))?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| KeyfoldError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(value)
            .map_err(|e| KeyfoldError::CommandFailed(format!("clipboard write failed: {e}")))?;
        output::success(&format!("Copied '{path}' to the clipboard"));
    } else {
        println!("{value}");
    }

    Ok(())
}
