//! `keyfold add` — add or update a secret.

use std::io::{self, IsTerminal, Read};

use crate::cli::{open_engine, output, Cli};
use crate::errors::{KeyfoldError, Result};
use crate::passgen::{Generator, Tier};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    path: &str,
    value: Option<&str>,
    tier: Option<Tier>,
    message: Option<&str>,
) -> Result<()> {
    let (secret, generated) = resolve_value(path, value, tier)?;

    let mut engine = open_engine(cli)?;
    engine.add(path, &secret, message)?;

    if generated {
        // Echo the generated password back — the user has no other way
        // to learn what was just stored.
        output::success(&format!("Added '{path}' with generated password: {secret}"));
    } else {
        output::success(&format!("Added '{path}'"));
    }

    Ok(())
}

/// Determine the secret value from one of four sources.
///
/// Returns the value and whether it was generated.
fn resolve_value(path: &str, value: Option<&str>, tier: Option<Tier>) -> Result<(String, bool)> {
    if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok((v.to_string(), false));
    }

    if let Some(tier) = tier {
        // Source 2: Generated at the requested strength tier.
        return Ok((Generator::new().generate(tier), true));
    }

    if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok((buf.trim_end().to_string(), false));
    }

    // Source 4: Interactive secure prompt (default).
    let prompted = dialoguer::Password::new()
        .with_prompt(format!("Enter secret for {path}"))
        .interact()
        .map_err(|e| KeyfoldError::CommandFailed(format!("input prompt: {e}")))?;
    Ok((prompted, false))
}
