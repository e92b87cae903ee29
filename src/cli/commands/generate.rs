//! `keyfold generate` — compose a password without storing it.

use crate::errors::Result;
use crate::passgen::{Generator, Tier};

/// Execute the `generate` command.
pub fn execute(tier: Tier) -> Result<()> {
    let password = Generator::new().generate(tier);
    println!("{password}");
    Ok(())
}
