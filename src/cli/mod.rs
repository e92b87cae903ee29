//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Backend, Settings};
use crate::crypto::KeyMaterial;
use crate::engine::Engine;
use crate::errors::Result;
use crate::passgen::Tier;
use crate::remote::{DirRemote, GitRemote, SyncGateway};

/// Keyfold CLI: git-synced personal password store.
#[derive(Parser)]
#[command(
    name = "keyfold",
    about = "Git-synced personal password store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: ~/.keyfold.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List stored secrets as an indented tree
    List {
        /// Reveal values instead of masking them
        #[arg(long)]
        all: bool,
    },

    /// Print the secret stored at a path
    Get {
        /// Slash-delimited path (e.g. work/email)
        path: String,

        /// Copy the value to the clipboard instead of printing it
        #[arg(short, long)]
        copy: bool,
    },

    /// Add or update a secret
    Add {
        /// Slash-delimited path (e.g. work/email)
        path: String,

        /// Secret value (omit to generate with --tier or be prompted)
        #[arg(long)]
        value: Option<String>,

        /// Generate the value at this strength tier
        #[arg(short, long, value_enum)]
        tier: Option<Tier>,

        /// Commit message recorded at the remote
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Delete a secret and everything beneath it
    Delete {
        /// Slash-delimited path
        path: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,

        /// Commit message recorded at the remote
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Compose a password without storing it
    Generate {
        /// Strength tier
        #[arg(short, long, value_enum, default_value = "safe")]
        tier: Tier,
    },

    /// Generate a fresh AES key file
    Keygen {
        /// Where to write the key
        path: String,

        /// Key size in bytes (16, 24, or 32)
        #[arg(long, default_value_t = 32)]
        size: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the config file path: `--config` or `~/.keyfold.toml`.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match cli.config {
        Some(ref path) => Ok(PathBuf::from(path)),
        None => Settings::default_path(),
    }
}

/// Load settings, key material, and the remote backend, and wire them
/// into an engine.  Used by every command that touches the store.
pub fn open_engine(cli: &Cli) -> Result<Engine> {
    let settings = Settings::load(&config_path(cli)?)?;

    let repo = settings.repo()?;
    let key = KeyMaterial::load(&settings.resolved_key_path())?;

    let gateway = match settings.resolve_backend(repo) {
        Backend::Dir => SyncGateway::with_refresh(
            DirRemote::new(crate::config::settings::expand_home(repo)),
            settings.refresh(),
        ),
        _ => SyncGateway::with_refresh(GitRemote::new(repo), settings.refresh()),
    };

    Ok(Engine::new(key, gateway))
}
