use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{KeyfoldError, Result};

/// User configuration, loaded from `~/.keyfold.toml`.
///
/// Every field has a sensible default so a config file only needs to
/// name the remote repository to get started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Where the AES key lives: a local file path or an HTTPS URL.
    #[serde(default = "default_key_path")]
    pub key_path: String,

    /// The remote holding the encrypted payload: a git URL or a local
    /// directory.
    #[serde(default)]
    pub repo: Option<String>,

    /// Which backend to use for `repo`.
    #[serde(default)]
    pub backend: Backend,

    /// Minimum seconds between real remote fetches (default: 10).
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

/// Remote backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Detect from `repo`: an existing local directory that is not a
    /// git URL uses the dir backend, everything else uses git.
    #[default]
    Auto,
    /// Always treat `repo` as a git clone URL.
    Git,
    /// Always treat `repo` as a plain directory.
    Dir,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_path() -> String {
    "~/.keyfold.key".to_string()
}

fn default_refresh_secs() -> u64 {
    10
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_path: default_key_path(),
            repo: None,
            backend: Backend::Auto,
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the home directory.
    pub const FILE_NAME: &'static str = ".keyfold.toml";

    /// Default config location: `$HOME/.keyfold.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                KeyfoldError::ConfigError("cannot locate home directory".to_string())
            })?;
        Ok(PathBuf::from(home).join(Self::FILE_NAME))
    }

    /// Load settings from `path`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeyfoldError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(settings)
    }

    /// The configured remote, or a config error telling the user what
    /// to set.
    pub fn repo(&self) -> Result<&str> {
        self.repo.as_deref().ok_or_else(|| {
            KeyfoldError::ConfigError(format!(
                "no remote configured — set `repo` in {}",
                Self::FILE_NAME
            ))
        })
    }

    /// The key source with a leading `~/` expanded against `$HOME`.
    pub fn resolved_key_path(&self) -> String {
        expand_home(&self.key_path)
    }

    /// The refresh throttle as a `Duration`.
    pub fn refresh(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Resolve `Auto` against the actual `repo` value.
    pub fn resolve_backend(&self, repo: &str) -> Backend {
        match self.backend {
            Backend::Auto => {
                if looks_like_git_url(repo) {
                    Backend::Git
                } else if Path::new(&expand_home(repo)).is_dir() {
                    Backend::Dir
                } else {
                    Backend::Git
                }
            }
            explicit => explicit,
        }
    }
}

/// Expand a leading `~/` against `$HOME`; everything else passes
/// through unchanged.
pub fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return format!("{home}/{rest}");
        }
    }
    path.to_string()
}

fn looks_like_git_url(repo: &str) -> bool {
    repo.starts_with("git@")
        || repo.starts_with("ssh://")
        || repo.starts_with("https://")
        || repo.starts_with("http://")
        || repo.ends_with(".git")
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.key_path, "~/.keyfold.key");
        assert_eq!(s.repo, None);
        assert_eq!(s.backend, Backend::Auto);
        assert_eq!(s.refresh_secs, 10);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(&tmp.path().join(".keyfold.toml")).unwrap();
        assert_eq!(settings.refresh_secs, 10);
        assert!(settings.repo.is_none());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
key_path = "/keys/master.key"
repo = "git@github.com:me/secrets.git"
backend = "git"
refresh_secs = 30
"#;
        let path = tmp.path().join(".keyfold.toml");
        fs::write(&path, config).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.key_path, "/keys/master.key");
        assert_eq!(settings.repo.as_deref(), Some("git@github.com:me/secrets.git"));
        assert_eq!(settings.backend, Backend::Git);
        assert_eq!(settings.refresh_secs, 30);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".keyfold.toml");
        fs::write(&path, "repo = \"/somewhere/store\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.repo.as_deref(), Some("/somewhere/store"));
        assert_eq!(settings.key_path, "~/.keyfold.key");
        assert_eq!(settings.refresh_secs, 10);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".keyfold.toml");
        fs::write(&path, "not valid {{toml").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn repo_unset_is_a_config_error() {
        let s = Settings::default();
        assert!(matches!(s.repo(), Err(KeyfoldError::ConfigError(_))));
    }

    #[test]
    fn auto_backend_detects_git_urls() {
        let s = Settings::default();
        assert_eq!(
            s.resolve_backend("git@github.com:me/secrets.git"),
            Backend::Git
        );
        assert_eq!(
            s.resolve_backend("https://github.com/me/secrets.git"),
            Backend::Git
        );
        assert_eq!(s.resolve_backend("/no/such/directory"), Backend::Git);
    }

    #[test]
    fn auto_backend_detects_local_directories() {
        let tmp = TempDir::new().unwrap();
        let s = Settings::default();
        assert_eq!(
            s.resolve_backend(tmp.path().to_str().unwrap()),
            Backend::Dir
        );
    }

    #[test]
    fn explicit_backend_wins_over_detection() {
        let tmp = TempDir::new().unwrap();
        let s = Settings {
            backend: Backend::Git,
            ..Settings::default()
        };
        assert_eq!(
            s.resolve_backend(tmp.path().to_str().unwrap()),
            Backend::Git
        );
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/abs/path"), "/abs/path");
        assert_eq!(expand_home("relative/path"), "relative/path");
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expand_home("~/x.key"), format!("{home}/x.key"));
        }
    }
}
