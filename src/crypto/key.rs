//! Key material loading, generation, and lifetime.
//!
//! The engine's AES key is raw bytes read once at startup from a local
//! file or an HTTPS URL.  It lives inside [`KeyMaterial`], which zeroes
//! its memory on drop, and it is never persisted or logged — the only
//! thing ever displayed is a SHA-256 fingerprint.

use std::fs;
use std::io::Read;
use std::path::Path;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::{KeyfoldError, Result};

/// Key lengths accepted by AES (AES-128/192/256).
pub const VALID_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// Cap on how much we read from a key URL.  Anything past this cannot
/// be a raw AES key.
const MAX_KEY_BYTES: u64 = 1024;

/// A raw symmetric key, zeroed from memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial {
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Wrap raw key bytes, validating the length.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if !VALID_KEY_LENGTHS.contains(&bytes.len()) {
            return Err(KeyfoldError::KeyMaterial(format!(
                "key must be 16, 24, or 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Load key material from `source` — a local file path, or an HTTPS
    /// URL that is downloaded once.
    ///
    /// Plain HTTP is refused: key material never travels unencrypted.
    pub fn load(source: &str) -> Result<Self> {
        let bytes = if source.starts_with("https://") {
            download(source)?
        } else if source.starts_with("http://") {
            return Err(KeyfoldError::KeyMaterial(
                "refusing to fetch key material over plain http — use https".to_string(),
            ));
        } else {
            fs::read(source).map_err(|e| {
                KeyfoldError::KeyMaterial(format!("cannot read key file '{source}': {e}"))
            })?
        };
        Self::from_bytes(bytes)
    }

    /// Access the raw key bytes (e.g. to pass to the envelope codec).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the key is empty (never the case for a validated key).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Short SHA-256 fingerprint of the key, safe to display.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        let hex: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
        format!("sha256:{hex}")
    }
}

/// Generate a fresh random AES key of the given size (16, 24, or 32).
pub fn generate(size: usize) -> Result<Vec<u8>> {
    if !VALID_KEY_LENGTHS.contains(&size) {
        return Err(KeyfoldError::KeyMaterial(format!(
            "key size must be 16, 24, or 32 bytes, got {size}"
        )));
    }
    let mut key = vec![0u8; size];
    OsRng.fill_bytes(&mut key);
    Ok(key)
}

/// Generate a key and write it to `path` with owner-only permissions.
///
/// Returns the new key so the caller can show its fingerprint.
pub fn generate_key_file(path: &Path, size: usize) -> Result<KeyMaterial> {
    if path.exists() {
        return Err(KeyfoldError::KeyMaterial(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    let key = generate(size)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                KeyfoldError::KeyMaterial(format!("cannot create key directory: {e}"))
            })?;
        }
    }

    fs::write(path, &key)
        .map_err(|e| KeyfoldError::KeyMaterial(format!("failed to write key file: {e}")))?;

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            KeyfoldError::KeyMaterial(format!("failed to set key file permissions: {e}"))
        })?;
    }

    KeyMaterial::from_bytes(key)
}

/// Download key bytes from an HTTPS URL.
fn download(url: &str) -> Result<Vec<u8>> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| KeyfoldError::KeyMaterial(format!("failed to download key: {e}")))?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_KEY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| KeyfoldError::KeyMaterial(format!("failed to read key response: {e}")))?;
    Ok(bytes)
}
