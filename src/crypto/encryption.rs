//! AES-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.  The cipher variant (AES-128/192/256) is selected
//! by the key length, so any valid raw AES key works.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};

use crate::errors::{KeyfoldError, Result};

/// Size of the AES-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// AES-192-GCM — not predefined by the `aes-gcm` crate.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encrypt `plaintext` with a raw 16-, 24-, or 32-byte AES key.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => seal_with::<Aes128Gcm>(key, plaintext),
        24 => seal_with::<Aes192Gcm>(key, plaintext),
        32 => seal_with::<Aes256Gcm>(key, plaintext),
        n => Err(KeyfoldError::KeyMaterial(format!(
            "invalid key length {n} — expected 16, 24, or 32 bytes"
        ))),
    }
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 12 bytes to be the nonce, followed by the
/// ciphertext.  A failed authentication tag is reported as
/// `AuthenticationFailed` — the plaintext is never returned unverified.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    // Make sure we have at least a nonce worth of bytes.
    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(KeyfoldError::MalformedEnvelope(
            "ciphertext shorter than the nonce".to_string(),
        ));
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);

    match key.len() {
        16 => open_with::<Aes128Gcm>(key, nonce_bytes, ciphertext),
        24 => open_with::<Aes192Gcm>(key, nonce_bytes, ciphertext),
        32 => open_with::<Aes256Gcm>(key, nonce_bytes, ciphertext),
        n => Err(KeyfoldError::KeyMaterial(format!(
            "invalid key length {n} — expected 16, 24, or 32 bytes"
        ))),
    }
}

fn seal_with<C>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: Aead + KeyInit + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key)
        .map_err(|e| KeyfoldError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.
    let nonce = C::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| KeyfoldError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

fn open_with<C>(key: &[u8], nonce_bytes: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: Aead + KeyInit + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|_| KeyfoldError::AuthenticationFailed)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| KeyfoldError::AuthenticationFailed)
}
