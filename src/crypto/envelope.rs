//! The envelope codec — tree to opaque blob and back.
//!
//! A sealed envelope hides not only the secrets but also how many of
//! them there are: the serialized tree is wrapped in two independently
//! randomized garbage ranges before encryption, so the ciphertext length
//! carries no information about the tree's size.
//!
//! Plaintext layout before encryption:
//!
//! ```text
//! [start_len: 4 bytes BE][end_len: 4 bytes BE][garbage][tree JSON][garbage]
//! ```
//!
//! The framed buffer is then AES-GCM encrypted (`encryption` module), so
//! the persisted blob is `nonce || ciphertext+tag`.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

use crate::errors::{KeyfoldError, Result};
use crate::tree::SecretNode;

use super::encryption;

/// Upper bound (exclusive) for each garbage range, in bytes.
///
/// Both ranges are drawn uniformly from `0..GARBAGE_MAX`, so the total
/// envelope length varies by up to 128 KiB between seals of the same
/// tree.
pub const GARBAGE_MAX: usize = 65_536;

/// Fixed-size frame prefix: two big-endian u32 garbage lengths.
const HEADER_LEN: usize = 8;

/// Serialize, pad, and encrypt a secret tree.
///
/// Every call draws fresh garbage lengths and a fresh nonce, so sealing
/// the same tree twice produces blobs of different content and length.
pub fn seal(tree: &SecretNode, key: &[u8]) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(tree)
        .map_err(|e| KeyfoldError::SerializationError(format!("tree: {e}")))?;

    let start_len = OsRng.gen_range(0..GARBAGE_MAX);
    let end_len = OsRng.gen_range(0..GARBAGE_MAX);

    let mut framed = Vec::with_capacity(HEADER_LEN + start_len + payload.len() + end_len);
    framed.extend_from_slice(&(start_len as u32).to_be_bytes());
    framed.extend_from_slice(&(end_len as u32).to_be_bytes());

    let mut garbage = vec![0u8; start_len];
    OsRng.fill_bytes(&mut garbage);
    framed.extend_from_slice(&garbage);

    framed.extend_from_slice(&payload);

    garbage.resize(end_len, 0);
    OsRng.fill_bytes(&mut garbage);
    framed.extend_from_slice(&garbage);

    encryption::encrypt(key, &framed)
}

/// Decrypt and unwrap a sealed envelope back into a secret tree.
///
/// Authentication happens first — a tampered blob fails with
/// `AuthenticationFailed` before any of its content is looked at.
pub fn open(blob: &[u8], key: &[u8]) -> Result<SecretNode> {
    let plaintext = encryption::decrypt(key, blob)?;

    if plaintext.len() < HEADER_LEN {
        return Err(KeyfoldError::MalformedEnvelope(
            "payload is too short for the garbage headers".to_string(),
        ));
    }

    let start_len = u32::from_be_bytes(plaintext[0..4].try_into().unwrap()) as u64;
    let end_len = u32::from_be_bytes(plaintext[4..8].try_into().unwrap()) as u64;

    if HEADER_LEN as u64 + start_len + end_len > plaintext.len() as u64 {
        return Err(KeyfoldError::MalformedEnvelope(format!(
            "garbage lengths ({start_len} + {end_len}) exceed the payload"
        )));
    }

    let body = &plaintext[HEADER_LEN + start_len as usize..plaintext.len() - end_len as usize];

    serde_json::from_slice(body)
        .map_err(|e| KeyfoldError::DeserializationError(format!("tree: {e}")))
}
