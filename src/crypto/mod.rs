//! Cryptographic layer for Keyfold.
//!
//! This module provides:
//! - AES-GCM encryption and decryption (`encryption`)
//! - The padded envelope codec that turns a secret tree into an opaque
//!   blob and back (`envelope`)
//! - Key material loading, generation, and lifetime (`key`)

pub mod encryption;
pub mod envelope;
pub mod key;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, KeyMaterial};
pub use encryption::{decrypt, encrypt};
pub use envelope::{open, seal};
pub use key::KeyMaterial;
