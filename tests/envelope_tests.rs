//! Integration tests for the envelope codec.

use keyfold::crypto::{open, seal};
use keyfold::errors::KeyfoldError;
use keyfold::tree::SecretNode;

fn sample_tree() -> SecretNode {
    let mut root = SecretNode::root();
    root.add("work/email", "Tr0ub4dor&3").unwrap();
    root.add("work/github/token", "ghp_something").unwrap();
    root.add("home/wifi", "correct horse battery staple").unwrap();
    root
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_for_all_key_lengths() {
    let tree = sample_tree();
    for len in [16, 24, 32] {
        let key = vec![0x5Au8; len];
        let blob = seal(&tree, &key).expect("seal should succeed");
        let back = open(&blob, &key).expect("open should succeed");
        assert_eq!(back, tree);
    }
}

#[test]
fn roundtrip_of_an_empty_tree() {
    let tree = SecretNode::root();
    let key = [1u8; 32];

    let blob = seal(&tree, &key).unwrap();
    assert_eq!(open(&blob, &key).unwrap(), tree);
}

#[test]
fn roundtrip_preserves_unicode_values() {
    let mut tree = SecretNode::root();
    tree.add("misc/weird", "pä߶×won't-break").unwrap();

    let key = [3u8; 32];
    let blob = seal(&tree, &key).unwrap();
    assert_eq!(
        open(&blob, &key).unwrap().get("misc/weird").unwrap().value,
        tree.get("misc/weird").unwrap().value
    );
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn any_flipped_byte_fails_authentication() {
    let tree = sample_tree();
    let key = [9u8; 32];
    let blob = seal(&tree, &key).unwrap();

    // Sample positions across the whole blob (nonce, ciphertext, tag).
    let stride = (blob.len() / 256).max(1);
    for pos in (0..blob.len()).step_by(stride) {
        let mut tampered = blob.clone();
        tampered[pos] ^= 0x01;

        match open(&tampered, &key) {
            Err(KeyfoldError::AuthenticationFailed) => {}
            other => panic!("flip at {pos} must fail authentication, got {other:?}"),
        }
    }
}

#[test]
fn wrong_key_fails_authentication() {
    let blob = seal(&sample_tree(), &[1u8; 32]).unwrap();
    assert!(matches!(
        open(&blob, &[2u8; 32]),
        Err(KeyfoldError::AuthenticationFailed)
    ));
}

#[test]
fn truncated_blob_is_rejected() {
    let key = [4u8; 32];
    let blob = seal(&sample_tree(), &key).unwrap();

    assert!(open(&blob[..8], &key).is_err());
    assert!(open(&[], &key).is_err());
}

// ---------------------------------------------------------------------------
// Padding variability
// ---------------------------------------------------------------------------

#[test]
fn sealing_twice_produces_different_lengths() {
    let tree = sample_tree();
    let key = [7u8; 32];

    let lengths: Vec<usize> = (0..5).map(|_| seal(&tree, &key).unwrap().len()).collect();

    let first = lengths[0];
    assert!(
        lengths.iter().any(|&l| l != first),
        "five seals of the same tree all had length {first} — garbage padding is not randomized"
    );
}

#[test]
fn sealing_twice_produces_different_ciphertext() {
    let tree = sample_tree();
    let key = [7u8; 32];

    let a = seal(&tree, &key).unwrap();
    let b = seal(&tree, &key).unwrap();
    assert_ne!(a, b);
}
