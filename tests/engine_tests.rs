//! End-to-end tests for the engine: fetch → decrypt → mutate → encrypt →
//! publish cycles against a directory-backed remote.

use std::fs;
use std::path::Path;
use std::time::Duration;

use keyfold::crypto::KeyMaterial;
use keyfold::engine::{Engine, DEFAULT_COMMIT_MESSAGE};
use keyfold::errors::KeyfoldError;
use keyfold::remote::{DirRemote, SyncGateway};
use keyfold::tree::MASK;
use tempfile::TempDir;

const KEY: [u8; 32] = [0x42u8; 32];

fn engine(root: &Path) -> Engine {
    let key = KeyMaterial::from_bytes(KEY.to_vec()).unwrap();
    let gateway = SyncGateway::with_refresh(DirRemote::new(root), Duration::ZERO);
    Engine::new(key, gateway)
}

// ---------------------------------------------------------------------------
// The end-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn add_seal_open_get_scenario() {
    let dir = TempDir::new().unwrap();

    engine(dir.path())
        .add("work/email", "Tr0ub4dor&3", None)
        .unwrap();

    // A second engine instance sees only what the remote persisted.
    let mut reader = engine(dir.path());
    assert_eq!(
        reader.get("work/email").unwrap().as_deref(),
        Some("Tr0ub4dor&3")
    );
    assert_eq!(reader.get("work/slack").unwrap(), None);
}

#[test]
fn add_on_empty_remote_equals_add_on_fresh_tree() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();

    // Store A: bootstrap from an empty remote.
    engine(dir_a.path()).add("a/b", "secret", None).unwrap();

    // Store B: the same operation on a remote that had an empty payload
    // file (still "first use").
    fs::write(dir_b.path().join("data.dat"), b"").unwrap();
    engine(dir_b.path()).add("a/b", "secret", None).unwrap();

    let listing_a = engine(dir_a.path()).list_keys(false).unwrap();
    let listing_b = engine(dir_b.path()).list_keys(false).unwrap();
    assert_eq!(listing_a, listing_b);
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_the_secret_from_the_remote() {
    let dir = TempDir::new().unwrap();

    engine(dir.path()).add("work/email", "p1", None).unwrap();
    engine(dir.path()).add("work/slack", "p2", None).unwrap();
    engine(dir.path()).delete("work/email", None).unwrap();

    let mut reader = engine(dir.path());
    assert_eq!(reader.get("work/email").unwrap(), None);
    assert_eq!(reader.get("work/slack").unwrap().as_deref(), Some("p2"));
}

#[test]
fn delete_on_empty_store_is_not_found() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        engine(dir.path()).delete("anything", None),
        Err(KeyfoldError::NotFound(_))
    ));
}

#[test]
fn add_overwrites_an_existing_value() {
    let dir = TempDir::new().unwrap();

    engine(dir.path()).add("site", "old", None).unwrap();
    engine(dir.path()).add("site", "new", None).unwrap();

    assert_eq!(
        engine(dir.path()).get("site").unwrap().as_deref(),
        Some("new")
    );
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn list_keys_masks_values_by_default_direction() {
    let dir = TempDir::new().unwrap();
    engine(dir.path()).add("work/email", "hunter2", None).unwrap();

    let mut reader = engine(dir.path());
    let secure = reader.list_keys(true).unwrap();
    assert!(secure.contains(MASK));
    assert!(!secure.contains("hunter2"));

    let open = reader.list_keys(false).unwrap();
    assert!(open.contains("hunter2"));
}

#[test]
fn list_keys_on_empty_store_is_empty() {
    let dir = TempDir::new().unwrap();
    assert_eq!(engine(dir.path()).list_keys(true).unwrap(), "");
}

// ---------------------------------------------------------------------------
// Commit messages
// ---------------------------------------------------------------------------

#[test]
fn commit_messages_reach_the_remote_history() {
    let dir = TempDir::new().unwrap();

    engine(dir.path())
        .add("work/email", "p", Some("rotated email password"))
        .unwrap();
    engine(dir.path()).add("work/slack", "p", None).unwrap();

    let history = fs::read_to_string(dir.path().join("history.log")).unwrap();
    assert!(history.contains("rotated email password"));
    assert!(history.contains(DEFAULT_COMMIT_MESSAGE));
}

// ---------------------------------------------------------------------------
// Key mismatch
// ---------------------------------------------------------------------------

#[test]
fn wrong_key_cannot_open_the_store() {
    let dir = TempDir::new().unwrap();
    engine(dir.path()).add("work/email", "p", None).unwrap();

    let other_key = KeyMaterial::from_bytes(vec![0x99u8; 32]).unwrap();
    let gateway = SyncGateway::with_refresh(DirRemote::new(dir.path()), Duration::ZERO);
    let mut wrong = Engine::new(other_key, gateway);

    assert!(matches!(
        wrong.get("work/email"),
        Err(KeyfoldError::AuthenticationFailed)
    ));
}
