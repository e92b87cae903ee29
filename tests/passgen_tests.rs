//! Length-bound and composition tests for the password generator.
//!
//! The bounds are hard guarantees, so each is checked over many draws.

use keyfold::passgen::{Generator, Tier};

const ROUNDS: usize = 500;

#[test]
fn readable_is_at_least_twelve_chars() {
    let mut generator = Generator::new();
    for _ in 0..ROUNDS {
        let pass = generator.readable();
        assert!(
            pass.chars().count() >= 12,
            "readable password too short: {pass:?}"
        );
    }
}

#[test]
fn safe_length_is_within_bounds() {
    let mut generator = Generator::new();
    for _ in 0..ROUNDS {
        let pass = generator.safe();
        let len = pass.chars().count();
        assert!(
            (18..25).contains(&len),
            "safe password length {len} outside [18, 25): {pass:?}"
        );
    }
}

#[test]
fn insane_length_is_within_bounds() {
    let mut generator = Generator::new();
    for _ in 0..ROUNDS {
        let pass = generator.insane();
        let len = pass.chars().count();
        assert!(
            (27..40).contains(&len),
            "insane password length {len} outside [27, 40): {pass:?}"
        );
    }
}

#[test]
fn generate_dispatches_by_tier() {
    let mut generator = Generator::new();
    assert!(generator.generate(Tier::Readable).chars().count() >= 12);
    assert!((18..25).contains(&generator.generate(Tier::Safe).chars().count()));
    assert!((27..40).contains(&generator.generate(Tier::Insane).chars().count()));
}

#[test]
fn consecutive_passwords_differ() {
    let mut generator = Generator::new();
    let a = generator.safe();
    let b = generator.safe();
    assert_ne!(a, b);
}

#[test]
fn two_generators_do_not_share_a_stream() {
    let a = Generator::new().insane();
    let b = Generator::new().insane();
    assert_ne!(a, b);
}
