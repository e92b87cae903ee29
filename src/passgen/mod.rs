//! Password generation at three strength tiers.
//!
//! The character classes and their sampling weights are the whole
//! entropy-quality story, so they live here as documented constants
//! rather than inside the sampling logic.  Every draw comes from an
//! OS-seeded ChaCha CSPRNG owned by the [`Generator`]; there is no
//! global randomness state and nothing is ever seeded from the clock.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Password strength tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tier {
    /// Pronounceable and easy to remember, still mixed with digits and
    /// symbols.  Length >= 12.
    Readable,
    /// Three pronounceable words plus weighted filler.  Length in [18, 25).
    Safe,
    /// Pure weighted sampling over every class, extended scripts
    /// included.  Length in [27, 40).
    Insane,
}

// ── Character classes ────────────────────────────────────────────────

const VOWELS: &str = "aeiouAEIOU";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ";
const DIGITS: &str = "1234567890";
const SEPARATORS: &str = "_-.";
const SPECIAL: &str = "!@#$%&?";
const VERY_SPECIAL: &str = r#"*^()+={[]}'";:/|\~<>"#;
const EXTENDED_1: &str = "ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝÞß";
const EXTENDED_2: &str = "¡¢£¤¥§©¦¨«¬®¯°µ¶·¸»¿";
const EXTENDED_3: &str = "²³¹ºª¼½¾×±";

/// A class of characters a generated password can draw from.
#[derive(Debug, Clone, Copy)]
enum CharClass {
    Vowel,
    Consonant,
    Digit,
    Separator,
    Special,
    VerySpecial,
    Extended1,
    Extended2,
    Extended3,
}

impl CharClass {
    fn alphabet(self) -> &'static str {
        match self {
            CharClass::Vowel => VOWELS,
            CharClass::Consonant => CONSONANTS,
            CharClass::Digit => DIGITS,
            CharClass::Separator => SEPARATORS,
            CharClass::Special => SPECIAL,
            CharClass::VerySpecial => VERY_SPECIAL,
            CharClass::Extended1 => EXTENDED_1,
            CharClass::Extended2 => EXTENDED_2,
            CharClass::Extended3 => EXTENDED_3,
        }
    }
}

/// Weight table for the safe tier's filler characters, in percent.
const SAFE_FILLER_WEIGHTS: &[(u32, CharClass)] = &[
    (50, CharClass::Special),
    (16, CharClass::VerySpecial),
    (22, CharClass::Digit),
    (12, CharClass::Separator),
];

/// Weight table for the insane tier's alphabet, in percent.
const INSANE_WEIGHTS: &[(u32, CharClass)] = &[
    (11, CharClass::Vowel),
    (11, CharClass::Consonant),
    (11, CharClass::Separator),
    (11, CharClass::Digit),
    (11, CharClass::Special),
    (11, CharClass::VerySpecial),
    (11, CharClass::Extended1),
    (11, CharClass::Extended2),
    (12, CharClass::Extended3),
];

// ── Length bounds ────────────────────────────────────────────────────

const READABLE_MIN_LEN: usize = 12;
const SAFE_MIN_LEN: usize = 18;
const SAFE_MAX_LEN: usize = 25;
const INSANE_MIN_LEN: usize = 27;
const INSANE_MAX_LEN: usize = 40;

const WORD_MIN_LEN: usize = 4;
const WORD_MAX_LEN: usize = 8;

/// Password generator holding its own CSPRNG.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Compose a password at the given tier.
    pub fn generate(&mut self, tier: Tier) -> String {
        match tier {
            Tier::Readable => self.readable(),
            Tier::Safe => self.safe(),
            Tier::Insane => self.insane(),
        }
    }

    /// Two pronounceable words joined by a separator, with 1-3 digits
    /// and a special symbol injected at random places, padded with
    /// further specials until at least 12 characters long.
    pub fn readable(&mut self) -> String {
        let mut word = Vec::new();
        word.extend(self.word());
        word.push(self.pick(SEPARATORS));
        word.extend(self.word());

        let digits = self.digit_run();
        self.insert_run(&mut word, &digits);

        let symbol = self.pick(SPECIAL);
        self.insert_one(&mut word, symbol);
        while word.len() < READABLE_MIN_LEN {
            let symbol = self.pick(SPECIAL);
            self.insert_one(&mut word, symbol);
        }

        word.into_iter().collect()
    }

    /// Three pronounceable words with separators, a digit run and one
    /// very-special symbol, padded with weighted filler to a target
    /// length drawn from [18, 25).
    pub fn safe(&mut self) -> String {
        let mut word = Vec::new();
        word.extend(self.word());
        word.push(self.pick(SEPARATORS));
        word.extend(self.word());
        word.push(self.pick(SEPARATORS));
        word.extend(self.word());

        let digits = self.digit_run();
        self.insert_run(&mut word, &digits);

        let symbol = self.pick(VERY_SPECIAL);
        self.insert_one(&mut word, symbol);

        let target = self.rng.gen_range(SAFE_MIN_LEN..SAFE_MAX_LEN);
        while word.len() < target {
            let filler = self.pick_weighted(SAFE_FILLER_WEIGHTS);
            self.insert_one(&mut word, filler);
        }
        // The composed skeleton can overshoot the drawn target; clamp so
        // the documented bound holds.
        word.truncate(target);

        word.into_iter().collect()
    }

    /// Pure weighted sampling over every character class for a length
    /// drawn from [27, 40).
    pub fn insane(&mut self) -> String {
        let length = self.rng.gen_range(INSANE_MIN_LEN..INSANE_MAX_LEN);
        (0..length)
            .map(|_| self.pick_weighted(INSANE_WEIGHTS))
            .collect()
    }

    // ── Building blocks ──────────────────────────────────────────────

    /// A pronounceable word built from consonant/vowel syllables,
    /// trimmed to a length drawn from [4, 8).
    fn word(&mut self) -> Vec<char> {
        let length = self.rng.gen_range(WORD_MIN_LEN..WORD_MAX_LEN);
        let mut word = Vec::with_capacity(length + 3);
        while word.len() < length {
            word.extend(self.syllable());
        }
        word.truncate(length);
        word
    }

    /// One syllable: a random consonant/vowel pattern of 2-3 letters.
    fn syllable(&mut self) -> Vec<char> {
        let c = self.pick(CONSONANTS);
        let v = self.pick(VOWELS);
        match self.rng.gen_range(0..4) {
            0 => vec![c, v],
            1 => vec![v, c],
            2 => vec![v, c, self.pick(VOWELS)],
            _ => vec![c, v, self.pick(CONSONANTS)],
        }
    }

    /// One digit always, a second 50% of the time, a third 25%.
    fn digit_run(&mut self) -> Vec<char> {
        let mut digits = vec![self.pick(DIGITS)];
        if self.rng.gen_range(0..2) == 1 {
            digits.push(self.pick(DIGITS));
            if self.rng.gen_range(0..2) == 1 {
                digits.push(self.pick(DIGITS));
            }
        }
        digits
    }

    /// Insert a contiguous run of characters at one random position.
    fn insert_run(&mut self, word: &mut Vec<char>, run: &[char]) {
        let at = self.rng.gen_range(0..word.len());
        for (i, &ch) in run.iter().enumerate() {
            word.insert(at + i, ch);
        }
    }

    fn insert_one(&mut self, word: &mut Vec<char>, ch: char) {
        let at = self.rng.gen_range(0..word.len());
        word.insert(at, ch);
    }

    fn pick(&mut self, alphabet: &str) -> char {
        let count = alphabet.chars().count();
        alphabet
            .chars()
            .nth(self.rng.gen_range(0..count))
            .expect("alphabets are never empty")
    }

    fn pick_weighted(&mut self, table: &[(u32, CharClass)]) -> char {
        let total: u32 = table.iter().map(|(w, _)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for &(weight, class) in table {
            if roll < weight {
                return self.pick(class.alphabet());
            }
            roll -= weight;
        }
        unreachable!("weight table is exhaustive")
    }
}
