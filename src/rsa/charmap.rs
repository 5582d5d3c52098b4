// Character Map
// Bijection between the printable alphabet and coprimes of the modulus

use std::collections::BTreeMap;

use super::bigint::{coprimes_of, RsaBigInt};
use super::error::{Result, RsaError};

/// The 100 printable characters: digits, letters, punctuation, whitespace
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

/// Number of characters in `ALPHABET`
pub const ALPHABET_LEN: usize = 100;

/// Fixed-size bidirectional mapping between alphabet characters and integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    char_to_int: BTreeMap<char, RsaBigInt>,
    int_to_char: BTreeMap<RsaBigInt, char>,
}

impl CharMap {
    /// Map the alphabet, in order, onto the coprimes of `n` that follow 1.
    ///
    /// The first coprime (1) is skipped because it is a fixed point of every
    /// exponentiation.
    pub fn from_modulus(n: &RsaBigInt) -> Result<Self> {
        let coprimes = coprimes_of(n, ALPHABET_LEN + 2);
        if coprimes.len() < ALPHABET_LEN + 2 {
            return Err(RsaError::InsufficientCoprimeSpace {
                value: n.to_string(),
                available: coprimes.len(),
                required: ALPHABET_LEN + 2,
            });
        }

        let entries = ALPHABET.chars().zip(coprimes[1..=ALPHABET_LEN].iter().cloned());
        Self::from_entries(entries).ok_or_else(|| RsaError::InsufficientCoprimeSpace {
            value: n.to_string(),
            available: coprimes.len(),
            required: ALPHABET_LEN + 2,
        })
    }

    /// Build both directions from (char, value) pairs.
    /// Returns None if a character or a value appears twice.
    pub fn from_entries<I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (char, RsaBigInt)>,
    {
        let mut char_to_int = BTreeMap::new();
        let mut int_to_char = BTreeMap::new();

        for (c, value) in entries {
            if char_to_int.insert(c, value.clone()).is_some() {
                return None;
            }
            if int_to_char.insert(value, c).is_some() {
                return None;
            }
        }

        Some(Self {
            char_to_int,
            int_to_char,
        })
    }

    pub fn len(&self) -> usize {
        self.char_to_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.char_to_int.is_empty()
    }

    /// Integer assigned to `c`
    pub fn value_of(&self, c: char) -> Result<&RsaBigInt> {
        self.char_to_int
            .get(&c)
            .ok_or_else(|| RsaError::UnrepresentableCharacter(format!("character {:?}", c)))
    }

    /// Character assigned to `value`
    pub fn char_of(&self, value: &RsaBigInt) -> Result<char> {
        self.int_to_char
            .get(value)
            .copied()
            .ok_or_else(|| RsaError::UnrepresentableCharacter(format!("value {}", value)))
    }

    /// (char, value) pairs ordered by character
    pub fn entries(&self) -> impl Iterator<Item = (char, &RsaBigInt)> + '_ {
        self.char_to_int.iter().map(|(c, v)| (*c, v))
    }
}
