// RSA Error Types
// Every failure the key generation and encode/decode paths can report

/// Errors surfaced by key generation, encoding, decoding and the key store.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("Insufficient coprime space: {value} has {available} coprimes, {required} required")]
    InsufficientCoprimeSpace {
        value: String,
        available: usize,
        required: usize,
    },

    #[error("{0} is not representable under the current key")]
    UnrepresentableCharacter(String),

    #[error("No modular inverse of {value} modulo {modulus}")]
    NoModularInverse { value: String, modulus: String },

    #[error("Key store unavailable at {path}: {reason}")]
    KeyStoreUnavailable { path: String, reason: String },

    #[error("Prime sampling gave up after {draws} draws in [{lower}, {upper}]")]
    SamplingExhausted { draws: u64, lower: u64, upper: u64 },

    #[error("Prime sampling cancelled after {draws} draws")]
    SamplingCancelled { draws: u64 },

    #[error("Invalid prime search range: lower {lower} exceeds upper {upper}")]
    InvalidRange { lower: u64, upper: u64 },

    #[error("Malformed ciphertext token: {0:?}")]
    MalformedCiphertext(String),
}

pub type Result<T> = std::result::Result<T, RsaError>;
