//! # Textbook RSA
//!
//! Key pairs from two primes sampled by a sieve-backed trial-division test,
//! and character-wise encryption with plain modular exponentiation.
//!
//! This is RSA as it appears in a classroom: no padding, tiny moduli and a
//! non-cryptographic RNG. It is for studying the arithmetic, not for
//! protecting anything.
//!
//! ## Example
//!
//! ```rust,no_run
//! use textbook_rsa::{create_keys, KeyGenConfig, Variant};
//!
//! let config = KeyGenConfig::default()
//!     .with_variant(Variant::Ordinal)
//!     .with_save_new(false);
//! let context = create_keys(&config).expect("key generation failed");
//!
//! let ciphertext = context.encode("Hello World!").expect("encode failed");
//! assert_eq!(context.decode(&ciphertext).unwrap(), "Hello World!");
//! ```

pub mod rsa;
pub mod ui;
pub mod util;

pub use rsa::*;
pub use util::{load_keys, save_keys};
