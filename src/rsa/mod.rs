// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod charmap;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod prime;

pub use bigint::{coprimes_of, gcd, mod_inverse, mod_inverse_brute_force, mod_pow, RsaBigInt};
pub use charmap::{CharMap, ALPHABET, ALPHABET_LEN};
pub use config::{KeyGenConfig, Variant};
pub use decrypt::decode;
pub use encrypt::encode;
pub use error::{Result, RsaError};
pub use keygen::{
    create_keys, create_keys_with, derive_keys, Encoding, ExponentPicker, InverseStrategy, KeyContext, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey,
};
pub use prime::{is_prime_by_trial, sample_two_primes, sieve, CancelToken, PrimeSampler, SampledPrimes};
