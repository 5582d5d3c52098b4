// RSA Key Generation
// Derives (n, e) and d from two sampled primes and bundles them into a KeyContext

use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

use super::bigint::{coprimes_of, euler_totient, from_u64, mod_inverse, mod_inverse_brute_force, RsaBigInt};
use super::charmap::{CharMap, ALPHABET_LEN};
use super::config::{KeyGenConfig, Variant};
use super::error::{Result, RsaError};
use super::prime::{CancelToken, PrimeSampler};
use crate::util::file_ops::save_keys;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

/// How the public exponent is chosen among the coprimes of the totient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentPicker {
    /// Always the coprime at `index` among the first `max_count`
    FixedIndex { index: usize, max_count: usize },
    /// A uniformly random coprime e with 1 < e < t among the first `window`
    RandomWindow { window: usize },
}

impl ExponentPicker {
    /// Smallest coprime of the totient above 1
    pub const fn charmap_default() -> Self {
        ExponentPicker::FixedIndex {
            index: 1,
            max_count: 10,
        }
    }

    pub const fn ordinal_default() -> Self {
        ExponentPicker::RandomWindow { window: 100 }
    }

    /// Choose e for totient `t`
    pub fn pick<R: Rng + ?Sized>(&self, t: &RsaBigInt, rng: &mut R) -> Result<RsaBigInt> {
        let one = RsaBigInt::one();
        let usable = |e: &RsaBigInt| e > &one && e < t;

        match *self {
            ExponentPicker::FixedIndex { index, max_count } => {
                let candidates = coprimes_of(t, max_count);
                match candidates.get(index) {
                    Some(e) if usable(e) => Ok(e.clone()),
                    _ => Err(RsaError::InsufficientCoprimeSpace {
                        value: t.to_string(),
                        available: candidates.iter().filter(|e| usable(e)).count(),
                        required: index + 1,
                    }),
                }
            }
            ExponentPicker::RandomWindow { window } => {
                let scanned = coprimes_of(t, window);
                let scanned_len = scanned.len();
                let mut candidates: Vec<RsaBigInt> = scanned.into_iter().filter(|e| usable(e)).collect();
                if candidates.is_empty() {
                    return Err(RsaError::InsufficientCoprimeSpace {
                        value: t.to_string(),
                        available: scanned_len,
                        required: 2,
                    });
                }
                let index = rng.gen_range(0..candidates.len());
                Ok(candidates.swap_remove(index))
            }
        }
    }
}

/// How d is computed from e and the totient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InverseStrategy {
    #[default]
    ExtendedEuclid,
    /// Linear search for the smallest positive d
    BruteForce,
}

impl InverseStrategy {
    pub fn invert(&self, e: &RsaBigInt, t: &RsaBigInt) -> Result<RsaBigInt> {
        match self {
            InverseStrategy::ExtendedEuclid => mod_inverse(e, t),
            InverseStrategy::BruteForce => mod_inverse_brute_force(e, t),
        }
    }
}

/// (p - 1) * (q - 1)
pub fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    if p.is_zero() || q.is_zero() {
        return RsaBigInt::zero();
    }
    (p - 1u8) * (q - 1u8)
}

/// Combine two primes into a key pair.
///
/// n = p * q, t = (p - 1)(q - 1), e from `picker`, d = e^(-1) mod t.
pub fn derive_keys<R: Rng + ?Sized>(
    p: &RsaBigInt,
    q: &RsaBigInt,
    picker: &ExponentPicker,
    inverse: InverseStrategy,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    let n = p * q;
    let t = totient(p, q);

    let e = picker.pick(&t, rng)?;
    let d = inverse.invert(&e, &t)?;

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { n, e },
        private_key: RsaPrivateKey { d },
    })
}

/// How characters become integers before exponentiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Unicode scalar values, with a trailing space sentinel
    Ordinal,
    /// Alphabet characters mapped onto coprimes of n
    Charmap(CharMap),
}

impl Encoding {
    pub fn variant(&self) -> Variant {
        match self {
            Encoding::Ordinal => Variant::Ordinal,
            Encoding::Charmap(_) => Variant::Charmap,
        }
    }
}

/// Key material for encoding and decoding. Never changes once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyContext {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
    encoding: Encoding,
}

impl KeyContext {
    pub fn new(keypair: RsaKeyPair, encoding: Encoding) -> Self {
        Self {
            public_key: keypair.public_key,
            private_key: keypair.private_key,
            encoding,
        }
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn variant(&self) -> Variant {
        self.encoding.variant()
    }

    /// Encrypt `text` into colon-delimited ciphertext
    pub fn encode(&self, text: &str) -> Result<String> {
        super::encrypt::encode(self, text)
    }

    /// Decrypt colon-delimited ciphertext back into text
    pub fn decode(&self, ciphertext: &str) -> Result<String> {
        super::decrypt::decode(self, ciphertext)
    }
}

/// Generate a key context with the thread RNG
pub fn create_keys(config: &KeyGenConfig) -> Result<KeyContext> {
    create_keys_with(config, &mut rand::thread_rng(), &CancelToken::new())
}

/// Sample primes, derive the key pair, build the char map for the charmap
/// variant, and persist everything when `save_new` is set.
pub fn create_keys_with<R: Rng + ?Sized>(
    config: &KeyGenConfig,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<KeyContext> {
    let sampled = PrimeSampler::new(config.lower, config.upper)
        .with_max_draws(config.max_draws)
        .with_verbose(config.verbose)
        .sample(rng, cancel)?;

    let p = from_u64(sampled.p);
    let q = from_u64(sampled.q);
    let t = totient(&p, &q);

    // t counts the coprimes of n below n; the char map needs 1 plus the alphabet plus one spare
    if config.variant == Variant::Charmap && t <= from_u64(ALPHABET_LEN as u64) {
        return Err(RsaError::InsufficientCoprimeSpace {
            value: (&p * &q).to_string(),
            available: t.to_usize().unwrap_or(usize::MAX),
            required: ALPHABET_LEN + 2,
        });
    }

    if config.verbose {
        let n = &p * &q;
        println!("[RSA]: Found prime numbers: p = {}, q = {}", p, q);
        println!("[RSA]: Found product of p and q: n = {}", n);
        // The sieve test is approximate for small ranges, so a composite can slip through
        let phi = euler_totient(&n);
        println!("[RSA]: Totient of n: {}", phi);
        if phi != t {
            println!("[RSA]: Warning: (p - 1)(q - 1) = {} differs from the totient; p or q is composite", t);
        }
    }

    let keypair = derive_keys(&p, &q, &config.exponent_picker(), config.inverse, rng)?;

    if config.verbose {
        println!(
            "[RSA]: Found coefficients: d = {}, e = {}",
            keypair.private_key.d, keypair.public_key.e
        );
    }

    let encoding = match config.variant {
        Variant::Ordinal => Encoding::Ordinal,
        Variant::Charmap => {
            if config.verbose {
                println!("[RSA]: Creating character maps with coprimes of n");
            }
            Encoding::Charmap(CharMap::from_modulus(&keypair.public_key.n)?)
        }
    };

    let context = KeyContext::new(keypair, encoding);

    if config.save_new {
        save_keys(&config.key_path, &context)?;
        if config.verbose {
            println!("[RSA]: Saved details to {}", config.key_path.display());
        }
    }

    Ok(context)
}
