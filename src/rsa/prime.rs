// Prime Discovery
// Sieve of Eratosthenes, trial division against the sieve, and rejection sampling

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use num_integer::Roots;
use rand::Rng;

use super::error::{Result, RsaError};

/// Default ceiling on the number of random draws made while sampling primes
pub const DEFAULT_MAX_DRAWS: u64 = 1_000_000;

/// All primes in [2, limit], ascending.
///
/// Every unmarked number is emitted as prime and its multiples, starting at
/// twice itself, are marked composite.
pub fn sieve(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    // marked[i] stands for the number i + 2
    let len = (limit - 1) as usize;
    let mut marked = vec![false; len];
    let mut primes = Vec::new();

    for index in 0..len {
        if marked[index] {
            continue;
        }
        let num = index + 2;
        primes.push(num as u64);

        let mut j = index + num;
        while j < len {
            marked[j] = true;
            j += num;
        }
    }

    primes
}

/// A candidate passes unless one of `small_primes` divides it.
///
/// This is trial division only against the primes it is given, so it is an
/// approximation: 1 passes, and composites whose smallest factor exceeds the
/// largest small prime pass too.
pub fn is_prime_by_trial(candidate: u64, small_primes: &[u64]) -> bool {
    !small_primes.iter().any(|&p| candidate % p == 0)
}

/// Cooperative cancellation flag for long-running sampling.
///
/// Clones share the same flag, so a token handed to another thread can stop
/// a sampler running on this one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Two distinct accepted candidates and the number of draws it took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledPrimes {
    pub p: u64,
    pub q: u64,
    pub draws: u64,
}

/// Rejection sampler for a pair of primes in a closed range
#[derive(Debug, Clone)]
pub struct PrimeSampler {
    pub lower: u64,
    pub upper: u64,
    pub max_draws: u64,
    pub verbose: bool,
}

impl PrimeSampler {
    pub fn new(lower: u64, upper: u64) -> Self {
        Self {
            lower,
            upper,
            max_draws: DEFAULT_MAX_DRAWS,
            verbose: false,
        }
    }

    pub fn with_max_draws(mut self, max_draws: u64) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Draw uniformly from [lower, upper] until two distinct candidates pass
    /// the trial test against the primes up to sqrt(upper).
    ///
    /// Gives up with `SamplingExhausted` once `max_draws` draws have been made,
    /// and with `SamplingCancelled` as soon as `cancel` is tripped.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, cancel: &CancelToken) -> Result<SampledPrimes> {
        if self.lower > self.upper {
            return Err(RsaError::InvalidRange {
                lower: self.lower,
                upper: self.upper,
            });
        }

        let small_primes = sieve(self.upper.sqrt());
        if self.verbose {
            println!(
                "[RSA]: Found {} primes up to the square root of {}",
                small_primes.len(),
                self.upper
            );
        }

        let mut found: Vec<u64> = Vec::with_capacity(2);
        let mut draws = 0u64;

        while found.len() < 2 {
            if cancel.is_cancelled() {
                return Err(RsaError::SamplingCancelled { draws });
            }
            if draws >= self.max_draws {
                return Err(RsaError::SamplingExhausted {
                    draws,
                    lower: self.lower,
                    upper: self.upper,
                });
            }

            let candidate = rng.gen_range(self.lower..=self.upper);
            draws += 1;

            if is_prime_by_trial(candidate, &small_primes) && !found.contains(&candidate) {
                found.push(candidate);
                if self.verbose {
                    println!(
                        "[RSA]: Found a prime number between {} and {}: {}",
                        self.lower, self.upper, candidate
                    );
                }
            }

            if self.verbose && draws % 1000 == 0 {
                println!(
                    "[RSA]: Tried {} random integers between {} and {}",
                    draws, self.lower, self.upper
                );
            }
        }

        if self.verbose {
            println!("[RSA]: Found a pair of prime numbers after {} draws", draws);
        }

        Ok(SampledPrimes {
            p: found[0],
            q: found[1],
            draws,
        })
    }
}

/// Sample two distinct primes in [lower, upper] with the default draw budget
pub fn sample_two_primes<R: Rng + ?Sized>(lower: u64, upper: u64, rng: &mut R) -> Result<(u64, u64)> {
    let sampled = PrimeSampler::new(lower, upper).sample(rng, &CancelToken::new())?;
    Ok((sampled.p, sampled.q))
}
