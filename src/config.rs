use std::env;

use num_bigint_dig::{prime::probably_prime, BigUint};

pub const DEFAULT_ROUNDS: usize = 20;
pub const ROUNDS_ENV: &str = "WEIERSTRASS_GF_PRIMALITY_ROUNDS";

const DEFAULT_CONFIG: PrimalityConfig = PrimalityConfig {
    rounds: DEFAULT_ROUNDS,
};

/// Confidence of the modulus primality check.
///
/// Each round is one Miller-Rabin test with a pseudorandom base, so a composite
/// slips through with probability at most `4^-rounds`. More rounds make every
/// validated constructor slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimalityConfig {
    pub rounds: usize,
}

impl PrimalityConfig {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// Reads the round count from `WEIERSTRASS_GF_PRIMALITY_ROUNDS`, falling back
    /// to the default when the variable is absent or not a number.
    pub fn from_env() -> Self {
        env::var(ROUNDS_ENV)
            .ok()
            .and_then(|rounds| rounds.trim().parse::<usize>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn is_prime(&self, candidate: &BigUint) -> bool {
        probably_prime(candidate, self.rounds)
    }
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

pub(crate) fn default_config() -> &'static PrimalityConfig {
    &DEFAULT_CONFIG
}
