//! Seeded linear-congruential generator.
//!
//! Every random decision made while generating one rhythm draws from a single
//! `Random` built from the caller's seed, so identical parameters always give
//! identical sequences. The constants are the classic 9301/49297/233280 LCG;
//! changing them changes every saved rhythm.

const MULTIPLIER: i64 = 9301;
const INCREMENT: i64 = 49297;
const MODULUS: i64 = 233280;

/// Deterministic source of floats in [0, 1)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Random {
    state: i64,
}

impl Random {
    /// Zero and negative seeds are shifted into (0, 233280] so they still
    /// produce a useful stream.
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS;
        }
        Self { state }
    }

    /// Advance the state and return it as a fraction of the modulus
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}
