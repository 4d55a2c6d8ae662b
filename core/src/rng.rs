//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call a platform or thread-local RNG.
//! Every call builds one SimRng from the configured seed and threads it
//! explicitly through classifier → sampler → scenario. Two calls with the
//! same seed and inputs therefore see the same stream.
//!
//! Scenario code only ever sees `&mut dyn RngCore`, so tests can hand in
//! any other source (a mock, a counter) without touching engine state.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG owned by a single engine call.
pub struct SimRng {
    pub name: &'static str,
    seed:     u64,
    inner:    Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "unnamed",
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
