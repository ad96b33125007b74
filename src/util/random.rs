use rand::{Rng, RngCore, SeedableRng};
use rand_core::{impls, Error};
use rand_isaac::isaac64::Isaac64Rng;
use serde::{Deserialize, Serialize};

/// A seedable random number generator that can be serialized for consistent random number
/// generation. For more info on Rust RNGs, refer to
/// <https://rust-random.github.io/book/guide-rngs.html>
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    inner: Isaac64Rng,
}

impl GameRng {
    pub fn new_from_u64_seed(seed: u64) -> Self {
        Self {
            inner: Isaac64Rng::seed_from_u64(seed),
        }
    }

    /// Use the given seed or draw a fresh one. The seed in use is returned to make runs
    /// reproducible.
    pub fn seeded_or_random(seed: Option<u64>) -> (Self, u64) {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
        info!("using rng seed: {}", seed);
        (Self::new_from_u64_seed(seed), seed)
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Game specific methods for random number generators.
pub trait RngExtended {
    /// Return true or false with 50/50 chance of being true
    fn coinflip(&mut self) -> bool;

    fn flip_with_prob(&mut self, probability: f64) -> bool;

    /// Uniformly distributed value in `[low, high)`.
    fn uniform(&mut self, low: f32, high: f32) -> f32;
}

impl RngExtended for GameRng {
    fn coinflip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn flip_with_prob(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.gen_range(low..high)
    }
}
