use rand::{Rng, rng};

use crate::{CryptoRandSource, RandSource};

/// Draws from the thread-local `rand::rng()`.
///
/// ChaCha-based and periodically reseeded from the OS, so it backs the crypto
/// tier. The type is a zero-sized handle: each call reaches the calling
/// thread's RNG, so it is `Send + Sync` even though the RNG itself is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> u32 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

impl CryptoRandSource<u32> for ThreadRandom {}
impl CryptoRandSource<u64> for ThreadRandom {}
impl CryptoRandSource<u128> for ThreadRandom {}
