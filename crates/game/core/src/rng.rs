//! RNG oracle for deterministic random number generation.
//!
//! Randomness is consumed exactly once, at setup: dealing characters and
//! drawing the turn order. Both are Fisher–Yates shuffles driven by an
//! [`RngOracle`] and a game seed, so a fixed seed reproduces a game exactly.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. Tests rely on this
//! to inject a known deal.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. One step per call: the caller supplies a fresh seed for
/// every draw via [`compute_seed`].
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Oracle that leaves every shuffle in input order.
///
/// Dealing with it seats the characters in the order they were supplied and
/// keeps the turn order equal to the player list. Meant for scripted games
/// and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrder;

impl RngOracle for FixedOrder {
    fn next_u32(&self, _seed: u64) -> u32 {
        u32::MAX
    }

    fn range(&self, _seed: u64, min: u32, max: u32) -> u32 {
        max.max(min)
    }
}

/// Independent random streams drawn at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    /// Dealing characters to players.
    Deal = 0,
    /// Drawing the turn order.
    TurnOrder = 1,
}

/// Compute a deterministic seed for one draw.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Draw sequence number within the stream
/// * `stream` - Which independent stream the draw belongs to
/// * `context` - Additional context for multiple draws at the same nonce
pub fn compute_seed(game_seed: u64, nonce: u64, stream: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners followed by a murmur3 avalanche.
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Shuffles `items` in place with Fisher–Yates, drawing from `stream`.
///
/// Every permutation is reachable; with a well-mixed oracle each is (close
/// to) equally likely.
pub fn shuffle<T, R>(rng: &R, game_seed: u64, stream: Stream, items: &mut [T])
where
    R: RngOracle + ?Sized,
{
    for i in (1..items.len()).rev() {
        let seed = compute_seed(game_seed, i as u64, stream as u32, 0);
        let j = rng.range(seed, 0, i as u32) as usize;
        items.swap(i, j);
    }
}
