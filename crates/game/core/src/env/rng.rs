//! RNG oracle and the session's deterministic random stream.
//!
//! All randomness in a session (deck shuffles) flows through [`RngState`],
//! which derives a fresh seed for every draw from the session seed and a
//! monotonically increasing cursor. Persisting `(seed, cursor)` is enough to
//! resume the exact same stream after a restore.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same value given
/// the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
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

/// Compute a deterministic seed from session components.
///
/// * `session_seed` - Base seed fixed when the session is created
/// * `nonce` - Draw sequence number
/// * `stream` - Independent stream id (e.g. one per side)
/// * `context` - Extra discriminator for several draws at one nonce
pub fn compute_seed(session_seed: u64, nonce: u64, stream: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Position in the session's random stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    seed: u64,
    cursor: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, cursor: 0 }
    }

    pub fn with_cursor(seed: u64, cursor: u64) -> Self {
        Self { seed, cursor }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Draws the next raw value and advances the cursor.
    pub fn next_u32<R: RngOracle + ?Sized>(&mut self, rng: &R) -> u32 {
        let value = rng.next_u32(compute_seed(self.seed, self.cursor, 0, 0));
        self.cursor += 1;
        value
    }

    /// Uniform value in `0..bound` without modulo bias.
    ///
    /// Raw values at or above the largest multiple of `bound` that fits in
    /// `2^32` are rejected and redrawn. A `bound` of 0 or 1 returns 0 without
    /// drawing.
    pub fn uniform_below<R: RngOracle + ?Sized>(&mut self, rng: &R, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        const SPAN: u64 = 1 << 32;
        let bound = u64::from(bound);
        let limit = SPAN - SPAN % bound;
        loop {
            let value = u64::from(self.next_u32(rng));
            if value < limit {
                return (value % bound) as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ignores the seed and hands out a fixed list of raw values in order.
    struct ByCursor(std::sync::Mutex<Vec<u32>>);

    impl RngOracle for ByCursor {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(12345), rng.next_u32(12345));
        assert_ne!(rng.next_u32(1), rng.next_u32(2));
    }

    #[test]
    fn cursor_advances_per_draw() {
        let mut state = RngState::new(9);
        let a = state.next_u32(&PcgRng);
        let b = state.next_u32(&PcgRng);
        assert_eq!(state.cursor(), 2);
        assert_ne!(a, b);

        let mut replay = RngState::with_cursor(9, 1);
        assert_eq!(replay.next_u32(&PcgRng), b);
    }

    #[test]
    fn uniform_below_rejects_biased_tail() {
        // bound 3: limit = 2^32 - (2^32 % 3) = 4294967295, so u32::MAX is rejected.
        let rng = ByCursor(std::sync::Mutex::new(vec![u32::MAX, 7]));
        let mut state = RngState::new(0);
        assert_eq!(state.uniform_below(&rng, 3), 7 % 3);
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn uniform_below_stays_in_range() {
        let mut state = RngState::new(77);
        for bound in 1..50 {
            assert!(state.uniform_below(&PcgRng, bound) < bound);
        }
    }
}
