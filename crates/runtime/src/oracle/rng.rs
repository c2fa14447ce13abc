//! `rand`-backed RNG oracle.

use battle_core::RngOracle;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Seeds a fresh [`StdRng`] for every draw.
///
/// Deterministic for a given seed on a given `rand` version, which is all the
/// session stream needs. Use [`battle_core::PcgRng`] when values must stay
/// stable across dependency upgrades.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdRngOracle;

impl RngOracle for StdRngOracle {
    fn next_u32(&self, seed: u64) -> u32 {
        StdRng::seed_from_u64(seed).next_u32()
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{RngState, shuffle};

    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = StdRngOracle;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(1), rng.next_u32(2));
    }

    #[test]
    fn drives_the_core_shuffle() {
        let mut items: Vec<u32> = (0..16).collect();
        let mut state = RngState::new(7);
        shuffle(&mut items, &StdRngOracle, &mut state);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
        assert!(state.cursor() > 0);
    }
}
