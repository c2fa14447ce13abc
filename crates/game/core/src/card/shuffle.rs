//! Unbiased in-place shuffling.

use crate::env::{RngOracle, RngState};

/// Fisher–Yates shuffle driven by the session RNG cursor.
///
/// Indices are drawn with [`RngState::uniform_below`], which rejects the
/// values that would otherwise skew `next_u32 % bound`, so every permutation
/// of `items` is equally likely. Slices of length 0 or 1 are left untouched
/// and consume no randomness.
pub fn shuffle<T, R>(items: &mut [T], rng: &R, state: &mut RngState)
where
    R: RngOracle + ?Sized,
{
    if items.len() <= 1 {
        return;
    }
    for i in (1..items.len()).rev() {
        let j = state.uniform_below(rng, (i + 1) as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..32).collect();
        let mut state = RngState::new(42);
        shuffle(&mut items, &PcgRng, &mut state);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }

    #[test]
    fn short_slices_are_untouched() {
        let mut state = RngState::new(7);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &PcgRng, &mut state);
        let mut one = [9];
        shuffle(&mut one, &PcgRng, &mut state);
        assert_eq!(one, [9]);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn same_seed_same_order_different_seed_differs() {
        let run = |seed| {
            let mut items: Vec<u32> = (0..20).collect();
            shuffle(&mut items, &PcgRng, &mut RngState::new(seed));
            items
        };
        assert_eq!(run(1), run(1));
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn every_permutation_of_three_appears() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &PcgRng, &mut RngState::new(seed));
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }
}
