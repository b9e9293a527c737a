//! Weighted coin flips

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A percentage chance in `1..=100`.
///
/// `test` returns true with approximately the stored frequency. The RNG is
/// supplied by the caller so a whole game can share one seeded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(u8);

impl Percentage {
    /// Panics if `percentage` is outside `1..=100`.
    pub fn new(percentage: u8) -> Self {
        assert!(
            percentage > 0 && percentage <= 100,
            "percentage must be in 1..=100, got {percentage}"
        );
        Self(percentage)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn test<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random_range(0..100) < i32::from(self.0)
    }

    /// One-off test with `adjust` added to the stored chance, capped at 100.
    /// The stored value is not changed.
    pub fn test_adjusted<R: Rng + ?Sized>(&self, rng: &mut R, adjust: i32) -> bool {
        let percentage = (i32::from(self.0) + adjust).min(100);
        rng.random_range(0..100) < percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_frequency_matches_percentage() {
        let mut rng = Pcg32::seed_from_u64(37);
        let pct = Percentage::new(37);
        let n = 100_000;
        let hits = (0..n).filter(|_| pct.test(&mut rng)).count();
        let ratio = hits as f64 / n as f64;
        assert!((ratio - 0.37).abs() < 0.01, "ratio was {ratio}");
    }

    #[test]
    fn test_hundred_always_hits() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pct = Percentage::new(100);
        assert!((0..1000).all(|_| pct.test(&mut rng)));
    }

    #[test]
    #[should_panic]
    fn test_zero_rejected() {
        let _ = Percentage::new(0);
    }

    #[test]
    #[should_panic]
    fn test_over_hundred_rejected() {
        let _ = Percentage::new(101);
    }

    proptest! {
        #[test]
        fn adjustment_past_hundred_always_hits(base in 1u8..=100, adjust in 100i32..1000, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pct = Percentage::new(base);
            prop_assert!(pct.test_adjusted(&mut rng, adjust));
            prop_assert_eq!(pct.value(), base);
        }

        #[test]
        fn large_negative_adjustment_never_hits(base in 1u8..=100, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pct = Percentage::new(base);
            prop_assert!(!pct.test_adjusted(&mut rng, -100));
        }
    }
}
