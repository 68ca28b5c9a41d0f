use rand::prelude::*;

use crate::{
    config::{
        DEFAULT_MAX_LEVEL,
        PROBABILITY,
    },
    errs::ConfigError,
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate a random tower height for a new node in the range
    /// `[1, total]`.
    ///
    /// This must never return a height that is `> self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed heights.
///
/// The probability of generating height `n` is `p` times the probability of
/// generating height `n-1`, with the probability truncated at the maximum
/// number of levels allowed.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level. The generator is seeded from OS entropy.
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be at least 1.
    pub fn new(total: usize, p: f64) -> Result<Self, ConfigError> {
        Self::with_rng(total, p, SmallRng::from_entropy())
    }

    /// Like [`GeometricalLevelGenerator::new`], but every draw is determined
    /// by `seed`.
    pub fn seeded(total: usize, p: f64, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(total: usize, p: f64, rng: SmallRng) -> Result<Self, ConfigError> {
        if total == 0 {
            return Err(ConfigError::MaxLevelTooSmall(total));
        }
        if p <= 0.0 || p >= 1.0 || p.is_nan() {
            return Err(ConfigError::ProbabilityOutOfRange(p));
        }
        Ok(GeometricalLevelGenerator { total, p, rng })
    }
}

impl Default for GeometricalLevelGenerator {
    /// [`DEFAULT_MAX_LEVEL`] levels with `p = 0.25`, seeded from OS entropy.
    fn default() -> Self {
        GeometricalLevelGenerator {
            total: DEFAULT_MAX_LEVEL,
            p: PROBABILITY,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 1;
        while h < self.total && self.rng.gen::<f64>() < self.p {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GeometricalLevelGenerator,
        LevelGenerator,
    };
    use crate::errs::ConfigError;

    #[test]
    fn invalid_total() {
        assert_eq!(
            GeometricalLevelGenerator::new(0, 0.5).unwrap_err(),
            ConfigError::MaxLevelTooSmall(0)
        );
    }

    #[test]
    fn invalid_p_0() {
        assert!(GeometricalLevelGenerator::new(1, 0.0).is_err());
    }

    #[test]
    fn invalid_p_1() {
        assert!(GeometricalLevelGenerator::new(1, 1.0).is_err());
    }

    #[test]
    fn new() {
        let generator = GeometricalLevelGenerator::new(1, 0.5).unwrap();
        assert_eq!(generator.total(), 1);
    }

    #[test]
    fn default_matches_config() {
        let generator = GeometricalLevelGenerator::default();
        assert_eq!(generator.total(), crate::config::DEFAULT_MAX_LEVEL);
    }

    #[test]
    fn single_level_always_one() {
        let mut generator = GeometricalLevelGenerator::seeded(1, 0.99, 3).unwrap();
        for _ in 0..1_000 {
            assert_eq!(generator.random(), 1);
        }
    }

    #[test]
    fn heights_stay_in_range() {
        let mut generator = GeometricalLevelGenerator::seeded(4, 0.9, 11).unwrap();
        let mut saw_cap = false;
        for _ in 0..10_000 {
            let h = generator.random();
            assert!((1..=4).contains(&h), "height {} out of range", h);
            saw_cap |= h == 4;
        }
        assert!(saw_cap, "a high p must reach the cap");
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = GeometricalLevelGenerator::seeded(16, 0.25, 42).unwrap();
        let mut b = GeometricalLevelGenerator::seeded(16, 0.25, 42).unwrap();
        let xs: Vec<usize> = (0..256).map(|_| a.random()).collect();
        let ys: Vec<usize> = (0..256).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn quarter_probability_is_geometric() {
        let mut generator = GeometricalLevelGenerator::seeded(32, 0.25, 1234).unwrap();
        const DRAWS: usize = 100_000;
        let ones = (0..DRAWS).filter(|_| generator.random() == 1).count();
        // P(h = 1) = 1 - p = 0.75
        let ratio = ones as f64 / DRAWS as f64;
        assert!((ratio - 0.75).abs() < 0.02, "ratio was {}", ratio);
    }
}
