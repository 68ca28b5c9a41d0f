// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::ConfigError;

/// The tower height cap used by [`SkipList::default`].
///
/// [`SkipList::default`]: crate::SkipList
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// The chance that a node reaching level `n` also reaches level `n + 1`.
pub const PROBABILITY: f64 = 0.25;

/// Construction parameters for a [`SkipList`].
///
/// [`SkipList`]: crate::SkipList
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SkipListConfig {
    /// Upper bound on the height of any node's tower.
    max_level: usize,
    /// Seed for the level generator. `None` seeds from OS entropy.
    seed: Option<u64>,
}

impl SkipListConfig {
    pub fn new(max_level: usize) -> Self {
        SkipListConfig {
            max_level,
            seed: None,
        }
    }

    /// Fix the level generator's seed so tower heights are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level < 1 {
            return Err(ConfigError::MaxLevelTooSmall(self.max_level));
        }
        Ok(())
    }
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig::new(DEFAULT_MAX_LEVEL)
    }
}
