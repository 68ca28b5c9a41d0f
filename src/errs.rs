// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max level must be at least 1, got {0}")]
    MaxLevelTooSmall(usize),
    #[error("level probability must be in (0, 1), got {0}")]
    ProbabilityOutOfRange(f64),
}
