//! An ordered, in-memory map from `u64` keys to arbitrary values, built on a
//! [`skip list`].
//!
//! ```
//! use cesium_skiplist::SkipList;
//!
//! let mut list = SkipList::new(8)?;
//! list.insert(9, 723.9);
//! list.insert(1, 2.2);
//! assert_eq!(list.search(1), Some(&2.2));
//! assert_eq!(list.keys().collect::<Vec<_>>(), vec![1, 9]);
//! # Ok::<(), cesium_skiplist::SkipListError>(())
//! ```
//!
//! [`skip list`]: https://en.wikipedia.org/wiki/Skip_list

/// Construction parameters and defaults.
pub mod config;
pub mod errs;
/// The skip list itself, its iterators, and tower height generation.
pub mod skiplist;

pub use crate::{
    config::SkipListConfig,
    errs::{
        ConfigError,
        SkipListError,
    },
    skiplist::SkipList,
};
