//! A skiplist keyed by `u64` which allows faster lookups than a standard
//! linked list, without the rebalancing work of a balanced tree.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`). This list uses `p = 0.25`.
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented.
//!
//! Nodes are stored in an arena and link to each other through stable
//! handles, so the whole structure is safe code. A removed node's slot is
//! freed as soon as it has been unlinked from every level.

mod arena;
mod iter;
mod level_generator;
mod skipnode;
#[cfg(test)]
mod test;

use std::{
    fmt,
    mem,
};

use tracing::{
    debug,
    instrument,
    trace,
};

pub use self::{
    iter::{
        IntoIter,
        Iter,
        Keys,
        Values,
    },
    level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    },
};
use self::{
    arena::NodeArena,
    skipnode::{
        NodeId,
        Position,
        SkipNode,
    },
};
use crate::{
    config::{
        SkipListConfig,
        PROBABILITY,
    },
    errs::{
        ConfigError,
        SkipListError,
    },
};

/// An ordered map from `u64` keys to values of type `V`.
///
/// Operations cost `O(log n)` expected time. Tower heights are drawn from
/// `G`, a [`GeometricalLevelGenerator`] with `p = 0.25` unless another
/// generator is supplied with [`SkipList::with_generator`].
///
/// The list does no internal locking. It can be moved between threads, but
/// concurrent mutation needs external synchronization.
///
/// # Example
///
/// ```
/// use cesium_skiplist::SkipList;
///
/// let mut list = SkipList::new(8).unwrap();
/// list.insert(3, "three");
/// list.insert(1, "one");
///
/// assert_eq!(list.search(3), Some(&"three"));
/// assert_eq!(list.values().copied().collect::<Vec<_>>(), vec!["one", "three"]);
/// assert!(list.delete(1));
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Clone)]
pub struct SkipList<V, G = GeometricalLevelGenerator> {
    /// The header's tower, sized to `max_level`. `head[i]` is the first node
    /// on level `i`.
    head: Box<[Option<NodeId>]>,
    arena: NodeArena<V>,
    generator: G,
    /// Predecessor scratch for insert and remove, sized to `max_level` so
    /// neither allocates.
    update: Box<[Position]>,
    /// The number of levels in use. Zero iff the list is empty.
    level: usize,
    len: usize,
}

impl<V> SkipList<V> {
    /// Creates an empty list whose towers are at most `max_level` high.
    ///
    /// Fails with [`SkipListError::InvalidConfiguration`] if `max_level` is
    /// zero.
    pub fn new(max_level: usize) -> Result<Self, SkipListError> {
        Self::with_config(SkipListConfig::new(max_level))
    }

    /// Creates an empty list from a [`SkipListConfig`]. A seeded config
    /// produces the same tower heights for the same insertion sequence.
    pub fn with_config(config: SkipListConfig) -> Result<Self, SkipListError> {
        config.validate()?;
        let max_level = config.max_level();
        let generator = match config.seed() {
            | Some(seed) => GeometricalLevelGenerator::seeded(max_level, PROBABILITY, seed)?,
            | None => GeometricalLevelGenerator::new(max_level, PROBABILITY)?,
        };
        Ok(Self::from_generator(generator))
    }
}

impl<V> Default for SkipList<V> {
    fn default() -> Self {
        Self::from_generator(GeometricalLevelGenerator::default())
    }
}

impl<V, G: LevelGenerator> SkipList<V, G> {
    /// Creates an empty list that draws tower heights from `generator`. The
    /// list's maximum level is `generator.total()`.
    pub fn with_generator(generator: G) -> Result<Self, SkipListError> {
        if generator.total() < 1 {
            return Err(ConfigError::MaxLevelTooSmall(generator.total()).into());
        }
        Ok(Self::from_generator(generator))
    }

    fn from_generator(generator: G) -> Self {
        let max_level = generator.total();
        debug!(max_level, "creating skiplist");
        SkipList {
            head: vec![None; max_level].into_boxed_slice(),
            arena: NodeArena::new(),
            generator,
            update: vec![Position::Head; max_level].into_boxed_slice(),
            level: 0,
            len: 0,
        }
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key is already present its value is replaced in place and the
    /// previous value is returned. Otherwise a new node is linked in and
    /// `None` is returned.
    #[instrument(level = "trace", skip_all, fields(key = key))]
    pub fn insert(&mut self, key: u64, value: V) -> Option<V> {
        if let Some(id) = self.find_predecessors(key) {
            return Some(mem::replace(&mut self.arena[id].value, value));
        }

        let height = self.generator.random().clamp(1, self.max_level());
        if height > self.level {
            // nothing lives on the new levels yet, so the header precedes
            // the new node on each of them
            self.update[self.level..height].fill(Position::Head);
            trace!(from = self.level, to = height, "raising skiplist level");
            self.level = height;
        }

        let id = self.arena.alloc(SkipNode::new(key, value, height));
        for i in 0..height {
            let prev = self.update[i];
            let next = self.next_at(prev, i);
            self.arena[id].forward[i] = next;
            self.set_next_at(prev, i, Some(id));
        }
        self.len += 1;

        None
    }

    /// Removes `key` and reports whether it was present. Deleting from an
    /// empty list, or deleting an absent key, changes nothing.
    pub fn delete(&mut self, key: u64) -> bool {
        self.remove(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    #[instrument(level = "trace", skip_all, fields(key = key))]
    pub fn remove(&mut self, key: u64) -> Option<V> {
        if self.len == 0 {
            return None;
        }

        let id = self.find_predecessors(key)?;

        for i in 0..self.level {
            let prev = self.update[i];
            // a node missing from level i is missing from every level above
            if self.next_at(prev, i) != Some(id) {
                break;
            }
            let next = self.arena[id].forward[i];
            self.set_next_at(prev, i, next);
        }

        let old_level = self.level;
        while self.level > 0 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }
        if self.level != old_level {
            trace!(from = old_level, to = self.level, "lowering skiplist level");
        }
        self.len -= 1;

        self.arena.free(id).map(|node| node.value)
    }

    /// Removes and returns the pair with the smallest key.
    pub fn pop_first(&mut self) -> Option<(u64, V)> {
        let key = self.head[0].map(|id| self.arena[id].key)?;
        self.remove(key).map(|value| (key, value))
    }

    /// Returns a mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.arena[id].value)
    }

    /// Drops every pair. The level generator keeps its state.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head.iter_mut().for_each(|link| *link = None);
        self.level = 0;
        self.len = 0;
    }

    /// Walks from the top level down towards `key`, recording the last
    /// position before `key` on each level in use into `self.update`.
    /// Returns the node holding `key`, if there is one.
    fn find_predecessors(&mut self, key: u64) -> Option<NodeId> {
        let mut current = Position::Head;

        for i in (0..self.level).rev() {
            current = self.advance(current, i, key);
            self.update[i] = current;
        }

        self.match_after(current, key)
    }

    fn set_next_at(&mut self, at: Position, level: usize, next: Option<NodeId>) {
        match at {
            | Position::Head => self.head[level] = next,
            | Position::Node(id) => self.arena[id].forward[level] = next,
        }
    }
}

impl<V, G> SkipList<V, G> {
    /// Looks up the value stored under `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        self.find(key).map(|id| &self.arena[id].value)
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.find(key).is_some()
    }

    /// The pair with the smallest key, in `O(1)`.
    pub fn first(&self) -> Option<(u64, &V)> {
        self.head[0].map(|id| {
            let node = &self.arena[id];
            (node.key, &node.value)
        })
    }

    /// The pair with the largest key, in `O(log n)` expected time.
    pub fn last(&self) -> Option<(u64, &V)> {
        let mut current = Position::Head;
        for i in (0..self.level).rev() {
            while let Some(next) = self.next_at(current, i) {
                current = Position::Node(next);
            }
        }
        match current {
            | Position::Head => None,
            | Position::Node(id) => {
                let node = &self.arena[id];
                Some((node.key, &node.value))
            },
        }
    }

    /// The number of pairs in the list, in `O(1)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels currently in use: `0` for an empty list, and
    /// otherwise the height of the tallest tower, at most
    /// [`SkipList::max_level`].
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The upper bound on tower height, fixed at construction.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// Counts the pairs by walking level 0. This is `O(n)`; use
    /// [`SkipList::len`] unless the counter itself is under test.
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut next = self.head[0];
        while let Some(id) = next {
            count += 1;
            next = self.arena[id].forward[0];
        }
        count
    }

    /// Iterates over the pairs in ascending key order. Each call starts a
    /// fresh pass from the smallest key.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.arena, self.head[0], self.len)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Iterates over the values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    fn find(&self, key: u64) -> Option<NodeId> {
        let mut current = Position::Head;
        for i in (0..self.level).rev() {
            current = self.advance(current, i, key);
        }
        self.match_after(current, key)
    }

    /// Moves right along `level` from `from` while the next key is below
    /// `key`, returning where it stopped.
    #[inline]
    fn advance(&self, from: Position, level: usize, key: u64) -> Position {
        let mut current = from;
        while let Some(next) = self.next_at(current, level) {
            if self.arena[next].key >= key {
                break;
            }
            current = Position::Node(next);
        }
        current
    }

    #[inline]
    fn match_after(&self, at: Position, key: u64) -> Option<NodeId> {
        self.next_at(at, 0)
            .filter(|&candidate| self.arena[candidate].key == key)
    }

    #[inline]
    fn next_at(&self, at: Position, level: usize) -> Option<NodeId> {
        match at {
            | Position::Head => self.head[level],
            | Position::Node(id) => self.arena[id].forward[level],
        }
    }
}

impl<V: fmt::Debug, G> fmt::Debug for SkipList<V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, G> IntoIterator for SkipList<V, G> {
    type IntoIter = IntoIter<V>;
    type Item = (u64, V);

    fn into_iter(self) -> IntoIter<V> {
        IntoIter::new(self.arena, self.head[0], self.len)
    }
}

impl<'a, V, G> IntoIterator for &'a SkipList<V, G> {
    type IntoIter = Iter<'a, V>;
    type Item = (u64, &'a V);

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V, G: LevelGenerator> Extend<(u64, V)> for SkipList<V, G> {
    fn extend<I: IntoIterator<Item = (u64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> FromIterator<(u64, V)> for SkipList<V> {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}
