use std::iter::FusedIterator;

use super::{
    arena::NodeArena,
    skipnode::NodeId,
};

/// An iterator over the pairs of a [`SkipList`] in ascending key order.
///
/// Created by [`SkipList::iter`]. It walks the level 0 chain, so it holds a
/// shared borrow of the list and the list cannot change underneath it.
///
/// [`SkipList`]: super::SkipList
/// [`SkipList::iter`]: super::SkipList::iter
#[derive(Debug)]
pub struct Iter<'a, V> {
    arena: &'a NodeArena<V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(arena: &'a NodeArena<V>, first: Option<NodeId>, len: usize) -> Self {
        Iter {
            arena,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let node = &arena[self.next?];
        self.next = node.forward[0];
        self.remaining -= 1;
        Some((node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the keys of a [`SkipList`], in ascending order.
///
/// [`SkipList`]: super::SkipList
#[derive(Debug)]
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Keys { inner }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of a [`SkipList`], ordered by their keys.
///
/// [`SkipList`]: super::SkipList
#[derive(Debug)]
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(inner: Iter<'a, V>) -> Self {
        Values { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

/// An owning iterator over the pairs of a [`SkipList`] in ascending key
/// order.
///
/// [`SkipList`]: super::SkipList
#[derive(Debug)]
pub struct IntoIter<V> {
    arena: NodeArena<V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(arena: NodeArena<V>, first: Option<NodeId>, len: usize) -> Self {
        IntoIter {
            arena,
            next: first,
            remaining: len,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (u64, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.free(self.next?)?;
        self.next = node.forward[0];
        self.remaining -= 1;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}
