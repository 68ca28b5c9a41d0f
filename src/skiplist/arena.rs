use std::ops::{
    Index,
    IndexMut,
};

use super::skipnode::{
    NodeId,
    SkipNode,
};

/// Slot storage for skiplist nodes.
///
/// Links between nodes are [`NodeId`] handles into this arena instead of
/// pointers, so the list owns every node through one `Vec`. Freed slots are
/// recycled by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Option<SkipNode<V>>>,
    free_list: Vec<NodeId>,
}

impl<V> NodeArena<V> {
    pub(crate) fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: SkipNode<V>) -> NodeId {
        match self.free_list.pop() {
            | Some(id) => {
                self.slots[id.0] = Some(node);
                id
            },
            | None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Some(node));
                id
            },
        }
    }

    /// Release a slot, handing back the node it held. Returns `None` if the
    /// slot was already vacant.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<SkipNode<V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id);
        Some(node)
    }

    /// The number of occupied slots.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    #[cfg(test)]
    pub(crate) fn slots_len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

impl<V> Index<NodeId> for NodeArena<V> {
    type Output = SkipNode<V>;

    #[inline]
    fn index(&self, id: NodeId) -> &SkipNode<V> {
        match self.slots.get(id.0) {
            | Some(Some(node)) => node,
            | _ => panic!("dangling node id {}", id.0),
        }
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut SkipNode<V> {
        match self.slots.get_mut(id.0) {
            | Some(Some(node)) => node,
            | _ => panic!("dangling node id {}", id.0),
        }
    }
}
