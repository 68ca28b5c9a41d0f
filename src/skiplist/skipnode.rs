/// A stable handle to a node slot in the [`NodeArena`].
///
/// [`NodeArena`]: super::arena::NodeArena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// Where a forward link lives: in the header's tower or in a node's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(NodeId),
}

/// One key-value pair and its tower of forward links.
///
/// `forward[i]` is the next node in key order whose tower is taller than `i`.
/// The tower height is fixed when the node is created, so the slice never
/// grows.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<V> {
    pub(crate) key: u64,
    pub(crate) value: V,
    pub(crate) forward: Box<[Option<NodeId>]>,
}

impl<V> SkipNode<V> {
    pub(crate) fn new(key: u64, value: V, height: usize) -> Self {
        SkipNode {
            key,
            value,
            forward: vec![None; height].into_boxed_slice(),
        }
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }
}

#[cfg(test)]
mod tests {
    use super::SkipNode;

    #[test]
    fn test_new_node_is_unlinked() {
        let node = SkipNode::new(9, "nine", 3);
        assert_eq!(node.height(), 3);
        assert!(node.forward.iter().all(Option::is_none));
    }
}
