//! Index-addressed storage for graph nodes.
//!
//! Nodes refer to each other by [`NodeId`], so sharing a node between several
//! parents after minimization needs no reference counting and cannot form
//! ownership cycles.

use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId};

/// A growable arena of nodes. Ids stay valid for the arena's lifetime.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores `node` and returns its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes allocated in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Consumes the arena, returning nodes in id order.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Iterates over every allocated node with its id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_are_dense_and_stable() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new('a', 3));
        let b = arena.alloc(Node::new('b', 3));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        arena[a].set_child(2, b);
        assert_eq!(arena[a].child(2), Some(b));
        assert_eq!(arena[b].symbol(), 'b');
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.iter().map(|(id, _)| id).collect::<Vec<_>>(), [a, b]);
    }
}
