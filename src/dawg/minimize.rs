//! Bottom-up collapse of a trie into a DAWG.
//!
//! Nodes are visited in post-order, so by the time a node is looked at all of
//! its children already point at their canonical representatives. Two nodes are
//! then equivalent exactly when their symbol, end-of-word flag and child ids
//! match, which [`Node`]'s `Eq`/`Hash` compare in O(branching factor).

use std::hash::BuildHasher;

use hashbrown::{DefaultHashBuilder, HashTable};

use super::node::{Node, NodeId};
use super::node_arena::NodeArena;

/// Canonical representatives seen so far in one minimization run.
pub(crate) struct Registry {
    table: HashTable<NodeId>,
    hasher: DefaultHashBuilder,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            table: HashTable::new(),
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Returns the representative equivalent to `node`, storing `node` in
    /// `arena` as a new representative if there is none yet.
    ///
    /// All children of `node` must already be canonical ids in `arena`.
    pub fn canonicalize(&mut self, arena: &mut NodeArena, node: Node) -> (NodeId, bool) {
        let hash = self.hasher.hash_one(&node);
        if let Some(&existing) = self.table.find(hash, |&id| arena[id] == node) {
            tracing::trace!(?existing, symbol = ?node.symbol(), "shared subtrie");
            return (existing, false);
        }
        let id = arena.alloc(node);
        let hasher = &self.hasher;
        self.table
            .insert_unique(hash, id, |&id| hasher.hash_one(&arena[id]));
        (id, true)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}

/// Output of one minimization run.
pub(crate) struct Minimized {
    pub arena: NodeArena,
    pub root: NodeId,
    /// Words accepted from the root, counted per path.
    pub words: usize,
}

/// Minimizes the tree rooted at `root`, consuming its arena.
///
/// Every node of `trie` is either moved into the output as a representative or
/// dropped in favour of an equivalent one already there.
pub(crate) fn minimize(trie: NodeArena, root: NodeId) -> Minimized {
    let mut slots: Vec<Option<Node>> = trie.into_nodes().into_iter().map(Some).collect();
    let mut canonical: Vec<Option<NodeId>> = vec![None; slots.len()];
    let mut out = NodeArena::new();
    // Word count below each representative, indexed like `out`.
    let mut words: Vec<usize> = Vec::new();
    let mut registry = Registry::new();

    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if !expanded {
            stack.push((id, true));
            if let Some(node) = &slots[id.index()] {
                stack.extend(node.children().map(|(_, child)| (child, false)));
            }
            continue;
        }

        // A trie is a tree, so each node is finished exactly once.
        let Some(mut node) = slots[id.index()].take() else {
            continue;
        };
        let mut below = usize::from(node.is_word());
        for index in 0..node.width() {
            if let Some(child) = node.child(index) {
                let rep = canonical[child.index()]
                    .expect("children are canonicalized before their parent");
                node.set_child(index, rep);
                below += words[rep.index()];
            }
        }

        let (rep, fresh) = registry.canonicalize(&mut out, node);
        if fresh {
            words.push(below);
        }
        canonical[id.index()] = Some(rep);
    }

    let root = canonical[root.index()].expect("root is always visited");
    tracing::trace!(representatives = registry.len(), "registry discarded");
    Minimized {
        words: words[root.index()],
        arena: out,
        root,
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::dawg::{Alphabet, Trie, WordSet};

    fn trie(words: &[&str]) -> Trie {
        let mut trie = Trie::new(Alphabet::lowercase_ascii());
        trie.insert_all(words).unwrap();
        trie
    }

    #[test]
    fn registry_reuses_equal_nodes() {
        let mut arena = NodeArena::new();
        let mut registry = Registry::new();
        let mut leaf = Node::new('t', 3);
        leaf.set_word(true);
        let (a, fresh_a) = registry.canonicalize(&mut arena, leaf.clone());
        let (b, fresh_b) = registry.canonicalize(&mut arena, leaf);
        assert!(fresh_a);
        assert!(!fresh_b);
        assert_eq!(a, b);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn shared_suffix_is_merged() {
        let trie = trie(&["cat", "bat"]);
        // root, c, b, a, a, t, t
        assert_eq!(trie.node_count(), 7);
        let dawg = trie.minimize();
        // root, c, b, a, t
        assert_eq!(dawg.node_count(), 5);
        let root = dawg.root();
        let via_c = dawg.find("ca").unwrap().unwrap();
        let via_b = dawg.find("ba").unwrap().unwrap();
        assert!(via_c.same_node(&via_b));
        assert_eq!(root.child_count(), 2);
    }

    #[test]
    fn distinct_tails_stay_apart() {
        let dawg = trie(&["cat", "car"]).minimize();
        assert_eq!(dawg.node_count(), 5);
        assert_eq!(dawg.size(), 2);
    }

    #[test]
    fn repeated_tails_are_shared() {
        let words = ["asuffix", "bsuffix", "cdesuffix", "fffsuffix", "inbetween", "jsuffix"];
        let dawg = trie(&words).minimize();
        let suffix = dawg.find("as").unwrap().unwrap();
        for prefix in ["bs", "cdes", "fffs", "js"] {
            assert!(dawg.find(prefix).unwrap().unwrap().same_node(&suffix));
        }
        for word in words {
            assert!(dawg.contains(word).unwrap(), "{word}");
        }
    }

    #[test]
    fn word_count_follows_paths_not_nodes() {
        let dawg = trie(&["bake", "cake", "fake", "lake", "make"]).minimize();
        assert_eq!(dawg.size(), 5);
        assert_eq!(dawg.terminal_count(), 1);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let words = ["bake", "baked", "cake", "caked", "fake"];
        let expected = trie(&words).minimize();
        for order in words.iter().copied().permutations(words.len()) {
            let dawg = trie(&order).minimize();
            assert_eq!(dawg.node_count(), expected.node_count());
            assert!(dawg.root().structurally_eq(&expected.root()));
        }
    }

    #[test]
    fn minimized_graph_is_structurally_equal_to_trie() {
        let trie = trie(&["cat", "cats", "bat", "bats", "rat"]);
        let copy = trie.duplicate();
        let dawg = trie.minimize();
        assert!(dawg.node_count() < copy.node_count());
        assert!(dawg.root().structurally_eq(&copy.root()));
    }

    #[test]
    fn empty_trie() {
        let dawg = trie(&[]).minimize();
        assert_eq!(dawg.node_count(), 1);
        assert_eq!(dawg.size(), 0);
        assert!(dawg.is_prefix("").unwrap());
    }
}
