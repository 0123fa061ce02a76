use hashbrown::HashSet;

use super::alphabet::Alphabet;
use super::builder::Trie;
use super::codec;
use super::error::Result;
use super::node::{NodeId, NodeRef};
use super::node_arena::NodeArena;
use super::query::WordSet;

/// An immutable, minimized word graph.
///
/// Produced by [`Trie::minimize`]. Nodes may be shared by several parents, so
/// nothing here can be mutated; changing a shared node would change the words
/// accepted through every one of its parents. The graph is `Send + Sync` and
/// can be queried from many threads at once.
///
/// # Examples
///
/// ```
/// use arraydawg::dawg::{build_dawg, Alphabet, Dawg, WordSet};
///
/// let alphabet: Alphabet = "acrst".parse().unwrap();
/// let dawg = build_dawg(alphabet.clone(), ["cat", "cats", "car"]).unwrap();
///
/// let encoded = dawg.serialize();
/// let reloaded = Dawg::deserialize(alphabet, &encoded).unwrap();
/// assert_eq!(reloaded.size(), 3);
/// assert!(reloaded.contains("cats").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Dawg {
    alphabet: Alphabet,
    arena: NodeArena,
    root: NodeId,
    words: usize,
}

impl Dawg {
    pub(crate) fn from_parts(alphabet: Alphabet, arena: NodeArena, root: NodeId, words: usize) -> Self {
        Dawg {
            alphabet,
            arena,
            root,
            words,
        }
    }

    /// Decodes a serialized graph over `alphabet` and minimizes it.
    ///
    /// # Errors
    ///
    /// Fails with [`DawgError::MalformedSequence`](super::DawgError::MalformedSequence)
    /// if `sequence` is not a valid encoding, and with the errors of
    /// [`Trie::from_subtrie`] if it was encoded for another alphabet.
    pub fn deserialize(alphabet: Alphabet, sequence: &[char]) -> Result<Dawg> {
        let subtrie = codec::deserialize(sequence, alphabet.len())?;
        Ok(Trie::from_subtrie(alphabet, subtrie)?.minimize())
    }

    /// Number of distinct end-of-word nodes reachable from the root.
    ///
    /// Smaller than [`size`](WordSet::size) whenever words share their final node.
    pub fn terminal_count(&self) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        let mut terminals = 0;
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = &self.arena[id];
            terminals += usize::from(node.is_word());
            stack.extend(node.children().map(|(_, child)| child));
        }
        terminals
    }
}

impl WordSet for Dawg {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.arena, self.root)
    }

    /// Word count computed during minimization by summing, per representative,
    /// its own flag and its children's counts.
    fn size(&self) -> usize {
        self.words
    }

    fn node_count(&self) -> usize {
        self.arena.len()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::dawg::{build_dawg, DawgError};

    fn alphabet() -> Alphabet {
        "acrst".parse().unwrap()
    }

    #[test]
    fn queries_match_the_trie() {
        let words = ["cat", "cats", "car"];
        let mut trie = Trie::new(alphabet());
        trie.insert_all(words).unwrap();
        let trie_nodes = trie.node_count();
        let reference = trie.duplicate();
        let dawg = trie.minimize();

        for probe in ["", "c", "ca", "cat", "cats", "car", "cars", "ta", "s", "catss"] {
            assert_eq!(dawg.contains(probe), reference.contains(probe), "{probe}");
            assert_eq!(dawg.is_prefix(probe), reference.is_prefix(probe), "{probe}");
        }
        assert_eq!(dawg.size(), 3);
        assert!(dawg.node_count() <= trie_nodes);
    }

    #[test]
    fn unknown_symbols_fail() {
        let dawg = build_dawg(alphabet(), ["cat"]).unwrap();
        assert_eq!(
            dawg.contains("cab"),
            Err(DawgError::UnknownSymbol { symbol: 'b' })
        );
    }

    #[test]
    fn terminal_count_counts_shared_nodes_once() {
        let dawg = build_dawg(alphabet(), ["cat", "rat", "sat"]).unwrap();
        assert_eq!(dawg.size(), 3);
        assert_eq!(dawg.terminal_count(), 1);
        assert_eq!(dawg.words().collect::<Vec<_>>(), ["cat", "rat", "sat"]);
    }

    #[test]
    fn dawg_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dawg>();
    }

    #[test]
    fn concurrent_readers() {
        let dawg = Arc::new(build_dawg(alphabet(), ["cat", "cats", "car", "rat", "sat"]).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dawg = Arc::clone(&dawg);
                thread::spawn(move || {
                    (0..100).all(|_| {
                        dawg.contains("cats").unwrap()
                            && dawg.is_prefix("ra").unwrap()
                            && !dawg.contains("ca").unwrap()
                    })
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn deserialize_rejects_foreign_alphabet() {
        let dawg = build_dawg(alphabet(), ["cat"]).unwrap();
        let encoded = dawg.serialize();
        let wider: Alphabet = "acrstx".parse().unwrap();
        assert_eq!(
            Dawg::deserialize(wider, &encoded).unwrap_err(),
            DawgError::WidthMismatch {
                expected: 6,
                found: 5
            }
        );
        let shuffled: Alphabet = "carst".parse().unwrap();
        assert!(matches!(
            Dawg::deserialize(shuffled, &encoded),
            Err(DawgError::SymbolMismatch { .. })
        ));
    }
}
