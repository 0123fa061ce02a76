use mark_last::MarkLastIterator;

use super::alphabet::Alphabet;
use super::codec::Subtrie;
use super::error::{DawgError, Result};
use super::frozen::Dawg;
use super::minimize;
use super::node::{Node, NodeId, NodeRef};
use super::node_arena::NodeArena;
use super::query::WordSet;
use super::word::{to_indices, IntoWord};

/// Placeholder symbol stored in every root node.
pub(crate) const ROOT_SYMBOL: char = '\0';

/// A mutable trie over a fixed alphabet.
///
/// Every node is owned by exactly one parent. Words can be inserted in any
/// order; once the word list is complete, [`Trie::minimize`] consumes the trie
/// and produces an immutable [`Dawg`] accepting exactly the same words.
///
/// # Examples
///
/// ```
/// use arraydawg::dawg::{Alphabet, Trie, WordSet};
///
/// let mut trie = Trie::new("acrst".parse::<Alphabet>().unwrap());
/// for word in ["cat", "cats", "car"] {
///     trie.insert(word).unwrap();
/// }
/// assert!(trie.contains("cat").unwrap());
/// assert!(!trie.contains("ca").unwrap());
/// assert!(trie.is_prefix("ca").unwrap());
/// assert_eq!(trie.size(), 3);
///
/// let dawg = trie.minimize();
/// assert!(dawg.contains("cats").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Trie {
    alphabet: Alphabet,
    arena: NodeArena,
    root: NodeId,
    words: usize,
}

impl Trie {
    /// Creates an empty trie whose nodes branch over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(ROOT_SYMBOL, alphabet.len()));
        Trie {
            alphabet,
            arena,
            root,
            words: 0,
        }
    }

    /// Inserts a word.
    ///
    /// Returns `Ok(true)` if the word was added and `Ok(false)` if it was already
    /// present.
    ///
    /// # Errors
    ///
    /// Fails with [`DawgError::EmptyWord`] for an empty word and with
    /// [`DawgError::UnknownSymbol`] if any symbol is outside the alphabet. The
    /// whole word is validated first, so a failed insert leaves the trie untouched.
    pub fn insert(&mut self, word: impl IntoWord) -> Result<bool> {
        let indices = to_indices(&self.alphabet, word)?;
        if indices.is_empty() {
            return Err(DawgError::EmptyWord);
        }

        let mut current = self.root;
        let mut added = false;
        for (last, index) in indices.iter().copied().mark_last() {
            current = self.child_or_insert(current, index);
            if last {
                let node = &mut self.arena[current];
                added = !node.is_word();
                node.set_word(true);
            }
        }
        if added {
            self.words += 1;
        }
        Ok(added)
    }

    /// Inserts every word, stopping at the first failure.
    ///
    /// Returns how many of the words were new.
    pub fn insert_all<W: IntoWord>(&mut self, words: impl IntoIterator<Item = W>) -> Result<usize> {
        let mut added = 0;
        for word in words {
            added += usize::from(self.insert(word)?);
        }
        Ok(added)
    }

    fn child_or_insert(&mut self, parent: NodeId, index: usize) -> NodeId {
        if let Some(child) = self.arena[parent].child(index) {
            return child;
        }
        let symbol = self.alphabet.symbols()[index];
        let child = self
            .arena
            .alloc(Node::new(symbol, self.alphabet.len()));
        self.arena[parent].set_child(index, child);
        child
    }

    /// Deep copy sharing no structure with `self`.
    ///
    /// Useful for minimizing a snapshot while continuing to insert into the
    /// original.
    pub fn duplicate(&self) -> Trie {
        self.clone()
    }

    /// Collapses the trie into a DAWG by sharing structurally identical subtries.
    ///
    /// The trie is consumed; the returned graph accepts the same words and
    /// prefixes and has at most as many nodes.
    pub fn minimize(self) -> Dawg {
        let trie_nodes = self.arena.len();
        let minimized = minimize::minimize(self.arena, self.root);
        debug_assert_eq!(minimized.words, self.words);
        tracing::debug!(
            trie_nodes,
            dawg_nodes = minimized.arena.len(),
            words = self.words,
            "minimized trie"
        );
        Dawg::from_parts(self.alphabet, minimized.arena, minimized.root, minimized.words)
    }

    /// Adopts a decoded subtrie as the contents of a trie over `alphabet`.
    ///
    /// # Errors
    ///
    /// Fails with [`DawgError::WidthMismatch`] if the subtrie was decoded for a
    /// different branching factor, and with [`DawgError::SymbolMismatch`] if a
    /// node's symbol differs from the alphabet symbol at its edge index.
    pub fn from_subtrie(alphabet: Alphabet, subtrie: Subtrie) -> Result<Trie> {
        if subtrie.width() != alphabet.len() {
            return Err(DawgError::WidthMismatch {
                expected: alphabet.len(),
                found: subtrie.width(),
            });
        }
        let (arena, root) = subtrie.into_parts();

        let mut words = 0;
        for (_, node) in arena.iter() {
            words += usize::from(node.is_word());
            for (index, child) in node.children() {
                let symbol = arena[child].symbol();
                let expected = alphabet.symbols()[index];
                if symbol != expected {
                    return Err(DawgError::SymbolMismatch {
                        index,
                        symbol,
                        expected,
                    });
                }
            }
        }
        Ok(Trie {
            alphabet,
            arena,
            root,
            words,
        })
    }
}

impl WordSet for Trie {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.arena, self.root)
    }

    fn size(&self) -> usize {
        self.words
    }

    fn node_count(&self) -> usize {
        self.arena.len()
    }
}

/// Builds a DAWG over `alphabet` from an iterator of words, in any order.
///
/// # Examples
///
/// ```
/// use arraydawg::dawg::{build_dawg, Alphabet, WordSet};
///
/// let dawg = build_dawg(Alphabet::uppercase_ascii(), ["BAKE", "CAKE", "FAKE"]).unwrap();
/// assert!(dawg.contains("CAKE").unwrap());
/// assert!(!dawg.contains("AKE").unwrap());
/// ```
pub fn build_dawg<W: IntoWord>(
    alphabet: Alphabet,
    words: impl IntoIterator<Item = W>,
) -> Result<Dawg> {
    let mut trie = Trie::new(alphabet);
    trie.insert_all(words)?;
    Ok(trie.minimize())
}

#[cfg(test)]
mod test {
    use super::*;

    fn alphabet() -> Alphabet {
        "acrst".parse().unwrap()
    }

    fn trie(words: &[&str]) -> Trie {
        let mut trie = Trie::new(alphabet());
        trie.insert_all(words).unwrap();
        trie
    }

    #[test]
    fn cat_cats_car() {
        let trie = trie(&["cat", "cats", "car"]);
        assert!(trie.contains("cat").unwrap());
        assert!(trie.contains("cats").unwrap());
        assert!(trie.contains("car").unwrap());
        assert!(!trie.contains("ca").unwrap());
        assert!(trie.is_prefix("ca").unwrap());
        assert!(!trie.is_prefix("cr").unwrap());
        assert_eq!(trie.size(), 3);
        // root + c + a + t + s + r
        assert_eq!(trie.node_count(), 6);
    }

    #[test]
    fn duplicate_insert_is_not_counted() {
        let mut trie = trie(&["cat"]);
        assert_eq!(trie.insert("cat"), Ok(false));
        assert_eq!(trie.insert("ca"), Ok(true));
        assert_eq!(trie.size(), 2);
    }

    #[test]
    fn empty_word() {
        let mut trie = trie(&[]);
        assert_eq!(trie.insert(""), Err(DawgError::EmptyWord));
        assert!(!trie.contains("").unwrap());
        assert!(trie.is_prefix("").unwrap());
    }

    #[test]
    fn unknown_symbol_leaves_trie_untouched() {
        let mut trie = trie(&["cat"]);
        let nodes = trie.node_count();
        assert_eq!(
            trie.insert("carb"),
            Err(DawgError::UnknownSymbol { symbol: 'b' })
        );
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.size(), 1);
        assert!(!trie.is_prefix("car").unwrap());
    }

    #[test]
    fn queries_reject_unknown_symbols() {
        let trie = trie(&["cat"]);
        assert_eq!(
            trie.contains("cab"),
            Err(DawgError::UnknownSymbol { symbol: 'b' })
        );
        assert_eq!(
            trie.is_prefix("z"),
            Err(DawgError::UnknownSymbol { symbol: 'z' })
        );
    }

    #[test]
    fn duplicate_is_independent() {
        let mut original = trie(&["cat"]);
        let copy = original.duplicate();
        original.insert("cats").unwrap();
        assert!(!copy.contains("cats").unwrap());
        assert_eq!(copy.size(), 1);
        assert!(copy.root().structurally_eq(&trie(&["cat"]).root()));
    }

    #[test]
    fn minimized_snapshot_survives_further_inserts() {
        let mut trie = trie(&["cat"]);
        let dawg = trie.duplicate().minimize();
        trie.insert("car").unwrap();
        assert!(!dawg.contains("car").unwrap());
        assert!(trie.contains("car").unwrap());
    }

    #[test]
    fn words_in_alphabet_order() {
        let trie = trie(&["cats", "car", "cat", "at"]);
        let words: Vec<String> = trie.words().collect();
        assert_eq!(words, ["at", "car", "cat", "cats"]);
    }

    #[test]
    fn build_dawg_from_words() {
        let dawg = build_dawg(alphabet(), ["cat", "rat", "sat"]).unwrap();
        assert_eq!(dawg.size(), 3);
        assert!(dawg.contains("rat").unwrap());
        assert_eq!(
            build_dawg(alphabet(), ["cat", "bat"]).unwrap_err(),
            DawgError::UnknownSymbol { symbol: 'b' }
        );
    }
}
