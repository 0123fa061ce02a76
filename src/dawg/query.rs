use super::alphabet::Alphabet;
use super::codec;
use super::error::Result;
use super::node::NodeRef;
use super::word::{to_indices, IntoWord};

/// The read-only query surface shared by [`Trie`](super::Trie) and
/// [`Dawg`](super::Dawg).
///
/// Every word is validated against the alphabet before the graph is walked, so a
/// query with a foreign symbol fails with
/// [`DawgError::UnknownSymbol`](super::DawgError::UnknownSymbol) instead of
/// quietly answering `false`.
pub trait WordSet {
    /// The alphabet every node of this graph is indexed by.
    fn alphabet(&self) -> &Alphabet;

    /// The root node. Its symbol is a placeholder.
    fn root(&self) -> NodeRef<'_>;

    /// Number of distinct words accepted.
    fn size(&self) -> usize;

    /// Number of distinct physical nodes, root included.
    fn node_count(&self) -> usize;

    /// Returns the child of `node` reached over `symbol`.
    ///
    /// `node` must come from this graph; the symbol is mapped through this
    /// graph's alphabet.
    ///
    /// # Errors
    ///
    /// Fails with [`DawgError::UnknownSymbol`](super::DawgError::UnknownSymbol)
    /// if `symbol` is not in the alphabet.
    fn child<'g>(&'g self, node: NodeRef<'g>, symbol: char) -> Result<Option<NodeRef<'g>>> {
        Ok(node.child_at(self.alphabet().index_of(symbol)?))
    }

    /// Returns the node reached by following `word` from the root.
    fn find(&self, word: impl IntoWord) -> Result<Option<NodeRef<'_>>> {
        let indices = to_indices(self.alphabet(), word)?;
        Ok(self.root().walk(&indices))
    }

    /// True if `word` was inserted.
    fn contains(&self, word: impl IntoWord) -> Result<bool> {
        Ok(self.find(word)?.is_some_and(|node| node.is_word()))
    }

    /// True if some inserted word starts with `prefix`, or is equal to it.
    fn is_prefix(&self, prefix: impl IntoWord) -> Result<bool> {
        Ok(self.find(prefix)?.is_some())
    }

    /// Iterates over every accepted word in alphabet order.
    fn words(&self) -> Words<'_> {
        Words::new(self.root())
    }

    /// Preorder encoding of the whole graph, see [`codec::serialize`].
    fn serialize(&self) -> Vec<char> {
        codec::serialize(self.root())
    }
}

/// Iterator over the words accepted below a node, in alphabet order.
///
/// Shared nodes are visited once per path through them, so every word is
/// produced exactly once.
pub struct Words<'g> {
    stack: Vec<(NodeRef<'g>, usize)>,
    prefix: String,
    root_pending: bool,
}

impl<'g> Words<'g> {
    /// Starts an iteration at `root`. The root's own symbol is not part of the words.
    pub fn new(root: NodeRef<'g>) -> Self {
        Words {
            stack: vec![(root, 0)],
            prefix: String::new(),
            root_pending: root.is_word(),
        }
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if std::mem::take(&mut self.root_pending) {
            return Some(String::new());
        }
        loop {
            let (node, next_index) = self.stack.last_mut()?;
            let found = (*next_index..node.width())
                .find_map(|index| node.child_at(index).map(|child| (index, child)));
            match found {
                Some((index, child)) => {
                    *next_index = index + 1;
                    self.prefix.push(child.symbol());
                    self.stack.push((child, 0));
                    if child.is_word() {
                        return Some(self.prefix.clone());
                    }
                }
                None => {
                    // The root has no symbol in the prefix to remove.
                    if self.stack.len() > 1 {
                        self.prefix.pop();
                    }
                    self.stack.pop();
                }
            }
        }
    }
}
