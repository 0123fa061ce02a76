//! Preorder text encoding of a subtrie.
//!
//! ```text
//! node       := symbol [ '*' ] [ '{' childEntry+ '}' ]
//! childEntry := indexSymbol node
//! ```
//!
//! `indexSymbol` is the character whose code point equals the child's alphabet
//! index. Children are written in ascending index order. Shared DAWG nodes are
//! written once per path, so decoding always yields a tree.

use std::fmt;

use super::alphabet::{Alphabet, CLOSE_CHILDREN, END_OF_WORD, OPEN_CHILDREN};
use super::error::{DawgError, MalformedKind, Result};
use super::node::{Node, NodeId, NodeRef};
use super::node_arena::NodeArena;

/// Encodes the subtrie rooted at `node`.
///
/// # Examples
///
/// ```
/// use arraydawg::dawg::{codec, Alphabet, Trie, WordSet};
///
/// let mut trie = Trie::new("ab".parse::<Alphabet>().unwrap());
/// trie.insert("ab").unwrap();
/// let encoded: String = codec::serialize(trie.root()).into_iter().collect();
/// assert_eq!(encoded, "\0{\u{0}a{\u{1}b*}}");
/// ```
pub fn serialize(node: NodeRef<'_>) -> Vec<char> {
    let mut out = Vec::new();
    // Open child blocks, each with the next child index to visit.
    let mut stack = Vec::new();
    open(node, &mut out, &mut stack);
    while let Some((parent, next_index)) = stack.last_mut() {
        let found = (*next_index..parent.width())
            .find_map(|index| parent.child_at(index).map(|child| (index, child)));
        match found {
            Some((index, child)) => {
                *next_index = index + 1;
                out.push(index_symbol(index));
                open(child, &mut out, &mut stack);
            }
            None => {
                out.push(CLOSE_CHILDREN);
                stack.pop();
            }
        }
    }
    tracing::debug!(symbols = out.len(), "serialized subtrie");
    out
}

/// Writes the symbol and end-of-word marker of `node`, and opens its child
/// block if it has one.
fn open<'g>(node: NodeRef<'g>, out: &mut Vec<char>, stack: &mut Vec<(NodeRef<'g>, usize)>) {
    out.push(node.symbol());
    if node.is_word() {
        out.push(END_OF_WORD);
    }
    if node.child_count() > 0 {
        out.push(OPEN_CHILDREN);
        stack.push((node, 0));
    }
}

fn index_symbol(index: usize) -> char {
    debug_assert!(index < Alphabet::MAX_SIZE);
    char::from(index as u8)
}

/// Decodes a sequence produced by [`serialize`] into an owned tree whose nodes
/// have `width` child slots.
///
/// Each call owns its own read cursor, so independent decodes may run
/// concurrently.
///
/// # Errors
///
/// Fails with [`DawgError::MalformedSequence`] if the input is truncated, has
/// an unmatched `}` or a `*`/`{` where a node symbol belongs, an empty or
/// repeated child entry, a child index outside
/// `0..width`, or anything after the root node. Fails with
/// [`DawgError::AlphabetTooLarge`] if `width` exceeds [`Alphabet::MAX_SIZE`].
pub fn deserialize(sequence: &[char], width: usize) -> Result<Subtrie> {
    if width > Alphabet::MAX_SIZE {
        return Err(DawgError::AlphabetTooLarge {
            size: width,
            max: Alphabet::MAX_SIZE,
        });
    }
    let mut decoder = Decoder {
        cursor: Cursor::new(sequence),
        arena: NodeArena::with_capacity(sequence.len() / 2),
        width,
    };
    let root = decoder.tree()?;
    if !decoder.cursor.at_end() {
        return Err(decoder.cursor.error(MalformedKind::TrailingInput));
    }
    tracing::debug!(
        symbols = sequence.len(),
        nodes = decoder.arena.len(),
        "deserialized subtrie"
    );
    Ok(Subtrie {
        arena: decoder.arena,
        root,
        width,
    })
}

/// Read position over one input sequence.
struct Cursor<'s> {
    input: &'s [char],
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn new(input: &'s [char]) -> Self {
        Cursor { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<char> {
        let symbol = self
            .peek()
            .ok_or_else(|| self.error(MalformedKind::UnexpectedEnd))?;
        self.pos += 1;
        Ok(symbol)
    }

    /// Consumes `symbol` if it is next.
    fn eat(&mut self, symbol: char) -> bool {
        let matched = self.peek() == Some(symbol);
        self.pos += usize::from(matched);
        matched
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, kind: MalformedKind) -> DawgError {
        DawgError::malformed(self.pos, kind)
    }
}

struct Decoder<'s> {
    cursor: Cursor<'s>,
    arena: NodeArena,
    width: usize,
}

impl Decoder<'_> {
    /// Decodes one complete node and everything below it.
    fn tree(&mut self) -> Result<NodeId> {
        // Nodes whose child block is still open, with the index of the child
        // currently being decoded.
        let mut open: Vec<(Node, usize)> = Vec::new();
        loop {
            let (node, has_children) = self.header()?;
            if has_children {
                let index = self.child_index(&node)?;
                open.push((node, index));
                continue;
            }
            let mut done = self.arena.alloc(node);
            loop {
                let Some((mut parent, index)) = open.pop() else {
                    return Ok(done);
                };
                parent.set_child(index, done);
                if self.cursor.eat(CLOSE_CHILDREN) {
                    done = self.arena.alloc(parent);
                } else {
                    let next = self.child_index(&parent)?;
                    open.push((parent, next));
                    break;
                }
            }
        }
    }

    /// Reads `symbol ['*'] ['{']`, reporting whether a child block follows.
    fn header(&mut self) -> Result<(Node, bool)> {
        let offset = self.cursor.pos;
        let symbol = self.cursor.next()?;
        let kind = match symbol {
            CLOSE_CHILDREN => Some(MalformedKind::UnmatchedClose),
            END_OF_WORD | OPEN_CHILDREN => Some(MalformedKind::ReservedSymbol { symbol }),
            _ => None,
        };
        if let Some(kind) = kind {
            return Err(DawgError::malformed(offset, kind));
        }
        let mut node = Node::new(symbol, self.width);
        if self.cursor.eat(END_OF_WORD) {
            node.set_word(true);
        }
        if !self.cursor.eat(OPEN_CHILDREN) {
            return Ok((node, false));
        }
        if self.cursor.peek() == Some(CLOSE_CHILDREN) {
            return Err(self.cursor.error(MalformedKind::EmptyChildren));
        }
        Ok((node, true))
    }

    fn child_index(&mut self, parent: &Node) -> Result<usize> {
        let offset = self.cursor.pos;
        let raw = u32::from(self.cursor.next()?);
        let index = raw as usize;
        if index >= self.width {
            return Err(DawgError::malformed(
                offset,
                MalformedKind::IndexOutOfRange { index: raw },
            ));
        }
        if parent.child(index).is_some() {
            return Err(DawgError::malformed(
                offset,
                MalformedKind::DuplicateChild { index },
            ));
        }
        Ok(index)
    }
}

/// An owned tree decoded by [`deserialize`].
///
/// Compares equal to another subtrie when the two are structurally equal.
/// Turn it into a queryable structure with
/// [`Trie::from_subtrie`](super::Trie::from_subtrie).
#[derive(Clone)]
pub struct Subtrie {
    arena: NodeArena,
    root: NodeId,
    width: usize,
}

impl Subtrie {
    /// The root of the decoded tree.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.arena, self.root)
    }

    /// Branching factor the tree was decoded with.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Re-encodes the tree.
    pub fn serialize(&self) -> Vec<char> {
        serialize(self.root())
    }

    pub(crate) fn into_parts(self) -> (NodeArena, NodeId) {
        (self.arena, self.root)
    }
}

impl PartialEq for Subtrie {
    fn eq(&self, other: &Self) -> bool {
        self.root().structurally_eq(&other.root())
    }
}

impl Eq for Subtrie {}

impl fmt::Debug for Subtrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subtrie")
            .field("width", &self.width)
            .field("nodes", &self.node_count())
            .finish()
    }
}
