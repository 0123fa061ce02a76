use std::fmt;

use hashbrown::HashSet;

use super::node_arena::NodeArena;

/// Stable handle to a node inside one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`. A graph never holds more
    /// nodes than the total length of its words plus one.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("node arena exceeds u32::MAX nodes"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A trie or DAWG node: its symbol, the end-of-word flag and one child slot per
/// alphabet index.
#[derive(Clone, Debug, Eq)]
pub(crate) struct Node {
    symbol: char,
    end_of_word: bool,
    children: Box<[Option<NodeId>]>,
}

impl Node {
    /// Creates a childless, non-terminal node with `width` child slots.
    pub fn new(symbol: char, width: usize) -> Self {
        Node {
            symbol,
            end_of_word: false,
            children: vec![None; width].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    #[inline]
    pub fn is_word(&self) -> bool {
        self.end_of_word
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied().flatten()
    }

    /// Present children in ascending index order.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| child.map(|id| (index, id)))
    }

    pub fn set_word(&mut self, end_of_word: bool) {
        self.end_of_word = end_of_word;
    }

    pub fn set_child(&mut self, index: usize, child: NodeId) {
        self.children[index] = Some(child);
    }
}

// Children are compared by id rather than by content. Nodes are canonicalized
// bottom-up, so two children are structurally equal exactly when they are the
// same node, and equality never has to recurse past one level.
impl PartialEq for Node {
    fn eq(&self, rhs: &Self) -> bool {
        self.symbol == rhs.symbol
            && self.end_of_word == rhs.end_of_word
            && self.children == rhs.children
    }
}

// Same reasoning as PartialEq: hash child ids, not subtrees.
impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.end_of_word.hash(state);
        for (index, child) in self.children() {
            (index, child).hash(state);
        }
    }
}

/// A read-only view of one node and the graph it lives in.
///
/// Views are cheap to copy and can be handed to several threads at once when the
/// owning graph is shared immutably.
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    arena: &'g NodeArena,
    id: NodeId,
}

impl<'g> NodeRef<'g> {
    pub(crate) fn new(arena: &'g NodeArena, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    #[inline]
    fn node(&self) -> &'g Node {
        &self.arena[self.id]
    }

    /// Identity of this node within its graph.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The symbol on the edge leading into this node. Placeholder for roots.
    #[inline]
    pub fn symbol(&self) -> char {
        self.node().symbol()
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.node().is_word()
    }

    /// Branching factor of the node.
    #[inline]
    pub fn width(&self) -> usize {
        self.node().width()
    }

    /// Returns the child at alphabet position `index`, if present.
    #[inline]
    pub fn child_at(&self, index: usize) -> Option<NodeRef<'g>> {
        self.node()
            .child(index)
            .map(|id| NodeRef::new(self.arena, id))
    }

    /// Returns an iterator over the present children in ascending index order.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeRef<'g>)> + 'g {
        let arena = self.arena;
        self.node()
            .children()
            .map(move |(index, id)| (index, NodeRef::new(arena, id)))
    }

    /// Returns the number of present children.
    pub fn child_count(&self) -> usize {
        self.node().children().count()
    }

    /// Follows `indices` from this node, returning the node reached.
    pub fn walk(&self, indices: &[usize]) -> Option<NodeRef<'g>> {
        indices
            .iter()
            .try_fold(*self, |node, &index| node.child_at(index))
    }

    /// True if both views point at the same physical node of the same graph.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }

    /// Number of distinct nodes reachable from this one, itself included.
    pub fn reachable_count(&self) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            if visited.insert(id) {
                stack.extend(self.arena[id].children().map(|(_, child)| child));
            }
        }
        visited.len()
    }

    /// Deep structural equality: symbols, end-of-word flags and child layout
    /// match at every reachable position.
    ///
    /// Works across graphs, so a trie can be compared with its minimized or
    /// decoded form. Pairs already proven equal are not revisited, which keeps
    /// the comparison linear on shared subgraphs.
    pub fn structurally_eq(&self, other: &NodeRef<'_>) -> bool {
        let mut proven = HashSet::new();
        let mut stack = vec![(*self, *other)];
        while let Some((a, b)) = stack.pop() {
            if !proven.insert((a.id, b.id)) {
                continue;
            }
            let (na, nb) = (a.node(), b.node());
            if na.symbol() != nb.symbol()
                || na.is_word() != nb.is_word()
                || na.width() != nb.width()
            {
                return false;
            }
            for index in 0..na.width() {
                match (a.child_at(index), b.child_at(index)) {
                    (None, None) => {}
                    (Some(ca), Some(cb)) => stack.push((ca, cb)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("symbol", &self.symbol())
            .field("word", &self.is_word())
            .field("children", &self.child_count())
            .finish()
    }
}
