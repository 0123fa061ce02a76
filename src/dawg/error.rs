//! Error types shared by every structure in the crate.

/// Result type used throughout the crate, defaulting to [`DawgError`].
pub type Result<T, E = DawgError> = std::result::Result<T, E>;

/// Errors returned when building, querying or decoding a word graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DawgError {
    /// A word or lookup referenced a symbol that is not in the alphabet.
    #[error("symbol {symbol:?} is not part of the alphabet")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
    },

    /// An alphabet index was outside `0..size`.
    #[error("index {index} is out of range for an alphabet of {size} symbols")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The alphabet size.
        size: usize,
    },

    /// Words must contain at least one symbol.
    #[error("cannot insert an empty word")]
    EmptyWord,

    /// Alphabets must contain at least one symbol.
    #[error("an alphabet needs at least one symbol")]
    EmptyAlphabet,

    /// The same symbol was listed twice when constructing an alphabet.
    #[error("symbol {symbol:?} appears more than once in the alphabet")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// A serialization delimiter (`*`, `{` or `}`) was used as an alphabet symbol.
    #[error("symbol {symbol:?} is reserved by the serialization format")]
    ReservedSymbol {
        /// The reserved symbol.
        symbol: char,
    },

    /// The alphabet has more symbols than the serialization format can index.
    #[error("alphabet of {size} symbols exceeds the maximum of {max}")]
    AlphabetTooLarge {
        /// Requested size.
        size: usize,
        /// Largest supported size.
        max: usize,
    },

    /// A serialized sequence does not follow the preorder grammar.
    #[error("malformed sequence at offset {offset}: {kind}")]
    MalformedSequence {
        /// Position in the input where parsing failed.
        offset: usize,
        /// What went wrong.
        kind: MalformedKind,
    },

    /// A decoded subtrie was built for a different branching factor.
    #[error("expected a branching factor of {expected}, found {found}")]
    WidthMismatch {
        /// Branching factor of the target alphabet.
        expected: usize,
        /// Branching factor of the subtrie.
        found: usize,
    },

    /// A decoded node's symbol does not match the alphabet symbol at its edge index.
    #[error("node at index {index} carries symbol {symbol:?}, expected {expected:?}")]
    SymbolMismatch {
        /// Edge index of the node within its parent.
        index: usize,
        /// Symbol stored in the node.
        symbol: char,
        /// Symbol the alphabet assigns to `index`.
        expected: char,
    },
}

/// The ways a serialized sequence can violate the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedKind {
    /// The input ended in the middle of a node.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A `}` appeared without an open child block.
    #[error("'}}' without a matching '{{'")]
    UnmatchedClose,
    /// A delimiter appeared where a node symbol belongs.
    #[error("delimiter {symbol:?} in place of a node symbol")]
    ReservedSymbol {
        /// The delimiter found.
        symbol: char,
    },
    /// A child index symbol was outside `0..width`.
    #[error("child index {index} is out of range")]
    IndexOutOfRange {
        /// The decoded index.
        index: u32,
    },
    /// A `{` was immediately followed by `}`.
    #[error("empty child block")]
    EmptyChildren,
    /// The same child index appeared twice in one block.
    #[error("child index {index} appears twice")]
    DuplicateChild {
        /// The repeated index.
        index: usize,
    },
    /// Symbols remained after the root node was complete.
    #[error("trailing input after the root node")]
    TrailingInput,
}

impl DawgError {
    pub(crate) fn malformed(offset: usize, kind: MalformedKind) -> Self {
        DawgError::MalformedSequence { offset, kind }
    }
}
