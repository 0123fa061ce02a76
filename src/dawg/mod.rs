/// Symbol set and its dense index mapping.
pub mod alphabet;
/// Mutable trie and the `build_dawg` entry point.
pub mod builder;
/// Preorder serialization and deserialization.
pub mod codec;
/// Error types.
pub mod error;
/// Immutable minimized graph.
pub mod frozen;
mod minimize;
/// Node handles and read-only node views.
pub mod node;
pub(crate) mod node_arena;
/// Query surface shared by tries and DAWGs.
pub mod query;
/// Conversion of string types into words.
pub mod word;

pub use alphabet::{Alphabet, RESERVED_SYMBOLS};
pub use builder::{build_dawg, Trie};
pub use codec::Subtrie;
pub use error::{DawgError, MalformedKind, Result};
pub use frozen::Dawg;
pub use node::{NodeId, NodeRef};
pub use query::{WordSet, Words};
pub use word::IntoWord;
