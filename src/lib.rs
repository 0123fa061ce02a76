//! # arraydawg
//!
//! A dictionary over a fixed, dense alphabet. Words go into a [`Trie`](dawg::Trie)
//! whose nodes hold one child slot per alphabet symbol; the trie is then collapsed
//! into a [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph) by sharing structurally identical subtries. The
//! DAWG accepts exactly the same words and prefixes with fewer nodes.
//!
//! Any subtrie can be written to a flat preorder character sequence and read back
//! without re-inserting its words.
//!
//! ## Features
//!
//! - **Build, then freeze**: [`Trie`](dawg::Trie) only inserts,
//!   [`Dawg`](dawg::Dawg) only answers queries; [`Trie::minimize`](dawg::Trie::minimize)
//!   consumes one to produce the other
//! - **Linear minimization**: nodes are canonicalized bottom-up, so equivalence is
//!   decided by comparing child ids, never whole subtrees
//! - **Thread-safe reads**: a [`Dawg`](dawg::Dawg) is immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```
//! use arraydawg::dawg::{Alphabet, Trie, WordSet};
//!
//! let mut trie = Trie::new("acrst".parse::<Alphabet>().unwrap());
//! for word in ["cat", "cats", "car"] {
//!     trie.insert(word).unwrap();
//! }
//! let before = trie.node_count();
//!
//! let dawg = trie.minimize();
//! assert!(dawg.contains("cat").unwrap());
//! assert!(!dawg.contains("ca").unwrap());
//! assert!(dawg.is_prefix("ca").unwrap());
//! assert_eq!(dawg.size(), 3);
//! assert!(dawg.node_count() <= before);
//! ```
//!
//! ## Persistence
//!
//! ```
//! use arraydawg::dawg::{build_dawg, codec, Alphabet, Dawg, WordSet};
//!
//! let alphabet = Alphabet::uppercase_ascii();
//! let dawg = build_dawg(alphabet.clone(), ["BAKE", "CAKE", "FAKE"]).unwrap();
//!
//! let encoded = dawg.serialize();
//! let subtrie = codec::deserialize(&encoded, alphabet.len()).unwrap();
//! assert!(subtrie.root().structurally_eq(&dawg.root()));
//!
//! let reloaded = Dawg::deserialize(alphabet, &encoded).unwrap();
//! assert_eq!(reloaded.node_count(), dawg.node_count());
//! ```

#![warn(missing_docs)]

/// Alphabet, trie, minimizer, DAWG and codec.
pub mod dawg;
