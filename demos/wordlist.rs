//! Example: building a wordlist, minimizing it, and reloading it from its
//! serialized form.
//!
//! Run with: cargo run --example wordlist

use arraydawg::dawg::{Alphabet, Dawg, Trie, WordSet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = Alphabet::uppercase_ascii();
    let mut trie = Trie::new(alphabet.clone());
    trie.insert_all(["BAKE", "BAKED", "BAKER", "CAKE", "CAKED", "FAKE", "LAKE"])?;
    let trie_nodes = trie.node_count();

    let dawg = trie.minimize();
    println!("Nodes: {trie_nodes} in the trie, {} in the DAWG", dawg.node_count());

    // Word lookup
    println!("\nWord lookup:");
    for word in ["BAKE", "BAKER", "BAKES", "CAKE", "LAKE", "MAKE"] {
        println!("  {word}: {}", if dawg.contains(word)? { "yes" } else { "no" });
    }

    // Prefix checking
    println!("\nPrefix checking:");
    for prefix in ["BA", "CAK", "MA", "FAK"] {
        println!("  {prefix}*: {}", if dawg.is_prefix(prefix)? { "yes" } else { "no" });
    }

    // Foreign symbols are rejected rather than ignored
    if let Err(err) = dawg.contains("bake") {
        println!("\nLowercase lookup: {err}");
    }

    // Persist and reload
    let encoded = dawg.serialize();
    let reloaded = Dawg::deserialize(alphabet, &encoded)?;
    println!("\nSerialized to {} symbols", encoded.len());
    println!("All words: {:?}", reloaded.words().collect::<Vec<_>>());
    Ok(())
}
