use smallvec::SmallVec;

use super::alphabet::Alphabet;
use super::error::Result;

/// Inline buffer for a word's symbols or indices.
pub(crate) type WordBuf<T> = SmallVec<[T; 32]>;

/// Types that can be used as a word when inserting into or querying a graph.
///
/// Implemented for string types and `char` sequences so that
/// [`Trie::insert`](super::Trie::insert) and the query methods accept them
/// directly.
pub trait IntoWord {
    /// Collects this word into a symbol buffer.
    fn collect_word(self) -> SmallVec<[char; 32]>;
}

impl IntoWord for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &[char] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.iter().copied().collect()
    }
}

impl IntoWord for Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

impl IntoWord for &Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.iter().copied().collect()
    }
}

impl<const N: usize> IntoWord for [char; N] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

/// Maps every symbol of `word` to its alphabet index, failing on the first
/// symbol outside the alphabet.
pub(crate) fn to_indices(alphabet: &Alphabet, word: impl IntoWord) -> Result<WordBuf<usize>> {
    word.collect_word()
        .into_iter()
        .map(|symbol| alphabet.index_of(symbol))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dawg::DawgError;

    #[test]
    fn word_types_collect_the_same_symbols() {
        let expected: SmallVec<[char; 32]> = "cat".chars().collect();
        assert_eq!("cat".collect_word(), expected);
        assert_eq!(String::from("cat").collect_word(), expected);
        assert_eq!(['c', 'a', 't'].collect_word(), expected);
        assert_eq!(vec!['c', 'a', 't'].collect_word(), expected);
        let owned = vec!['c', 'a', 't'];
        assert_eq!((&owned).collect_word(), expected);
    }

    #[test]
    fn indices() {
        let alphabet: Alphabet = "acrst".parse().unwrap();
        assert_eq!(to_indices(&alphabet, "cats").unwrap().as_slice(), &[1, 0, 4, 3]);
        assert_eq!(
            to_indices(&alphabet, "cab").unwrap_err(),
            DawgError::UnknownSymbol { symbol: 'b' }
        );
    }
}
