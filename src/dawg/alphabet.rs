use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;

use super::error::{DawgError, Result};

/// Symbols reserved by the preorder serialization format.
pub const RESERVED_SYMBOLS: [char; 3] = [END_OF_WORD, OPEN_CHILDREN, CLOSE_CHILDREN];

pub(crate) const END_OF_WORD: char = '*';
pub(crate) const OPEN_CHILDREN: char = '{';
pub(crate) const CLOSE_CHILDREN: char = '}';

/// A fixed, ordered set of symbols mapped to the dense indices `0..len`.
///
/// The alphabet decides the branching factor of every node built over it.
/// It is immutable once constructed.
///
/// # Examples
///
/// ```
/// use arraydawg::dawg::Alphabet;
///
/// let alphabet = Alphabet::new("acrst".chars()).unwrap();
/// assert_eq!(alphabet.len(), 5);
/// assert_eq!(alphabet.index_of('r').unwrap(), 2);
/// assert_eq!(alphabet.symbol_at(4).unwrap(), 't');
/// assert!(alphabet.index_of('z').is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Box<[char]>,
    indices: HashMap<char, u8>,
}

impl Alphabet {
    /// Largest supported alphabet.
    ///
    /// Child indices are serialized as the character with the same code point, so
    /// indices must stay below `'*'` to never be read back as a delimiter.
    pub const MAX_SIZE: usize = END_OF_WORD as usize;

    /// Builds an alphabet from symbols in index order.
    ///
    /// # Errors
    ///
    /// Fails if `symbols` is empty, repeats a symbol, contains one of
    /// [`RESERVED_SYMBOLS`], or is longer than [`Alphabet::MAX_SIZE`].
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let symbols: Box<[char]> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(DawgError::EmptyAlphabet);
        }
        if symbols.len() > Self::MAX_SIZE {
            return Err(DawgError::AlphabetTooLarge {
                size: symbols.len(),
                max: Self::MAX_SIZE,
            });
        }

        let mut indices = HashMap::with_capacity(symbols.len());
        for (index, &symbol) in symbols.iter().enumerate() {
            if RESERVED_SYMBOLS.contains(&symbol) {
                return Err(DawgError::ReservedSymbol { symbol });
            }
            // MAX_SIZE keeps every index within u8.
            if indices.insert(symbol, index as u8).is_some() {
                return Err(DawgError::DuplicateSymbol { symbol });
            }
        }
        Ok(Alphabet { symbols, indices })
    }

    /// The 26 lowercase ASCII letters.
    pub fn lowercase_ascii() -> Self {
        Self::from_range('a'..='z')
    }

    /// The 26 uppercase ASCII letters.
    pub fn uppercase_ascii() -> Self {
        Self::from_range('A'..='Z')
    }

    fn from_range(range: std::ops::RangeInclusive<char>) -> Self {
        let symbols: Box<[char]> = range.collect();
        let indices = symbols
            .iter()
            .enumerate()
            .map(|(index, &symbol)| (symbol, index as u8))
            .collect();
        Alphabet { symbols, indices }
    }

    /// Returns the dense index of `symbol`.
    #[inline]
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        self.indices
            .get(&symbol)
            .map(|&index| usize::from(index))
            .ok_or(DawgError::UnknownSymbol { symbol })
    }

    /// Returns the symbol stored at `index`.
    #[inline]
    pub fn symbol_at(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(DawgError::IndexOutOfRange {
                index,
                size: self.symbols.len(),
            })
    }

    /// Number of symbols, which is also the branching factor of every node.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; alphabets cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    /// The symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl FromStr for Alphabet {
    type Err = DawgError;

    fn from_str(s: &str) -> Result<Self> {
        Alphabet::new(s.chars())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.symbols.iter().collect();
        f.debug_tuple("Alphabet").field(&symbols).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indices_follow_construction_order() {
        let alphabet = Alphabet::new("tsrca".chars()).unwrap();
        assert_eq!(alphabet.index_of('t'), Ok(0));
        assert_eq!(alphabet.index_of('a'), Ok(4));
        assert_eq!(alphabet.symbol_at(1), Ok('s'));
    }

    #[test]
    fn unknown_symbol() {
        let alphabet: Alphabet = "abc".parse().unwrap();
        assert_eq!(
            alphabet.index_of('d'),
            Err(DawgError::UnknownSymbol { symbol: 'd' })
        );
    }

    #[test]
    fn index_out_of_range() {
        let alphabet: Alphabet = "abc".parse().unwrap();
        assert_eq!(
            alphabet.symbol_at(3),
            Err(DawgError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn reserved_symbols_are_rejected() {
        for symbol in RESERVED_SYMBOLS {
            let symbols = format!("ab{symbol}c");
            assert_eq!(
                symbols.parse::<Alphabet>(),
                Err(DawgError::ReservedSymbol { symbol })
            );
        }
    }

    #[test]
    fn duplicates_are_rejected() {
        assert_eq!(
            "abca".parse::<Alphabet>(),
            Err(DawgError::DuplicateSymbol { symbol: 'a' })
        );
    }

    #[test]
    fn empty_alphabet() {
        assert_eq!("".parse::<Alphabet>(), Err(DawgError::EmptyAlphabet));
    }

    #[test]
    fn size_limit() {
        let fits: String = (0..Alphabet::MAX_SIZE as u32)
            .map(|i| char::from_u32(0x100 + i).unwrap())
            .collect();
        assert!(fits.parse::<Alphabet>().is_ok());

        let too_many: String = (0..=Alphabet::MAX_SIZE as u32)
            .map(|i| char::from_u32(0x100 + i).unwrap())
            .collect();
        assert_eq!(
            too_many.parse::<Alphabet>(),
            Err(DawgError::AlphabetTooLarge {
                size: Alphabet::MAX_SIZE + 1,
                max: Alphabet::MAX_SIZE
            })
        );
    }

    #[test]
    fn presets() {
        let lower = Alphabet::lowercase_ascii();
        assert_eq!(lower.len(), 26);
        assert_eq!(lower.index_of('z'), Ok(25));
        assert_eq!(lower, "abcdefghijklmnopqrstuvwxyz".parse().unwrap());
        assert!(!Alphabet::uppercase_ascii().contains('a'));
    }
}
