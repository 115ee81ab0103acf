use itertools::Itertools;

use crate::{math, Show};

/// Represents an alphabet where a symbol is just a single `char`. The symbols are kept
/// sorted and free of duplicates.
///
/// # Example
/// The alphabet of a sample is the set of all characters that occur in its words, folded to
/// lowercase. For the words `"Ab"` and `"bc"` this gives the alphabet `{a, b, c}`.
/// ```
/// use ktss::prelude::*;
///
/// let alphabet = CharAlphabet::from_words(["Ab", "bc"]);
/// assert_eq!(alphabet.universe().collect::<String>(), "abc");
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
pub struct CharAlphabet(math::OrderedSet<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] from the given symbols, which are taken as they are.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Self {
        Self(symbols.into_iter().collect())
    }

    /// Extracts the alphabet of the given sample.
    pub fn from_sample(sample: &crate::Sample) -> Self {
        Self::from_words(sample.words())
    }

    /// Extracts the alphabet of an arbitrary collection of words. Every character is folded
    /// to lowercase, a character whose lowercase form spans multiple characters contributes
    /// all of them.
    pub fn from_words<W: AsRef<str>, I: IntoIterator<Item = W>>(words: I) -> Self {
        Self(
            words
                .into_iter()
                .flat_map(|word| word.as_ref().chars().flat_map(char::to_lowercase).collect_vec())
                .collect(),
        )
    }

    /// Returns an iterator over all symbols in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Returns true if the given symbol is present in the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// Checks whether `word` belongs to the Kleene closure of the alphabet, i.e. whether every
    /// one of its characters is a symbol. The empty word is always contained.
    pub fn closes(&self, word: &str) -> bool {
        word.chars().all(|chr| self.contains(chr))
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Show for CharAlphabet {
    fn show(&self) -> String {
        char::show_collection(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::CharAlphabet;
    use crate::{Sample, Show};

    #[test]
    fn extraction_folds_case() {
        let alphabet = CharAlphabet::from_words(["aBba", "BBA", "c"]);
        assert_eq!(alphabet, CharAlphabet::new(['a', 'b', 'c']));
        assert_eq!(alphabet.show(), "{a, b, c}");
        assert_eq!(alphabet.size(), 3);
    }

    #[test]
    fn empty_sample_has_empty_alphabet() {
        let alphabet = CharAlphabet::from_sample(&Sample::default());
        assert!(alphabet.is_empty());
        assert!(alphabet.closes(""));
        assert!(!alphabet.closes("a"));
    }

    #[test]
    fn closure_membership() {
        let alphabet = CharAlphabet::new(['a', 'b']);
        assert!(alphabet.closes(""));
        assert!(alphabet.closes("abba"));
        assert!(!alphabet.closes("abc"));
        assert!(!alphabet.closes("A"));
    }
}
