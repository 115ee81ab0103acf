//! Words are plain string slices. Lengths and split points are always counted in characters,
//! never in bytes, so the routines here are safe for arbitrary unicode input.

/// Returns the length of `word` in characters.
pub fn length(word: &str) -> usize {
    word.chars().count()
}

/// Returns the byte offsets of all positions in `word` at which it may be cut, this includes
/// the start `0` and the end `word.len()`. For a word of `n` characters, there are `n + 1` of them.
fn boundaries(word: &str) -> Vec<usize> {
    word.char_indices()
        .map(|(position, _)| position)
        .chain(std::iter::once(word.len()))
        .collect()
}

/// Splits off the last character of `word`, returns `None` if `word` is empty.
pub fn split_last(word: &str) -> Option<(&str, char)> {
    let (position, last) = word.char_indices().next_back()?;
    Some((&word[..position], last))
}

/// Splits off the first character of `word`, returns `None` if `word` is empty.
pub fn split_first(word: &str) -> Option<(char, &str)> {
    let first = word.chars().next()?;
    Some((first, &word[first.len_utf8()..]))
}

/// Iterator over all ways to cut a word into a prefix and a suffix, see [`prefix_splits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSplits<'a> {
    word: &'a str,
    boundaries: Vec<usize>,
    position: usize,
}

impl<'a> PrefixSplits<'a> {
    /// Creates a new iterator over the splits of `word`.
    pub fn new(word: &'a str) -> Self {
        Self {
            word,
            boundaries: boundaries(word),
            position: 0,
        }
    }
}

impl<'a> Iterator for PrefixSplits<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let cut = *self.boundaries.get(self.position)?;
        self.position += 1;
        Some(self.word.split_at(cut))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.boundaries.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PrefixSplits<'_> {}

/// Produces every pair `(u, v)` with `u + v == word`, starting with the empty prefix and ending
/// with the full word as prefix. A word of length `n` has exactly `n + 1` such splits.
///
/// # Example
/// ```
/// use ktss::word::prefix_splits;
///
/// let splits: Vec<_> = prefix_splits("ab").collect();
/// assert_eq!(splits, vec![("", "ab"), ("a", "b"), ("ab", "")]);
/// ```
pub fn prefix_splits(word: &str) -> PrefixSplits<'_> {
    PrefixSplits::new(word)
}

/// Iterator over all ways to cut a word into three parts, see [`triple_splits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleSplits<'a> {
    word: &'a str,
    boundaries: Vec<usize>,
    left: usize,
    right: usize,
}

impl<'a> TripleSplits<'a> {
    /// Creates a new iterator over the three-way splits of `word`.
    pub fn new(word: &'a str) -> Self {
        Self {
            word,
            boundaries: boundaries(word),
            left: 0,
            right: 0,
        }
    }
}

impl<'a> Iterator for TripleSplits<'a> {
    type Item = (&'a str, &'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.right >= self.boundaries.len() {
            self.left += 1;
            self.right = self.left;
        }
        let start = *self.boundaries.get(self.left)?;
        let end = self.boundaries[self.right];
        self.right += 1;
        Some((
            &self.word[..start],
            &self.word[start..end],
            &self.word[end..],
        ))
    }
}

/// Produces every triple `(u, v, w)` with `u + v + w == word`. The middle part ranges over all
/// infixes of `word`, the empty one included, each time together with its context. The triples
/// are ordered by the start of the middle part first and by its end second.
///
/// # Example
/// ```
/// use ktss::word::triple_splits;
///
/// let splits: Vec<_> = triple_splits("ab").collect();
/// assert_eq!(
///     splits,
///     vec![
///         ("", "", "ab"),
///         ("", "a", "b"),
///         ("", "ab", ""),
///         ("a", "", "b"),
///         ("a", "b", ""),
///         ("ab", "", ""),
///     ]
/// );
/// ```
pub fn triple_splits(word: &str) -> TripleSplits<'_> {
    TripleSplits::new(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_off_first_and_last() {
        assert_eq!(split_last("abc"), Some(("ab", 'c')));
        assert_eq!(split_first("abc"), Some(('a', "bc")));
        assert_eq!(split_last("ä"), Some(("", 'ä')));
        assert_eq!(split_first("äö"), Some(('ä', "ö")));
        assert_eq!(split_last(""), None);
        assert_eq!(split_first(""), None);
    }

    #[test]
    fn prefix_splits_of_empty_word() {
        assert_eq!(prefix_splits("").collect::<Vec<_>>(), vec![("", "")]);
    }

    #[test]
    fn prefix_splits_count_and_order() {
        let word = "abbccb";
        let splits = prefix_splits(word);
        assert_eq!(splits.len(), 7);
        for (i, (prefix, suffix)) in splits.enumerate() {
            assert_eq!(length(prefix), i);
            assert_eq!(format!("{prefix}{suffix}"), word);
        }
    }

    #[test]
    fn splits_respect_char_boundaries() {
        let splits: Vec<_> = prefix_splits("äö").collect();
        assert_eq!(splits, vec![("", "äö"), ("ä", "ö"), ("äö", "")]);
        assert_eq!(length("äö"), 2);

        let middles: Vec<_> = triple_splits("äö").map(|(_, v, _)| v).collect();
        assert_eq!(middles, vec!["", "ä", "äö", "", "ö", ""]);
    }

    #[test]
    fn triple_splits_enumerate_all_infixes() {
        let word = "abcd";
        let splits: Vec<_> = triple_splits(word).collect();
        // one triple per pair i <= j of the five cut positions
        assert_eq!(splits.len(), 15);
        assert!(splits
            .iter()
            .all(|(u, v, w)| format!("{u}{v}{w}") == word));
        assert!(splits.contains(&("a", "bc", "d")));
        assert!(splits.contains(&("abcd", "", "")));

        let restarted: Vec<_> = triple_splits(word).collect();
        assert_eq!(splits, restarted);
    }

    #[test]
    fn triple_splits_of_empty_word() {
        assert_eq!(triple_splits("").collect::<Vec<_>>(), vec![("", "", "")]);
    }
}
