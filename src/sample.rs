use std::{fmt::Display, io::BufRead, num::NonZeroUsize};

use itertools::Itertools;
use tracing::trace;

use crate::{math, InferenceError, SampleParseError, Show};

/// The size of the testing window, usually called `k`. Initial and final segments have length
/// `k - 1`, k-factors have length `k`. A window size is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    /// Creates a window size, fails with [`InferenceError::InvalidWindowSize`] if `k` is zero.
    pub fn new(k: usize) -> Result<Self, InferenceError> {
        NonZeroUsize::new(k)
            .map(Self)
            .ok_or(InferenceError::InvalidWindowSize(0))
    }

    /// The length of k-factors.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// The length of initial and final segments, which is one less than the window size.
    pub fn context(self) -> usize {
        self.0.get() - 1
    }
}

impl TryFrom<i64> for WindowSize {
    type Error = InferenceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(InferenceError::InvalidWindowSize(value))
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = InferenceError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonZeroUsize> for WindowSize {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite positive sample, that is a sequence of words which should be accepted by the
/// inferred automaton. The order and multiplicity of the words are kept as given, although
/// neither influences the result of an inference. Each word is trimmed and folded to lowercase
/// upon insertion, so that the words are over the same alphabet that [`crate::CharAlphabet::from_sample`]
/// extracts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sample {
    words: Vec<String>,
}

impl Sample {
    /// Creates a new sample from the given words.
    pub fn new<W: AsRef<str>, I: IntoIterator<Item = W>>(words: I) -> Self {
        words.into_iter().collect()
    }

    /// Parses a comma separated list of words, e.g. `"abba, aaabba, bbaaa, bba"`. Every entry is
    /// trimmed. Note that the empty string is parsed into a sample consisting of the empty word,
    /// use [`Sample::default`] to obtain a sample without any words.
    pub fn parse_list(input: &str) -> Self {
        Self::new(input.split(','))
    }

    /// Builds a sample from an iterator over lines, each line holding one word. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_lines<S: AsRef<str>, I: IntoIterator<Item = S>>(lines: I) -> Self {
        Self::new(lines.into_iter().filter(|line| {
            let line = line.as_ref().trim();
            !line.is_empty() && !line.starts_with('#')
        }))
    }

    /// Reads a sample from the given reader, see [`Sample::from_lines`] for the format.
    pub fn try_from_read<R: BufRead>(read: R) -> Result<Self, SampleParseError> {
        let lines = read.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_lines(lines))
    }

    /// Appends a word to the sample.
    pub fn push<W: AsRef<str>>(&mut self, word: W) {
        let word = normalize_word(word.as_ref());
        trace!("adding word {} to sample", word.show());
        self.words.push(word);
    }

    /// Gives an iterator over all words in the order in which they were added.
    pub fn words(&self) -> impl Iterator<Item = &'_ str> + '_ {
        self.words.iter().map(|word| word.as_str())
    }

    /// Gives an iterator over the words of the sample, skipping every repeated occurrence of a
    /// word. The first occurrences are kept in their original order.
    pub fn distinct_words(&self) -> impl Iterator<Item = &'_ str> + '_ {
        let mut seen = math::Set::default();
        self.words().filter(move |word| seen.insert(*word))
    }

    /// Returns the number of words, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the sample contains no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().chars().flat_map(char::to_lowercase).collect()
}

impl<W: AsRef<str>> FromIterator<W> for Sample {
    fn from_iter<T: IntoIterator<Item = W>>(iter: T) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|word| normalize_word(word.as_ref()))
                .collect(),
        }
    }
}

impl<W: AsRef<str>> Extend<W> for Sample {
    fn extend<T: IntoIterator<Item = W>>(&mut self, iter: T) {
        for word in iter {
            self.push(word);
        }
    }
}

impl Show for Sample {
    fn show(&self) -> String {
        format!("[{}]", self.words.iter().map(Show::show).join(", "))
    }
}
