use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    math::OrderedSet,
    word::{length, prefix_splits, triple_splits},
    CharAlphabet, Sample, Show, WindowSize,
};

/// Computes the initial segments of the sample, which are all prefixes of length `k - 1` of
/// sample words together with all sample words that are shorter than `k - 1`. A prefix is only
/// taken if the remainder of the word lies in the closure of `alphabet`.
pub fn initial_segments(
    sample: &Sample,
    alphabet: &CharAlphabet,
    k: WindowSize,
) -> OrderedSet<String> {
    let context = k.context();
    let mut segments = OrderedSet::new();
    for word in sample.distinct_words() {
        for (prefix, rest) in prefix_splits(word) {
            if length(prefix) == context && alphabet.closes(rest) {
                trace!("word \"{word}\" has initial segment \"{prefix}\"");
                segments.insert(prefix.to_string());
            }
        }
        if length(word) < context {
            trace!("word \"{word}\" is shorter than the window context");
            segments.insert(word.to_string());
        }
    }
    segments
}

/// Computes the final segments of the sample: all suffixes of length `k - 1` of sample words that
/// themselves lie in the closure of `alphabet`, as well as every sample word that is shorter than
/// `k - 1`.
pub fn final_segments(
    sample: &Sample,
    alphabet: &CharAlphabet,
    k: WindowSize,
) -> OrderedSet<String> {
    let context = k.context();
    let mut segments = OrderedSet::new();
    for word in sample.distinct_words() {
        for (_, suffix) in prefix_splits(word) {
            if length(suffix) == context && alphabet.closes(suffix) {
                trace!("word \"{word}\" has final segment \"{suffix}\"");
                segments.insert(suffix.to_string());
            }
        }
        if length(word) < context {
            segments.insert(word.to_string());
        }
    }
    segments
}

/// Computes all infixes of length exactly `k` of sample words whose left and right context lie
/// in the closure of `alphabet`. Words shorter than `k` do not contribute anything.
pub fn k_factors(sample: &Sample, alphabet: &CharAlphabet, k: WindowSize) -> OrderedSet<String> {
    sample
        .distinct_words()
        .flat_map(triple_splits)
        .filter(|(left, middle, right)| {
            length(middle) == k.get() && alphabet.closes(left) && alphabet.closes(right)
        })
        .map(|(_, factor, _)| factor.to_string())
        .collect()
}

/// The three sets that completely characterize a sample with respect to k-testability: the
/// initial segments, the final segments and the k-factors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    window: WindowSize,
    initial: OrderedSet<String>,
    finals: OrderedSet<String>,
    factors: OrderedSet<String>,
}

impl Segments {
    /// Computes the segments of `sample` for the window size `k`, restricting them to the
    /// closure of `alphabet`.
    pub fn compute(sample: &Sample, alphabet: &CharAlphabet, k: WindowSize) -> Self {
        let segments = Self {
            window: k,
            initial: initial_segments(sample, alphabet, k),
            finals: final_segments(sample, alphabet, k),
            factors: k_factors(sample, alphabet, k),
        };
        debug!(
            "computed segments for k = {k}: I = {}, F = {}, T = {}",
            segments.initial.show(),
            segments.finals.show(),
            segments.factors.show()
        );
        segments
    }

    /// The window size for which the segments were computed.
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// Returns the initial segments.
    pub fn initial(&self) -> &OrderedSet<String> {
        &self.initial
    }

    /// Returns the final segments.
    pub fn finals(&self) -> &OrderedSet<String> {
        &self.finals
    }

    /// Returns the k-factors.
    pub fn factors(&self) -> &OrderedSet<String> {
        &self.factors
    }

    /// Renders the three sets side by side, one column per set.
    pub fn table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record([
            "Initial".to_string(),
            "Final".to_string(),
            format!("{}-factors", self.window),
        ]);

        let sets = [&self.initial, &self.finals, &self.factors];
        let rows = sets.iter().map(|set| set.len()).max().unwrap_or(0);
        let mut columns = sets.map(|set| set.iter());
        for _ in 0..rows {
            builder.push_record(
                columns
                    .iter_mut()
                    .map(|column| column.next().map(Show::show).unwrap_or_default())
                    .collect_vec(),
            );
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl Show for Segments {
    fn show(&self) -> String {
        format!(
            "(I = {}, F = {}, T = {})",
            self.initial.show(),
            self.finals.show(),
            self.factors.show()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(segments: &[&str]) -> OrderedSet<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn segments_of(words: &[&str], k: usize) -> Segments {
        let sample = Sample::new(words.iter().copied());
        let alphabet = CharAlphabet::from_sample(&sample);
        Segments::compute(&sample, &alphabet, WindowSize::new(k).unwrap())
    }

    #[test_log::test]
    fn segments_of_abba_sample() {
        let segments = segments_of(&["abba", "aaabba", "bbaaa", "bba"], 3);
        assert_eq!(segments.initial(), &set(&["ab", "aa", "bb"]));
        assert_eq!(segments.finals(), &set(&["ba", "aa"]));
        assert_eq!(
            segments.factors(),
            &set(&["abb", "bba", "aaa", "aab", "baa"])
        );
    }

    #[test]
    fn window_of_one() {
        let segments = segments_of(&["a"], 1);
        assert_eq!(segments.initial(), &set(&[""]));
        assert_eq!(segments.finals(), &set(&[""]));
        assert_eq!(segments.factors(), &set(&["a"]));
    }

    #[test]
    fn short_words_are_their_own_segments() {
        let segments = segments_of(&["a"], 5);
        assert_eq!(segments.initial(), &set(&["a"]));
        assert_eq!(segments.finals(), &set(&["a"]));
        assert!(segments.factors().is_empty());

        let segments = segments_of(&["", "abc"], 3);
        assert_eq!(segments.initial(), &set(&["", "ab"]));
        assert_eq!(segments.finals(), &set(&["", "bc"]));
        assert_eq!(segments.factors(), &set(&["abc"]));
    }

    #[test]
    fn empty_sample_has_no_segments() {
        let segments = segments_of(&[], 2);
        assert!(segments.initial().is_empty());
        assert!(segments.finals().is_empty());
        assert!(segments.factors().is_empty());
    }

    #[test]
    fn segments_outside_of_alphabet_closure_are_dropped() {
        let sample = Sample::new(["abc"]);
        let alphabet = CharAlphabet::new(['a', 'b']);
        let k = WindowSize::new(2).unwrap();
        // "a" is followed by "bc" and the suffix "c" is not over the alphabet
        assert!(initial_segments(&sample, &alphabet, k).is_empty());
        assert!(final_segments(&sample, &alphabet, k).is_empty());
        // "ab" is followed by "c", while "bc" is surrounded by "a" and the empty word
        assert_eq!(k_factors(&sample, &alphabet, k), set(&["bc"]));

        // a final segment only has to be over the alphabet itself, whatever precedes it
        let sample = Sample::new(["cab"]);
        assert_eq!(final_segments(&sample, &alphabet, k), set(&["b"]));
        assert_eq!(initial_segments(&sample, &alphabet, k), set(&["c"]));
    }

    #[test]
    fn segment_table_lists_all_sets() {
        let table = segments_of(&["ab"], 2).table();
        assert!(table.contains("Initial"));
        assert!(table.contains("2-factors"));
        assert!(table.contains("\"ab\""));

        // columns of different heights are filled from the top, in order
        let table = segments_of(&["abba", "aaabba", "bbaaa", "bba"], 3).table();
        let rows = table.lines().filter(|line| line.contains('"')).collect_vec();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("\"aa\"") && rows[0].contains("\"aaa\""));
        assert!(rows[2].contains("\"bb\"") && rows[2].contains("\"abb\""));
        assert!(rows[4].contains("\"bba\""));
    }
}
