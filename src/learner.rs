use owo_colors::OwoColorize;
use tracing::{debug, info};

use crate::{
    builder::Skeleton, segments::Segments, CharAlphabet, InferenceError, KTssAutomaton, Sample,
    Show, WindowSize,
};

/// Infers the k-TSS automaton of a positive sample for a fixed window size. The learner holds no
/// state besides the window size, so it can be reused for any number of samples.
///
/// ```
/// use ktss::prelude::*;
///
/// let learner = KTssLearner::new(WindowSize::new(3).unwrap());
/// let dfa = learner.infer(&Sample::parse_list("abba, aaabba, bbaaa, bba")).unwrap();
/// assert!(dfa.accepts("aaaabba"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KTssLearner {
    window: WindowSize,
}

impl KTssLearner {
    /// Creates a learner for the given window size.
    pub fn new(window: WindowSize) -> Self {
        Self { window }
    }

    /// Creates a learner from a raw window size, fails if `k` is not positive.
    pub fn try_new(k: i64) -> Result<Self, InferenceError> {
        WindowSize::try_from(k).map(Self::new)
    }

    /// Extracts the alphabet of `sample` and computes its segments.
    pub fn segments(&self, sample: &Sample) -> (CharAlphabet, Segments) {
        let alphabet = CharAlphabet::from_sample(sample);
        debug!(
            "{} {} of size {}",
            "alphabet".bold(),
            alphabet.show(),
            alphabet.size()
        );
        let segments = Segments::compute(sample, &alphabet, self.window);
        (alphabet, segments)
    }

    /// Builds the raw, unnormalized skeleton of the automaton for `sample`.
    pub fn skeleton(&self, sample: &Sample) -> Skeleton {
        let (alphabet, segments) = self.segments(sample);
        Skeleton::build(&alphabet, &segments)
    }

    /// Runs the whole inference on `sample`. Either the complete automaton is returned or the
    /// first violated construction invariant.
    pub fn infer(&self, sample: &Sample) -> Result<KTssAutomaton, InferenceError> {
        let start = std::time::Instant::now();
        let automaton = self.skeleton(sample).into_automaton()?;
        info!(
            "inferred {} with {} states and {} transitions from {} words in {}µs",
            format!("{}-TSS automaton", automaton.window()).green(),
            automaton.size(),
            automaton.transition_count(),
            sample.len(),
            start.elapsed().as_micros()
        );
        Ok(automaton)
    }
}

/// Infers the automaton of `sample` for the window size `k`. This fails with
/// [`InferenceError::InvalidWindowSize`] before doing anything else if `k` is not positive.
pub fn infer(sample: &Sample, k: i64) -> Result<KTssAutomaton, InferenceError> {
    KTssLearner::try_new(k)?.infer(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::OrderedSet, State, Transition};

    fn states(labels: &[&str]) -> OrderedSet<State> {
        labels
            .iter()
            .map(|label| match *label {
                "" => State::Root,
                segment => State::segment(segment),
            })
            .collect()
    }

    #[test]
    fn single_word_with_window_two() {
        let dfa = infer(&Sample::new(["ab"]), 2).unwrap();
        assert_eq!(dfa.alphabet(), &CharAlphabet::new(['a', 'b']));
        assert_eq!(dfa.states(), &states(&["", "a", "b"]));
        assert_eq!(dfa.initial(), &State::Root);
        assert_eq!(dfa.accepting_states(), &states(&["b"]));
        assert_eq!(
            dfa.transitions().collect::<Vec<_>>(),
            vec![
                Transition::from((State::Root, 'a', "a")),
                Transition::from(("a", 'b', "b")),
            ]
        );
        assert!(dfa.accepts("ab"));
        for rejected in ["", "a", "b", "ba", "aab", "abab"] {
            assert!(!dfa.accepts(rejected));
        }
    }

    #[test_log::test]
    fn window_of_one_has_only_the_root() {
        let sample = Sample::new(["a"]);
        let learner = KTssLearner::try_new(1).unwrap();
        let (_, segments) = learner.segments(&sample);
        assert_eq!(segments.initial(), &OrderedSet::from_iter([String::new()]));
        assert_eq!(segments.finals(), &OrderedSet::from_iter([String::new()]));
        assert_eq!(segments.factors(), &OrderedSet::from_iter(["a".to_string()]));

        let dfa = learner.infer(&sample).unwrap();
        assert_eq!(dfa.states(), &states(&[""]));
        assert_eq!(dfa.accepting_states(), &states(&[""]));
        assert_eq!(
            dfa.transitions().collect::<Vec<_>>(),
            vec![Transition::new(State::Root, 'a', State::Root)]
        );
        for word in ["a", "aa", "aaaaa"] {
            assert!(dfa.accepts(word));
        }
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn empty_sample_gives_bare_root() {
        for k in 1..=4 {
            let dfa = infer(&Sample::default(), k).unwrap();
            assert!(dfa.alphabet().is_empty());
            assert_eq!(dfa.states(), &states(&[""]));
            assert_eq!(dfa.transition_count(), 0);
            assert!(dfa.accepting_states().is_empty());
            assert!(!dfa.accepts(""));
        }
    }

    #[test]
    fn word_shorter_than_window() {
        let learner = KTssLearner::try_new(5).unwrap();
        let sample = Sample::new(["a"]);
        let (_, segments) = learner.segments(&sample);
        assert_eq!(segments.initial(), &OrderedSet::from_iter(["a".to_string()]));
        assert_eq!(segments.finals(), &OrderedSet::from_iter(["a".to_string()]));
        assert!(segments.factors().is_empty());

        let dfa = learner.infer(&sample).unwrap();
        assert_eq!(dfa.states(), &states(&["", "a"]));
        assert_eq!(dfa.accepting_states(), &states(&["a"]));
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts("aa"));
    }

    #[test]
    fn empty_word_makes_root_accepting() {
        let dfa = infer(&Sample::new(["", "ab"]), 3).unwrap();
        assert!(dfa.is_accepting(&State::Root));
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("ab"));
    }

    #[test]
    fn rejects_invalid_window_sizes() {
        let sample = Sample::new(["ab"]);
        assert_eq!(infer(&sample, 0), Err(InferenceError::InvalidWindowSize(0)));
        assert_eq!(infer(&sample, -1), Err(InferenceError::InvalidWindowSize(-1)));
    }

    #[test]
    fn construction_invariants() {
        let inputs: [&[&str]; 6] = [
            &["abba", "aaabba", "bbaaa", "bba"],
            &["ab", "ABAB", "ba"],
            &["", "a", "abcabc", "cc"],
            &["äöü", "üö"],
            &["ΑΣ", "ΣΑ"],
            &[],
        ];
        for words in inputs {
            let sample = &Sample::new(words.iter().copied());
            let lowercase: OrderedSet<char> =
                words.concat().chars().flat_map(char::to_lowercase).collect();
            for k in 1..=5 {
                let dfa = infer(sample, k).unwrap();
                assert_eq!(dfa.alphabet().universe().collect::<OrderedSet<_>>(), lowercase);
                assert!(dfa.states().contains(&State::Root));
                assert_eq!(dfa.initial(), &State::Root);
                for t in dfa.transitions() {
                    assert!(dfa.states().contains(&t.source));
                    assert!(dfa.states().contains(&t.target));
                    assert!(dfa.alphabet().contains(t.symbol));
                }
                assert!(dfa.accepting_states().is_subset(dfa.states()));
                assert!(!dfa.states().contains(&State::segment("")));
                for word in sample.words() {
                    assert!(dfa.accepts(word), "{word} is rejected for k = {k}");
                }
                assert_eq!(infer(sample, k).unwrap(), dfa);
            }
        }
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let left = infer(&Sample::parse_list("abba, bba, abba, aaabba"), 3).unwrap();
        let right = infer(&Sample::parse_list("AAABBA, bba, abba"), 3).unwrap();
        assert_eq!(left, right);
    }
}
