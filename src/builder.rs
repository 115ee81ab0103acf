use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::{debug, trace};

use crate::{
    automaton::KTssAutomaton,
    math::{OrderedMap, OrderedSet},
    segments::Segments,
    word::{prefix_splits, split_first, split_last},
    CharAlphabet, InferenceError, Show, State, Transition, WindowSize,
};

/// Maps the raw label of the empty segment to [`State::Root`] and leaves everything else
/// untouched. Applying a normalization twice has the same effect as applying it once.
pub trait Normalize {
    /// Consumes `self` and returns its normalized form.
    fn normalized(self) -> Self;
}

impl Normalize for State {
    fn normalized(self) -> Self {
        match self {
            State::Segment(segment) if segment.is_empty() => State::Root,
            state => state,
        }
    }
}

impl Normalize for Transition {
    fn normalized(self) -> Self {
        Transition::new(self.source.normalized(), self.symbol, self.target.normalized())
    }
}

impl<N: Normalize + Ord> Normalize for OrderedSet<N> {
    fn normalized(self) -> Self {
        self.into_iter().map(Normalize::normalized).collect()
    }
}

/// The automaton in the making. States, accepting states and transitions are plain sets, in
/// particular the transitions form a relation which need not be a function. A skeleton is
/// produced by [`Skeleton::build`] and turned into a [`KTssAutomaton`] by
/// [`Skeleton::into_automaton`], which normalizes and validates it.
///
/// Skeletons can also be assembled by hand:
/// ```
/// use ktss::prelude::*;
///
/// let skeleton = Skeleton::new(CharAlphabet::new(['a']), WindowSize::new(2).unwrap())
///     .with_states([State::segment("a")])
///     .with_transitions([(State::Root, 'a', State::segment("a"))])
///     .with_accepting([State::segment("a")]);
/// let dfa = skeleton.into_automaton().unwrap();
/// assert!(dfa.accepts("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    alphabet: CharAlphabet,
    window: WindowSize,
    states: OrderedSet<State>,
    initial: State,
    accepting: OrderedSet<State>,
    transitions: OrderedSet<Transition>,
}

impl Skeleton {
    /// Creates a skeleton that consists of nothing but the root, which is the initial state.
    pub fn new(alphabet: CharAlphabet, window: WindowSize) -> Self {
        Self {
            alphabet,
            window,
            states: OrderedSet::from_iter([State::Root]),
            initial: State::Root,
            accepting: OrderedSet::new(),
            transitions: OrderedSet::new(),
        }
    }

    /// Assembles the raw automaton from the given segments. The result is not normalized, so it
    /// may contain states with an empty label.
    ///
    /// First, each initial segment is spelled out letter by letter starting from the root, which
    /// creates a state for each of its prefixes. Then every k-factor contributes the transition
    /// from its first `k - 1` symbols to its last `k - 1` symbols, labeled with its last
    /// symbol. Finally, the final segments become the accepting states.
    pub fn build(alphabet: &CharAlphabet, segments: &Segments) -> Self {
        let mut skeleton = Self::new(alphabet.clone(), segments.window());

        for segment in segments.initial() {
            for (target, _) in prefix_splits(segment).skip(1) {
                if let Some((source, symbol)) = split_last(target) {
                    skeleton.add_transition(source, symbol, target);
                }
            }
        }

        for factor in segments.factors() {
            if let (Some((source, symbol)), Some((_, target))) =
                (split_last(factor), split_first(factor))
            {
                skeleton.add_transition(source, symbol, target);
            }
        }

        skeleton.accepting = segments.finals().iter().map(State::segment).collect();
        debug!(
            "built skeleton with {} states and {} transitions",
            skeleton.states.len(),
            skeleton.transitions.len()
        );
        skeleton
    }

    fn add_transition(&mut self, source: &str, symbol: char, target: &str) {
        let transition = Transition::new(State::segment(source), symbol, State::segment(target));
        trace!("adding transition {}", transition.show());
        if self.states.insert(transition.target.clone()) {
            trace!("adding state {}", transition.target.show());
        }
        self.transitions.insert(transition);
    }

    /// Adds the given states.
    pub fn with_states<I: IntoIterator<Item = State>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Adds the given transitions, the states they mention are *not* added.
    pub fn with_transitions<T: Into<Transition>, I: IntoIterator<Item = T>>(
        mut self,
        transitions: I,
    ) -> Self {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Marks the given states as accepting, they are *not* added to the states.
    pub fn with_accepting<I: IntoIterator<Item = State>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    /// Returns the set of states.
    pub fn states(&self) -> &OrderedSet<State> {
        &self.states
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// Returns the set of accepting states.
    pub fn accepting_states(&self) -> &OrderedSet<State> {
        &self.accepting
    }

    /// Returns the transition relation.
    pub fn transitions(&self) -> &OrderedSet<Transition> {
        &self.transitions
    }

    /// Returns two transitions which leave the same state on the same symbol but lead to
    /// different states, if they exist.
    fn conflict(&self) -> Option<(&Transition, &Transition)> {
        // transitions are ordered by source and symbol, so conflicting ones are adjacent
        self.transitions
            .iter()
            .tuple_windows()
            .find(|(left, right)| left.source == right.source && left.symbol == right.symbol)
    }

    /// Returns true if the transition relation is a function of source state and symbol, i.e.
    /// if the skeleton describes a deterministic automaton.
    pub fn is_functional(&self) -> bool {
        self.conflict().is_none()
    }

    /// Checks that the skeleton describes a well-formed deterministic automaton. The checks are
    /// done in a fixed order and the first violation is reported.
    pub fn validate(&self) -> Result<(), InferenceError> {
        if !self.states.contains(&self.initial) {
            return Err(InferenceError::MissingInitialState(self.initial.to_string()));
        }
        if self.states.contains(&State::segment("")) {
            return Err(InferenceError::UnnormalizedState);
        }
        for transition in &self.transitions {
            if !self.alphabet.contains(transition.symbol) {
                return Err(InferenceError::ForeignSymbol {
                    transition: transition.show(),
                    symbol: transition.symbol,
                });
            }
            for endpoint in [&transition.source, &transition.target] {
                if !self.states.contains(endpoint) {
                    return Err(InferenceError::DanglingTransition {
                        transition: transition.show(),
                        endpoint: endpoint.to_string(),
                    });
                }
            }
        }
        if let Some(state) = self.accepting.iter().find(|q| !self.states.contains(*q)) {
            return Err(InferenceError::DanglingAcceptingState(state.to_string()));
        }
        if let Some((first, second)) = self.conflict() {
            debug!(
                "{} {} and {}",
                "conflicting transitions".red(),
                first.show(),
                second.show()
            );
            return Err(InferenceError::Nondeterministic {
                state: first.source.to_string(),
                symbol: first.symbol,
                first: first.target.to_string(),
                second: second.target.to_string(),
            });
        }
        Ok(())
    }

    /// Normalizes and validates `self`, and collects it into a [`KTssAutomaton`]. Fails with the
    /// first violation that [`Skeleton::validate`] finds, no partial result is produced.
    pub fn into_automaton(self) -> Result<KTssAutomaton, InferenceError> {
        let skeleton = self.normalized();
        skeleton.validate()?;

        let Skeleton {
            alphabet,
            window,
            states,
            initial,
            accepting,
            transitions,
        } = skeleton;
        let transitions: OrderedMap<_, _> = transitions
            .into_iter()
            .map(|t| ((t.source, t.symbol), t.target))
            .collect();

        Ok(KTssAutomaton {
            alphabet,
            window,
            states,
            initial,
            accepting,
            transitions,
        })
    }
}

impl Normalize for Skeleton {
    fn normalized(self) -> Self {
        Self {
            alphabet: self.alphabet,
            window: self.window,
            states: self.states.normalized(),
            initial: self.initial.normalized(),
            accepting: self.accepting.normalized(),
            transitions: self.transitions.normalized(),
        }
    }
}
