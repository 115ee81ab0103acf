use std::fmt::Display;

use itertools::Itertools;

use crate::{
    math::{OrderedMap, OrderedSet},
    CharAlphabet, Show, WindowSize,
};

/// The label under which the root state is displayed.
pub const ROOT_LABEL: &str = "_";

/// A state of a k-TSS automaton. Every state stands for a segment of the sample, the
/// distinguished [`State::Root`] stands for the empty segment and is the initial state.
///
/// A [`State::Segment`] with an empty label is a raw, unnormalized state. It only ever exists
/// during construction and is mapped to [`State::Root`] by [`crate::builder::Normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    /// The state that represents the empty segment.
    Root,
    /// The state that represents the contained segment.
    Segment(String),
}

impl State {
    /// Creates the state for the given segment, the label is taken as it is.
    pub fn segment<S: Into<String>>(segment: S) -> Self {
        Self::Segment(segment.into())
    }

    /// Returns the label that is used to display `self`.
    pub fn label(&self) -> &str {
        match self {
            State::Root => ROOT_LABEL,
            State::Segment(segment) => segment,
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Show for State {
    fn show(&self) -> String {
        self.label().to_string()
    }
}

/// A transition `(source, symbol, target)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    /// The state in which the transition starts.
    pub source: State,
    /// The symbol that the transition reads.
    pub symbol: char,
    /// The state to which the transition leads.
    pub target: State,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(source: State, symbol: char, target: State) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }
}

impl<Q: Into<State>, P: Into<State>> From<(Q, char, P)> for Transition {
    fn from((source, symbol, target): (Q, char, P)) -> Self {
        Self::new(source.into(), symbol, target.into())
    }
}

impl From<&str> for State {
    fn from(value: &str) -> Self {
        State::segment(value)
    }
}

impl Show for Transition {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.source.show(),
            self.symbol.show(),
            self.target.show()
        )
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

/// The automaton inferred from a sample, that is the tuple (Σ, Q, q₀, F, δ). Objects of this
/// type can only be obtained through [`crate::builder::Skeleton::into_automaton`], which
/// guarantees that
/// - the initial state is the root and a member of Q,
/// - no state other than the root stands for the empty segment,
/// - all transitions are labeled with symbols from Σ and start and end in Q,
/// - F is a subset of Q,
/// - δ is a function, which makes the automaton deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KTssAutomaton {
    pub(crate) alphabet: CharAlphabet,
    pub(crate) window: WindowSize,
    pub(crate) states: OrderedSet<State>,
    pub(crate) initial: State,
    pub(crate) accepting: OrderedSet<State>,
    pub(crate) transitions: OrderedMap<(State, char), State>,
}

/// The components of a [`KTssAutomaton`] in the order Σ, Q, q₀, F, δ.
pub type AutomatonParts = (
    CharAlphabet,
    OrderedSet<State>,
    State,
    OrderedSet<State>,
    OrderedSet<Transition>,
);

impl KTssAutomaton {
    /// Returns a reference to the underlying alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// The window size with which the automaton was inferred.
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// Returns the set of all states.
    pub fn states(&self) -> &OrderedSet<State> {
        &self.states
    }

    /// Returns the initial state, which is always the root.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// Returns the set of accepting states.
    pub fn accepting_states(&self) -> &OrderedSet<State> {
        &self.accepting
    }

    /// Returns true if the given state is accepting.
    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Gives an iterator over all transitions, ordered by source state and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .map(|((source, symbol), target)| Transition::new(source.clone(), *symbol, target.clone()))
    }

    /// Returns the number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the state reached from `state` when reading `symbol`, if such a transition exists.
    pub fn successor(&self, state: &State, symbol: char) -> Option<&State> {
        self.transitions.get(&(state.clone(), symbol))
    }

    /// Reads `word` starting in the initial state and returns the state that is reached. Gives
    /// back `None` if the run gets stuck because some transition is missing.
    pub fn run(&self, word: &str) -> Option<&State> {
        word.chars()
            .try_fold(&self.initial, |state, symbol| self.successor(state, symbol))
    }

    /// Returns true if and only if the run on `word` reaches an accepting state.
    pub fn accepts(&self, word: &str) -> bool {
        self.run(word)
            .map(|state| self.is_accepting(state))
            .unwrap_or(false)
    }

    /// Decomposes `self` into the tuple (Σ, Q, q₀, F, δ).
    pub fn into_parts(self) -> AutomatonParts {
        let transitions = self.transitions().collect();
        (
            self.alphabet,
            self.states,
            self.initial,
            self.accepting,
            transitions,
        )
    }

    /// Returns a string representation of the transition table. There is one row for each state
    /// and one column for each symbol, the initial state is marked with `→`.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            ["State".to_string(), "Accepting".to_string()]
                .into_iter()
                .chain(self.alphabet.universe().map(|sym| sym.to_string())),
        );
        for state in &self.states {
            let mut row = vec![
                if state == &self.initial {
                    format!("→ {state}")
                } else {
                    state.to_string()
                },
                self.is_accepting(state).show(),
            ];
            for sym in self.alphabet.universe() {
                row.push(
                    self.successor(state, sym)
                        .map(|target| target.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl Show for KTssAutomaton {
    fn show(&self) -> String {
        format!(
            "({}, {}, {}, {}, {})",
            self.alphabet.show(),
            State::show_collection(self.states.iter()),
            self.initial.show(),
            State::show_collection(self.accepting.iter()),
            Transition::show_collection(self.transitions().collect_vec().iter())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer;

    #[test]
    fn state_labels() {
        assert_eq!(State::Root.label(), ROOT_LABEL);
        let state = State::segment("ab");
        assert_eq!(state.label(), "ab");
        assert_eq!(
            Transition::new(State::Root, 'a', "a".into()).show(),
            "(_, a, a)"
        );
    }

    #[test]
    fn run_and_accept() {
        let dfa = infer(&crate::Sample::new(["ab"]), 2).unwrap();
        assert_eq!(dfa.run(""), Some(&State::Root));
        assert_eq!(dfa.run("a"), Some(&State::segment("a")));
        assert_eq!(dfa.run("ab"), Some(&State::segment("b")));
        assert_eq!(dfa.run("ba"), None);
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("abb"));
        assert_eq!(dfa.show(), "({a, b}, {_, a, b}, _, {b}, {(_, a, a), (a, b, b)})");
    }

    #[test]
    fn table_marks_initial_state() {
        let dfa = infer(&crate::Sample::new(["ab"]), 2).unwrap();
        let table = dfa.transition_table();
        assert!(table.contains("→ _"));
        assert!(table.contains("Accepting"));
    }

    #[test]
    fn parts_contain_all_components() {
        let dfa = infer(&crate::Sample::new(["ab"]), 2).unwrap();
        let (sigma, states, initial, accepting, transitions) = dfa.into_parts();
        assert_eq!(sigma, CharAlphabet::new(['a', 'b']));
        assert_eq!(states.len(), 3);
        assert_eq!(initial, State::Root);
        assert_eq!(accepting, OrderedSet::from_iter([State::segment("b")]));
        assert_eq!(
            transitions,
            OrderedSet::from_iter([
                Transition::from((State::Root, 'a', "a")),
                Transition::from(("a", 'b', "b")),
            ])
        );
    }
}
