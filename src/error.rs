use thiserror::Error;

/// Errors that can occur while inferring a k-TSS automaton. Apart from
/// [`InferenceError::InvalidWindowSize`], which is caused by the caller, every variant
/// signals a defect in the construction itself and should never be observed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum InferenceError {
    /// The window size must be a positive integer.
    #[error("window size must be at least 1, got {0}")]
    InvalidWindowSize(i64),
    /// The initial state is not part of the state set.
    #[error("initial state `{0}` is not a state of the automaton")]
    MissingInitialState(String),
    /// A state still carries the raw empty label after normalization.
    #[error("state set contains an unnormalized empty segment")]
    UnnormalizedState,
    /// A transition is labeled with a symbol outside of the alphabet.
    #[error("transition {transition} uses symbol `{symbol}` which is not in the alphabet")]
    ForeignSymbol {
        /// The offending transition.
        transition: String,
        /// The symbol it is labeled with.
        symbol: char,
    },
    /// A transition points from or to a state that does not exist.
    #[error("transition {transition} has endpoint `{endpoint}` which is not a state")]
    DanglingTransition {
        /// The offending transition.
        transition: String,
        /// The endpoint that is missing from the state set.
        endpoint: String,
    },
    /// A final segment does not correspond to any state.
    #[error("accepting state `{0}` is not a state of the automaton")]
    DanglingAcceptingState(String),
    /// Two transitions leave the same state on the same symbol.
    #[error("state `{state}` has conflicting transitions on `{symbol}` to `{first}` and `{second}`")]
    Nondeterministic {
        /// The state with more than one successor.
        state: String,
        /// The symbol on which the conflict occurs.
        symbol: char,
        /// One of the successors.
        first: String,
        /// Another successor.
        second: String,
    },
}

/// Abstracts the types of errors that can occur when reading a [`crate::Sample`].
#[derive(Debug, Error)]
pub enum SampleParseError {
    /// The underlying reader failed.
    #[error("could not read sample: {0}")]
    Io(#[from] std::io::Error),
}
