//! Library for inferring automata that accept k-testable languages in the strict sense (k-TSS).
//!
//! A k-TSS language is completely described by three finite sets: the allowed prefixes of length
//! $k-1$, the allowed suffixes of length $k-1$ and the allowed infixes (called k-factors) of length
//! exactly $k$. A word belongs to the language if its own prefix, suffix and every one of its
//! k-factors come from those sets. Given a finite positive [`Sample`] and a [`WindowSize`] $k$,
//! the inference collects these three sets from the sample words (see [`segments`]) and builds the
//! automaton whose states are the windows of length at most $k-1$ (see [`builder`]).
//!
//! The pipeline is strictly linear:
//! - the [`CharAlphabet`] is extracted from the sample,
//! - the [`segments::Segments`] are computed from sample, alphabet and window size,
//! - a [`builder::Skeleton`] is assembled from the segments,
//! - the skeleton is normalized, validated and collected into a [`KTssAutomaton`].
//!
//! The whole pipeline is wrapped by [`KTssLearner`], or by the shorthand [`infer`].
//!
//! ```
//! use ktss::prelude::*;
//!
//! let sample = Sample::parse_list("ab");
//! let dfa = infer(&sample, 2).unwrap();
//! assert!(dfa.accepts("ab"));
//! assert!(!dfa.accepts("abab"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use itertools::Itertools;

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use ktss::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::CharAlphabet,
        automaton::{KTssAutomaton, State, Transition},
        builder::{Normalize, Skeleton},
        dot::Dottable,
        error::{InferenceError, SampleParseError},
        infer,
        learner::KTssLearner,
        math,
        sample::{Sample, WindowSize},
        segments::Segments,
        Show,
    };
}

/// This module contains the aliases for the collections that are used throughout the crate.
pub mod math;

/// Error types of the crate.
pub mod error;
pub use error::{InferenceError, SampleParseError};

/// Module that contains the definition of the alphabet of a sample.
pub mod alphabet;
pub use alphabet::CharAlphabet;

/// Contains the positive sample and the window size, i.e. the input of an inference run.
pub mod sample;
pub use sample::{Sample, WindowSize};

/// Decomposition of words into prefix/suffix and left/middle/right parts.
pub mod word;

/// Computation of initial segments, final segments and k-factors of a sample.
pub mod segments;

/// Defines the inferred automaton together with its states and transitions.
pub mod automaton;
pub use automaton::{KTssAutomaton, State, Transition};

/// Assembly of the raw automaton from the segment sets and normalization of state labels.
pub mod builder;

/// Ties everything together.
pub mod learner;
pub use learner::{infer, KTssLearner};

/// Output of the automaton in the graphviz DOT format.
pub mod dot;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example its label and for a transition (q, a, p) it should be (q, a, p).
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}
    /// and for a collection of transitions it should be {(q0, a, q1), (q1, b, q2), ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        format!("\"{self}\"")
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for math::OrderedSet<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}
