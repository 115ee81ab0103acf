use std::collections::{BTreeMap, BTreeSet};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;

/// Sets whose iteration order is determined by the ordering on `S`. Everything that is
/// handed out of an inference run is stored in one of these, so that two runs on the
/// same input can be compared and printed identically.
pub type OrderedSet<S> = BTreeSet<S>;
/// Maps whose iteration order is determined by the ordering on `K`.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;
