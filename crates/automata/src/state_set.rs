#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;

use crate::StateIndex;

/// A set of states stored as a sorted vector without duplicates.
///
/// Two sets with the same members are equal and hash identically, so a
/// `StateSet` can be used directly as the canonical key of a subset of NFA
/// states.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(Vec<StateIndex>);

impl StateSet {
    /// Creates the set containing the given states, in any order and possibly with duplicates.
    pub fn from_unsorted(mut states: Vec<StateIndex>) -> Self {
        states.sort_unstable();
        states.dedup();
        Self(states)
    }

    /// Returns true iff the given state is a member.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateIndex>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_state_set_is_canonical() {
        let left = StateSet::from_unsorted(vec![StateIndex::new(3), StateIndex::new(1), StateIndex::new(3)]);
        let right: StateSet = [1, 3].into_iter().map(StateIndex::new).collect();

        assert_eq!(left, right);
        assert_eq!(left.len(), 2);
        assert!(left.contains(StateIndex::new(3)));
        assert!(!left.contains(StateIndex::new(2)));
        assert_eq!(left.to_string(), "{1, 3}");
    }
}
