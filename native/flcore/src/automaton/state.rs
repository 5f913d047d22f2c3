//! State identifiers and state sets.
//!
//! A [`StateSet`] is compared and hashed by its members only. Two sets built
//! with different capacities but holding the same states are the same set,
//! so they can key the powerset construction directly.

use std::fmt;
use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;

/// Index of a state in declaration order.
pub type StateId = u32;

/// A set of states backed by a growable bit set.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Empty set with room for states `0..capacity` without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Set holding only `state`.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Adds `state`, growing the backing bits if needed. Returns whether it
    /// was newly added.
    pub fn insert(&mut self, state: StateId) -> bool {
        let bit = state as usize;
        self.bits.grow(bit + 1);
        !self.bits.put(bit)
    }

    pub fn contains(&self, state: StateId) -> bool {
        // `FixedBitSet::contains` is false past the end.
        self.bits.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of member states.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Member states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|bit| bit as StateId)
    }

    /// Adds every member of `other`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.bits.grow(other.bits.len());
        self.bits.union_with(&other.bits);
    }

    /// Whether the two sets share a member.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// Members of both sets.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        self.bits.intersection(&other.bits).map(|bit| bit as StateId).collect()
    }

    /// Members of `self` not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        self.bits.difference(&other.bits).map(|bit| bit as StateId).collect()
    }

    /// Members as a sorted vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for member in self.iter() {
            member.hash(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(4);
        assert!(set.is_empty());

        assert!(set.insert(1));
        assert!(set.insert(9));
        assert!(!set.insert(9));
        assert_eq!(set.len(), 2);
        assert!(set.contains(1));
        assert!(set.contains(9));
        assert!(!set.contains(2));
        assert!(!set.contains(100));
        assert_eq!(set.to_vec(), vec![1, 9]);
    }

    #[test]
    fn test_state_set_algebra() {
        let left: StateSet = [0, 2, 4].into_iter().collect();
        let right: StateSet = [2, 3].into_iter().collect();

        assert!(left.intersects(&right));
        assert_eq!(left.intersection(&right).to_vec(), vec![2]);
        assert_eq!(left.difference(&right).to_vec(), vec![0, 4]);

        let mut union = left.clone();
        union.union_with(&right);
        assert_eq!(union.to_vec(), vec![0, 2, 3, 4]);

        let far: StateSet = [70].into_iter().collect();
        assert!(!left.intersects(&far));
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let small = StateSet::singleton(3, 4);
        let large = StateSet::singleton(3, 64);
        assert_eq!(small, large);
        assert_ne!(small, StateSet::singleton(2, 4));
        assert_eq!(StateSet::with_capacity(0), StateSet::with_capacity(128));

        let keys: HashSet<StateSet> = [small, large].into_iter().collect();
        assert_eq!(keys.len(), 1);
    }
}
