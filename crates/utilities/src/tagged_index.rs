use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ops::Index;
use std::ops::IndexMut;

/// An index that can only be compared with indices carrying the same tag.
///
/// The states of an automaton and the blocks of a partition are both plain
/// `usize` values, the tag makes sure that they cannot be mixed up. The tag
/// is only used at the type level, so `Tag` does not need to implement any
/// trait itself. Constructing an index is not a proof that it is valid for
/// some container.
pub struct TagIndex<T, Tag> {
    index: T,
    marker: PhantomData<fn() -> Tag>,
}

impl<T, Tag> TagIndex<T, Tag> {
    pub fn new(index: T) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T: Copy, Tag> TagIndex<T, Tag> {
    /// Returns the underlying value, mostly used for indexing.
    pub fn value(&self) -> T {
        self.index
    }
}

impl<T: Default, Tag> Default for TagIndex<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone, Tag> Clone for TagIndex<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.index.clone())
    }
}

impl<T: Copy, Tag> Copy for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq for TagIndex<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: PartialEq, Tag> Eq for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq<T> for TagIndex<T, Tag> {
    fn eq(&self, other: &T) -> bool {
        self.index == *other
    }
}

impl<T: Ord, Tag> Ord for TagIndex<T, Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T: Ord, Tag> PartialOrd for TagIndex<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Hash, Tag> Hash for TagIndex<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: fmt::Debug, Tag> fmt::Debug for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T: fmt::Display, Tag> fmt::Display for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T, Tag> Deref for TagIndex<T, Tag> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.index
    }
}

// Tagged indices are mostly used to index into dense per-state vectors.
impl<U, Tag> Index<TagIndex<usize, Tag>> for Vec<U> {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

impl<U, Tag> IndexMut<TagIndex<usize, Tag>> for Vec<U> {
    fn index_mut(&mut self, index: TagIndex<usize, Tag>) -> &mut Self::Output {
        &mut self[index.value()]
    }
}

impl<U, Tag> Index<TagIndex<usize, Tag>> for [U] {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

impl<U, Tag> IndexMut<TagIndex<usize, Tag>> for [U] {
    fn index_mut(&mut self, index: TagIndex<usize, Tag>) -> &mut Self::Output {
        &mut self[index.value()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FirstTag;

    type FirstIndex = TagIndex<usize, FirstTag>;

    #[test]
    fn test_tagged_index_ordering() {
        let mut indices = vec![FirstIndex::new(3), FirstIndex::new(1), FirstIndex::new(2)];
        indices.sort();

        assert_eq!(indices, vec![FirstIndex::new(1), FirstIndex::new(2), FirstIndex::new(3)]);
        assert!(FirstIndex::new(1) == 1usize);
    }

    #[test]
    fn test_tagged_index_into_vec() {
        let mut values = vec!['a', 'b', 'c'];
        values[FirstIndex::new(1)] = 'x';

        assert_eq!(values[FirstIndex::new(1)], 'x');
        assert_eq!(*FirstIndex::new(2) + 1, 3);
    }
}
