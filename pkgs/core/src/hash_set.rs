use std::{borrow::Borrow, fmt, hash::Hash};

use crate::{HashIndex, Result};

/// A set of unique items, backed by a [`HashIndex`] with unit values.
#[derive(Clone)]
pub struct HashIndexSet<T> {
    index: HashIndex<T, ()>,
}

impl<T> HashIndexSet<T> {
    pub fn new() -> Self {
        HashIndexSet {
            index: HashIndex::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.index.keys()
    }
}

impl<T: Hash + Eq> HashIndexSet<T> {
    /// Adds `item`, returning `false` if it was already present.
    pub fn insert(&mut self, item: T) -> bool {
        self.index.put(item, ()).is_none()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(item)
    }

    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.remove(item)
    }
}

impl<T> Default for HashIndexSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashIndexSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashIndexSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: fmt::Debug> fmt::Debug for HashIndexSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_insert_contains_remove() {
        let mut set = HashIndexSet::new();
        assert!(set.insert("a".to_string()));
        assert!(set.insert("b".to_string()));
        assert!(!set.insert("a".to_string()));
        assert_eq!(set.len(), 2);

        assert!(set.contains("a"));
        assert_eq!(set.remove("a"), Ok(()));
        assert_eq!(set.remove("a"), Err(Error::NoSuchKey));
        assert!(!set.contains("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_iter_collapses_duplicates() {
        let set: HashIndexSet<u32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.len(), 3);

        let mut items: Vec<u32> = set.iter().copied().collect();
        items.sort();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
