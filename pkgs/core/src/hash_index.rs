use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    iter::FusedIterator,
    mem,
};

use log::trace;

use crate::{Error, Result};

/// Deterministic hasher, so that iteration order is reproducible between runs.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// The pairs whose keys hash to the same bucket.
/// Kept in insertion order so that iteration is deterministic.
#[derive(Clone)]
struct Bucket<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K, V> Bucket<K, V> {
    const fn new() -> Self {
        Bucket { pairs: Vec::new() }
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.pairs.iter().position(|(k, _)| k.borrow() == key)
    }

    /// Inserts the pair, or overwrites the value of an existing equal key.
    fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Eq,
    {
        match self.position(&key) {
            Some(pos) => Some(mem::replace(&mut self.pairs[pos].1, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }
}

/// A hash map that resolves collisions by chaining.
///
/// The bucket array starts at [`HashIndex::DEFAULT_CAPACITY`] buckets and doubles
/// (rehashing every pair) as soon as `len >= capacity * load_factor`. It never shrinks.
///
/// Invariants:
/// - every key lives in exactly one bucket, namely `hash(key) % capacity`
/// - `len` is the total number of pairs across all buckets
#[derive(Clone)]
pub struct HashIndex<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    load_factor: f64,
    hash_builder: S,
}

impl<K, V> HashIndex<K, V> {
    pub const DEFAULT_CAPACITY: usize = 16;
    pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
    /// Smallest accepted load factor. Below it, growing to satisfy the factor needs
    /// more buckets than can be addressed.
    pub const MIN_LOAD_FACTOR: f64 = 0.01;

    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty index that resizes once `len >= capacity * load_factor`.
    /// The load factor must be finite and at least [`Self::MIN_LOAD_FACTOR`].
    pub fn with_load_factor(load_factor: f64) -> Result<Self> {
        if !(load_factor.is_finite() && load_factor >= Self::MIN_LOAD_FACTOR) {
            return Err(Error::InvalidArgument(format!(
                "load factor must be a finite number of at least {}, got {}",
                Self::MIN_LOAD_FACTOR,
                load_factor
            )));
        }

        let mut index = Self::new();
        index.load_factor = load_factor;
        Ok(index)
    }
}

impl<K, V, S> HashIndex<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        HashIndex {
            buckets: empty_buckets(HashIndex::<K, V>::DEFAULT_CAPACITY),
            len: 0,
            load_factor: HashIndex::<K, V>::DEFAULT_LOAD_FACTOR,
            hash_builder,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Iterates over all pairs, bucket by bucket in ascending bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            slot: 0,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> HashIndex<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        bucket_for(&self.hash_builder, key, self.buckets.len())
    }

    fn bucket_of<Q>(&self, key: &Q) -> &Bucket<K, V>
    where
        Q: Hash + ?Sized,
    {
        &self.buckets[self.bucket_index(key)]
    }

    /// Returns the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_of(key);
        bucket
            .position(key)
            .map(|pos| &bucket.pairs[pos].1)
            .ok_or(Error::NoSuchKey)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        match bucket.position(key) {
            Some(pos) => Ok(&mut bucket.pairs[pos].1),
            None => Err(Error::NoSuchKey),
        }
    }

    /// Returns a copy of the value stored for `key`, or `default` if there is none.
    pub fn get_or_default<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_of(key).position(key).is_some()
    }

    /// Inserts `key -> value`, returning the previous value if `key` was already present.
    ///
    /// If the insertion pushes the index over its load factor, the bucket array is
    /// doubled and every pair is rehashed before returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let previous = self.buckets[idx].insert(key, value);

        if previous.is_none() {
            self.len += 1;
            if self.len as f64 >= self.buckets.len() as f64 * self.load_factor {
                self.grow();
            }
        }

        previous
    }

    /// Removes `key` and returns its value. The bucket array is never shrunk.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.position(key).ok_or(Error::NoSuchKey)?;

        self.len -= 1;
        Ok(bucket.pairs.remove(pos).1)
    }

    /// Doubles the bucket array (repeatedly, for tiny load factors) and rehashes
    /// every pair into it.
    fn grow(&mut self) {
        let mut new_capacity = self.buckets.len() * 2;
        while self.len as f64 >= new_capacity as f64 * self.load_factor {
            new_capacity *= 2;
        }
        trace!(
            "Growing hash index from {} to {} buckets ({} pairs)",
            self.buckets.len(),
            new_capacity,
            self.len
        );

        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, value) in old.into_iter().flat_map(|bucket| bucket.pairs) {
            let idx = bucket_for(&self.hash_builder, &key, new_capacity);
            self.buckets[idx].pairs.push((key, value));
        }
    }

    /// Verifies the placement and size invariants.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut counted = 0;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (pos, (key, _)) in bucket.pairs.iter().enumerate() {
                let expected = self.bucket_index(key);
                if expected != idx {
                    return Err(format!("key in bucket {} belongs in bucket {}", idx, expected));
                }
                if bucket.pairs[..pos].iter().any(|(k, _)| k == key) {
                    return Err(format!("duplicate key in bucket {}", idx));
                }
                counted += 1;
            }
        }

        if counted != self.len {
            return Err(format!("len is {} but {} pairs are stored", self.len, counted));
        }
        if self.len as f64 >= self.buckets.len() as f64 * self.load_factor {
            return Err(format!(
                "{} pairs in {} buckets exceeds load factor {}",
                self.len,
                self.buckets.len(),
                self.load_factor
            ));
        }
        Ok(())
    }
}

#[inline]
fn bucket_for<S, Q>(hash_builder: &S, key: &Q, capacity: usize) -> usize
where
    S: BuildHasher,
    Q: Hash + ?Sized,
{
    (hash_builder.hash_one(key) % capacity as u64) as usize
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    (0..capacity).map(|_| Bucket::new()).collect()
}

impl<K, V> Default for HashIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashIndex<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashIndex<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = HashIndex::new();
        index.extend(iter);
        index
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashIndex<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Single-pass cursor over the pairs of a [`HashIndex`].
///
/// Walks buckets in ascending order and yields every pair of a bucket before moving
/// on. Empty buckets are skipped in a loop, never by recursion.
pub struct Iter<'a, K, V> {
    buckets: &'a [Bucket<K, V>],
    bucket: usize,
    slot: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bucket) = self.buckets.get(self.bucket) {
            if let Some((key, value)) = bucket.pairs.get(self.slot) {
                self.slot += 1;
                self.remaining -= 1;
                return Some((key, value));
            }
            self.bucket += 1;
            self.slot = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use fastrand::Rng;
    use std::collections::HashSet;

    #[test]
    fn test_put_get_overwrite() {
        let mut index = HashIndex::new();
        assert_eq!(index.put("a", 1), None);
        assert_eq!(index.put("b", 2), None);
        assert_eq!(index.put("a", 3), Some(1));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a"), Ok(&3));
        assert_eq!(index.get("b"), Ok(&2));
        assert_eq!(index.get("c"), Err(Error::NoSuchKey));
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut index: HashIndex<String, usize> = HashIndex::new();
        index.put("apple".to_string(), 5);

        assert!(index.contains_key("apple"));
        assert_eq!(index.get("apple"), Ok(&5));
        assert_eq!(index.get_or_default("pear", 0), 0);
        assert_eq!(index.get_or_default("apple", 0), 5);
    }

    #[test]
    fn test_remove() {
        let mut index = HashIndex::new();
        index.put(1, "one");
        index.put(2, "two");

        assert_eq!(index.remove(&1), Ok("one"));
        assert_eq!(index.remove(&1), Err(Error::NoSuchKey));
        assert!(!index.contains_key(&1));
        assert_eq!(index.len(), 1);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_get_mut() {
        let mut index = HashIndex::new();
        index.put('x', 1.0);
        *index.get_mut(&'x').unwrap() += 0.5;

        assert_eq!(index.get(&'x'), Ok(&1.5));
        assert_eq!(index.get_mut(&'y'), Err(Error::NoSuchKey));
    }

    #[test]
    fn test_resize_at_load_factor() {
        let mut index = HashIndex::new();
        // 16 buckets * 0.75 => the 12th insertion triggers the resize
        for i in 0..11 {
            index.put(i, i);
        }
        assert_eq!(index.capacity(), 16);

        index.put(11, 11);
        assert_eq!(index.capacity(), 32);

        // Overwrites never resize
        for i in 0..12 {
            index.put(i, i * 2);
        }
        assert_eq!(index.capacity(), 32);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_resize_preserves_content() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        let mut index = HashIndex::new();
        let mut expected = Vec::new();
        for i in 0..10_000u64 {
            let key = rng.u64(..);
            if index.contains_key(&key) {
                continue;
            }
            index.put(key, i);
            expected.push((key, i));
            assert_eq!(index.len(), expected.len());
        }

        index.check_invariants().unwrap();
        for (key, value) in &expected {
            assert_eq!(index.get(key), Ok(value));
        }
    }

    #[test]
    fn test_remove_never_shrinks() {
        let mut index = HashIndex::new();
        for i in 0..100 {
            index.put(i, ());
        }
        let capacity = index.capacity();

        for i in 0..100 {
            index.remove(&i).unwrap();
        }
        assert!(index.is_empty());
        assert_eq!(index.capacity(), capacity);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_iter_yields_every_pair_once() {
        let mut index = HashIndex::new();
        for i in 0..500 {
            index.put(i, i * 10);
        }
        for i in (0..500).step_by(3) {
            index.remove(&i).unwrap();
        }

        let iter = index.iter();
        assert_eq!(iter.len(), index.len());

        let mut seen = HashSet::new();
        for (key, value) in iter {
            assert_eq!(*value, key * 10);
            assert!(seen.insert(*key), "key {} yielded twice", key);
        }
        assert_eq!(seen.len(), index.len());
    }

    #[test]
    fn test_iter_ascending_buckets() {
        let index: HashIndex<u32, ()> = (0..200).map(|i| (i, ())).collect();

        let buckets: Vec<usize> = index.keys().map(|k| index.bucket_index(k)).collect();
        assert!(buckets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_iter_exhausted() {
        let mut index = HashIndex::new();
        let mut iter = index.iter();
        assert_eq!(iter.next(), None);

        index.put(7, 'a');
        let mut iter = index.iter();
        assert_eq!(iter.next(), Some((&7, &'a')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_sparse_table() {
        // Many empty buckets between the few live pairs
        let mut index = HashIndex::new();
        for i in 0..10_000 {
            index.put(i, ());
        }
        for i in 0..9_998 {
            index.remove(&i).unwrap();
        }
        assert_eq!(index.iter().count(), 2);
    }

    #[test]
    fn test_with_load_factor() {
        let cases: Vec<(f64, bool)> = vec![
            (0.75, true),
            (2.0, true),
            (0.01, true),
            (0.0, false),
            (0.009, false),
            (1e-9, false),
            (1e-300, false),
            (-1.0, false),
            (f64::NAN, false),
            (f64::INFINITY, false),
        ];

        for (load_factor, ok) in cases {
            let res = HashIndex::<u8, u8>::with_load_factor(load_factor);
            assert_eq!(res.is_ok(), ok, "load factor {}", load_factor);
        }

        let mut dense = HashIndex::with_load_factor(2.0).unwrap();
        for i in 0..31 {
            dense.put(i, ());
        }
        assert_eq!(dense.capacity(), 16);
        dense.put(31, ());
        assert_eq!(dense.capacity(), 32);
        dense.check_invariants().unwrap();

        // Each resize doubles until the pairs fit the sparse factor again
        let mut sparse = HashIndex::with_load_factor(0.01).unwrap();
        sparse.put(1u32, ());
        assert_eq!(sparse.capacity(), 128);
        sparse.put(2, ());
        assert_eq!(sparse.capacity(), 256);
        sparse.check_invariants().unwrap();
    }
}
