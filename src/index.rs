//! Hash indexes that back each direction of a relation.
//!
//! A relation owns two of these, one per direction. The "many" side of a relation is a
//! [`BucketIndex`], which maps each key to a sorted, non-empty bucket of values. The "one" side is
//! a [`SingleIndex`], which maps each key to exactly one value. Neither index knows about its
//! mirror; keeping the two directions in agreement is the job of the relation that owns them.

use core::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
    slice,
};

use hashbrown::{
    hash_map::{self, DefaultHashBuilder},
    HashMap, TryReserveError,
};

use crate::sorted_vec::*;

/// A hash map from keys to sorted buckets of values.
///
/// A bucket is never empty: removing the last value of a bucket removes its key. The index also
/// keeps count of the total number of values across all buckets.
pub struct BucketIndex<K, V, S = DefaultHashBuilder> {
    map: HashMap<K, Vec<V>, S>,
    values: usize,
}

impl<K, V, S> BucketIndex<K, V, S> {
    /// Creates an empty index that uses the given hasher.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
            values: 0,
        }
    }

    /// Creates an empty index with room for at least `capacity` keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            values: 0,
        }
    }

    /// Returns a reference to the index's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Returns the number of keys, i.e. the number of non-empty buckets.
    pub fn len_keys(&self) -> usize {
        self.map.len()
    }

    /// Returns the number of values across all buckets.
    pub fn len_values(&self) -> usize {
        self.values
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of keys the index can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes every bucket while keeping the allocated memory.
    pub fn clear(&mut self) {
        self.map.clear();
        self.values = 0;
    }

    /// Iterates over every (key, value) combination, bucket by bucket.
    pub fn iter(&self) -> Pairs<'_, K, V> {
        Pairs {
            outer: self.map.iter(),
            current: None,
            remaining: self.values,
        }
    }

    /// Iterates over every key in the index.
    pub fn keys(&self) -> Keys<'_, K, Vec<V>> {
        Keys {
            iter: self.map.keys(),
        }
    }

    /// Iterates over every key with its bucket.
    pub fn buckets(&self) -> hash_map::Iter<'_, K, Vec<V>> {
        self.map.iter()
    }
}

impl<K, V, S> BucketIndex<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the bucket of `key`, creating an empty one if it doesn't exist.
    ///
    /// Callers must either add to the bucket or call [`erase_if_empty`] afterwards.
    ///
    /// [`erase_if_empty`]: BucketIndex::erase_if_empty
    fn get_or_create(&mut self, key: K) -> &mut Vec<V> {
        self.map.entry(key).or_default()
    }

    /// Removes the bucket of `key` if it holds no values. Returns true if a bucket was removed.
    pub fn erase_if_empty<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(key) {
            Some(bucket) if bucket.is_empty() => self.map.remove(key).is_some(),
            _ => false,
        }
    }

    /// Returns the sorted bucket of `key`. Missing keys have an empty bucket.
    pub fn values_of<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(key) {
            Some(bucket) => bucket.as_slice(),
            None => &[],
        }
    }

    /// Determines if `key` has a bucket.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Reserves room for at least `additional` more keys.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more keys.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.map.try_reserve(additional)
    }

    /// Shrinks the key table and every bucket as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
        for bucket in self.map.values_mut() {
            bucket.shrink_to_fit();
        }
    }

    /// Removes the bucket of `key` and returns it along with the stored key.
    pub fn take<Q>(&mut self, key: &Q) -> Option<(K, Vec<V>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (key, bucket) = self.map.remove_entry(key)?;
        self.values -= bucket.len();
        Some((key, bucket))
    }
}

impl<K, V, S> BucketIndex<K, V, S>
where
    K: Eq + Hash,
    V: Ord,
    S: BuildHasher,
{
    /// Determines if `value` is in the bucket of `key`.
    pub fn contains<Q, P>(&self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Borrow<P>,
        P: Ord + ?Sized,
    {
        contains_sorted(self.values_of(key), value)
    }

    /// Adds `value` to the bucket of `key`. Returns false if it was already there.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = insert_sorted(self.get_or_create(key), value);
        if inserted {
            self.values += 1;
        }
        inserted
    }

    /// Removes `value` from the bucket of `key`, dropping the bucket if it empties. Returns false
    /// if the value wasn't there.
    pub fn remove<Q, P>(&mut self, key: &Q, value: &P) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Borrow<P>,
        P: Ord + ?Sized,
    {
        let removed = match self.map.get_mut(key) {
            Some(bucket) => remove_sorted(bucket, value),
            None => false,
        };
        if removed {
            self.values -= 1;
            self.erase_if_empty(key);
        }
        removed
    }

    /// Merges a sorted batch of values into the bucket of `key`. Returns how many were new.
    pub fn insert_many(&mut self, key: K, values: Vec<V>) -> usize {
        if values.is_empty() {
            return 0;
        }
        let added = insert_sorted_many(self.get_or_create(key), values);
        self.values += added;
        added
    }

    /// Removes a sorted batch of values from the bucket of `key`, dropping the bucket if it
    /// empties. Returns how many were removed.
    pub fn remove_many<Q>(&mut self, key: &Q, values: &[V]) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = match self.map.get_mut(key) {
            Some(bucket) => remove_sorted_many(bucket, values),
            None => 0,
        };
        if removed > 0 {
            self.values -= removed;
            self.erase_if_empty(key);
        }
        removed
    }
}

impl<K, V, S> Clone for BucketIndex<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            values: self.values,
        }
    }
}

impl<K, V, S> fmt::Debug for BucketIndex<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// A hash map from keys to exactly one value.
pub struct SingleIndex<K, V, S = DefaultHashBuilder> {
    map: HashMap<K, V, S>,
}

impl<K, V, S> SingleIndex<K, V, S> {
    /// Creates an empty index that uses the given hasher.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty index with room for at least `capacity` keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns a reference to the index's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of keys the index can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes every entry while keeping the allocated memory.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over every (key, value) entry.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.map.iter()
    }

    /// Iterates over every key in the index.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            iter: self.map.keys(),
        }
    }
}

impl<K, V, S> SingleIndex<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the value of `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Determines if `key` has a value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Sets the value of `key`, returning the value it replaced.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Removes `key` and returns its entry.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove_entry(key)
    }

    /// Removes `key` only if its value equals `expected`.
    pub fn erase_if<Q, P>(&mut self, key: &Q, expected: &P) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Borrow<P>,
        P: Eq + ?Sized,
    {
        match self.map.get(key) {
            Some(value) if <V as Borrow<P>>::borrow(value) == expected => {
                self.map.remove_entry(key)
            }
            _ => None,
        }
    }

    /// Reserves room for at least `additional` more keys.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more keys.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.map.try_reserve(additional)
    }

    /// Shrinks the index as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit()
    }
}

impl<K, V, S> Clone for SingleIndex<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for SingleIndex<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// An iterator over the (key, value) pairs of a [`BucketIndex`].
///
/// Keys come in the index's hash order. The values of each key come in ascending order.
pub struct Pairs<'a, K, V> {
    outer: hash_map::Iter<'a, K, Vec<V>>,
    current: Option<(&'a K, slice::Iter<'a, V>)>,
    remaining: usize,
}

impl<K, V> Clone for Pairs<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Pairs<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Pairs<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, inner)) = &mut self.current {
                if let Some(value) = inner.next() {
                    self.remaining -= 1;
                    return Some((*key, value));
                }
            }
            let (key, bucket) = self.outer.next()?;
            self.current = Some((key, bucket.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Pairs<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Pairs<'_, K, V> {}

/// An iterator over the keys of an index.
pub struct Keys<'a, K, V> {
    iter: hash_map::Keys<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}
