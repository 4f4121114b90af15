use core::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};

use hashbrown::{
    hash_map::{self, DefaultHashBuilder},
    TryReserveError,
};

use crate::{
    index::{Keys, SingleIndex},
    optionals::{Evicted, OptionalPair},
};

/// A set of (left, right) pairs in which every left item has at most one right item and every
/// right item has at most one left item.
///
/// `OneToOne` is a bijection between the left items and right items it holds. Lookups in either
/// direction are a single hash lookup. It is backed by two hash maps, left-to-right and
/// right-to-left, which are kept in agreement by every operation.
///
/// Inserting a pair never fails. If the left item of the new pair is already paired, or the right
/// item is, those old pairs are evicted first and returned to the caller.
///
/// Both item types must implement [`Eq`], [`Hash`] and [`Clone`]: each item is stored once in
/// each direction. As with other hashed collections, it is a logic error for an item to be
/// modified in such a way that its hash or its equality changes while it is in the relation.
///
/// # Examples
/// ```
/// use binary_relations::{OneToOne, OptionalPair::*};
///
/// let mut names: OneToOne<&str, u64> = OneToOne::new();
/// names.insert("one", 1);
/// names.insert("two", 2);
///
/// // Get a value from either side!
/// assert_eq!(names.get_right("one"), Some(&1));
/// assert_eq!(names.get_left(&2), Some(&"two"));
///
/// // Pairing 1 with a new name evicts its old pair
/// assert_eq!(names.insert("uno", 1), SomeRight(("one", 1)));
/// assert_eq!(names.get_right("one"), None);
/// assert_eq!(names.get_left(&1), Some(&"uno"));
/// assert_eq!(names.len(), 2);
/// ```
pub struct OneToOne<L, R, St = DefaultHashBuilder> {
    left_to_right: SingleIndex<L, R, St>,
    right_to_left: SingleIndex<R, L, St>,
}

impl<L, R> OneToOne<L, R, DefaultHashBuilder> {
    /// Creates a new, empty `OneToOne`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty `OneToOne` that can hold at least `capacity` pairs without
    /// reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<L, R, S> OneToOne<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Adds a pair to the relation.
    ///
    /// Should the left item already be paired with a different right item, that pair is removed
    /// and returned as `SomeLeft`. The same goes for the right item, returned as `SomeRight`. If
    /// the pair is already in the relation, nothing changes and `Neither` is returned.
    pub fn insert(&mut self, left: L, right: R) -> Evicted<L, R> {
        if self.contains(&left, &right) {
            return OptionalPair::Neither;
        }
        // Stale mirror entries go before anything new is written
        let by_left = self.remove_left(&left);
        let by_right = self.remove_right(&right);
        self.right_to_left.set(right.clone(), left.clone());
        self.left_to_right.set(left, right);
        OptionalPair::from((by_left, by_right))
    }

    /// Same as [`insert`](OneToOne::insert), but takes the pair as a tuple.
    #[inline]
    pub fn insert_pair(&mut self, pair: (L, R)) -> Evicted<L, R> {
        self.insert(pair.0, pair.1)
    }

    /// Inserts every pair of the sequence, in order.
    ///
    /// Pairs later in the sequence take priority: when two pairs share a left or a right item,
    /// the one inserted last is the one that remains.
    pub fn insert_many<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (L, R)>,
    {
        for (left, right) in pairs {
            self.insert(left, right);
        }
    }

    /// Inserts every pair of another relation, in that relation's iteration order.
    pub fn insert_all<T>(&mut self, other: &OneToOne<L, R, T>)
    where
        T: BuildHasher,
    {
        self.reserve_left(other.len());
        self.reserve_right(other.len());
        for (left, right) in other.iter() {
            self.insert(left.clone(), right.clone());
        }
    }

    /// Removes a pair only if the two items are paired with each other. Returns true if the pair
    /// was removed.
    pub fn remove<Q, P>(&mut self, left: &Q, right: &P) -> bool
    where
        L: Borrow<Q>,
        R: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Hash + Eq + ?Sized,
    {
        match self.left_to_right.erase_if(left, right) {
            Some(_) => {
                let mirror = self.right_to_left.erase(right);
                debug_assert!(mirror.is_some(), "right-to-left index is missing a pair");
                true
            }
            None => false,
        }
    }

    /// Same as [`remove`](OneToOne::remove), but takes the pair as a tuple.
    #[inline]
    pub fn remove_pair(&mut self, pair: &(L, R)) -> bool {
        self.remove(&pair.0, &pair.1)
    }

    /// Removes every pair of the sequence that is in the relation.
    pub fn remove_many<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'a (L, R)>,
        L: 'a,
        R: 'a,
    {
        for pair in pairs {
            self.remove_pair(pair);
        }
    }

    /// Removes every pair that is in both this relation and the other.
    pub fn remove_all<T>(&mut self, other: &OneToOne<L, R, T>)
    where
        T: BuildHasher,
    {
        for (left, right) in other.iter() {
            self.remove(left, right);
        }
    }

    /// Removes the given left item along with its paired right item, and returns the pair.
    pub fn remove_left<Q>(&mut self, left: &Q) -> Option<(L, R)>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (left, right) = self.left_to_right.erase(left)?;
        let mirror = self.right_to_left.erase(&right);
        debug_assert!(mirror.is_some(), "right-to-left index is missing a pair");
        Some((left, right))
    }

    /// Removes the given right item along with its paired left item, and returns the pair.
    pub fn remove_right<P>(&mut self, right: &P) -> Option<(L, R)>
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        let (right, left) = self.right_to_left.erase(right)?;
        let mirror = self.left_to_right.erase(&left);
        debug_assert!(mirror.is_some(), "left-to-right index is missing a pair");
        Some((left, right))
    }

    /// Determines if two items are paired with one another.
    pub fn contains<Q, P>(&self, left: &Q, right: &P) -> bool
    where
        L: Borrow<Q>,
        R: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Hash + Eq + ?Sized,
    {
        match self.left_to_right.get(left) {
            Some(paired) => <R as Borrow<P>>::borrow(paired) == right,
            None => false,
        }
    }

    /// Determines if the left item is in the relation.
    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left_to_right.contains_key(left)
    }

    /// Determines if the right item is in the relation.
    pub fn contains_right<P>(&self, right: &P) -> bool
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        self.right_to_left.contains_key(right)
    }

    /// Gets the right item paired with the given left item.
    pub fn get_right<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left_to_right.get(left)
    }

    /// Gets the left item paired with the given right item.
    pub fn get_left<P>(&self, right: &P) -> Option<&L>
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        self.right_to_left.get(right)
    }

    /// Reserves room for at least `additional` more left items.
    pub fn reserve_left(&mut self, additional: usize) {
        self.left_to_right.reserve(additional)
    }

    /// Reserves room for at least `additional` more right items.
    pub fn reserve_right(&mut self, additional: usize) {
        self.right_to_left.reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more left items.
    pub fn try_reserve_left(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.left_to_right.try_reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more right items.
    pub fn try_reserve_right(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.right_to_left.try_reserve(additional)
    }

    /// Shrinks the capacity of both indexes as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.left_to_right.shrink_to_fit();
        self.right_to_left.shrink_to_fit();
    }
}

impl<L, R, S> OneToOne<L, R, S> {
    /// Creates a `OneToOne` that uses the given hasher for both of its indexes.
    pub fn with_hasher(hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_right: SingleIndex::with_hasher(hash_builder.clone()),
            right_to_left: SingleIndex::with_hasher(hash_builder),
        }
    }

    /// Creates a `OneToOne` that can hold at least `capacity` pairs without reallocating, and
    /// that uses the given hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_right: SingleIndex::with_capacity_and_hasher(capacity, hash_builder.clone()),
            right_to_left: SingleIndex::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns a reference to the [`BuildHasher`] used by the relation
    pub fn hasher(&self) -> &S {
        self.left_to_right.hasher()
    }

    /// Returns the number of pairs in the relation.
    pub fn len(&self) -> usize {
        // Both sides always hold the same number of items
        self.left_to_right.len()
    }

    /// Returns the number of left items. Always equal to [`len`](OneToOne::len).
    pub fn len_left(&self) -> usize {
        self.left_to_right.len()
    }

    /// Returns the number of right items. Always equal to [`len`](OneToOne::len).
    pub fn len_right(&self) -> usize {
        self.right_to_left.len()
    }

    /// Returns true if the relation holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of left items the relation can hold without reallocating.
    pub fn capacity_left(&self) -> usize {
        self.left_to_right.capacity()
    }

    /// Returns the number of right items the relation can hold without reallocating.
    pub fn capacity_right(&self) -> usize {
        self.right_to_left.capacity()
    }

    /// Removes every pair while keeping the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.left_to_right.clear();
        self.right_to_left.clear();
    }

    /// Iterates over every pair in the relation. The order is unspecified.
    pub fn iter(&self) -> Iter<'_, L, R> {
        Iter {
            iter: self.left_to_right.iter(),
        }
    }

    /// Iterates over every left item in the relation.
    pub fn iter_left(&self) -> Keys<'_, L, R> {
        self.left_to_right.keys()
    }

    /// Iterates over every right item in the relation.
    pub fn iter_right(&self) -> Keys<'_, R, L> {
        self.right_to_left.keys()
    }
}

impl<L, R, S> Clone for OneToOne<L, R, S>
where
    L: Clone,
    R: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left_to_right: self.left_to_right.clone(),
            right_to_left: self.right_to_left.clone(),
        }
    }
}

impl<L, R, S> Default for OneToOne<L, R, S>
where
    S: Default + Clone,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<L, R, S> fmt::Debug for OneToOne<L, R, S>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<L, R, S> PartialEq for OneToOne<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(l, r)| other.contains(l, r))
    }
}

impl<L, R, S> Eq for OneToOne<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
    S: BuildHasher,
{
}

impl<L, R, S> Extend<(L, R)> for OneToOne<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
    S: BuildHasher,
{
    #[inline]
    fn extend<T: IntoIterator<Item = (L, R)>>(&mut self, iter: T) {
        self.insert_many(iter)
    }
}

impl<L, R> FromIterator<(L, R)> for OneToOne<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        let mut digest = OneToOne::default();
        digest.extend(iter);
        digest
    }
}

impl<'a, L, R, S> IntoIterator for &'a OneToOne<L, R, S> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the pairs of a `OneToOne`.
pub struct Iter<'a, L, R> {
    iter: hash_map::Iter<'a, L, R>,
}

impl<L, R> Clone for Iter<'_, L, R> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<L, R> fmt::Debug for Iter<'_, L, R>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, L, R> Iterator for Iter<'a, L, R> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<L, R> ExactSizeIterator for Iter<'_, L, R> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<L, R> FusedIterator for Iter<'_, L, R> {}
