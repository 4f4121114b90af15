use core::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
};

use hashbrown::{hash_map::DefaultHashBuilder, HashMap, TryReserveError};

use crate::{
    index::{BucketIndex, Keys, Pairs, SingleIndex},
    sorted_vec::sort_unique,
};

/// An iterator over the pairs of a `OneToMany`.
///
/// Left items come in hash order. The right items of each left item come in ascending order.
pub type Iter<'a, L, R> = Pairs<'a, L, R>;

/// A set of (left, right) pairs in which a left item can have any number of right items, but every
/// right item has at most one left item.
///
/// The right items of each left item are kept in a sorted bucket, so [`get_rights`] always
/// returns them in ascending order. Right-to-left lookups are a single hash lookup.
///
/// Inserting a pair never fails. If the right item of the new pair already belongs to another left
/// item, that old pair is evicted first and returned to the caller.
///
/// Left items must implement [`Eq`], [`Hash`] and [`Clone`]. Right items must additionally
/// implement [`Ord`], which must be a strict total order consistent with [`Eq`].
///
/// # Examples
/// ```
/// use binary_relations::OneToMany;
///
/// let mut passengers: OneToMany<&str, &str> = OneToMany::new();
/// passengers.insert("chevy", "zeke");
/// passengers.insert("chevy", "jill");
/// passengers.insert("toyota", "sean");
///
/// // Rights are always sorted
/// assert_eq!(passengers.get_rights("chevy"), &["jill", "zeke"]);
/// assert_eq!(passengers.get_left("sean"), Some(&"toyota"));
///
/// // Sean changes cars, so the toyota is left empty and disappears
/// assert_eq!(passengers.insert("chevy", "sean"), Some(("toyota", "sean")));
/// assert!(!passengers.contains_left("toyota"));
/// assert_eq!(passengers.get_rights("chevy"), &["jill", "sean", "zeke"]);
/// ```
///
/// [`get_rights`]: OneToMany::get_rights
pub struct OneToMany<L, R, St = DefaultHashBuilder> {
    left_to_rights: BucketIndex<L, R, St>,
    right_to_left: SingleIndex<R, L, St>,
}

impl<L, R> OneToMany<L, R, DefaultHashBuilder> {
    /// Creates a new, empty `OneToMany`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty `OneToMany` whose indexes can each hold at least `capacity` items
    /// without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<L, R, S> OneToMany<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    /// Adds a pair to the relation.
    ///
    /// If the right item already belongs to a different left item, that pair is removed and
    /// returned. If the pair is already in the relation, nothing changes.
    pub fn insert(&mut self, left: L, right: R) -> Option<(L, R)> {
        if self.contains(&left, &right) {
            return None;
        }
        let evicted = self.remove_right(&right);
        self.left_to_rights.insert(left.clone(), right.clone());
        self.right_to_left.set(right, left);
        evicted
    }

    /// Same as [`insert`](OneToMany::insert), but takes the pair as a tuple.
    #[inline]
    pub fn insert_pair(&mut self, pair: (L, R)) -> Option<(L, R)> {
        self.insert(pair.0, pair.1)
    }

    /// Inserts every pair of the sequence.
    ///
    /// The result is the same as inserting the pairs one at a time, in order: if several pairs
    /// share a right item, the last of them wins. The work is batched so that each touched bucket
    /// is rewritten once.
    pub fn insert_many<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (L, R)>,
    {
        let mut bound: HashMap<R, L> = HashMap::new();
        for (left, right) in pairs {
            bound.insert(right, left);
        }
        if bound.is_empty() {
            return;
        }

        let mut stale: HashMap<L, Vec<R>> = HashMap::new();
        let mut fresh: HashMap<L, Vec<R>> = HashMap::new();
        for (right, left) in bound {
            match self.right_to_left.get(&right) {
                Some(old) if *old == left => continue,
                Some(old) => stale.entry(old.clone()).or_default().push(right.clone()),
                None => {}
            }
            fresh.entry(left).or_default().push(right);
        }

        for (left, mut rights) in stale {
            sort_unique(&mut rights);
            let removed = self.left_to_rights.remove_many(&left, &rights);
            debug_assert_eq!(removed, rights.len(), "left-to-right index is missing pairs");
        }
        for (left, mut rights) in fresh {
            sort_unique(&mut rights);
            for right in rights.iter() {
                self.right_to_left.set(right.clone(), left.clone());
            }
            self.left_to_rights.insert_many(left, rights);
        }
    }

    /// Inserts every pair of another relation.
    ///
    /// Pairs of this relation whose right item appears in `other` are replaced by the pair from
    /// `other`.
    pub fn insert_all<T>(&mut self, other: &OneToMany<L, R, T>) {
        self.insert_many(other.iter().map(|(l, r)| (l.clone(), r.clone())));
    }

    /// Removes a pair only if the two items are paired with each other. Returns true if the pair
    /// was removed.
    pub fn remove<Q, P>(&mut self, left: &Q, right: &P) -> bool
    where
        L: Borrow<Q>,
        R: Borrow<P>,
        Q: Hash + Eq + ?Sized,
        P: Hash + Ord + ?Sized,
    {
        match self.right_to_left.erase_if(right, left) {
            Some(_) => {
                let removed = self.left_to_rights.remove(left, right);
                debug_assert!(removed, "left-to-right index is missing a pair");
                true
            }
            None => false,
        }
    }

    /// Same as [`remove`](OneToMany::remove), but takes the pair as a tuple.
    #[inline]
    pub fn remove_pair(&mut self, pair: &(L, R)) -> bool {
        self.remove(&pair.0, &pair.1)
    }

    /// Removes every pair of the sequence that is in the relation.
    ///
    /// Removals are grouped by left item so that each touched bucket is rewritten once.
    pub fn remove_many<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'a (L, R)>,
        L: 'a,
        R: 'a,
    {
        let mut doomed: HashMap<&L, Vec<R>> = HashMap::new();
        for (left, right) in pairs {
            if self.right_to_left.erase_if(right, left).is_some() {
                doomed.entry(left).or_default().push(right.clone());
            }
        }
        for (left, mut rights) in doomed {
            rights.sort_unstable();
            let removed = self.left_to_rights.remove_many(left, &rights);
            debug_assert_eq!(removed, rights.len(), "left-to-right index is missing pairs");
        }
    }

    /// Removes every pair that is in both this relation and the other.
    ///
    /// Each bucket of `other` is subtracted from the matching bucket of this relation in a
    /// single pass.
    pub fn remove_all<T>(&mut self, other: &OneToMany<L, R, T>) {
        for (left, rights) in other.left_to_rights.buckets() {
            if !self.left_to_rights.contains_key(left) {
                continue;
            }
            let mut unbound = 0;
            for right in rights.iter() {
                if self.right_to_left.erase_if(right, left).is_some() {
                    unbound += 1;
                }
            }
            let removed = self.left_to_rights.remove_many(left, rights);
            debug_assert_eq!(removed, unbound, "indexes disagree on a left item");
        }
    }

    /// Removes the given left item and all of its pairs. Returns the left item and the right
    /// items it was paired with.
    pub fn remove_left<Q>(&mut self, left: &Q) -> Option<(L, Vec<R>)>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (left, rights) = self.left_to_rights.take(left)?;
        for right in rights.iter() {
            let mirror = self.right_to_left.erase(right);
            debug_assert!(mirror.is_some(), "right-to-left index is missing a pair");
        }
        Some((left, rights))
    }

    /// Removes the pair that holds the given right item, and returns it.
    pub fn remove_right<P>(&mut self, right: &P) -> Option<(L, R)>
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        let (right, left) = self.right_to_left.erase(right)?;
        let removed = self.left_to_rights.remove::<L, R>(&left, &right);
        debug_assert!(removed, "left-to-right index is missing a pair");
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
        match self.right_to_left.get(right) {
            Some(paired) => <L as Borrow<Q>>::borrow(paired) == left,
            None => false,
        }
    }

    /// Determines if the left item has any pairs.
    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left_to_rights.contains_key(left)
    }

    /// Determines if the right item is in the relation.
    pub fn contains_right<P>(&self, right: &P) -> bool
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        self.right_to_left.contains_key(right)
    }

    /// Gets the right items paired with the given left item, in ascending order. Unknown left
    /// items give an empty slice.
    pub fn get_rights<Q>(&self, left: &Q) -> &[R]
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left_to_rights.values_of(left)
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
        self.left_to_rights.reserve(additional)
    }

    /// Reserves room for at least `additional` more right items.
    pub fn reserve_right(&mut self, additional: usize) {
        self.right_to_left.reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more left items.
    pub fn try_reserve_left(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.left_to_rights.try_reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more right items.
    pub fn try_reserve_right(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.right_to_left.try_reserve(additional)
    }

    /// Shrinks both indexes, and every bucket, as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.left_to_rights.shrink_to_fit();
        self.right_to_left.shrink_to_fit();
    }
}

impl<L, R, S> OneToMany<L, R, S> {
    /// Creates a `OneToMany` that uses the given hasher for both of its indexes.
    pub fn with_hasher(hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_rights: BucketIndex::with_hasher(hash_builder.clone()),
            right_to_left: SingleIndex::with_hasher(hash_builder),
        }
    }

    /// Creates a `OneToMany` whose indexes can each hold at least `capacity` items without
    /// reallocating, and that uses the given hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_rights: BucketIndex::with_capacity_and_hasher(capacity, hash_builder.clone()),
            right_to_left: SingleIndex::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns a reference to the [`BuildHasher`] used by the relation
    pub fn hasher(&self) -> &S {
        self.left_to_rights.hasher()
    }

    /// Returns the number of pairs in the relation.
    pub fn len(&self) -> usize {
        // Every pair has its own right item
        self.right_to_left.len()
    }

    /// Returns the number of distinct left items.
    pub fn len_left(&self) -> usize {
        self.left_to_rights.len_keys()
    }

    /// Returns the number of right items. Always equal to [`len`](OneToMany::len).
    pub fn len_right(&self) -> usize {
        self.right_to_left.len()
    }

    /// Returns true if the relation holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of left items the relation can hold without reallocating.
    pub fn capacity_left(&self) -> usize {
        self.left_to_rights.capacity()
    }

    /// Returns the number of right items the relation can hold without reallocating.
    pub fn capacity_right(&self) -> usize {
        self.right_to_left.capacity()
    }

    /// Removes every pair while keeping the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.left_to_rights.clear();
        self.right_to_left.clear();
    }

    /// Iterates over every pair in the relation.
    pub fn iter(&self) -> Iter<'_, L, R> {
        self.left_to_rights.iter()
    }

    /// Iterates over every left item in the relation.
    pub fn iter_left(&self) -> Keys<'_, L, Vec<R>> {
        self.left_to_rights.keys()
    }

    /// Iterates over every right item in the relation.
    pub fn iter_right(&self) -> Keys<'_, R, L> {
        self.right_to_left.keys()
    }
}

impl<L, R, S> Clone for OneToMany<L, R, S>
where
    L: Clone,
    R: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left_to_rights: self.left_to_rights.clone(),
            right_to_left: self.right_to_left.clone(),
        }
    }
}

impl<L, R, S> Default for OneToMany<L, R, S>
where
    S: Default + Clone,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<L, R, S> fmt::Debug for OneToMany<L, R, S>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<L, R, S> PartialEq for OneToMany<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(l, r)| other.contains(l, r))
    }
}

impl<L, R, S> Eq for OneToMany<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
}

impl<L, R, S> Extend<(L, R)> for OneToMany<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    #[inline]
    fn extend<T: IntoIterator<Item = (L, R)>>(&mut self, iter: T) {
        self.insert_many(iter)
    }
}

impl<L, R> FromIterator<(L, R)> for OneToMany<L, R>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        let mut digest = OneToMany::default();
        digest.extend(iter);
        digest
    }
}

impl<'a, L, R, S> IntoIterator for &'a OneToMany<L, R, S> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
