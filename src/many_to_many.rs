use core::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
};

use hashbrown::{hash_map::DefaultHashBuilder, HashMap, TryReserveError};

use crate::{
    index::{BucketIndex, Keys, Pairs},
    sorted_vec::{contains_sorted, sort_unique},
};

/// An iterator over the pairs of a `ManyToMany`.
///
/// Left items come in hash order. The right items of each left item come in ascending order.
pub type Iter<'a, L, R> = Pairs<'a, L, R>;

/// A set of (left, right) pairs with no limit on how many items either side may be paired with.
///
/// Each direction is a hash map from an item to a sorted bucket of the items it is paired with.
/// The two directions mirror each other: `r` is in the bucket of `l` if and only if `l` is in the
/// bucket of `r`.
///
/// Both item types must implement [`Ord`], [`Hash`] and [`Clone`]. Their [`Ord`] must be a strict
/// total order consistent with [`Eq`].
///
/// # Examples
/// ```
/// use binary_relations::ManyToMany;
///
/// let mut likes: ManyToMany<u64, &str> = ManyToMany::new();
/// likes.insert(1, "x");
/// likes.insert(1, "y");
/// likes.insert(2, "y");
/// assert_eq!(likes.len(), 3);
/// assert_eq!(likes.get_rights(&1), &["x", "y"]);
/// assert_eq!(likes.get_lefts("y"), &[1, 2]);
///
/// // Subtract one relation from another
/// let unliked: ManyToMany<u64, &str> = [(1, "y")].into_iter().collect();
/// likes.remove_all(&unliked);
/// assert_eq!(likes.len(), 2);
/// assert!(likes.contains(&1, "x"));
/// assert!(likes.contains(&2, "y"));
/// assert!(!likes.contains(&1, "y"));
/// ```
pub struct ManyToMany<L, R, St = DefaultHashBuilder> {
    left_to_rights: BucketIndex<L, R, St>,
    right_to_lefts: BucketIndex<R, L, St>,
}

impl<L, R> ManyToMany<L, R, DefaultHashBuilder> {
    /// Creates a new, empty `ManyToMany`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty `ManyToMany` whose indexes can each hold at least `capacity` items
    /// without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<L, R, S> ManyToMany<L, R, S>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    /// Adds a pair to the relation. Returns false if the pair was already there.
    pub fn insert(&mut self, left: L, right: R) -> bool {
        if self.contains(&left, &right) {
            return false;
        }
        self.left_to_rights.insert(left.clone(), right.clone());
        let mirrored = self.right_to_lefts.insert(right, left);
        debug_assert!(mirrored, "right-to-left index already held a pair");
        true
    }

    /// Same as [`insert`](ManyToMany::insert), but takes the pair as a tuple.
    #[inline]
    pub fn insert_pair(&mut self, pair: (L, R)) -> bool {
        self.insert(pair.0, pair.1)
    }

    /// Inserts every pair of the sequence.
    ///
    /// Pairs are grouped by left item and by right item so that each touched bucket is merged
    /// with its new items in a single pass.
    pub fn insert_many<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (L, R)>,
    {
        let mut by_left: HashMap<L, Vec<R>> = HashMap::new();
        let mut by_right: HashMap<R, Vec<L>> = HashMap::new();
        for (left, right) in pairs {
            by_left
                .entry(left.clone())
                .or_default()
                .push(right.clone());
            by_right.entry(right).or_default().push(left);
        }

        let mut added = 0;
        for (left, mut rights) in by_left {
            sort_unique(&mut rights);
            added += self.left_to_rights.insert_many(left, rights);
        }
        let mut mirrored = 0;
        for (right, mut lefts) in by_right {
            sort_unique(&mut lefts);
            mirrored += self.right_to_lefts.insert_many(right, lefts);
        }
        debug_assert_eq!(added, mirrored, "indexes disagree after a batch insert");
    }

    /// Inserts every pair of another relation.
    pub fn insert_all<T>(&mut self, other: &ManyToMany<L, R, T>) {
        let mut added = 0;
        for (left, rights) in other.left_to_rights.buckets() {
            added += self.left_to_rights.insert_many(left.clone(), rights.clone());
        }
        let mut mirrored = 0;
        for (right, lefts) in other.right_to_lefts.buckets() {
            mirrored += self.right_to_lefts.insert_many(right.clone(), lefts.clone());
        }
        debug_assert_eq!(added, mirrored, "indexes disagree after a batch insert");
    }

    /// Removes a pair from the relation. Returns false if the pair wasn't there.
    pub fn remove<Q, P>(&mut self, left: &Q, right: &P) -> bool
    where
        L: Borrow<Q>,
        R: Borrow<P>,
        Q: Hash + Ord + ?Sized,
        P: Hash + Ord + ?Sized,
    {
        if !self.left_to_rights.remove(left, right) {
            return false;
        }
        let mirrored = self.right_to_lefts.remove(right, left);
        debug_assert!(mirrored, "right-to-left index is missing a pair");
        true
    }

    /// Same as [`remove`](ManyToMany::remove), but takes the pair as a tuple.
    #[inline]
    pub fn remove_pair(&mut self, pair: &(L, R)) -> bool {
        self.remove(&pair.0, &pair.1)
    }

    /// Removes every pair of the sequence that is in the relation.
    ///
    /// Removals are grouped by left item and by right item so that each touched bucket is
    /// rewritten once.
    pub fn remove_many<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'a (L, R)>,
        L: 'a,
        R: 'a,
    {
        let mut by_left: HashMap<&L, Vec<R>> = HashMap::new();
        let mut by_right: HashMap<&R, Vec<L>> = HashMap::new();
        for (left, right) in pairs {
            by_left.entry(left).or_default().push(right.clone());
            by_right.entry(right).or_default().push(left.clone());
        }

        let mut removed = 0;
        for (left, mut rights) in by_left {
            sort_unique(&mut rights);
            removed += self.left_to_rights.remove_many(left, &rights);
        }
        let mut mirrored = 0;
        for (right, mut lefts) in by_right {
            sort_unique(&mut lefts);
            mirrored += self.right_to_lefts.remove_many(right, &lefts);
        }
        debug_assert_eq!(removed, mirrored, "indexes disagree after a batch remove");
    }

    /// Removes every pair that is in both this relation and the other.
    ///
    /// Every bucket of `other` is subtracted from the matching bucket of this relation in a
    /// single pass, on both sides.
    pub fn remove_all<T>(&mut self, other: &ManyToMany<L, R, T>) {
        let mut removed = 0;
        for (left, rights) in other.left_to_rights.buckets() {
            removed += self.left_to_rights.remove_many(left, rights);
        }
        let mut mirrored = 0;
        for (right, lefts) in other.right_to_lefts.buckets() {
            mirrored += self.right_to_lefts.remove_many(right, lefts);
        }
        debug_assert_eq!(removed, mirrored, "indexes disagree after a batch remove");
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
            let mirrored = self.right_to_lefts.remove::<R, L>(right, &left);
            debug_assert!(mirrored, "right-to-left index is missing a pair");
        }
        Some((left, rights))
    }

    /// Removes the given right item and all of its pairs. Returns the left items it was paired
    /// with and the right item.
    pub fn remove_right<P>(&mut self, right: &P) -> Option<(Vec<L>, R)>
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        let (right, lefts) = self.right_to_lefts.take(right)?;
        for left in lefts.iter() {
            let mirrored = self.left_to_rights.remove::<L, R>(left, &right);
            debug_assert!(mirrored, "left-to-right index is missing a pair");
        }
        Some((lefts, right))
    }

    /// Determines if two items are paired with one another.
    ///
    /// The search is done in whichever of the two buckets is smaller.
    pub fn contains<Q, P>(&self, left: &Q, right: &P) -> bool
    where
        L: Borrow<Q>,
        R: Borrow<P>,
        Q: Hash + Ord + ?Sized,
        P: Hash + Ord + ?Sized,
    {
        let rights = self.left_to_rights.values_of(left);
        let lefts = self.right_to_lefts.values_of(right);
        if rights.len() <= lefts.len() {
            contains_sorted(rights, right)
        } else {
            contains_sorted(lefts, left)
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

    /// Determines if the right item has any pairs.
    pub fn contains_right<P>(&self, right: &P) -> bool
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        self.right_to_lefts.contains_key(right)
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

    /// Gets the left items paired with the given right item, in ascending order. Unknown right
    /// items give an empty slice.
    pub fn get_lefts<P>(&self, right: &P) -> &[L]
    where
        R: Borrow<P>,
        P: Hash + Eq + ?Sized,
    {
        self.right_to_lefts.values_of(right)
    }

    /// Reserves room for at least `additional` more left items.
    pub fn reserve_left(&mut self, additional: usize) {
        self.left_to_rights.reserve(additional)
    }

    /// Reserves room for at least `additional` more right items.
    pub fn reserve_right(&mut self, additional: usize) {
        self.right_to_lefts.reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more left items.
    pub fn try_reserve_left(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.left_to_rights.try_reserve(additional)
    }

    /// Tries to reserve room for at least `additional` more right items.
    pub fn try_reserve_right(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.right_to_lefts.try_reserve(additional)
    }

    /// Shrinks both indexes, and every bucket, as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.left_to_rights.shrink_to_fit();
        self.right_to_lefts.shrink_to_fit();
    }
}

impl<L, R, S> ManyToMany<L, R, S> {
    /// Creates a `ManyToMany` that uses the given hasher for both of its indexes.
    pub fn with_hasher(hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_rights: BucketIndex::with_hasher(hash_builder.clone()),
            right_to_lefts: BucketIndex::with_hasher(hash_builder),
        }
    }

    /// Creates a `ManyToMany` whose indexes can each hold at least `capacity` items without
    /// reallocating, and that uses the given hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self
    where
        S: Clone,
    {
        Self {
            left_to_rights: BucketIndex::with_capacity_and_hasher(capacity, hash_builder.clone()),
            right_to_lefts: BucketIndex::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns a reference to the [`BuildHasher`] used by the relation
    pub fn hasher(&self) -> &S {
        self.left_to_rights.hasher()
    }

    /// Returns the number of pairs in the relation.
    pub fn len(&self) -> usize {
        self.left_to_rights.len_values()
    }

    /// Returns the number of distinct left items.
    pub fn len_left(&self) -> usize {
        self.left_to_rights.len_keys()
    }

    /// Returns the number of distinct right items.
    pub fn len_right(&self) -> usize {
        self.right_to_lefts.len_keys()
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
        self.right_to_lefts.capacity()
    }

    /// Removes every pair while keeping the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.left_to_rights.clear();
        self.right_to_lefts.clear();
    }

    /// Iterates over every pair in the relation, each exactly once.
    pub fn iter(&self) -> Iter<'_, L, R> {
        self.left_to_rights.iter()
    }

    /// Iterates over every left item in the relation.
    pub fn iter_left(&self) -> Keys<'_, L, Vec<R>> {
        self.left_to_rights.keys()
    }

    /// Iterates over every right item in the relation.
    pub fn iter_right(&self) -> Keys<'_, R, Vec<L>> {
        self.right_to_lefts.keys()
    }
}

impl<L, R, S> Clone for ManyToMany<L, R, S>
where
    L: Clone,
    R: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left_to_rights: self.left_to_rights.clone(),
            right_to_lefts: self.right_to_lefts.clone(),
        }
    }
}

impl<L, R, S> Default for ManyToMany<L, R, S>
where
    S: Default + Clone,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<L, R, S> fmt::Debug for ManyToMany<L, R, S>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<L, R, S> PartialEq for ManyToMany<L, R, S>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(l, r)| other.contains(l, r))
    }
}

impl<L, R, S> Eq for ManyToMany<L, R, S>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
}

impl<L, R, S> Extend<(L, R)> for ManyToMany<L, R, S>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher,
{
    #[inline]
    fn extend<T: IntoIterator<Item = (L, R)>>(&mut self, iter: T) {
        self.insert_many(iter)
    }
}

impl<L, R> FromIterator<(L, R)> for ManyToMany<L, R>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        let mut digest = ManyToMany::default();
        digest.extend(iter);
        digest
    }
}

impl<'a, L, R, S> IntoIterator for &'a ManyToMany<L, R, S> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
