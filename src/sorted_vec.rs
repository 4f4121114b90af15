//! Helpers for vectors whose elements are kept sorted and unique.
//!
//! Every "many" side of a relation is stored as one of these buckets. Single element operations
//! use a binary search and shift the tail of the vector, so they are `O(log n)` to find and `O(n)`
//! to insert or remove. The `*_many` variants walk both inputs once and are `O(n + m)`.
//!
//! All functions assume their inputs are already sorted in ascending order without duplicates. A
//! type whose [`Ord`] is not a strict total order, or a bucket that was mutated behind the
//! helpers' back, will produce missed matches and duplicates. This is not checked.

use core::{borrow::Borrow, cmp::Ordering, mem};

/// Returns the index of `value` in `seq`, or the index where it would be inserted.
#[inline]
pub fn search_sorted<T, Q>(seq: &[T], value: &Q) -> Result<usize, usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    seq.binary_search_by(|probe| probe.borrow().cmp(value))
}

/// Determines if a sorted sequence holds the given value.
///
/// # Examples
/// ```rust
/// use binary_relations::sorted_vec::contains_sorted;
///
/// let seq = vec![1, 3, 5];
/// assert!(contains_sorted(&seq, &3));
/// assert!(!contains_sorted(&seq, &4));
/// ```
#[inline]
pub fn contains_sorted<T, Q>(seq: &[T], value: &Q) -> bool
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    search_sorted(seq, value).is_ok()
}

/// Inserts a value into a sorted vector, keeping it sorted.
///
/// Returns `false` and leaves the vector untouched if an equal value is already present.
///
/// # Examples
/// ```rust
/// use binary_relations::sorted_vec::insert_sorted;
///
/// let mut seq = vec![1, 5];
/// assert!(insert_sorted(&mut seq, 3));
/// assert!(!insert_sorted(&mut seq, 3));
/// assert_eq!(seq, vec![1, 3, 5]);
/// ```
pub fn insert_sorted<T: Ord>(seq: &mut Vec<T>, value: T) -> bool {
    match search_sorted(seq, &value) {
        Ok(_) => false,
        Err(index) => {
            seq.insert(index, value);
            true
        }
    }
}

/// Removes a value from a sorted vector, keeping it sorted.
///
/// Returns `false` if the value wasn't found.
pub fn remove_sorted<T, Q>(seq: &mut Vec<T>, value: &Q) -> bool
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match search_sorted(seq, value) {
        Ok(index) => {
            seq.remove(index);
            true
        }
        Err(_) => false,
    }
}

/// Merges a sorted batch into a sorted vector in a single pass.
///
/// Values already in `target` and repeated values in `insert` are only kept once. `insert` must be
/// sorted. Returns the number of values that were added to `target`.
///
/// # Examples
/// ```rust
/// use binary_relations::sorted_vec::insert_sorted_many;
///
/// let mut seq = vec![1, 4, 7];
/// assert_eq!(insert_sorted_many(&mut seq, vec![2, 4, 8]), 2);
/// assert_eq!(seq, vec![1, 2, 4, 7, 8]);
/// ```
pub fn insert_sorted_many<T: Ord>(target: &mut Vec<T>, insert: Vec<T>) -> usize {
    if insert.is_empty() {
        return 0;
    }
    let before = target.len();
    let source = mem::take(target);
    let mut merged = Vec::with_capacity(source.len() + insert.len());
    let mut source = source.into_iter().peekable();
    let mut insert = insert.into_iter().peekable();
    loop {
        let order = match (source.peek(), insert.peek()) {
            (Some(s), Some(i)) => s.cmp(i),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        let next = match order {
            Ordering::Less => source.next(),
            Ordering::Greater => insert.next(),
            Ordering::Equal => {
                insert.next();
                source.next()
            }
        };
        if let Some(value) = next {
            if merged.last() != Some(&value) {
                merged.push(value);
            }
        }
    }
    *target = merged;
    target.len() - before
}

/// Removes every value of a sorted batch from a sorted vector in a single pass.
///
/// Values in `remove` that aren't in `target` are ignored. Returns the number of values that were
/// removed from `target`.
///
/// # Examples
/// ```rust
/// use binary_relations::sorted_vec::remove_sorted_many;
///
/// let mut seq = vec![1, 2, 3, 4, 5];
/// assert_eq!(remove_sorted_many(&mut seq, &[0, 2, 4]), 2);
/// assert_eq!(seq, vec![1, 3, 5]);
/// ```
pub fn remove_sorted_many<T: Ord>(target: &mut Vec<T>, remove: &[T]) -> usize {
    if remove.is_empty() || target.is_empty() {
        return 0;
    }
    let before = target.len();
    let mut cursor = 0;
    // `retain` visits each element exactly once, in order
    target.retain(|value| {
        while cursor < remove.len() && remove[cursor] < *value {
            cursor += 1;
        }
        if cursor < remove.len() && remove[cursor] == *value {
            cursor += 1;
            false
        } else {
            true
        }
    });
    before - target.len()
}

/// Sorts a batch and drops repeated values so it can be fed to the `*_many` helpers.
#[inline]
pub fn sort_unique<T: Ord>(seq: &mut Vec<T>) {
    seq.sort_unstable();
    seq.dedup();
}
