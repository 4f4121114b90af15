use std::fmt;

/// An `OptionalPair` holds zero, one, or two items, one of each type. It is a more ergonomic
/// alternative to `(Option<L>, Option<R>)`.
///
/// [`OneToOne::insert`] returns one of these to report which existing pairs were evicted to make
/// room for the new pair: the one that held the new left item, the one that held the new right
/// item, or both.
///
/// # Examples
/// ```rust
/// use binary_relations::{OneToOne, OptionalPair::*};
///
/// let mut relation: OneToOne<&str, u64> = OneToOne::new();
/// assert_eq!(relation.insert("a", 1), Neither);
/// assert_eq!(relation.insert("b", 2), Neither);
///
/// match relation.insert("a", 2) {
///     Neither => unreachable!(),
///     SomeLeft(pair) | SomeRight(pair) => println!("evicted {pair:?}"),
///     SomeBoth(by_left, by_right) => {
///         assert_eq!(by_left, ("a", 1));
///         assert_eq!(by_right, ("b", 2));
///     }
/// }
/// ```
///
/// [`OneToOne::insert`]: crate::OneToOne::insert
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub enum OptionalPair<L, R> {
    /// Equivalent to `(None, None)`
    Neither,
    /// Equivalent to `(Some(left), None)`
    SomeLeft(L),
    /// Equivalent to `(None, Some(right))`
    SomeRight(R),
    /// Equivalent to `(Some(left), Some(right))`
    SomeBoth(L, R),
}

use OptionalPair::*;

/// The pairs evicted by an insert into a [`OneToOne`](crate::OneToOne) relation.
pub type Evicted<L, R> = OptionalPair<(L, R), (L, R)>;

impl<L, R> OptionalPair<L, R> {
    /// Returns true if `self` is `OptionalPair::Neither` and false otherwise
    pub fn is_none(&self) -> bool {
        matches!(self, Neither)
    }

    /// Returns the negation of [`is_none`]
    ///
    /// [`is_none`]: OptionalPair::is_none
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Return an optional reference to the left item
    pub fn get_left(&self) -> Option<&L> {
        match self {
            SomeLeft(l) | SomeBoth(l, _) => Some(l),
            _ => None,
        }
    }

    /// Return an optional reference to the right item
    pub fn get_right(&self) -> Option<&R> {
        match self {
            SomeRight(r) | SomeBoth(_, r) => Some(r),
            _ => None,
        }
    }

    /// Converts from `&OptionalPair<L, R>` to `OptionalPair<&L, &R>`.
    pub fn as_ref(&self) -> OptionalPair<&L, &R> {
        match self {
            Neither => Neither,
            SomeLeft(l) => SomeLeft(l),
            SomeRight(r) => SomeRight(r),
            SomeBoth(l, r) => SomeBoth(l, r),
        }
    }

    /// Maps both inner values of a pair, consuming this pair.
    pub fn map<A, B, LF, RF>(self, left: LF, right: RF) -> OptionalPair<A, B>
    where
        LF: FnOnce(L) -> A,
        RF: FnOnce(R) -> B,
    {
        match self {
            Neither => Neither,
            SomeLeft(l) => SomeLeft(left(l)),
            SomeRight(r) => SomeRight(right(r)),
            SomeBoth(l, r) => SomeBoth(left(l), right(r)),
        }
    }
}

impl<T> OptionalPair<T, T> {
    /// Consumes the pair and returns its items, left first.
    ///
    /// ```rust
    /// use binary_relations::OptionalPair;
    ///
    /// let both: OptionalPair<u64, u64> = OptionalPair::SomeBoth(1, 2);
    /// assert_eq!(both.into_vec(), vec![1, 2]);
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Neither => Vec::new(),
            SomeLeft(item) | SomeRight(item) => vec![item],
            SomeBoth(l, r) => vec![l, r],
        }
    }
}

impl<L, R> Default for OptionalPair<L, R> {
    fn default() -> Self {
        Neither
    }
}

impl<L, R> fmt::Debug for OptionalPair<L, R>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Neither => write!(f, "Neither"),
            SomeLeft(item) => write!(f, "SomeLeft( {item:?} )"),
            SomeRight(item) => write!(f, "SomeRight( {item:?} )"),
            SomeBoth(l_item, r_item) => write!(f, "SomeBoth( {l_item:?}, {r_item:?} )"),
        }
    }
}

impl<L, R> From<(Option<L>, Option<R>)> for OptionalPair<L, R> {
    fn from(input_pair: (Option<L>, Option<R>)) -> Self {
        match input_pair {
            (None, None) => Neither,
            (Some(item), None) => SomeLeft(item),
            (None, Some(item)) => SomeRight(item),
            (Some(item_1), Some(item_2)) => SomeBoth(item_1, item_2),
        }
    }
}

impl<L, R> From<OptionalPair<L, R>> for (Option<L>, Option<R>) {
    fn from(input_pair: OptionalPair<L, R>) -> Self {
        match input_pair {
            Neither => (None, None),
            SomeLeft(item) => (Some(item), None),
            SomeRight(item) => (None, Some(item)),
            SomeBoth(item_1, item_2) => (Some(item_1), Some(item_2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_tests() {
        let op: OptionalPair<&str, u64> = SomeLeft("hello");
        assert!(op.is_some());
        let op: OptionalPair<&str, u64> = Neither;
        assert!(op.is_none());
        assert_eq!(op, OptionalPair::default());
    }

    #[test]
    fn get_tests() {
        let sb: OptionalPair<u64, &str> = SomeBoth(42, "84");
        assert_eq!(sb.get_left(), Some(&42));
        assert_eq!(sb.get_right(), Some(&"84"));
        let sr: OptionalPair<u64, &str> = SomeRight("84");
        assert_eq!(sr.get_left(), None);
        assert_eq!(sr.as_ref(), SomeRight(&"84"));
    }

    #[test]
    fn map_tests() {
        let sb: OptionalPair<u64, u64> = SomeBoth(42, 84);
        assert_eq!(
            sb.map(|l| l.to_string(), |r| r + 1),
            SomeBoth(String::from("42"), 85)
        );
        let no: OptionalPair<u64, u64> = Neither;
        assert_eq!(no.map(|l| l + 1, |r| r + 1), Neither);
    }

    #[test]
    fn from_tests() {
        for op in [Neither, SomeLeft(1), SomeRight(2), SomeBoth(1, 2)] {
            let tup: (Option<u64>, Option<u64>) = op.into();
            assert_eq!(op, OptionalPair::from(tup));
        }
    }

    #[test]
    fn into_vec_tests() {
        let evicted: Evicted<&str, u64> = SomeRight(("b", 1));
        assert_eq!(evicted.into_vec(), vec![("b", 1)]);
        let evicted: Evicted<&str, u64> = Neither;
        assert!(evicted.into_vec().is_empty());
    }
}
