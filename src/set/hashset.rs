//! Thread-safe hash set.
//!
//! This module provides [`ConcurrentHashSet`], a mutable set of distinct
//! values guarded by a single reader/writer lock. It can be shared between
//! threads behind an `Arc` and mutated through `&self`.
//!
//! # Overview
//!
//! - `insert` and `remove` are atomic check-and-set operations: the returned
//!   `bool` is exact even when many threads race on the same value
//! - `contains`, `len` and `is_empty` take the shared lock only
//! - [`snapshot`](ConcurrentHashSet::snapshot) copies the elements out; the
//!   copy never observes later mutations
//! - Set algebra and functional transforms always build a new, independent
//!   set and leave their operands untouched
//!
//! # Examples
//!
//! ```rust
//! use syncset::concurrent_hash_set;
//!
//! let set = concurrent_hash_set![1, 3, 5];
//!
//! assert!(set.insert(2));
//! assert!(!set.insert(2));
//! assert_eq!(set.len(), 4);
//! assert!(set.contains(&2));
//! ```
//!
//! # Set Operations
//!
//! ```rust
//! use syncset::set::ConcurrentHashSet;
//!
//! let set_a = ConcurrentHashSet::from_values([1, 3, 5]);
//! let set_b = ConcurrentHashSet::from_values([1, 2, 6]);
//!
//! assert_eq!(set_a.union(&set_b), ConcurrentHashSet::from_values([1, 2, 3, 5, 6]));
//! assert_eq!(set_a.intersection(&set_b), ConcurrentHashSet::singleton(1));
//! assert_eq!(set_a.difference(&set_b), ConcurrentHashSet::from_values([3, 5]));
//! ```
//!
//! # Locking
//!
//! No operation ever holds the locks of two sets at the same time. Binary
//! operations copy the argument first, release its lock, and only then read
//! the receiver, so `set.union(&set)` is as safe as `set.union(&other)`.
//! Closures passed to [`filter`](ConcurrentHashSet::filter),
//! [`map`](ConcurrentHashSet::map) and [`fold`](ConcurrentHashSet::fold) run
//! on a snapshot with no lock held.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;
use std::hash::Hash;
use std::vec;

use super::lock::RwLock;

/// Symbol rendered by `Display` in place of the elements of an empty set.
pub const EMPTY_SET_SYMBOL: &str = "Ø";

macro_rules! trace_event {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($argument)*);
    };
}

// =============================================================================
// ConcurrentHashSet Definition
// =============================================================================

/// A thread-safe, unordered set of distinct values.
///
/// `ConcurrentHashSet` wraps a [`HashSet`] in a reader/writer lock. Readers
/// share the lock; `insert`, `remove` and the other mutations take it
/// exclusively. Iteration order is unspecified.
///
/// # Time Complexity
///
/// | Operation              | Complexity        |
/// |------------------------|-------------------|
/// | `new`                  | O(1)              |
/// | `contains`             | O(1) expected     |
/// | `insert`               | O(1) expected     |
/// | `remove`               | O(1) expected     |
/// | `len`                  | O(1)              |
/// | `snapshot`             | O(n)              |
/// | `union`                | O(n + m)          |
/// | `intersection`         | O(n + m)          |
/// | `difference`           | O(n + m)          |
/// | `symmetric_difference` | O(n + m)          |
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use syncset::set::ConcurrentHashSet;
///
/// let set = Arc::new(ConcurrentHashSet::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             for value in 0..100 {
///                 set.insert(worker * 100 + value);
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(set.len(), 400);
/// ```
pub struct ConcurrentHashSet<T> {
    inner: RwLock<HashSet<T>>,
}

#[cfg(not(feature = "loom"))]
static_assertions::assert_impl_all!(ConcurrentHashSet<i32>: Send, Sync);
#[cfg(not(feature = "loom"))]
static_assertions::assert_impl_all!(ConcurrentHashSet<String>: Send, Sync);

impl<T> ConcurrentHashSet<T> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set: ConcurrentHashSet<i32> = ConcurrentHashSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(HashSet::new())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(HashSet::with_capacity(capacity))
    }

    #[inline]
    fn from_storage(storage: HashSet<T>) -> Self {
        Self {
            inner: RwLock::new(storage),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every element from the set.
    pub fn clear(&self) {
        let mut storage = self.inner.write();
        trace_event!(cleared = storage.len(), "clear");
        storage.clear();
    }

    /// Consumes the set and returns the underlying [`HashSet`].
    #[must_use]
    pub fn into_inner(self) -> HashSet<T> {
        self.inner.into_inner()
    }
}

impl<T: Hash + Eq> ConcurrentHashSet<T> {
    /// Creates a set from the given values.
    ///
    /// Duplicates collapse silently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values(["a", "b", "a"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::from_storage(values.into_iter().collect())
    }

    /// Creates a set containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        let mut storage = HashSet::with_capacity(1);
        storage.insert(element);
        Self::from_storage(storage)
    }

    /// Returns `true` if the set contains the specified element.
    ///
    /// The element may be any borrowed form of the set's element type,
    /// but `Hash` and `Eq` on the borrowed form must match those for
    /// the element type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values(["hello".to_string()]);
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(element)
    }

    /// Inserts an element into the set.
    ///
    /// Returns `true` if this call added the element and `false` if it was
    /// already present. The check and the insertion happen under one
    /// exclusive lock acquisition, so when several threads insert the same
    /// absent value exactly one of them observes `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5]);
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn insert(&self, element: T) -> bool {
        let mut storage = self.inner.write();
        let inserted = storage.insert(element);
        trace_event!(inserted, len = storage.len(), "insert");
        inserted
    }

    /// Removes an element from the set.
    ///
    /// Returns `true` if the element was present before the call. Like
    /// [`insert`](Self::insert), the check and the removal are a single
    /// exclusive critical section.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5]);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// assert!(!set.remove(&2));
    /// ```
    pub fn remove<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut storage = self.inner.write();
        let removed = storage.remove(element);
        trace_event!(removed, len = storage.len(), "remove");
        removed
    }

    /// Inserts every value yielded by `values`, returning how many were new.
    ///
    /// The values are collected before the lock is taken and then inserted
    /// in a single exclusive critical section.
    pub fn extend_from<I: IntoIterator<Item = T>>(&self, values: I) -> usize {
        let values: Vec<T> = values.into_iter().collect();
        let mut storage = self.inner.write();
        storage.reserve(values.len());
        let added = values
            .into_iter()
            .map(|value| storage.insert(value))
            .filter(|&inserted| inserted)
            .count();
        trace_event!(added, len = storage.len(), "extend");
        added
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// The predicate runs while the exclusive lock is held and must not
    /// access this set.
    pub fn retain<P>(&self, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        let mut storage = self.inner.write();
        #[cfg(feature = "tracing")]
        let before = storage.len();
        storage.retain(|element| predicate(element));
        trace_event!(
            removed = before - storage.len(),
            len = storage.len(),
            "retain"
        );
    }
}

impl<T: Hash + Eq + Clone> ConcurrentHashSet<T> {
    /// Returns a point-in-time copy of the elements, in unspecified order.
    ///
    /// Mutations made after the call returns are never visible in the
    /// returned vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5]);
    /// let mut elements = set.snapshot();
    /// set.insert(7);
    ///
    /// elements.sort_unstable();
    /// assert_eq!(elements, vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().iter().cloned().collect()
    }

    fn storage_snapshot(&self) -> HashSet<T> {
        self.inner.read().clone()
    }

    /// Returns the union of two sets.
    ///
    /// The union contains all elements that are in either set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set_a = ConcurrentHashSet::from_values([1, 3, 5]);
    /// let set_b = ConcurrentHashSet::from_values([2, 4, 6]);
    ///
    /// assert_eq!(set_a.union(&set_b), ConcurrentHashSet::from_values(1..=6));
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let incoming = other.snapshot();
        let mut result = self.storage_snapshot();
        result.extend(incoming);
        Self::from_storage(result)
    }

    /// Returns the intersection of two sets.
    ///
    /// The intersection contains only elements that are in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = other.storage_snapshot();
        {
            let storage = self.inner.read();
            result.retain(|element| storage.contains(element));
        }
        Self::from_storage(result)
    }

    /// Returns the difference of two sets.
    ///
    /// The difference contains elements that are in `self` but not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set_a = ConcurrentHashSet::from_values([1, 3, 5]);
    /// let set_b = ConcurrentHashSet::from_values([1, 2, 6]);
    ///
    /// assert_eq!(set_a.difference(&set_b), ConcurrentHashSet::from_values([3, 5]));
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let excluded = other.storage_snapshot();
        let mut result = self.storage_snapshot();
        result.retain(|element| !excluded.contains(element));
        Self::from_storage(result)
    }

    /// Returns the symmetric difference of two sets.
    ///
    /// The symmetric difference contains elements that are in either set
    /// but not in both.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let theirs = other.storage_snapshot();
        let ours = self.storage_snapshot();
        Self::from_storage(ours.symmetric_difference(&theirs).cloned().collect())
    }

    /// Returns `true` if every element of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        let theirs = other.storage_snapshot();
        self.inner.read().is_subset(&theirs)
    }

    /// Returns `true` if every element of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the two sets have no element in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let theirs = other.storage_snapshot();
        self.inner.read().is_disjoint(&theirs)
    }

    /// Returns a new set with the elements for which `predicate` holds.
    ///
    /// The predicate is evaluated once per element of a snapshot, without
    /// holding the lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values(1..=6);
    /// let evens = set.filter(|value| value % 2 == 0);
    ///
    /// assert_eq!(evens, ConcurrentHashSet::from_values([2, 4, 6]));
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.snapshot()
            .into_iter()
            .filter(|element| predicate(element))
            .collect()
    }

    /// Returns a new set containing `function(element)` for every element.
    ///
    /// The result is a set, so a function that maps several elements to the
    /// same value produces fewer elements than the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5]);
    /// assert_eq!(set.map(|value| value * value), ConcurrentHashSet::from_values([1, 9, 25]));
    ///
    /// let collapsed = ConcurrentHashSet::from_values([-2, 2, 3]).map(|value: &i32| value.abs());
    /// assert_eq!(collapsed.len(), 2);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> ConcurrentHashSet<U>
    where
        U: Hash + Eq,
        F: FnMut(&T) -> U,
    {
        self.snapshot().iter().map(function).collect()
    }

    /// Folds every element into an accumulator, starting from `initial`.
    ///
    /// Elements are visited in unspecified order, which may differ between
    /// calls. Use an order-independent `function` when the result must be
    /// deterministic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use syncset::set::ConcurrentHashSet;
    ///
    /// let set = ConcurrentHashSet::from_values([1, 3, 5]);
    /// assert_eq!(set.fold(0, |sum, value| sum + value), 9);
    /// ```
    pub fn fold<R, F>(&self, initial: R, function: F) -> R
    where
        F: FnMut(R, &T) -> R,
    {
        self.snapshot().iter().fold(initial, function)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for ConcurrentHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Clone for ConcurrentHashSet<T> {
    fn clone(&self) -> Self {
        Self::from_storage(self.storage_snapshot())
    }
}

impl<T: Hash + Eq + Clone> PartialEq for ConcurrentHashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let theirs = other.storage_snapshot();
        *self.inner.read() == theirs
    }
}

impl<T: Hash + Eq + Clone> Eq for ConcurrentHashSet<T> {}

impl<T: Hash + Eq> FromIterator<T> for ConcurrentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: Hash + Eq> Extend<T> for ConcurrentHashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let storage = self.inner.get_mut();
        storage.extend(iter);
        trace_event!(len = storage.len(), "extend");
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for ConcurrentHashSet<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_values(values)
    }
}

impl<T> From<HashSet<T>> for ConcurrentHashSet<T> {
    fn from(storage: HashSet<T>) -> Self {
        Self::from_storage(storage)
    }
}

impl<T> IntoIterator for ConcurrentHashSet<T> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_inner().into_iter()
    }
}

/// Iterates over a snapshot taken when `into_iter` is called.
impl<T: Hash + Eq + Clone> IntoIterator for &ConcurrentHashSet<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshot().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_set()
            .entries(self.inner.read().iter())
            .finish()
    }
}

/// Renders the set as `{ e1 e2 ... }`, or `{ Ø }` when it is empty.
///
/// Element order is unspecified; the output is meant for people, not parsers.
impl<T: fmt::Display> fmt::Display for ConcurrentHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.inner.read();
        if storage.is_empty() {
            return write!(formatter, "{{ {EMPTY_SET_SYMBOL} }}");
        }
        write!(formatter, "{{ ")?;
        for element in storage.iter() {
            write!(formatter, "{element} ")?;
        }
        write!(formatter, "}}")
    }
}

/// Creates a [`ConcurrentHashSet`] containing the given values.
///
/// # Examples
///
/// ```rust
/// use syncset::concurrent_hash_set;
/// use syncset::set::ConcurrentHashSet;
///
/// let empty: ConcurrentHashSet<i32> = concurrent_hash_set![];
/// assert!(empty.is_empty());
///
/// let set = concurrent_hash_set![1, 3, 5, 1];
/// assert_eq!(set.len(), 3);
/// ```
#[macro_export]
macro_rules! concurrent_hash_set {
    () => {
        $crate::set::ConcurrentHashSet::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::set::ConcurrentHashSet::from_values([$($value),+])
    };
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ConcurrentHashSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let storage = self.inner.read();
        let mut seq = serializer.serialize_seq(Some(storage.len()))?;
        for element in storage.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ConcurrentHashSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ConcurrentHashSetVisitor<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    type Value = ConcurrentHashSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Cap the preallocation so a hostile length hint cannot exhaust memory.
        let mut storage = HashSet::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(element) = seq.next_element()? {
            storage.insert(element);
        }
        Ok(ConcurrentHashSet::from_storage(storage))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ConcurrentHashSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ConcurrentHashSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<T: Hash + Eq + Send> rayon::iter::FromParallelIterator<T> for ConcurrentHashSet<T> {
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: rayon::iter::IntoParallelIterator<Item = T>,
    {
        use rayon::iter::ParallelIterator;
        Self::from_storage(par_iter.into_par_iter().collect())
    }
}

#[cfg(feature = "rayon")]
impl<T: Hash + Eq + Send> rayon::iter::ParallelExtend<T> for ConcurrentHashSet<T> {
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: rayon::iter::IntoParallelIterator<Item = T>,
    {
        rayon::iter::ParallelExtend::par_extend(self.inner.get_mut(), par_iter);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_set() {
        let set: ConcurrentHashSet<i32> = ConcurrentHashSet::new();
        assert_eq!(format!("{set}"), "{ Ø }");
    }

    #[rstest]
    fn test_display_single_element_set() {
        let set = ConcurrentHashSet::singleton(1);
        assert_eq!(format!("{set}"), "{ 1 }");
    }

    #[rstest]
    fn test_display_multiple_elements_set() {
        let set = ConcurrentHashSet::from_values([1, 2, 3]);
        let display = format!("{set}");
        assert!(display.starts_with("{ "));
        assert!(display.ends_with(" }"));
        let rendered: HashSet<&str> = display
            .trim_start_matches('{')
            .trim_end_matches('}')
            .split_whitespace()
            .collect();
        assert_eq!(rendered, ["1", "2", "3"].into_iter().collect());
    }

    #[rstest]
    fn test_debug_matches_hash_set() {
        let set = ConcurrentHashSet::singleton("a");
        assert_eq!(format!("{set:?}"), "{\"a\"}");
    }

    // =========================================================================
    // Membership
    // =========================================================================

    #[rstest]
    #[case(2, true)]
    #[case(4, true)]
    #[case(1, false)]
    #[case(3, false)]
    #[case(5, false)]
    fn test_insert_reports_new_elements(#[case] element: i32, #[case] expected: bool) {
        let set = concurrent_hash_set![1, 3, 5];
        assert_eq!(set.insert(element), expected);
        assert!(set.contains(&element));
    }

    #[rstest]
    #[case(1, true)]
    #[case(2, false)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(5, true)]
    fn test_contains(#[case] element: i32, #[case] expected: bool) {
        let set = concurrent_hash_set![1, 3, 5];
        assert_eq!(set.contains(&element), expected);
    }

    #[rstest]
    #[case(1, true)]
    #[case(2, false)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(5, true)]
    fn test_remove_reports_prior_presence(#[case] element: i32, #[case] expected: bool) {
        let set = concurrent_hash_set![1, 3, 5];
        assert_eq!(set.remove(&element), expected);
        assert!(!set.contains(&element));
    }

    #[rstest]
    fn test_extend_from_counts_new_values() {
        let set = concurrent_hash_set![1, 2];
        assert_eq!(set.extend_from([2, 3, 4, 4]), 2);
        assert_eq!(set, concurrent_hash_set![1, 2, 3, 4]);
    }

    #[rstest]
    fn test_extend_with_exclusive_access() {
        let mut set = concurrent_hash_set![1, 2];
        set.extend([2, 3, 4]);
        set.extend(Vec::<i32>::new());
        assert_eq!(set, concurrent_hash_set![1, 2, 3, 4]);
        assert!(set.insert(5));
    }

    #[rstest]
    fn test_retain_and_clear() {
        let set = ConcurrentHashSet::from_values(1..=10);
        set.retain(|value| value % 3 == 0);
        assert_eq!(set, concurrent_hash_set![3, 6, 9]);

        set.clear();
        assert!(set.is_empty());
    }

    // =========================================================================
    // Set Algebra
    // =========================================================================

    #[rstest]
    #[case(vec![1, 3, 5], vec![1, 3, 5], true)]
    #[case(vec![1, 2, 3], vec![1, 2, 3, 4], false)]
    fn test_clone_equality(
        #[case] source: Vec<i32>,
        #[case] target: Vec<i32>,
        #[case] expected: bool,
    ) {
        let cloned = ConcurrentHashSet::from_values(source).clone();
        assert_eq!(cloned == ConcurrentHashSet::from_values(target), expected);
    }

    #[rstest]
    #[case(vec![1, 3, 5], vec![])]
    #[case(vec![2, 4, 6], vec![1, 3, 5])]
    #[case(vec![1, 2, 6], vec![3, 5])]
    fn test_difference(#[case] other: Vec<i32>, #[case] expected: Vec<i32>) {
        let set = concurrent_hash_set![1, 3, 5];
        let difference = set.difference(&ConcurrentHashSet::from_values(other));
        assert_eq!(difference, ConcurrentHashSet::from_values(expected));
    }

    #[rstest]
    #[case(vec![1, 3, 5], vec![1, 3, 5])]
    #[case(vec![2, 4, 6], vec![])]
    #[case(vec![1, 2, 6], vec![1])]
    fn test_intersection(#[case] other: Vec<i32>, #[case] expected: Vec<i32>) {
        let set = concurrent_hash_set![1, 3, 5];
        let intersection = set.intersection(&ConcurrentHashSet::from_values(other));
        assert_eq!(intersection, ConcurrentHashSet::from_values(expected));
    }

    #[rstest]
    #[case(vec![1, 3, 5], vec![1, 3, 5])]
    #[case(vec![2, 4, 6], vec![1, 2, 3, 4, 5, 6])]
    #[case(vec![1, 2, 6], vec![1, 2, 3, 5, 6])]
    fn test_union(#[case] other: Vec<i32>, #[case] expected: Vec<i32>) {
        let set = concurrent_hash_set![1, 3, 5];
        let union = set.union(&ConcurrentHashSet::from_values(other));
        assert_eq!(union, ConcurrentHashSet::from_values(expected));
    }

    #[rstest]
    #[case(vec![1, 3, 5], vec![1, 3, 5], true)]
    #[case(vec![1, 3, 5], vec![1, 2, 3, 4, 5], false)]
    #[case(vec![1, 3, 5], vec![1, 3, 6], false)]
    fn test_equality(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: bool) {
        let left = ConcurrentHashSet::from_values(left);
        let right = ConcurrentHashSet::from_values(right);
        assert_eq!(left == right, expected);
        assert_eq!(right == left, expected);
    }

    #[rstest]
    fn test_binary_operations_on_the_same_instance() {
        let set = concurrent_hash_set![1, 2, 3];
        assert_eq!(set.union(&set), set);
        assert_eq!(set.intersection(&set), set);
        assert!(set.difference(&set).is_empty());
        assert!(set.is_subset(&set));
    }

    // =========================================================================
    // Functional Transforms
    // =========================================================================

    #[rstest]
    fn test_filter_even() {
        let set = ConcurrentHashSet::from_values(1..=6);
        assert_eq!(
            set.filter(|value| value % 2 == 0),
            concurrent_hash_set![2, 4, 6]
        );
    }

    #[rstest]
    fn test_map_square_and_truncate() {
        let numbers = concurrent_hash_set![1, 3, 5];
        assert_eq!(
            numbers.map(|value| value * value),
            concurrent_hash_set![1, 9, 25]
        );

        let words = concurrent_hash_set!["hello", "world"];
        let truncated = words.map(|word| word[..word.len() - 1].to_string());
        assert_eq!(
            truncated,
            concurrent_hash_set!["hell".to_string(), "worl".to_string()]
        );
    }

    #[rstest]
    fn test_fold_sum_and_uppercase() {
        let numbers = concurrent_hash_set![1, 3, 5];
        assert_eq!(numbers.fold(0, |sum, value| sum + value), 9);

        let words = concurrent_hash_set!["abc", "def", "ghi"];
        let mut letters: Vec<char> = words
            .fold(String::new(), |joined, word| joined + &word.to_uppercase())
            .chars()
            .collect();
        letters.sort_unstable();
        assert_eq!(letters.into_iter().collect::<String>(), "ABCDEFGHI");
    }
}
