use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::{cmp, mem};

use super::{Chain, ChainNode, Iter};
use crate::collections::contiguous::{Array, Vector};
use crate::util::error::{InvalidLoadFactor, TryReserveError};
use crate::util::fmt::Verbatim;
use crate::util::result::ResultExtension;

/// The number of buckets used when none (or zero) are requested.
pub const DEFAULT_BUCKETS: usize = 8;

/// The maximum load factor of a freshly created set.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 1.0;

const GROWTH_FACTOR: usize = 2;

/// A hash set which resolves collisions by separate chaining: each bucket holds a linked chain of
/// every element that hashed to it.
///
/// Unlike [`std::collections::HashSet`], equal values are not merged. Each insertion appends a new
/// element, so the set behaves like a bag and [`len`](ChainedHashSet::len) counts every insertion.
///
/// The set grows eagerly: an insertion which would push the load factor (`len / bucket_count`)
/// above the maximum load factor first rehashes into enough buckets for twice the current number
/// of elements. The bucket count never shrinks.
///
/// It is a logic error for an element to be modified in a way that changes its hash while it is in
/// the set.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of elements in the set.
/// - `c`: The length of the chain the element hashes to.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(c)`, `O(n)`* |
/// | `contains` | `O(c)` |
/// | `count` | `O(c)` |
/// | `remove` | `O(c)` |
/// | `rehash` | `O(n)` |
///
/// \* If the insertion triggers a rehash.
pub struct ChainedHashSet<T: Hash + Eq, B: BuildHasher = RandomState> {
    pub(crate) buckets: Array<Chain<T>>,
    pub(crate) len: usize,
    pub(crate) max_load_factor: f64,
    pub(crate) hasher: B,
}

impl<T: Hash + Eq, B: BuildHasher + Default> ChainedHashSet<T, B> {
    /// Creates an empty set with [`DEFAULT_BUCKETS`] buckets and the default hasher.
    ///
    /// # Panics
    /// Panics if memory for the buckets can't be allocated.
    pub fn new() -> ChainedHashSet<T, B> {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, B::default())
    }

    /// Creates an empty set with `buckets` buckets (or [`DEFAULT_BUCKETS`] if `buckets` is 0) and
    /// the default hasher.
    ///
    /// # Panics
    /// Panics if memory for the buckets can't be allocated.
    pub fn with_buckets(buckets: usize) -> ChainedHashSet<T, B> {
        Self::with_buckets_and_hasher(buckets, B::default())
    }
}

impl<T: Hash + Eq, B: BuildHasher> ChainedHashSet<T, B> {
    /// Creates an empty set with [`DEFAULT_BUCKETS`] buckets and the provided `hasher`.
    ///
    /// # Panics
    /// Panics if memory for the buckets can't be allocated.
    pub fn with_hasher(hasher: B) -> ChainedHashSet<T, B> {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, hasher)
    }

    /// Creates an empty set with `buckets` buckets (or [`DEFAULT_BUCKETS`] if `buckets` is 0) and
    /// the provided `hasher`.
    ///
    /// # Panics
    /// Panics if memory for the buckets can't be allocated.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: B) -> ChainedHashSet<T, B> {
        Self::try_with_buckets_and_hasher(buckets, hasher).throw()
    }

    /// Creates an empty set with `buckets` buckets (or [`DEFAULT_BUCKETS`] if `buckets` is 0) and
    /// the provided `hasher`, returning an error if the buckets can't be allocated.
    pub fn try_with_buckets_and_hasher(
        buckets: usize,
        hasher: B,
    ) -> Result<ChainedHashSet<T, B>, TryReserveError> {
        let count = if buckets == 0 { DEFAULT_BUCKETS } else { buckets };

        Ok(ChainedHashSet {
            buckets: Array::try_repeat_default(count)?,
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher,
        })
    }

    /// Returns the number of elements in the set, counting duplicates.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets (chains) in the set. This is never 0.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.size()
    }

    /// Returns the average number of elements per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    /// Returns the load factor which insertions won't exceed.
    pub const fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Sets the maximum load factor. If the current load factor exceeds the new maximum, the set
    /// is rehashed straight away.
    ///
    /// # Errors
    /// Returns [`InvalidLoadFactor`] (leaving the set unchanged) if `value` isn't a positive,
    /// finite number.
    ///
    /// # Panics
    /// Panics if the required rehash can't allocate its buckets.
    pub fn set_max_load_factor(&mut self, value: f64) -> Result<(), InvalidLoadFactor> {
        if !(value > 0.0 && value.is_finite()) {
            return Err(InvalidLoadFactor { value });
        }

        self.max_load_factor = value;
        if self.load_factor() > value {
            self.rehash(0);
        }
        Ok(())
    }

    /// Returns a reference to the set's [`BuildHasher`].
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Inserts `value` into the set, rehashing first if the insertion would exceed the maximum
    /// load factor. Equal values already in the set are kept, the new one is appended after them.
    ///
    /// # Panics
    /// Panics if a required rehash can't allocate its buckets.
    pub fn insert(&mut self, value: T) {
        self.try_insert(value).throw()
    }

    /// Inserts `value` into the set, returning an error if a required rehash can't allocate its
    /// buckets. On failure the set is unchanged and `value` is dropped.
    pub fn try_insert(&mut self, value: T) -> Result<(), TryReserveError> {
        if self.overloaded_by(self.len + 1) {
            let elements = cmp::max(self.len.saturating_mul(GROWTH_FACTOR), self.len + 1);
            self.try_rehash(self.buckets_for(elements))?;
        }

        let index = self.bucket_index(&value);
        self.buckets[index].push_back(ChainNode::boxed(value));
        self.len += 1;
        Ok(())
    }

    /// Returns true if an element equal to `value` is in the set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(value)].contains(value)
    }

    /// Returns the number of elements equal to `value` in the set.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(value)].count(value)
    }

    /// Removes a single element equal to `value` (the one inserted first), returning it if there
    /// was one.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(value);
        let removed = self.buckets[index].remove(value)?;
        self.len -= 1;
        Some(removed)
    }

    /// Removes every element from the set, keeping the current bucket count.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            *chain = Chain::new();
        }
        self.len = 0;
    }

    /// Returns an iterator over the elements of the set, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets, self.len)
    }

    /// Ensures that `elements` elements fit in the set without exceeding the maximum load factor.
    ///
    /// # Panics
    /// Panics if the new buckets can't be allocated.
    pub fn reserve(&mut self, elements: usize) {
        self.try_reserve(elements).throw()
    }

    /// Ensures that `elements` elements fit in the set without exceeding the maximum load factor,
    /// returning an error (and leaving the set unchanged) if the new buckets can't be allocated.
    pub fn try_reserve(&mut self, elements: usize) -> Result<(), TryReserveError> {
        self.try_rehash(self.buckets_for(elements))
    }

    /// Rehashes the set into at least `buckets` buckets, and never fewer than the current maximum
    /// load factor requires. Does nothing if that isn't more than the current bucket count.
    ///
    /// # Panics
    /// Panics if the new buckets can't be allocated.
    pub fn rehash(&mut self, buckets: usize) {
        self.try_rehash(buckets).throw()
    }

    /// Rehashes the set into at least `buckets` buckets, returning an error (and leaving the set
    /// unchanged) if the new buckets can't be allocated.
    pub fn try_rehash(&mut self, buckets: usize) -> Result<(), TryReserveError> {
        let new_count = cmp::max(buckets, self.buckets_for(self.len));
        if new_count <= self.bucket_count() {
            return Ok(());
        }

        let mut old = mem::replace(&mut self.buckets, Array::try_repeat_default(new_count)?);

        // Nodes are moved between chains, so nothing past this point allocates. Taking nodes from
        // the back of the old table and pushing each to the front of its new chain leaves every
        // chain in the order plain appends would, without walking to its end.
        for chain in old.iter_mut().rev() {
            chain.reverse();
            while let Some(node) = chain.pop_front() {
                let index = self.bucket_index(&node.value);
                self.buckets[index].push_front(node);
            }
        }

        tracing::trace!(
            old_buckets = old.size(),
            new_buckets = new_count,
            len = self.len,
            "rehashed set"
        );
        Ok(())
    }
}

impl<T: Hash + Eq, B: BuildHasher> ChainedHashSet<T, B> {
    /// Calculates the index of the bucket that `hashable` belongs in.
    pub(crate) fn bucket_index<H: Hash + ?Sized>(&self, hashable: &H) -> usize {
        (self.hasher.hash_one(hashable) % self.bucket_count() as u64) as usize
    }

    /// Returns true if holding `elements` elements would exceed the maximum load factor.
    pub(crate) fn overloaded_by(&self, elements: usize) -> bool {
        elements as f64 / self.bucket_count() as f64 > self.max_load_factor
    }

    /// Calculates the smallest bucket count which holds `elements` elements within the maximum
    /// load factor, or [`DEFAULT_BUCKETS`] for no elements.
    pub(crate) fn buckets_for(&self, elements: usize) -> usize {
        if elements == 0 {
            return DEFAULT_BUCKETS;
        }

        // Float to int casts saturate, so a tiny load factor gives usize::MAX rather than wrapping.
        let mut buckets = cmp::max((elements as f64 / self.max_load_factor).ceil() as usize, 1);
        while buckets < usize::MAX && elements as f64 / buckets as f64 > self.max_load_factor {
            buckets += 1;
        }
        buckets
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> Clone for ChainedHashSet<T, B> {
    fn clone(&self) -> Self {
        ChainedHashSet {
            buckets: self.buckets.clone(),
            len: self.len,
            max_load_factor: self.max_load_factor,
            hasher: self.hasher.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> Default for ChainedHashSet<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq, B: BuildHasher> Extend<T> for ChainedHashSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for ChainedHashSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq + Debug, B: BuildHasher> Debug for ChainedHashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let buckets = self.buckets.iter().map(|chain| {
            if chain.is_empty() {
                return Verbatim(String::from("-"));
            }

            let values: Vector<String> = chain.iter().map(|value| format!("{value:?}")).collect();
            Verbatim(values.join(" -> "))
        });

        f.debug_struct("ChainedHashSet")
            .field("len", &self.len)
            .field("max_load_factor", &self.max_load_factor)
            .field("buckets", &DebugBuckets(buckets.collect()))
            .finish()
    }
}

struct DebugBuckets(Vector<Verbatim>);

impl Debug for DebugBuckets {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Hash + Eq + Debug, B: BuildHasher> Display for ChainedHashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vector<String> = self.iter().map(|value| format!("{value:?}")).collect();
        write!(f, "#{{{}}}", values.join(", "))
    }
}
