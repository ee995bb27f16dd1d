use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::slice;

use super::{Chain, ChainNode, ChainedHashSet};

impl<'a, T: Hash + Eq, B: BuildHasher> IntoIterator for &'a ChainedHashSet<T, B> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A type for borrowed iteration over a [`ChainedHashSet`]. Produces values of type `&T`, bucket
/// by bucket and in insertion order within each bucket.
///
/// See [`ChainedHashSet::iter`].
pub struct Iter<'a, T> {
    pub(crate) buckets: slice::Iter<'a, Chain<T>>,
    pub(crate) node: Option<&'a ChainNode<T>>,
    pub(crate) remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(buckets: &'a [Chain<T>], len: usize) -> Iter<'a, T> {
        Iter {
            buckets: buckets.iter(),
            node: None,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some(&node.value);
            }

            self.node = self.buckets.next()?.head.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
