use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;

use super::node::DebugLink;
use super::{
    Link, NodeAllocator, NodeOperations, Recursive, RefusedNode, RefusedNodes, SimpleAllocator,
    TreeIter,
};
use crate::collections::contiguous::Vector;
use crate::util::error::OutOfMemory;
use crate::util::result::ResultExtension;

/// An unbalanced binary search tree, holding values in ascending order.
///
/// Two strategies are pluggable through type parameters:
/// - `A`, the [`NodeAllocator`] which provides and reclaims the tree's nodes. The allocator is
///   stored in the tree.
/// - `O`, the [`NodeOperations`] implementation used for every structural operation. This is a
///   marker type only, [`Recursive`] and [`Iterative`](super::Iterative) produce identical trees.
///
/// Equal values are allowed: each insertion adds a node, placed after any equal values in
/// ascending order.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of values in the tree.
/// - `h`: The height of the tree, between `log2 n` and `n` depending on insertion order.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(h)` |
/// | `contains` | `O(h)` |
/// | `erase` | `O(h)` |
/// | `clear` | `O(n)` |
/// | `clone` | `O(n)` |
///
/// # Examples
/// ```
/// use containers::collections::binary_tree::{BinarySearchTree, Iterative, SimpleAllocator};
///
/// let mut tree: BinarySearchTree<u32> = [20, 10, 30].into_iter().collect();
/// tree.insert(25);
/// assert!(tree.erase(&10));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [20, 25, 30]);
///
/// let other: BinarySearchTree<u32, SimpleAllocator, Iterative> =
///     [20, 30, 25].into_iter().collect();
/// assert_eq!(tree, other);
/// ```
pub struct BinarySearchTree<
    T: Ord,
    A: NodeAllocator<T> = SimpleAllocator,
    O: NodeOperations = Recursive,
> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
    pub(crate) allocator: A,
    pub(crate) _operations: PhantomData<O>,
}

impl<T: Ord, A: NodeAllocator<T> + Default, O: NodeOperations> BinarySearchTree<T, A, O> {
    /// Creates an empty tree with a default allocator.
    pub fn new() -> BinarySearchTree<T, A, O> {
        Self::with_allocator(A::default())
    }
}

impl<T: Ord, A: NodeAllocator<T>, O: NodeOperations> BinarySearchTree<T, A, O> {
    /// Creates an empty tree which buys its nodes from `allocator`.
    pub const fn with_allocator(allocator: A) -> BinarySearchTree<T, A, O> {
        BinarySearchTree {
            root: None,
            len: 0,
            allocator,
            _operations: PhantomData,
        }
    }

    /// Returns the number of values in the tree, counting duplicates.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    pub const fn allocator_mut(&mut self) -> &mut A {
        &mut self.allocator
    }

    /// Inserts `value` into the tree.
    ///
    /// # Panics
    /// Panics if the allocator can't provide a node.
    pub fn insert(&mut self, value: T) {
        self.try_insert(value).throw()
    }

    /// Inserts `value` into the tree, returning an error (and leaving the tree unchanged) if the
    /// allocator can't provide a node.
    pub fn try_insert(&mut self, value: T) -> Result<(), OutOfMemory> {
        let node = self.allocator.buy(value)?;
        O::insert(&mut self.root, node);
        self.len += 1;
        Ok(())
    }

    /// Returns true if a value equal to `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        O::locate(value, &self.root).is_some()
    }

    /// Removes a single value equal to `value` from the tree, returning true if there was one.
    /// Removing an absent value does nothing.
    ///
    /// # Panics
    /// Panics if the allocator refuses to take back the removed node.
    pub fn erase(&mut self, value: &T) -> bool {
        self.try_erase(value).throw()
    }

    /// Removes a single value equal to `value` from the tree, returning true if there was one.
    ///
    /// # Errors
    /// Returns a [`RefusedNode`] holding the removed node if the allocator refuses to take it
    /// back. The value has still been removed from the tree.
    pub fn try_erase(&mut self, value: &T) -> Result<bool, RefusedNode<T>> {
        let Some(node) = O::extract(&mut self.root, value) else {
            return Ok(false);
        };

        self.len -= 1;
        self.allocator.release(Some(node))?;
        Ok(true)
    }

    /// Removes every value from the tree, returning all nodes to the allocator.
    ///
    /// # Panics
    /// Panics if the allocator refuses to take back a node.
    pub fn clear(&mut self) {
        self.try_clear().throw()
    }

    /// Removes every value from the tree, returning all nodes to the allocator.
    ///
    /// # Errors
    /// Returns [`RefusedNodes`] holding every node the allocator refused. The tree is empty either
    /// way.
    pub fn try_clear(&mut self) -> Result<(), RefusedNodes<T>> {
        self.len = 0;
        O::release_tree(self.root.take(), &mut self.allocator)
    }

    /// Returns an iterator over the values of the tree in ascending order.
    pub fn iter(&self) -> TreeIter<'_, T> {
        TreeIter::new(&self.root)
    }
}

impl<T: Ord + Clone, A: NodeAllocator<T>, O: NodeOperations> BinarySearchTree<T, A, O> {
    /// Creates a deep copy of the tree with nodes bought from `allocator`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if `allocator` runs out part way through. Every node bought for
    /// the copy is released again before returning.
    pub fn try_clone_with<B: NodeAllocator<T>>(
        &self,
        mut allocator: B,
    ) -> Result<BinarySearchTree<T, B, O>, OutOfMemory> {
        let root = O::clone_tree(&self.root, &mut allocator)?;

        Ok(BinarySearchTree {
            root,
            len: self.len,
            allocator,
            _operations: PhantomData,
        })
    }

    /// Replaces the contents of this tree with a deep copy of `source`, using this tree's
    /// allocator. The copy is made before the current contents are released, so on failure the
    /// tree is unchanged.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the allocator runs out part way through the copy.
    pub fn try_clone_from<B: NodeAllocator<T>, P: NodeOperations>(
        &mut self,
        source: &BinarySearchTree<T, B, P>,
    ) -> Result<(), OutOfMemory> {
        let mut root = O::clone_tree(&source.root, &mut self.allocator)?;
        mem::swap(&mut self.root, &mut root);
        self.len = source.len;

        // The old nodes came from our own allocator.
        O::release_tree(root, &mut self.allocator).throw();
        Ok(())
    }
}

impl<T: Ord + Clone, A: NodeAllocator<T> + Default, O: NodeOperations> Clone
    for BinarySearchTree<T, A, O>
{
    fn clone(&self) -> Self {
        self.try_clone_with(A::default()).throw()
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source).throw()
    }
}

impl<T, A1, A2, O1, O2> PartialEq<BinarySearchTree<T, A2, O2>> for BinarySearchTree<T, A1, O1>
where
    T: Ord,
    A1: NodeAllocator<T>,
    A2: NodeAllocator<T>,
    O1: NodeOperations,
    O2: NodeOperations,
{
    /// Trees are equal if they have the same shape and hold equal values in the same positions.
    /// Trees holding the same values but built in a different order may not be equal.
    fn eq(&self, other: &BinarySearchTree<T, A2, O2>) -> bool {
        self.len == other.len && O1::same_trees(&self.root, &other.root)
    }
}

impl<T: Ord, A: NodeAllocator<T>, O: NodeOperations> Eq for BinarySearchTree<T, A, O> {}

impl<T: Ord, A: NodeAllocator<T> + Default, O: NodeOperations> Default
    for BinarySearchTree<T, A, O>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, A: NodeAllocator<T>, O: NodeOperations> Drop for BinarySearchTree<T, A, O> {
    fn drop(&mut self) {
        // Drop can't return the error. Refused nodes are leaked rather than freed, as the
        // allocator that produced them may still be tracking their addresses.
        if let Err(mut refused) = self.try_clear() {
            while let Ok(node) = refused.nodes.pop() {
                mem::forget(node);
            }
        }
    }
}

impl<T: Ord, A: NodeAllocator<T>, O: NodeOperations> Extend<T> for BinarySearchTree<T, A, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, A: NodeAllocator<T> + Default, O: NodeOperations> FromIterator<T>
    for BinarySearchTree<T, A, O>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Debug, A: NodeAllocator<T>, O: NodeOperations> Debug for BinarySearchTree<T, A, O> {
    /// Draws the tree sideways: every node is printed with its left subtree above it and its right
    /// subtree below it.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", DebugLink(&self.root))
    }
}

impl<T: Ord + Debug, A: NodeAllocator<T>, O: NodeOperations> Display for BinarySearchTree<T, A, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vector<String> = self.iter().map(|value| format!("{value:?}")).collect();
        write!(f, "<{}>", values.join(", "))
    }
}
