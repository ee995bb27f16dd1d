#![cfg(test)]

use std::{mem, ptr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::collections::contiguous::Vector;
use crate::util::alloc::DropCounter;
use crate::util::error::{OutOfMemory, UnknownNode};

fn leaf(value: i32) -> Link<i32> {
    Some(Box::new(Node::new(value)))
}

fn branch(value: i32, left: Link<i32>, right: Link<i32>) -> Link<i32> {
    Some(Box::new(Node { value, left, right }))
}

fn values<T: Ord + Copy, A: NodeAllocator<T>, O: NodeOperations>(
    tree: &BinarySearchTree<T, A, O>,
) -> Vector<T> {
    tree.iter().copied().collect()
}

/// The tree used by the extraction tests:
/// ```text
///         50
///      /      \
///    30        70
///   /  \      /  \
/// 20    40   60   80
///      /  \
///    35    45
///         /
///       42
/// ```
fn sample<O: NodeOperations>() -> BinarySearchTree<i32, DebugAllocator, O> {
    [50, 30, 70, 20, 40, 35, 45, 60, 80, 42].into_iter().collect()
}

#[test]
fn test_node() {
    let mut node = Node::new(5);
    assert!(node.is_leaf());
    assert!(!node.has_left() && !node.has_right());

    node.left = leaf(3);
    node.right = leaf(8);
    assert!(!node.is_leaf());
    assert!(node.has_left() && node.has_right());

    assert!(ptr::eq(node.successor_for(&4), &node.left), "Smaller values descend left.");
    assert!(ptr::eq(node.successor_for(&5), &node.right), "Equal values descend right.");
    assert!(ptr::eq(node.successor_for(&6), &node.right), "Larger values descend right.");

    let (left, right) = node.detach_successors();
    assert_eq!(left.map(|n| n.value), Some(3));
    assert_eq!(right.map(|n| n.value), Some(8));
    assert!(node.is_leaf(), "Detaching should leave the node without children.");
}

fn check_ascending_scenario<O: NodeOperations>() {
    let mut tree: BinarySearchTree<i32, SimpleAllocator, O> = BinarySearchTree::new();
    for value in [10, 20, 30, 40, 50] {
        tree.insert(value);
    }
    assert_eq!(&*values(&tree), &[10, 20, 30, 40, 50]);
    assert_eq!(tree.len(), 5);

    assert!(tree.erase(&30));
    assert_eq!(&*values(&tree), &[10, 20, 40, 50]);
    assert_eq!(tree.len(), 4);
    assert!(!tree.contains(&30));
    assert!(tree.contains(&40), "Values below the erased node should survive.");
}

#[test]
fn test_ascending_scenario() {
    check_ascending_scenario::<Recursive>();
    check_ascending_scenario::<Iterative>();
}

fn check_predecessor_promotion<O: NodeOperations>() {
    let mut tree = sample::<O>();

    assert!(tree.erase(&30));
    let expected = branch(
        50,
        branch(20, None, branch(40, leaf(35), branch(45, leaf(42), None))),
        branch(70, leaf(60), leaf(80)),
    );
    assert!(
        O::same_trees(&tree.root, &expected),
        "The predecessor (20) should take the place of 30, keeping 30's right subtree."
    );

    let mut tree = sample::<O>();
    assert!(tree.erase(&50));
    let expected = branch(
        45,
        branch(30, leaf(20), branch(40, leaf(35), leaf(42))),
        branch(70, leaf(60), leaf(80)),
    );
    assert!(
        O::same_trees(&tree.root, &expected),
        "The predecessor (45) should become the root, leaving its left child (42) in its place."
    );
    assert_eq!(&*values(&tree), &[20, 30, 35, 40, 42, 45, 60, 70, 80]);

    assert!(tree.erase(&60));
    assert!(tree.erase(&70));
    let expected = branch(
        45,
        branch(30, leaf(20), branch(40, leaf(35), leaf(42))),
        leaf(80),
    );
    assert!(
        O::same_trees(&tree.root, &expected),
        "A node without a left child should be replaced by its right child."
    );
}

#[test]
fn test_predecessor_promotion() {
    check_predecessor_promotion::<Recursive>();
    check_predecessor_promotion::<Iterative>();
}

fn check_extract_detaches<O: NodeOperations>() {
    let mut root = branch(2, leaf(1), leaf(3));

    let removed = O::extract(&mut root, &2).expect("2 is in the tree");
    assert_eq!(removed.value, 2);
    assert!(removed.is_leaf(), "An extracted node shouldn't keep links into the tree.");
    assert!(O::same_trees(&root, &branch(1, None, leaf(3))));

    assert!(O::extract(&mut root, &7).is_none());
    assert!(O::same_trees(&root, &branch(1, None, leaf(3))));
}

#[test]
fn test_extract_detaches() {
    check_extract_detaches::<Recursive>();
    check_extract_detaches::<Iterative>();
}

fn check_absent_erase<O: NodeOperations>() {
    let mut tree = sample::<O>();
    let before: BinarySearchTree<i32, SimpleAllocator, O> =
        tree.try_clone_with(SimpleAllocator).expect("never fails");
    let active = tree.allocator().active_allocations();

    for absent in [0, 41, 55, 99] {
        assert!(!tree.erase(&absent), "{absent} isn't in the tree.");
    }
    assert!(tree == before, "Erasing absent values shouldn't change the tree.");
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.allocator().active_allocations(), active);

    let mut empty: BinarySearchTree<i32, SimpleAllocator, O> = BinarySearchTree::new();
    assert!(!empty.erase(&1));
    assert!(empty.is_empty());
}

#[test]
fn test_absent_erase() {
    check_absent_erase::<Recursive>();
    check_absent_erase::<Iterative>();
}

fn check_duplicates<O: NodeOperations>() {
    let mut tree: BinarySearchTree<i32, SimpleAllocator, O> =
        [5, 3, 5, 5, 4].into_iter().collect();
    assert_eq!(tree.len(), 5, "Equal values should each be inserted.");
    assert_eq!(&*values(&tree), &[3, 4, 5, 5, 5]);
    assert!(O::same_trees(
        &tree.root,
        &branch(5, branch(3, None, leaf(4)), branch(5, None, leaf(5)))
    ));

    assert!(tree.erase(&5));
    assert_eq!(&*values(&tree), &[3, 4, 5, 5], "Erase should only remove a single value.");
    assert!(tree.erase(&5));
    assert!(tree.erase(&5));
    assert!(!tree.erase(&5));
    assert_eq!(&*values(&tree), &[3, 4]);
}

#[test]
fn test_duplicates() {
    check_duplicates::<Recursive>();
    check_duplicates::<Iterative>();
}

#[test]
fn test_same_trees() {
    for same_trees in [Recursive::same_trees::<i32>, Iterative::same_trees::<i32>] {
        assert!(same_trees(&None, &None), "Two empty trees are the same.");
        assert!(!same_trees(&leaf(1), &None));
        assert!(!same_trees(&None, &leaf(1)));
        assert!(same_trees(&branch(2, leaf(1), None), &branch(2, leaf(1), None)));
        assert!(
            !same_trees(&branch(2, leaf(1), None), &branch(1, None, leaf(2))),
            "Trees holding the same values in a different shape aren't the same."
        );
        assert!(!same_trees(&branch(2, leaf(1), None), &branch(2, leaf(0), None)));
    }
}

#[test]
fn test_operations_are_equivalent() {
    const RANGE: i32 = 40;

    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut recursive: BinarySearchTree<i32, DebugAllocator, Recursive> =
            BinarySearchTree::new();
        let mut iterative: BinarySearchTree<i32, DebugAllocator, Iterative> =
            BinarySearchTree::new();
        let mut counts = [0_usize; RANGE as usize];

        for step in 0..400 {
            let value = rng.random_range(0..RANGE);
            if rng.random_bool(0.6) {
                recursive.insert(value);
                iterative.insert(value);
                counts[value as usize] += 1;
            } else {
                let erased = recursive.erase(&value);
                assert_eq!(iterative.erase(&value), erased, "Seed {seed}, step {step}.");
                assert_eq!(erased, counts[value as usize] > 0);
                counts[value as usize] = counts[value as usize].saturating_sub(1);
            }

            assert!(
                Recursive::same_trees(&recursive.root, &iterative.root)
                    && Iterative::same_trees(&recursive.root, &iterative.root),
                "Both strategies should build the same tree. Seed {seed}, step {step}."
            );
            assert_eq!(recursive.len(), iterative.len());
        }

        let expected: Vector<i32> = (0..RANGE)
            .flat_map(|value| std::iter::repeat_n(value, counts[value as usize]))
            .collect();
        assert_eq!(values(&recursive), expected, "Iteration should produce sorted values.");
        assert_eq!(values(&iterative), expected);

        for query in -1..=RANGE {
            assert_eq!(recursive.contains(&query), iterative.contains(&query));
            assert!(
                ptr::eq(
                    Recursive::locate(&query, &recursive.root),
                    Iterative::locate(&query, &recursive.root)
                ),
                "Both strategies should locate the same slot for {query}."
            );
        }

        recursive.clear();
        iterative.clear();
        assert_eq!(recursive.allocator().active_allocations(), 0);
        assert_eq!(iterative.allocator().active_allocations(), 0);
    }
}

fn check_tracking<O: NodeOperations>() {
    let mut tree = sample::<O>();
    assert_eq!(tree.allocator().active_allocations(), 10);
    assert_eq!(tree.allocator().total_allocations(), 10);

    tree.erase(&40);
    assert_eq!(tree.allocator().active_allocations(), 9, "Erasing should release the node.");

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.allocator().active_allocations(), 0, "Clearing should release every node.");
    assert_eq!(tree.allocator().total_allocations(), 10);

    tree.insert(1);
    assert_eq!(&*values(&tree), &[1], "A cleared tree should still be usable.");
}

#[test]
fn test_tracking() {
    check_tracking::<Recursive>();
    check_tracking::<Iterative>();
}

fn check_clone<O: NodeOperations>() {
    let source = sample::<O>();

    let mut target: BinarySearchTree<i32, DebugAllocator, O> = [1, 2, 3].into_iter().collect();
    target.try_clone_from(&source).expect("allocator never fails");
    assert!(target == source);
    assert_eq!(target.len(), 10);
    assert_eq!(
        target.allocator().total_allocations(),
        13,
        "Cloning 10 nodes should buy exactly 10 nodes."
    );
    assert_eq!(target.allocator().active_allocations(), 10, "The old nodes should be released.");

    let copy = source.clone();
    assert!(copy == source);
    assert_eq!(copy.allocator().active_allocations(), 10);
    assert_eq!(source.allocator().active_allocations(), 10, "The source shouldn't be touched.");

    let mut copy = copy;
    copy.insert(99);
    assert!(!source.contains(&99), "A clone should be independent of its source.");
}

#[test]
fn test_clone() {
    check_clone::<Recursive>();
    check_clone::<Iterative>();
}

fn check_failed_clone_from<O: NodeOperations>() {
    let source = sample::<O>();

    for budget in 0..10 {
        let mut target: BinarySearchTree<i32, DebugAllocator, O> =
            BinarySearchTree::with_allocator(DebugAllocator::with_fail_after(3 + budget));
        target.extend([2, 1, 3]);
        let before: BinarySearchTree<i32, SimpleAllocator, O> =
            target.try_clone_with(SimpleAllocator).expect("never fails");

        let result = target.try_clone_from(&source);
        assert!(matches!(result, Err(OutOfMemory { .. })), "Budget {budget} is too small.");
        assert_eq!(
            target.allocator().total_allocations(),
            3 + budget,
            "The copy should have bought nodes until the allocator refused."
        );
        assert_eq!(
            target.allocator().active_allocations(),
            3,
            "Every node bought for the failed copy should be released."
        );
        assert!(target == before, "A failed copy should leave the target unchanged.");
        assert_eq!(target.len(), 3);
    }
}

#[test]
fn test_failed_clone_from() {
    check_failed_clone_from::<Recursive>();
    check_failed_clone_from::<Iterative>();
}

fn check_failed_clone_tree<O: NodeOperations>() {
    let source = sample::<O>();

    for budget in 0..10 {
        let mut allocator = DebugAllocator::with_fail_after(budget);
        let result = O::clone_tree(&source.root, &mut allocator);

        assert!(result.is_err());
        assert_eq!(allocator.total_allocations(), budget);
        assert_eq!(allocator.active_allocations(), 0, "No node should leak from a failed copy.");
    }

    let mut allocator = DebugAllocator::with_fail_after(10);
    let copy = O::clone_tree(&source.root, &mut allocator).expect("budget is exactly enough");
    assert!(O::same_trees(&copy, &source.root));
    assert_eq!(allocator.active_allocations(), 10);
    O::release_tree(copy, &mut allocator).expect("nodes came from this allocator");
    assert_eq!(allocator.active_allocations(), 0);
}

#[test]
fn test_failed_clone_tree() {
    check_failed_clone_tree::<Recursive>();
    check_failed_clone_tree::<Iterative>();
}

#[test]
fn test_failed_insert() {
    let mut tree: BinarySearchTree<i32, DebugAllocator> =
        BinarySearchTree::with_allocator(DebugAllocator::with_fail_after(2));
    tree.insert(1);
    tree.insert(2);

    assert_eq!(
        tree.try_insert(3),
        Err(OutOfMemory {
            bytes: size_of::<Node<i32>>()
        })
    );
    assert_eq!(tree.len(), 2, "A failed insertion shouldn't change the tree.");
    assert!(!tree.contains(&3));
    assert_eq!(tree.allocator().total_allocations(), 2, "Failures aren't counted.");

    tree.allocator_mut().set_fail_after(None);
    tree.insert(3);
    assert_eq!(&*values(&tree), &[1, 2, 3]);
}

#[test]
fn test_unknown_node() {
    let mut first = DebugAllocator::new();
    let mut second = DebugAllocator::new();

    let node = first.buy(7_i32).expect("allocator never fails");
    let address = ptr::from_ref(&*node).addr();
    let returned = second.release(Some(node)).expect_err("the node was bought elsewhere");
    assert_eq!(
        returned.error,
        UnknownNode { address },
        "Releasing a node bought elsewhere should fail."
    );
    assert_eq!(
        ptr::from_ref(&*returned.node).addr(),
        address,
        "The refused node should be handed back, not freed."
    );
    assert_eq!(returned.node.value, 7);
    assert_eq!(first.active_allocations(), 1);

    // The original node is still alive, so none of these can share its address.
    for value in 0..100 {
        let stranger = Box::new(Node::new(value));
        let address = ptr::from_ref(&*stranger).addr();
        let refused = first.release(Some(stranger)).expect_err("the node was never bought");
        assert_eq!(refused.error, UnknownNode { address });
        assert_eq!(refused.node.value, value);
    }
    assert_eq!(first.active_allocations(), 1, "Refusals shouldn't change the live count.");

    assert!(NodeAllocator::<i32>::release(&mut first, None).is_ok(), "Releasing nothing is fine.");
    assert!(first.release(Some(returned.node)).is_ok(), "The owner should take its node back.");
    assert_eq!(first.active_allocations(), 0);
}

fn check_refused_release<O: NodeOperations>() {
    let mut tree = sample::<O>();
    let mut owner = mem::replace(tree.allocator_mut(), DebugAllocator::new());

    let mut refused = tree.try_clear().expect_err("the new allocator owns none of the nodes");
    assert!(tree.is_empty(), "The tree should be emptied even though its nodes were refused.");
    assert_eq!(refused.nodes.len(), 10, "Every node should be handed back.");
    while let Ok(node) = refused.nodes.pop() {
        assert!(node.is_leaf(), "Refused nodes should be detached from their children.");
        assert!(owner.release(Some(node)).is_ok());
    }
    assert_eq!(owner.active_allocations(), 0, "The owner should get every node back.");

    let mut tree = sample::<O>();
    let mut owner = mem::replace(tree.allocator_mut(), DebugAllocator::new());
    let refused = tree.try_erase(&30).expect_err("the new allocator doesn't own 30");
    assert_eq!(refused.node.value, 30);
    assert!(!tree.contains(&30), "The value should be removed from the tree regardless.");
    assert_eq!(tree.len(), 9);
    assert!(owner.release(Some(refused.node)).is_ok());

    drop(tree);
    assert_eq!(
        owner.active_allocations(),
        9,
        "Dropping the tree shouldn't free nodes its allocator refused."
    );
}

#[test]
fn test_refused_release() {
    check_refused_release::<Recursive>();
    check_refused_release::<Iterative>();
}

#[test]
fn test_simple_allocator_drops() {
    let counter = DropCounter::new();
    let mut allocator = SimpleAllocator;

    let node = allocator.buy(counter.token()).expect("never fails");
    assert!(allocator.release(Some(node)).is_ok());
    assert_eq!(counter.dropped(), 1, "Releasing should drop the value.");
}

fn check_iter<O: NodeOperations>() {
    let tree: BinarySearchTree<i32, SimpleAllocator, O> = [2, 1, 3].into_iter().collect();

    let mut a = tree.iter();
    let mut b = tree.iter();
    assert!(a == b, "Fresh iterators over the same tree start on the same node.");
    assert_eq!(a.current(), Some(&1));

    assert_eq!(a.next(), Some(&1));
    assert!(a != b);
    assert_eq!(b.next(), Some(&1));
    assert!(a == b);

    assert_eq!(a.by_ref().collect::<Vector<_>>().len(), 2);
    assert!(a.is_exhausted());
    assert_eq!(a.current(), None);
    assert_eq!(a.next(), None, "An exhausted iterator should stay exhausted.");
    assert!(a != b);

    for _ in b.by_ref() {}
    assert!(a == b, "Two exhausted iterators are equal.");

    let other: BinarySearchTree<i32, SimpleAllocator, O> = [2, 1, 3].into_iter().collect();
    assert!(tree.iter() != other.iter(), "Iterators over different trees aren't equal.");

    let empty: BinarySearchTree<i32, SimpleAllocator, O> = BinarySearchTree::new();
    assert!(empty.iter().is_exhausted());
    assert!(empty.iter() == a);

    let mut sum = 0;
    for value in &tree {
        sum += value;
    }
    assert_eq!(sum, 6);
}

#[test]
fn test_iter() {
    check_iter::<Recursive>();
    check_iter::<Iterative>();
}

fn check_deep_tree<O: NodeOperations>(depth: i32) {
    let mut tree: BinarySearchTree<i32, DebugAllocator, O> = BinarySearchTree::new();
    tree.extend((0..depth).rev());

    let mut expected = 0;
    for value in tree.iter() {
        assert_eq!(*value, expected);
        expected += 1;
    }
    assert_eq!(expected, depth);

    let copy = tree.clone();
    assert!(copy == tree);
    assert!(tree.contains(&0));

    assert!(tree.erase(&(depth - 1)), "Erasing the root of a left spine should work.");
    tree.clear();
    assert_eq!(tree.allocator().active_allocations(), 0);
}

#[test]
fn test_deep_tree() {
    check_deep_tree::<Recursive>(1_000);
    check_deep_tree::<Iterative>(10_000);
}

#[test]
fn test_fmt() {
    let empty: BinarySearchTree<i32> = BinarySearchTree::new();
    assert_eq!(format!("{empty:?}"), "-");
    assert_eq!(format!("{empty}"), "<>");

    let tree: BinarySearchTree<i32> = [2, 1].into_iter().collect();
    assert_eq!(format!("{tree:?}"), "┌── ┌── -\n│   (1)\n│   └── -\n(2)\n└── -");
    assert_eq!(format!("{tree}"), "<1, 2>");
}

#[test]
fn test_equality_across_parameters() {
    let a: BinarySearchTree<i32, DebugAllocator, Iterative> = [2, 1, 3].into_iter().collect();
    let b: BinarySearchTree<i32, SimpleAllocator, Recursive> = [2, 3, 1].into_iter().collect();
    let c: BinarySearchTree<i32> = [1, 2, 3].into_iter().collect();

    assert!(a == b, "Allocator and strategy shouldn't affect equality.");
    assert!(b != c, "Equal contents in a different shape aren't equal.");
}

static_assertions::assert_impl_all!(BinarySearchTree<u8>: Send, Sync, Clone);
static_assertions::assert_impl_all!(TreeIter<'static, u8>: Iterator, Clone);
