use std::borrow::Borrow;

use crate::util::option::OptionExtension;

pub(crate) type ChainLink<T> = Option<Box<ChainNode<T>>>;

pub(crate) struct ChainNode<T> {
    pub value: T,
    pub next: ChainLink<T>,
}

impl<T> ChainNode<T> {
    pub fn boxed(value: T) -> Box<ChainNode<T>> {
        Box::new(ChainNode { value, next: None })
    }
}

/// The contents of a single bucket: a singly linked list, appended to at the back.
pub(crate) struct Chain<T> {
    pub head: ChainLink<T>,
}

impl<T> Chain<T> {
    pub const fn new() -> Chain<T> {
        Chain { head: None }
    }

    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Attaches `node` after the last node of the chain. The node is moved, not copied, so this
    /// never allocates.
    pub fn push_back(&mut self, mut node: Box<ChainNode<T>>) {
        node.next = None;

        let mut slot = &mut self.head;
        while let Some(existing) = slot {
            slot = &mut existing.next;
        }
        *slot = Some(node);
    }

    /// Attaches `node` before the first node of the chain.
    pub fn push_front(&mut self, mut node: Box<ChainNode<T>>) {
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Reverses the order of the chain in place, relinking nodes without moving their values.
    pub fn reverse(&mut self) {
        let mut reversed = None;
        while let Some(mut node) = self.head.take() {
            self.head = node.next.take();
            node.next = reversed;
            reversed = Some(node);
        }
        self.head = reversed;
    }

    /// Detaches the first node of the chain.
    pub fn pop_front(&mut self) -> Option<Box<ChainNode<T>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut current = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = current?;
            current = node.next.as_deref();
            Some(&node.value)
        })
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter().any(|item| item.borrow() == value)
    }

    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter().filter(|item| (*item).borrow() == value).count()
    }

    /// Unlinks the first node holding a value equal to `value` and returns that value.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut slot = &mut self.head;
        while slot.as_deref().is_some_and(|node| node.value.borrow() != value) {
            // UNREACHABLE: The loop condition has just checked that slot holds a node.
            slot = &mut unsafe { slot.as_mut().unreachable() }.next;
        }

        let mut removed = slot.take()?;
        *slot = removed.next.take();
        Some(removed.value)
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        let mut copy = Chain::new();
        let mut tail = &mut copy.head;

        for value in self.iter() {
            tail = &mut tail.insert(ChainNode::boxed(value.clone())).next;
        }

        copy
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        // Unlink one node at a time, dropping a long chain through Box's recursive drop could
        // exhaust the stack.
        while self.pop_front().is_some() {}
    }
}
