//! Test helpers for observing how collections treat the values they own.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// A shared tally of how many [`CountedDrop`] tokens have been dropped.
#[derive(Debug, Default, Clone)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    /// Creates a token which increments this counter when dropped. Clones of the token report to
    /// the same counter.
    pub fn token(&self) -> CountedDrop {
        CountedDrop(Rc::clone(&self.0))
    }

    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

#[derive(Debug, Clone)]
pub struct CountedDrop(Rc<Cell<usize>>);

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
