//! Test helpers for forcing hash collisions.

use std::hash::{BuildHasher, Hash, Hasher};

/// A value paired with a hash chosen by the test. Equality only considers `value`, so two
/// different values can be made to collide on purpose.
#[derive(Debug, Clone)]
pub struct ManualHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash { hash, value }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher which reports the last `u64` written to it, so [`ManualHash`] values land in the
/// bucket `hash % bucket_count`.
#[derive(Debug, Default)]
pub struct PassThroughHasher {
    state: u64,
}

impl Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for (offset, byte) in bytes.iter().enumerate() {
            self.state ^= u64::from(*byte) << ((offset % 8) * 8);
        }
    }

    fn write_u64(&mut self, value: u64) {
        self.state = value;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughBuilder;

impl BuildHasher for PassThroughBuilder {
    type Hasher = PassThroughHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PassThroughHasher::default()
    }
}
