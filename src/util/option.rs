use std::hint;

pub(crate) trait OptionExtension<T> {
    /// Unwraps an [`Option`] that the caller has already proven to be [`Some`].
    ///
    /// Debug builds still check the claim with [`unreachable!`], release builds trust it via
    /// [`hint::unreachable_unchecked`].
    ///
    /// # Safety
    /// Calling this on [`None`] is undefined behavior in release builds.
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!("Option was claimed to be Some"),
            // SAFETY: The caller guarantees that self is Some.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}
