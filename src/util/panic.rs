/// Asserts that the provided block panics. The block is run inside
/// [`catch_unwind`](std::panic::catch_unwind), so anything it captures needs to be unwind safe
/// (wrap it in [`AssertUnwindSafe`](std::panic::AssertUnwindSafe) otherwise).
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "block was expected to panic but returned normally")
    };
    ($run:block, $msg:literal) => {
        let outcome = std::panic::catch_unwind(move || $run);
        assert!(outcome.is_err(), $msg);
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
