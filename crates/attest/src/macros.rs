//! Assertion macros that capture the source text of their arguments.
//!
//! The captured text appears in failure messages:
//!
//! ```text
//! Assert::that(5, is::greater_than(10))
//!   Expected: greater than 10
//!   But was:  5
//! ```
//!
//! Extra arguments after the constraint are a `format!` message, built only
//! when the assertion fails.

/// [`Assert::that`](crate::Assert::that) with call-site text.
///
/// ```ignore
/// assert_that!(&ctx, total, is::greater_than(10))?;
/// assert_that!(&ctx, name, does::start_with("a"), "user {} has a bad name", id)?;
/// ```
#[macro_export]
macro_rules! assert_that {
    ($ctx:expr, $actual:expr, $constraint:expr $(,)?) => {
        $crate::Assert::that_at(
            $ctx,
            &$actual,
            $constraint,
            (),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
    ($ctx:expr, $actual:expr, $constraint:expr, $($arg:tt)+) => {
        $crate::Assert::that_at(
            $ctx,
            &$actual,
            $constraint,
            $crate::Message::lazy(|| format!($($arg)+)),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
}

/// [`Assume::that`](crate::Assume::that) with call-site text.
#[macro_export]
macro_rules! assume_that {
    ($ctx:expr, $actual:expr, $constraint:expr $(,)?) => {
        $crate::Assume::that_at(
            $ctx,
            &$actual,
            $constraint,
            (),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
    ($ctx:expr, $actual:expr, $constraint:expr, $($arg:tt)+) => {
        $crate::Assume::that_at(
            $ctx,
            &$actual,
            $constraint,
            $crate::Message::lazy(|| format!($($arg)+)),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
}

/// [`Warn::unless`](crate::Warn::unless) with call-site text.
#[macro_export]
macro_rules! warn_unless {
    ($ctx:expr, $actual:expr, $constraint:expr $(,)?) => {
        $crate::Warn::unless_at(
            $ctx,
            &$actual,
            $constraint,
            (),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
    ($ctx:expr, $actual:expr, $constraint:expr, $($arg:tt)+) => {
        $crate::Warn::unless_at(
            $ctx,
            &$actual,
            $constraint,
            $crate::Message::lazy(|| format!($($arg)+)),
            $crate::CallSite::new(stringify!($actual), stringify!($constraint)),
        )
    };
}
