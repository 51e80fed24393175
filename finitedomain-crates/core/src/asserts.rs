//! Assertion macros whose strength is selected at compile time.
//!
//! The simple level guards invariants that are cheap to check and is always active. The moderate
//! and advanced levels re-derive information (e.g. recompute a domain or scan a whole space) and
//! are only enabled with the `debug-checks` feature.

#[cfg(not(feature = "debug-checks"))]
pub const FD_ASSERT_LEVEL_DEFINITION: u8 = FD_ASSERT_SIMPLE;

#[cfg(feature = "debug-checks")]
pub const FD_ASSERT_LEVEL_DEFINITION: u8 = FD_ASSERT_ADVANCED;

pub const FD_ASSERT_SIMPLE: u8 = 1;
pub const FD_ASSERT_MODERATE: u8 = 2;
pub const FD_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
