//! Helper macros used inside the crate.

/// Returns early with `$error` unless `$predicate` holds.
///
/// Works like `assert!`, but for argument validation that reports an error
/// instead of panicking.
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
