/// Assert that `$expr` matches `$pat`, optionally followed by a guard.
///
/// The value is matched in place, so only bindings in the pattern move out of
/// it.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match $expr {
            $pat $(if $guard)? => {}
            ref value => ::core::panic!(
                "assertion failed: `{}` did not match pattern `{}`: {:?}",
                ::core::stringify!($expr),
                ::core::stringify!($pat $(if $guard)?),
                value,
            ),
        }
    };
}
