pub const fn portfolio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply: Sized {
    /// Passes `self` through `f` if `value` is present, e.g. to set optional
    /// builder fields without breaking the call chain.
    ///
    /// ```rust
    /// # use portfolio_utils::Apply;
    /// let greeting = String::from("Hello").apply_map(Some("Alice"), |s, name| s + ", " + name);
    /// assert_eq!(greeting, "Hello, Alice");
    /// assert_eq!(String::from("Hello").apply_map(None::<&str>, |s, _| s + "!"), "Hello");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

/// Panics with the pattern and the actual value if `$expr` does not match.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $($pat:pat_param)|+ $(if $guard:expr)? $(,)?) => {
        match $expr {
            $($pat)|+ $(if $guard)? => {}
            ref other => ::core::panic!(
                "expected `{}`, got {:?}",
                ::core::stringify!($($pat)|+ $(if $guard)?),
                other
            ),
        }
    };
}
