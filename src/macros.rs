/// Lazily compiled static regex, for use with [`matches_regex`](crate::matches_regex).
///
/// ```
/// use joinery::{Matcher, matches_regex};
///
/// let word = matches_regex::<String>(joinery::regex!(r"^a+$"));
/// assert!(word.apply(&"aaa".to_string()).is_success());
/// assert!(word.apply(&"ab".to_string()).is_failure());
/// ```
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: $crate::once_cell::sync::Lazy<$crate::regex::Regex> =
            $crate::once_cell::sync::Lazy::new(|| $crate::regex::Regex::new($pat).expect("invalid regex literal"));
        &*RE
    }};
}

/// Box a heterogeneous set of matchers into a `Vec<BoxMatcher<T>>`.
///
/// ```
/// use joinery::{Capture, Matcher, is_equal, list, matchers};
///
/// let x = Capture::named("x");
/// let matcher = list(matchers![is_equal(1), x.clone()]);
/// assert!(matcher.apply(&vec![1, 2]).is_success());
/// ```
#[macro_export]
macro_rules! matchers {
    ($($m:expr),* $(,)?) => {
        vec![ $($crate::MatcherExt::boxed($m)),* ]
    };
}

// Generates `Match::combineN`: fail if any input failed, merge constraints
// left to right, rebuild every input under the same rewrites.
macro_rules! impl_combine {
    ($(#[$attr:meta])* $name:ident => $($m:ident : $v:ident),+) => {
        $(#[$attr])*
        pub fn $name<$($v: $crate::Value),+>(
            ctor: impl Fn($($v),+) -> T + Send + Sync + 'static,
            $($m: Match<$v>),+
        ) -> Self {
            let ($(Match::Success($m)),+) = ($($m),+) else {
                return Match::Failure;
            };
            let constraints = Constraints::empty()$(.merge(&$m.constraints))+;
            Self::from_rebuilder(move |rewrites| ctor($($m.rebuild(rewrites)),+), constraints)
        }
    };
}

// Generates `MatchableN`: a variant narrowing plus one accessor per field.
macro_rules! impl_matchable {
    (
        $(#[$attr:meta])*
        $name:ident, $combine:ident => $($get:ident : $m:ident : $mty:ident : $v:ident : $x:ident),+
    ) => {
        $(#[$attr])*
        pub struct $name<S, X, $($v),+> {
            variant: Variant<S, X>,
            ctor: Arc<dyn Fn($($v),+) -> S + Send + Sync>,
            $($get: Arc<dyn Fn(&X) -> $v + Send + Sync>),+
        }

        impl<S, X, $($v),+> Clone for $name<S, X, $($v),+> {
            fn clone(&self) -> Self {
                $name {
                    variant: self.variant.clone(),
                    ctor: Arc::clone(&self.ctor),
                    $($get: Arc::clone(&self.$get)),+
                }
            }
        }

        impl<S, X, $($v),+> fmt::Debug for $name<S, X, $($v),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).field("variant", &self.variant.name()).finish_non_exhaustive()
            }
        }

        impl<S: Value, X: 'static, $($v: Value),+> $name<S, X, $($v),+> {
            /// Wire a variant's constructor and field accessors together.
            pub fn new(
                variant: Variant<S, X>,
                ctor: impl Fn($($v),+) -> S + Send + Sync + 'static,
                $($get: impl Fn(&X) -> $v + Send + Sync + 'static),+
            ) -> Self {
                $name { variant, ctor: Arc::new(ctor), $($get: Arc::new($get)),+ }
            }

            /// Match `value` field by field; fails unless it is this variant.
            pub fn apply<$($mty: Matcher<$v> + ?Sized),+>(&self, value: &S, $($m: &$mty),+) -> Match<S> {
                let Some(payload) = self.variant.narrow(value) else {
                    return Match::Failure;
                };
                let ctor = Arc::clone(&self.ctor);
                Match::$combine(
                    move |$($x),+| ctor($($x),+),
                    $($m.apply(&(self.$get)(&payload))),+
                )
            }

            /// Reusable matcher over `S` built from one matcher per field.
            pub fn matcher<$($mty: Matcher<$v>),+>(&self, $($m: $mty),+) -> impl Matcher<S> + use<S, X, $($v,)+ $($mty),+> {
                let matchable = self.clone();
                from_fn(move |value: &S| matchable.apply(value, $(&$m),+))
            }
        }
    };
}
