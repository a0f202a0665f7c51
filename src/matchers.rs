//! Matcher combinators.
//!
//! - `leaf.rs`: predicate leaves (`any`, `predicate`, `is_equal`,
//!   `matches_regex`) and `required` for optional values.
//! - `list.rs`: list combinators, which hold the search algorithms of the
//!   engine (exact-arity, prefix + suffix, first element, consecutive window).
//!
//! Every combinator returns `Match::Failure` when any part of it fails and
//! never panics on a non-matching input.

#[path = "matchers/leaf.rs"]
mod leaf;
#[path = "matchers/list.rs"]
mod list;

pub use leaf::{Required, any, is_equal, matches_regex, predicate, required};
pub use list::{Contains, List, ListWithConsecutive, ListWithPrefix, contains, list, list_with_consecutive, list_with_prefix};
