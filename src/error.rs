//! Errors for misuse of the matching API.
//!
//! A failed match is not an error: it is the `Match::Failure` value and every
//! combinator passes it along. The variants here describe callers asking for
//! something a match cannot give, such as reading a capture that was never
//! bound on the path the matcher took.

use thiserror::Error;

/// Result type for operations on matches and constraints.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Reading a value from, or rebuilding, a failed match.
    #[error("can't {operation} on a failed match")]
    FailedMatch { operation: &'static str },

    /// Reading a capture from invalid constraints.
    #[error("can't get value for {capture} from invalid constraints")]
    InvalidConstraints { capture: String },

    /// The capture has no binding in otherwise valid constraints.
    #[error("no value for capture {capture}")]
    MissingBinding { capture: String },

    /// The stored binding does not have the capture's value type.
    #[error("binding for capture {capture} is not a {expected}")]
    BindingType { capture: String, expected: &'static str },
}
