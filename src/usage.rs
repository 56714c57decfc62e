//! Programmer-misuse failures
//!
//! Domain failures live inside an [`Outcome`](crate::Outcome) as reasons.
//! Contract violations by the caller are different: they are reported
//! immediately, as a panic carrying a [`UsageError`] message, or as an
//! `Err(UsageError)` from the `try_` form of the same operation.
//!
//! # Examples
//!
//! ```
//! use causeway::{Outcome, UsageError};
//!
//! let outcome = Outcome::<i32>::fail("boom");
//! match outcome.try_value() {
//!     Err(UsageError::FailedValueAccess { reasons }) => assert!(reasons.contains("boom")),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;

/// A contract violation by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The value of a failed outcome was read.
    FailedValueAccess {
        /// The rendered reasons that made the value unavailable.
        reasons: String,
    },
    /// A reason was cast to a type it is not.
    InvalidCast {
        /// Type name of the actual reason.
        found: &'static str,
        /// Type name that was requested.
        expected: &'static str,
    },
    /// The configured default error cannot stand in for the requested type.
    IncompatibleDefaultError {
        /// Type name produced by the default error factory.
        produced: &'static str,
        /// Type name that was requested.
        requested: &'static str,
    },
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::FailedValueAccess { reasons } => write!(
                f,
                "Result is in status failed. Value is not set. Having: {}",
                reasons
            ),
            UsageError::InvalidCast { found, expected } => write!(
                f,
                "Error type '{}' is not compatible with expected type '{}'.",
                found, expected
            ),
            UsageError::IncompatibleDefaultError {
                produced,
                requested,
            } => write!(
                f,
                "Default error is not compatible with {} (the default error factory produced {}).",
                requested, produced
            ),
        }
    }
}

impl StdError for UsageError {}

/// Report a contract violation by panicking with its message.
#[track_caller]
pub(crate) fn raise(misuse: UsageError) -> ! {
    panic!("{}", misuse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_value_access_message() {
        let misuse = UsageError::FailedValueAccess {
            reasons: "Error with Message='boom'".to_string(),
        };
        assert_eq!(
            misuse.to_string(),
            "Result is in status failed. Value is not set. Having: Error with Message='boom'"
        );
    }

    #[test]
    fn test_incompatible_default_message_names_types() {
        let misuse = UsageError::IncompatibleDefaultError {
            produced: "OkIfPredicateError",
            requested: "NotFound",
        };
        let text = misuse.to_string();
        assert!(text.contains("NotFound"));
        assert!(text.contains("OkIfPredicateError"));
    }

    #[test]
    #[should_panic(expected = "Error type 'A' is not compatible with expected type 'B'.")]
    fn test_raise_panics_with_display() {
        raise(UsageError::InvalidCast {
            found: "A",
            expected: "B",
        });
    }
}
