//! Testing utilities for code that returns outcomes
//!
//! This module provides assertion macros that print the rendered reasons on
//! failure, and property-based testing support behind the `proptest` feature.
//!
//! # Examples
//!
//! ```rust
//! use causeway::{assert_failed, assert_has_error, assert_ok, Error, Outcome};
//!
//! let created = Outcome::ok(42).with_success("created");
//! assert_ok!(created);
//!
//! let rejected = Outcome::<u32>::fail(Error::new("quota exceeded"));
//! assert_failed!(rejected);
//! assert_has_error!(rejected, Error);
//! ```

/// Assert that an outcome is successful.
///
/// The outcome is borrowed, so it stays usable after the assertion.
///
/// # Example
///
/// ```rust
/// use causeway::{assert_ok, Outcome};
///
/// let outcome = Outcome::ok("ready");
/// assert_ok!(outcome);
/// assert_eq!(*outcome.value(), "ready");
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($outcome:expr) => {
        match &$outcome {
            outcome => {
                let outcome: &$crate::Outcome<_> = outcome;
                if outcome.is_failed() {
                    panic!("Expected success, got failure: {}", outcome);
                }
            }
        }
    };
}

/// Assert that an outcome has failed.
///
/// # Example
///
/// ```rust
/// use causeway::{assert_failed, Outcome};
///
/// let outcome = Outcome::<()>::fail("disk full");
/// assert_failed!(outcome);
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($outcome:expr) => {
        match &$outcome {
            outcome => {
                let outcome: &$crate::Outcome<_> = outcome;
                if outcome.is_success() {
                    panic!("Expected failure, got success: {}", outcome);
                }
            }
        }
    };
}

/// Assert that an outcome carries an error of the given type anywhere in its
/// error trees.
///
/// # Example
///
/// ```rust
/// use causeway::{assert_has_error, Error, ExceptionalError, Outcome};
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
/// let outcome = Outcome::<()>::fail(Error::new("sync failed").caused_by(ExceptionalError::new(io)));
/// assert_has_error!(outcome, ExceptionalError);
/// ```
#[macro_export]
macro_rules! assert_has_error {
    ($outcome:expr, $error:ty) => {
        match &$outcome {
            outcome => {
                let outcome: &$crate::Outcome<_> = outcome;
                if !$crate::ReasonQuery::has_error_of::<$error>(outcome) {
                    panic!(
                        "Expected an error of type {}, got: {}",
                        stringify!($error),
                        outcome
                    );
                }
            }
        }
    };
}

#[cfg(feature = "proptest")]
use crate::Outcome;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// Successful outcomes carry up to two successes; failed ones carry one to
/// three plain errors and no value.
#[cfg(feature = "proptest")]
impl<T> Arbitrary for Outcome<T>
where
    T: Arbitrary,
    T::Strategy: 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            (
                any_with::<T>(args),
                proptest::collection::vec("[a-z]{1,8}", 0..3)
            )
                .prop_map(|(value, successes)| Outcome::ok(value).with_successes(successes)),
            (
                "[a-z]{1,8}",
                proptest::collection::vec("[a-z]{1,8}", 0..3)
            )
                .prop_map(|(first, rest)| Outcome::<T>::fail(first).with_errors(rest)),
        ]
        .boxed()
    }
}
