//! The `Outcome` aggregate
//!
//! An [`Outcome<T>`] is an ordered list of reasons plus, when successful, a
//! value. Its state is derived, never stored: an outcome is failed exactly
//! when one of its top-level reasons is an error.
//!
//! The non-generic form is `Outcome<()>`, the default type parameter.
//!
//! # Examples
//!
//! ```
//! use causeway::Outcome;
//!
//! let outcome = Outcome::ok(()).with_error("boom");
//! assert!(outcome.is_failed());
//! assert_eq!(outcome.errors().len(), 1);
//! assert_eq!(outcome.errors()[0].message(), "boom");
//! # use causeway::Reason;
//! ```
//!
//! Reading the value of a failed outcome is a programming error:
//!
//! ```should_panic
//! use causeway::Outcome;
//!
//! let outcome = Outcome::<i32>::fail("boom");
//! let _ = outcome.value(); // panics: "Result is in status failed. ..."
//! ```

mod bind;
mod constructors;
mod convert;
mod ensure;
mod hooks;
mod map_reasons;
mod merge;
mod try_ops;

pub use convert::RejectedValueError;

use std::fmt;

use crate::query::ReasonQuery;
use crate::reason::{
    AnyReason, Error, ErrorRef, ExceptionalError, IntoErrorRef, IntoSuccessRef, SuccessRef,
};
use crate::reason_list::ReasonList;
use crate::usage::{raise, UsageError};

/// A success or failure, with the reasons that led to it.
///
/// A successful outcome always holds a value. A failed one holds either
/// nothing or the value it had before the first error was added, available
/// through [`last_successful_value`](Outcome::last_successful_value).
#[derive(Debug, Clone)]
#[must_use = "an Outcome may be failed and should be inspected"]
pub struct Outcome<T = ()> {
    reasons: ReasonList,
    value: Option<T>,
}

impl<T> Outcome<T> {
    pub(crate) fn from_parts(reasons: ReasonList, value: Option<T>) -> Self {
        Outcome { reasons, value }
    }

    /// Split into the reasons and, only when successful, the value.
    pub(crate) fn into_success(self) -> (ReasonList, Option<T>) {
        let Outcome { reasons, value } = self;
        let value = if reasons.is_success() { value } else { None };
        (reasons, value)
    }

    /// Whether a top-level reason is an error.
    pub fn is_failed(&self) -> bool {
        self.reasons.is_failed()
    }

    /// Whether no top-level reason is an error.
    pub fn is_success(&self) -> bool {
        self.reasons.is_success()
    }

    /// All reasons in insertion order.
    pub fn reasons(&self) -> &[AnyReason] {
        self.reasons.as_slice()
    }

    /// The top-level errors, in insertion order.
    pub fn errors(&self) -> &[ErrorRef] {
        self.reasons.errors()
    }

    /// The successes, in insertion order.
    pub fn successes(&self) -> Vec<SuccessRef> {
        self.reasons.successes()
    }

    /// Append a reason.
    pub fn with_reason(mut self, reason: impl Into<AnyReason>) -> Self {
        self.reasons.push(reason);
        self
    }

    /// Append several reasons, preserving their order.
    pub fn with_reasons<I>(mut self, reasons: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyReason>,
    {
        self.reasons.extend(reasons);
        self
    }

    /// Append an error. Strings go through the error factory.
    pub fn with_error(mut self, error: impl IntoErrorRef) -> Self {
        self.reasons.push_error(error);
        self
    }

    /// Append several errors, preserving their order.
    pub fn with_errors<I>(mut self, errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoErrorRef,
    {
        for error in errors {
            self.reasons.push_error(error);
        }
        self
    }

    /// Append a success. Strings go through the success factory.
    pub fn with_success(mut self, success: impl IntoSuccessRef) -> Self {
        self.reasons.push_success(success);
        self
    }

    /// Append several successes, preserving their order.
    pub fn with_successes<I>(mut self, successes: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoSuccessRef,
    {
        for success in successes {
            self.reasons.push_success(success);
        }
        self
    }

    /// Append a reason in place.
    pub fn push_reason(&mut self, reason: impl Into<AnyReason>) {
        self.reasons.push(reason);
    }

    /// Append an error in place.
    pub fn push_error(&mut self, error: impl IntoErrorRef) {
        self.reasons.push_error(error);
    }

    /// Append a success in place.
    pub fn push_success(&mut self, success: impl IntoSuccessRef) {
        self.reasons.push_success(success);
    }

    /// The value.
    ///
    /// # Panics
    ///
    /// Panics with [`UsageError::FailedValueAccess`] when the outcome is
    /// failed. The message lists the errors.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(value) => value,
            Err(misuse) => raise(misuse),
        }
    }

    /// The value, or [`UsageError::FailedValueAccess`] when failed.
    pub fn try_value(&self) -> Result<&T, UsageError> {
        match &self.value {
            Some(value) if self.is_success() => Ok(value),
            _ => Err(self.failed_access()),
        }
    }

    /// Take the value.
    ///
    /// # Panics
    ///
    /// Panics with [`UsageError::FailedValueAccess`] when the outcome is failed.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.try_into_value() {
            Ok(value) => value,
            Err(misuse) => raise(misuse),
        }
    }

    /// Take the value, or [`UsageError::FailedValueAccess`] when failed.
    pub fn try_into_value(self) -> Result<T, UsageError> {
        let misuse = if self.is_success() {
            None
        } else {
            Some(self.failed_access())
        };
        match (misuse, self.value) {
            (None, Some(value)) => Ok(value),
            (Some(misuse), _) => Err(misuse),
            (None, None) => Err(UsageError::FailedValueAccess {
                reasons: String::new(),
            }),
        }
    }

    /// The value when successful, otherwise `T::default()`.
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.try_into_value().unwrap_or_default()
    }

    /// The value last assigned while the outcome was successful, even if it
    /// has failed since.
    pub fn last_successful_value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Like [`last_successful_value`](Self::last_successful_value), with a
    /// fallback.
    pub fn last_successful_value_or<'a>(&'a self, fallback: &'a T) -> &'a T {
        self.value.as_ref().unwrap_or(fallback)
    }

    /// `(is_success, is_failed)`
    pub fn deconstruct(&self) -> (bool, bool) {
        (self.is_success(), self.is_failed())
    }

    /// `(is_success, is_failed, errors)`
    pub fn deconstruct_with_errors(&self) -> (bool, bool, Vec<ErrorRef>) {
        (self.is_success(), self.is_failed(), self.errors().to_vec())
    }

    /// `(is_success, is_failed, value)`; a failed outcome yields `T::default()`.
    pub fn into_parts(self) -> (bool, bool, T)
    where
        T: Default,
    {
        let (is_success, is_failed) = self.deconstruct();
        (is_success, is_failed, self.value_or_default())
    }

    /// `(is_success, is_failed, value, errors)`; a failed outcome yields
    /// `T::default()`.
    pub fn into_parts_with_errors(self) -> (bool, bool, T, Vec<ErrorRef>)
    where
        T: Default,
    {
        let (is_success, is_failed, errors) = self.deconstruct_with_errors();
        (is_success, is_failed, self.value_or_default(), errors)
    }

    /// Consume into the reason list and the stored value.
    pub fn into_inner(self) -> (ReasonList, Option<T>) {
        (self.reasons, self.value)
    }

    fn failed_access(&self) -> UsageError {
        UsageError::FailedValueAccess {
            reasons: crate::render::join_reasons(self.errors().iter()),
        }
    }
}

impl<T> ReasonQuery for Outcome<T> {
    fn reason_list(&self) -> &ReasonList {
        &self.reasons
    }
}

impl<T> AsRef<ReasonList> for Outcome<T> {
    fn as_ref(&self) -> &ReasonList {
        &self.reasons
    }
}

impl<T: Default> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::ok(T::default())
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successful: {}", self.is_success())?;
        if !self.reasons.is_empty() {
            write!(f, ", Reasons: {}", self.reasons)?;
        }
        Ok(())
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Outcome::fail(error)
    }
}

impl<T> From<ExceptionalError> for Outcome<T> {
    fn from(error: ExceptionalError) -> Self {
        Outcome::fail(error)
    }
}

impl<T> From<ErrorRef> for Outcome<T> {
    fn from(error: ErrorRef) -> Self {
        Outcome::fail(error)
    }
}

impl<T: Default> From<Vec<ErrorRef>> for Outcome<T> {
    fn from(errors: Vec<ErrorRef>) -> Self {
        Outcome::fail_many(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::{Reason, Success};

    #[test]
    fn test_with_error_fails_outcome() {
        let outcome = Outcome::ok(()).with_error("boom");
        assert!(outcome.is_failed());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].message(), "boom");
    }

    #[test]
    fn test_successes_do_not_fail_outcome() {
        let outcome = Outcome::ok(1).with_success("step one").with_success("step two");
        assert!(outcome.is_success());
        assert_eq!(outcome.successes().len(), 2);
        assert_eq!(*outcome.value(), 1);
    }

    #[test]
    #[should_panic(expected = "Result is in status failed. Value is not set. Having: Error with Message='boom'")]
    fn test_value_panics_when_failed() {
        let outcome = Outcome::<i32>::fail("boom");
        let _ = outcome.value();
    }

    #[test]
    fn test_try_value_reports_errors_only() {
        let outcome = Outcome::ok(3).with_success("noted").with_error("broken");
        let misuse = outcome.try_value().unwrap_err();
        assert_eq!(
            misuse,
            UsageError::FailedValueAccess {
                reasons: "Error with Message='broken'".to_string()
            }
        );
    }

    #[test]
    fn test_last_successful_value_survives_failure() {
        let outcome = Outcome::ok(7).with_error("late failure");
        assert!(outcome.try_value().is_err());
        assert_eq!(outcome.last_successful_value(), Some(&7));
        assert_eq!(*outcome.last_successful_value_or(&0), 7);

        let never = Outcome::<i32>::fail("early");
        assert_eq!(*never.last_successful_value_or(&-1), -1);
    }

    #[test]
    fn test_deconstruct_failed_defaults_value() {
        let (is_success, is_failed, value, errors) =
            Outcome::ok(5).with_error("boom").into_parts_with_errors();
        assert!(!is_success);
        assert!(is_failed);
        assert_eq!(value, 0);
        assert_eq!(errors.len(), 1);

        let (is_success, is_failed, value) = Outcome::ok(5).into_parts();
        assert!(is_success && !is_failed);
        assert_eq!(value, 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::ok(1).to_string(), "Successful: true");
        let outcome = Outcome::ok(())
            .with_success(Success::new("a"))
            .with_error("b");
        assert_eq!(
            outcome.to_string(),
            "Successful: false, Reasons: Success with Message='a'; Error with Message='b'"
        );
    }

    #[test]
    fn test_from_error_conversions() {
        let outcome: Outcome<u8> = Error::new("bad").into();
        assert!(outcome.is_failed());

        let errors: Vec<ErrorRef> = vec![
            std::sync::Arc::new(Error::new("x")),
            std::sync::Arc::new(Error::new("y")),
        ];
        let outcome: Outcome<u8> = errors.into();
        assert_eq!(outcome.errors().len(), 2);

        let none: Outcome<u8> = Vec::<ErrorRef>::new().into();
        assert!(none.is_success());
        assert_eq!(*none.value(), 0);
    }

    #[test]
    fn test_default_is_pristine_success() {
        let outcome = Outcome::<String>::default();
        assert!(outcome.is_success());
        assert!(outcome.reasons().is_empty());
        assert_eq!(outcome.value(), "");
    }
}
