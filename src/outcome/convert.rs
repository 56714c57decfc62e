//! Conversions between value types
//!
//! Every conversion carries the full reason list forward. Only the value
//! changes, and a failed outcome never gets a new value through a converter.

use super::Outcome;
use crate::reason::Error;

/// Appended when a validator rejects a value passed to
/// [`Outcome::with_value_validated`] or [`Outcome::with_value_as_validated`].
#[derive(Debug, Clone)]
pub struct RejectedValueError {
    inner: Error,
}

impl Default for RejectedValueError {
    fn default() -> Self {
        RejectedValueError {
            inner: Error::new("Value was rejected by the validator."),
        }
    }
}

crate::impl_error_reason!(RejectedValueError, inner);

impl<T> Outcome<T> {
    /// Drop the value, keeping the reasons.
    pub fn to_unit(self) -> Outcome<()> {
        let (reasons, value) = self.into_inner();
        let value = if reasons.is_success() {
            Some(())
        } else {
            value.map(|_| ())
        };
        Outcome::from_parts(reasons, value)
    }

    /// Convert the value with `converter` when successful. A failed outcome
    /// keeps its reasons and has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let length = Outcome::ok("hello").to_outcome(|s| s.len());
    /// assert_eq!(*length.value(), 5);
    ///
    /// let failed = Outcome::<&str>::fail("boom").to_outcome(|s| s.len());
    /// assert!(failed.last_successful_value().is_none());
    /// ```
    pub fn to_outcome<U, F>(self, converter: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        let (reasons, value) = self.into_success();
        Outcome::from_parts(reasons, value.map(converter))
    }

    /// Replace the value with `U::default()` when successful.
    pub fn to_outcome_default<U: Default>(self) -> Outcome<U> {
        self.to_outcome(|_| U::default())
    }

    /// Set the value. A failed outcome discards it and keeps no value.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = if self.is_failed() { None } else { Some(value) };
        self
    }

    /// Set the value if `validator` accepts it; otherwise append a
    /// [`RejectedValueError`] and clear the value. A failed outcome keeps no
    /// value either way.
    pub fn with_value_validated<F>(self, value: T, validator: F) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        self.with_value_as_validated(value, validator)
    }

    /// Set a value of a new type, keeping the reasons. A failed outcome
    /// carries no value over.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let outcome = Outcome::ok(()).with_success("created").with_value_as(42u64);
    /// assert_eq!(*outcome.value(), 42);
    /// assert_eq!(outcome.successes().len(), 1);
    /// ```
    pub fn with_value_as<U>(self, value: U) -> Outcome<U> {
        let (reasons, _) = self.into_inner();
        let value = if reasons.is_failed() { None } else { Some(value) };
        Outcome::from_parts(reasons, value)
    }

    /// Set a value of a new type if `validator` accepts it; otherwise append
    /// a [`RejectedValueError`] and leave no value.
    pub fn with_value_as_validated<U, F>(self, value: U, validator: F) -> Outcome<U>
    where
        F: FnOnce(&U) -> bool,
    {
        let (mut reasons, _) = self.into_inner();
        if validator(&value) {
            let value = if reasons.is_failed() { None } else { Some(value) };
            Outcome::from_parts(reasons, value)
        } else {
            reasons.push_error(RejectedValueError::default());
            Outcome::from_parts(reasons, None)
        }
    }
}
