//! Guards on a successful value
//!
//! `ensure` checks a predicate against the value of a successful outcome and
//! turns a rejection into a failure, keeping every existing reason and the
//! value type. A failed outcome is returned untouched. A predicate that
//! panics is treated as a rejection carrying an
//! [`ExceptionalError`](crate::ExceptionalError) wrapping
//! [`Panicked`](crate::Panicked).

use super::try_ops::{exceptional, guarded, BoxError};
use super::Outcome;
use crate::reason::IntoErrorRef;
use crate::reason_list::ReasonList;

fn rejected(error: impl IntoErrorRef) -> Option<ReasonList> {
    let mut reasons = ReasonList::new();
    reasons.push_error(error);
    Some(reasons)
}

impl<T> Outcome<T> {
    fn ensure_by<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&T) -> Option<ReasonList>,
    {
        if self.is_failed() {
            return self;
        }
        let Some(value) = self.value.as_ref() else {
            return self;
        };
        let rejection = match guarded(|| check(value)) {
            Ok(rejection) => rejection,
            Err(panicked) => rejected(panicked),
        };
        if let Some(reasons) = rejection {
            #[cfg(feature = "tracing")]
            tracing::trace!(errors = reasons.errors().len(), "ensure rejected the value");
            self.reasons.append(reasons);
        }
        self
    }

    /// Fail with `error` unless `predicate` accepts the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let adult = Outcome::ok(21).ensure(|age| *age >= 18, "must be an adult");
    /// assert!(adult.is_success());
    ///
    /// let minor = Outcome::ok(15).ensure(|age| *age >= 18, "must be an adult");
    /// assert!(minor.is_failed());
    /// assert_eq!(minor.last_successful_value(), Some(&15));
    /// ```
    pub fn ensure<P>(self, predicate: P, error: impl IntoErrorRef) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure_with(predicate, |_| error)
    }

    /// Fail with the error built by `error` unless `predicate` accepts the
    /// value. `error` is only called on rejection.
    pub fn ensure_with<P, E, F>(self, predicate: P, error: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
        E: IntoErrorRef,
    {
        self.ensure_by(|value| {
            if predicate(value) {
                None
            } else {
                rejected(error(value))
            }
        })
    }

    /// Run a check producing its own outcome. If that outcome failed, its
    /// reasons are appended.
    pub fn ensure_outcome<U, P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Outcome<U>,
    {
        self.ensure_by(|value| {
            let check = predicate(value);
            if check.is_failed() {
                Some(check.into_inner().0)
            } else {
                None
            }
        })
    }

    /// Like [`ensure`](Self::ensure) with a fallible predicate. `Err` is
    /// converted into an [`ExceptionalError`](crate::ExceptionalError).
    pub fn ensure_try<P, X>(self, predicate: P, error: impl IntoErrorRef) -> Self
    where
        P: FnOnce(&T) -> Result<bool, X>,
        X: Into<BoxError>,
    {
        self.ensure_by(|value| match predicate(value) {
            Ok(true) => None,
            Ok(false) => rejected(error),
            Err(failure) => rejected(exceptional(failure)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ReasonQuery;
    use crate::reason::{Panicked, Reason};
    use std::cell::Cell;

    #[test]
    fn test_ensure_skips_failed_outcome() {
        let called = Cell::new(false);
        let outcome = Outcome::<i32>::fail("already failed").ensure(
            |_| {
                called.set(true);
                false
            },
            "never added",
        );
        assert!(!called.get());
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn test_ensure_keeps_existing_reasons() {
        let outcome = Outcome::ok(0)
            .with_success("loaded")
            .ensure(|v| *v > 0, "must be positive");
        let messages: Vec<&str> = outcome.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["loaded", "must be positive"]);
    }

    #[test]
    fn test_ensure_with_sees_value() {
        let outcome = Outcome::ok(3).ensure_with(|v| *v > 5, |v| format!("{} is too small", v));
        assert_eq!(outcome.errors()[0].message(), "3 is too small");
    }

    #[test]
    fn test_ensure_panicking_predicate_becomes_error() {
        let outcome = Outcome::ok(vec![1, 2]).ensure(|v| v[10] == 0, "unused");
        assert!(outcome.is_failed());
        assert!(outcome.has_exception_of::<Panicked>());
    }

    #[test]
    fn test_ensure_outcome_appends_check_reasons() {
        let outcome = Outcome::ok("name")
            .ensure_outcome(|_| Outcome::<()>::fail("taken").with_success("looked up"));
        assert!(outcome.is_failed());
        assert_eq!(outcome.reasons().len(), 2);

        let passed = Outcome::ok("name").ensure_outcome(|_| Outcome::ok(()).with_success("free"));
        assert!(passed.reasons().is_empty());
    }

    #[test]
    fn test_ensure_try() {
        let outcome = Outcome::ok("x").ensure_try(|s| s.parse::<i32>().map(|n| n > 0), "non-positive");
        assert!(outcome.has_exception_of::<std::num::ParseIntError>());

        let outcome = Outcome::ok("-1").ensure_try(|s| s.parse::<i32>().map(|n| n > 0), "non-positive");
        assert_eq!(outcome.errors()[0].message(), "non-positive");
    }
}
