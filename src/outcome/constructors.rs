//! Ways to start an outcome: `ok`, `fail`, and the conditional forms.
//!
//! Conditional constructors take their error lazily where a closure is
//! accepted, so nothing is built on the success path.

use std::future::Future;

use super::Outcome;
use crate::factory;
use crate::reason::{ErrorReason, IntoErrorRef};
use crate::reason_list::ReasonList;
use crate::render::short_type_name;
use crate::usage::{raise, UsageError};

impl<T> Outcome<T> {
    /// A successful outcome holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let outcome = Outcome::ok(5);
    /// assert!(outcome.is_success());
    /// assert_eq!(*outcome.value(), 5);
    /// ```
    pub fn ok(value: T) -> Self {
        Outcome::from_parts(ReasonList::new(), Some(value))
    }

    /// A failed outcome seeded with one error.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, Outcome};
    ///
    /// let from_message = Outcome::<i32>::fail("boom");
    /// let from_error = Outcome::<i32>::fail(Error::new("boom"));
    /// assert!(from_message.is_failed() && from_error.is_failed());
    /// ```
    pub fn fail(error: impl IntoErrorRef) -> Self {
        let mut reasons = ReasonList::new();
        reasons.push_error(error);
        Outcome::from_parts(reasons, None)
    }

    /// A failed outcome seeded with several errors, in order.
    ///
    /// An empty iterator has nothing to fail with and yields a plain success
    /// holding `T::default()`.
    pub fn fail_many<I>(errors: I) -> Self
    where
        T: Default,
        I: IntoIterator,
        I::Item: IntoErrorRef,
    {
        let mut reasons = ReasonList::new();
        for error in errors {
            reasons.push_error(error);
        }
        let value = if reasons.is_failed() {
            None
        } else {
            Some(T::default())
        };
        Outcome::from_parts(reasons, value)
    }

    /// `ok(value)` when `condition` holds, otherwise `fail(error)`.
    pub fn ok_if_value(value: T, condition: bool, error: impl IntoErrorRef) -> Self {
        Outcome::ok_if_value_with(value, condition, || error)
    }

    /// `ok(value)` when `condition` holds, otherwise a failure built by
    /// `error`. `error` is only called on the failure path.
    pub fn ok_if_value_with<E, F>(value: T, condition: bool, error: F) -> Self
    where
        E: IntoErrorRef,
        F: FnOnce() -> E,
    {
        if condition {
            Outcome::ok(value)
        } else {
            Outcome::fail(error())
        }
    }

    /// `ok(value)` when `predicate` returns true, otherwise a failure built
    /// by `error`.
    pub fn ok_if_value_when<E, P, F>(value: T, predicate: P, error: F) -> Self
    where
        E: IntoErrorRef,
        P: FnOnce(&T) -> bool,
        F: FnOnce() -> E,
    {
        let condition = predicate(&value);
        Outcome::ok_if_value_with(value, condition, error)
    }

    /// Await `condition`; `ok(value)` when it resolves to true, otherwise a
    /// failure whose error is awaited from `error`.
    pub async fn ok_if_value_async<C, E, F, Fut>(value: T, condition: C, error: F) -> Self
    where
        C: Future<Output = bool>,
        E: IntoErrorRef,
        F: FnOnce() -> Fut,
        Fut: Future<Output = E>,
    {
        if condition.await {
            Outcome::ok(value)
        } else {
            Outcome::fail(error().await)
        }
    }
}

impl Outcome<()> {
    /// A failure when `condition` holds, otherwise success.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let age = 15;
    /// let outcome = Outcome::fail_if(age < 18, "must be an adult");
    /// assert!(outcome.is_failed());
    /// ```
    pub fn fail_if(condition: bool, error: impl IntoErrorRef) -> Self {
        Outcome::fail_if_with(condition, || error)
    }

    /// A failure built by `error` when `condition` holds, otherwise success.
    pub fn fail_if_with<E, F>(condition: bool, error: F) -> Self
    where
        E: IntoErrorRef,
        F: FnOnce() -> E,
    {
        Outcome::ok_if_with(!condition, error)
    }

    /// Success when `condition` holds, otherwise `fail(error)`.
    pub fn ok_if(condition: bool, error: impl IntoErrorRef) -> Self {
        Outcome::ok_if_with(condition, || error)
    }

    /// Success when `condition` holds, otherwise a failure built by `error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let mut built = false;
    /// let outcome = Outcome::ok_if_with(true, || {
    ///     built = true;
    ///     "never built"
    /// });
    /// assert!(outcome.is_success());
    /// assert!(!built);
    /// ```
    pub fn ok_if_with<E, F>(condition: bool, error: F) -> Self
    where
        E: IntoErrorRef,
        F: FnOnce() -> E,
    {
        Outcome::ok_if_value_with((), condition, error)
    }

    /// Success when `predicate` returns true, otherwise a failure built by
    /// `error`.
    pub fn ok_if_when<E, P, F>(predicate: P, error: F) -> Self
    where
        E: IntoErrorRef,
        P: FnOnce() -> bool,
        F: FnOnce() -> E,
    {
        Outcome::ok_if_with(predicate(), error)
    }

    /// Success when `condition` holds, otherwise a failure carrying the
    /// configured default error (see
    /// [`factory::set_ok_if_default_error_factory`]).
    pub fn ok_if_else_default(condition: bool) -> Self {
        Outcome::ok_if_with(condition, factory::ok_if_default_error)
    }

    /// Like [`ok_if_else_default`](Self::ok_if_else_default), requiring the
    /// default error to be an `E`.
    ///
    /// # Panics
    ///
    /// Panics with [`UsageError::IncompatibleDefaultError`] when the
    /// condition is false and the default error factory does not produce an
    /// `E`.
    #[track_caller]
    pub fn ok_if_default<E: ErrorReason>(condition: bool) -> Self {
        match Outcome::try_ok_if_default::<E>(condition) {
            Ok(outcome) => outcome,
            Err(misuse) => raise(misuse),
        }
    }

    /// Like [`ok_if_default`](Self::ok_if_default), reporting an incompatible
    /// default error instead of panicking.
    pub fn try_ok_if_default<E: ErrorReason>(condition: bool) -> Result<Self, UsageError> {
        if condition {
            return Ok(Outcome::ok(()));
        }
        let error = factory::ok_if_default_error();
        if !error.is_type::<E>() {
            return Err(UsageError::IncompatibleDefaultError {
                produced: error.type_name(),
                requested: short_type_name(std::any::type_name::<E>()),
            });
        }
        Ok(Outcome::fail(error))
    }

    /// Await `condition`; success when it resolves to true, otherwise a
    /// failure whose error is awaited from `error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = Outcome::ok_if_async(async { false }, || async { "not ready" }).await;
    /// assert!(outcome.is_failed());
    /// # });
    /// ```
    pub async fn ok_if_async<C, E, F, Fut>(condition: C, error: F) -> Self
    where
        C: Future<Output = bool>,
        E: IntoErrorRef,
        F: FnOnce() -> Fut,
        Fut: Future<Output = E>,
    {
        Outcome::ok_if_value_async((), condition, error).await
    }

    /// Await `condition`; a failure whose error is awaited from `error` when
    /// it resolves to true, otherwise success.
    pub async fn fail_if_async<C, E, F, Fut>(condition: C, error: F) -> Self
    where
        C: Future<Output = bool>,
        E: IntoErrorRef,
        F: FnOnce() -> Fut,
        Fut: Future<Output = E>,
    {
        if condition.await {
            Outcome::fail(error().await)
        } else {
            Outcome::ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::OkIfPredicateError;
    use crate::reason::{Error, Reason};
    use std::cell::Cell;

    #[derive(Debug, Clone)]
    struct Unrelated {
        inner: Error,
    }

    crate::impl_error_reason!(Unrelated, inner);

    #[test]
    fn test_fail_many_keeps_order() {
        let outcome = Outcome::<()>::fail_many(["a", "b", "c"]);
        let messages: Vec<&str> = outcome.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert!(outcome.last_successful_value().is_none());
    }

    #[test]
    fn test_fail_many_without_errors_is_plain_success() {
        let outcome = Outcome::<()>::fail_many(Vec::<&str>::new());
        assert!(outcome.is_success());
        assert!(outcome.try_value().is_ok());

        let mut called = false;
        let bound = outcome.bind(|()| {
            called = true;
            Outcome::ok(1)
        });
        assert!(called);
        assert_eq!(*bound.value(), 1);

        let empty = Outcome::<Vec<u8>>::fail_many(std::iter::empty::<&str>());
        assert_eq!(empty.value(), &Vec::<u8>::new());
    }

    #[test]
    fn test_error_factory_not_called_on_success_path() {
        let calls = Cell::new(0);
        let outcome = Outcome::<()>::fail_if_with(false, || {
            calls.set(calls.get() + 1);
            "unused"
        });
        assert!(outcome.is_success());
        assert_eq!(calls.get(), 0);

        let outcome = Outcome::<()>::ok_if_with(false, || {
            calls.set(calls.get() + 1);
            "used"
        });
        assert!(outcome.is_failed());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_ok_if_value_when() {
        let even = Outcome::ok_if_value_when(4, |v| v % 2 == 0, || "odd");
        assert_eq!(*even.value(), 4);

        let odd = Outcome::ok_if_value_when(3, |v| v % 2 == 0, || "odd");
        assert!(odd.is_failed());
        assert!(odd.last_successful_value().is_none());
    }

    #[test]
    fn test_ok_if_else_default_uses_predicate_error() {
        let outcome = Outcome::<()>::ok_if_else_default(false);
        assert!(outcome.errors()[0].is::<OkIfPredicateError>());
        assert_eq!(
            outcome.errors()[0].message(),
            "OkIf predicate returned false."
        );
    }

    #[test]
    fn test_ok_if_default_compatible_type() {
        let outcome = Outcome::<()>::ok_if_default::<OkIfPredicateError>(false);
        assert!(outcome.is_failed());
        let as_base = Outcome::<()>::ok_if_default::<Error>(false);
        assert!(as_base.errors()[0].is::<OkIfPredicateError>());
        assert!(Outcome::<()>::ok_if_default::<Unrelated>(true).is_success());
    }

    #[test]
    fn test_ok_if_default_incompatible_type() {
        let misuse = Outcome::<()>::try_ok_if_default::<Unrelated>(false).unwrap_err();
        assert_eq!(
            misuse,
            UsageError::IncompatibleDefaultError {
                produced: "OkIfPredicateError",
                requested: "Unrelated",
            }
        );
    }

    #[tokio::test]
    async fn test_async_conditions() {
        let failed = Outcome::<()>::fail_if_async(async { true }, || async { "late" }).await;
        assert_eq!(failed.errors()[0].message(), "late");

        let ok = Outcome::ok_if_value_async("v", async { true }, || async { "unused" }).await;
        assert_eq!(*ok.value(), "v");
    }
}
