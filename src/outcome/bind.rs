//! Chaining: `bind` and its keep-value, fallible and async forms
//!
//! Every form shares one contract. A failed outcome short-circuits: the
//! function is never called and the reasons are carried into the new outcome
//! with no value. A successful outcome passes its value to the function, and
//! the result's reasons are appended after the original ones.
//!
//! # Examples
//!
//! ```
//! use causeway::Outcome;
//!
//! let outcome = Outcome::ok(5).bind(|v| Outcome::ok(v + 1));
//! assert_eq!(*outcome.value(), 6);
//!
//! let mut called = false;
//! let failed = Outcome::<i32>::fail("boom").bind(|v| {
//!     called = true;
//!     Outcome::ok(v + 1)
//! });
//! assert!(failed.is_failed());
//! assert!(!called);
//! ```

use std::future::Future;

use super::try_ops::{exceptional, race_cancel, BoxError};
use super::Outcome;
use crate::reason::ExceptionalError;
use crate::reason_list::ReasonList;

/// Append `next` after `reasons`, taking `next`'s value.
fn chain<U>(mut reasons: ReasonList, next: Outcome<U>) -> Outcome<U> {
    let (next_reasons, value) = next.into_inner();
    reasons.append(next_reasons);
    Outcome::from_parts(reasons, value)
}

impl<T> Outcome<T> {
    /// Continue with `f` when successful.
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.into_success() {
            (reasons, Some(value)) => chain(reasons, f(value)),
            (reasons, None) => Outcome::from_parts(reasons, None),
        }
    }

    /// Continue with `f` when successful, keeping this outcome's value.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let outcome = Outcome::ok("alice")
    ///     .bind_keep_value(|name| Outcome::ok(()).with_success(format!("{} audited", name)));
    /// assert_eq!(*outcome.value(), "alice");
    /// assert_eq!(outcome.successes().len(), 1);
    /// ```
    pub fn bind_keep_value<U, F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(&T) -> Outcome<U>,
    {
        match self.into_success() {
            (reasons, Some(value)) => {
                let (reasons, _) = chain(reasons, f(&value)).into_inner();
                Outcome::from_parts(reasons, Some(value))
            }
            (reasons, None) => Outcome::from_parts(reasons, None),
        }
    }

    /// Continue with a fallible `f` when successful. `Err` becomes an
    /// [`ExceptionalError`].
    pub fn bind_result<U, X, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, X>,
        X: Into<BoxError>,
    {
        self.bind(|value| match f(value) {
            Ok(next) => Outcome::ok(next),
            Err(failure) => Outcome::fail(exceptional(failure)),
        })
    }

    /// Continue with the future returned by `f` when successful.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = Outcome::ok(2)
    ///     .bind_async(|v| async move { Outcome::ok(v * 10) })
    ///     .await;
    /// assert_eq!(*outcome.value(), 20);
    /// # });
    /// ```
    pub async fn bind_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self.into_success() {
            (reasons, Some(value)) => chain(reasons, f(value).await),
            (reasons, None) => Outcome::from_parts(reasons, None),
        }
    }

    /// Async [`bind_keep_value`](Self::bind_keep_value). `f` receives a
    /// clone of the value.
    pub async fn bind_async_keep_value<U, F, Fut>(self, f: F) -> Outcome<T>
    where
        T: Clone,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self.into_success() {
            (reasons, Some(value)) => {
                let (reasons, _) = chain(reasons, f(value.clone()).await).into_inner();
                Outcome::from_parts(reasons, Some(value))
            }
            (reasons, None) => Outcome::from_parts(reasons, None),
        }
    }

    /// Like [`bind_async`](Self::bind_async), abandoning the future as soon
    /// as `cancel` completes. Cancellation keeps the original reasons and
    /// appends an [`ExceptionalError`] wrapping
    /// [`Cancelled`](crate::Cancelled).
    pub async fn bind_async_until<U, F, Fut, C>(self, f: F, cancel: C) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
        C: Future,
    {
        match self.into_success() {
            (reasons, Some(value)) => match race_cancel(f(value), cancel).await {
                Ok(next) => chain(reasons, next),
                Err(cancelled) => {
                    let mut reasons = reasons;
                    reasons.push_error(ExceptionalError::new(cancelled));
                    Outcome::from_parts(reasons, None)
                }
            },
            (reasons, None) => Outcome::from_parts(reasons, None),
        }
    }
}
