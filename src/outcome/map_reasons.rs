//! Transforming the errors or successes of an outcome
//!
//! `map_errors` rewrites each top-level error of a failed outcome and leaves
//! a successful one untouched. `map_successes` rewrites each success of a
//! successful outcome and leaves a failed one untouched. Mapped reasons keep
//! their position among the reasons of the other kind, and the value is
//! carried over.
//!
//! The async forms fan out through [`Dispatch`]; the plain `_async` forms
//! always run mappers concurrently, the `_dispatch` forms let the caller
//! choose or defer to the thresholds in [`config`](crate::config).

use std::future::Future;

use super::try_ops::race_cancel;
use super::Outcome;
use crate::config;
use crate::dispatch::{map_all, Dispatch};
use crate::reason::{ErrorRef, ExceptionalError, IntoErrorRef, IntoSuccessRef, SuccessRef};

impl<T> Outcome<T> {
    /// Rewrite every top-level error with `mapper`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, Outcome};
    ///
    /// let outcome = Outcome::<()>::fail("db timeout")
    ///     .map_errors(|e| Error::new("storage unavailable").caused_by(e));
    ///
    /// assert_eq!(outcome.errors()[0].message(), "storage unavailable");
    /// assert_eq!(outcome.errors()[0].causes()[0].message(), "db timeout");
    /// # use causeway::{ErrorReason, Reason};
    /// ```
    pub fn map_errors<E, F>(self, mut mapper: F) -> Self
    where
        F: FnMut(ErrorRef) -> E,
        E: IntoErrorRef,
    {
        if self.is_success() {
            return self;
        }
        let (reasons, value) = self.into_inner();
        let mapped = reasons
            .errors()
            .iter()
            .cloned()
            .map(|error| mapper(error).into_error_ref())
            .collect();
        Outcome::from_parts(reasons.replace_errors(mapped), value)
    }

    /// Rewrite every success with `mapper`.
    pub fn map_successes<S, F>(self, mut mapper: F) -> Self
    where
        F: FnMut(SuccessRef) -> S,
        S: IntoSuccessRef,
    {
        if self.is_failed() {
            return self;
        }
        let (reasons, value) = self.into_inner();
        let mapped = reasons
            .successes()
            .into_iter()
            .map(|success| mapper(success).into_success_ref())
            .collect();
        Outcome::from_parts(reasons.replace_successes(mapped), value)
    }

    /// Rewrite every top-level error with an async `mapper`, running all
    /// mappers concurrently.
    pub async fn map_errors_async<E, F, Fut>(self, mapper: F) -> Self
    where
        F: FnMut(ErrorRef) -> Fut,
        Fut: Future<Output = E>,
        E: IntoErrorRef,
    {
        self.map_errors_dispatch(mapper, Dispatch::Parallel).await
    }

    /// Rewrite every top-level error with an async `mapper` scheduled by
    /// `dispatch`. [`Dispatch::Auto`] compares the error count with
    /// [`config::error_parallel_threshold`].
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Dispatch, Error, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = Outcome::<()>::fail_many(["a", "b"])
    ///     .map_errors_dispatch(
    ///         |e| async move { Error::new(format!("wrapped {}", e.message())) },
    ///         Dispatch::Auto,
    ///     )
    ///     .await;
    /// assert_eq!(outcome.errors()[1].message(), "wrapped b");
    /// # });
    /// # use causeway::Reason;
    /// ```
    pub async fn map_errors_dispatch<E, F, Fut>(self, mapper: F, dispatch: Dispatch) -> Self
    where
        F: FnMut(ErrorRef) -> Fut,
        Fut: Future<Output = E>,
        E: IntoErrorRef,
    {
        if self.is_success() {
            return self;
        }
        let (reasons, value) = self.into_inner();
        let mapped = map_all(
            reasons.errors().to_vec(),
            mapper,
            dispatch,
            config::error_parallel_threshold(),
            "errors",
        )
        .await
        .into_iter()
        .map(IntoErrorRef::into_error_ref)
        .collect();
        Outcome::from_parts(reasons.replace_errors(mapped), value)
    }

    /// Like [`map_errors_dispatch`](Self::map_errors_dispatch), abandoning
    /// the mapping as soon as `cancel` completes. Cancellation keeps the
    /// unmapped reasons and appends an [`ExceptionalError`] wrapping
    /// [`Cancelled`](crate::Cancelled).
    pub async fn map_errors_dispatch_until<E, F, Fut, C>(
        self,
        mapper: F,
        dispatch: Dispatch,
        cancel: C,
    ) -> Self
    where
        T: Clone,
        F: FnMut(ErrorRef) -> Fut,
        Fut: Future<Output = E>,
        E: IntoErrorRef,
        C: Future,
    {
        let fallback = self.clone();
        match race_cancel(self.map_errors_dispatch(mapper, dispatch), cancel).await {
            Ok(mapped) => mapped,
            Err(cancelled) => fallback.with_error(ExceptionalError::new(cancelled)),
        }
    }

    /// Rewrite every success with an async `mapper`, running all mappers
    /// concurrently.
    pub async fn map_successes_async<S, F, Fut>(self, mapper: F) -> Self
    where
        F: FnMut(SuccessRef) -> Fut,
        Fut: Future<Output = S>,
        S: IntoSuccessRef,
    {
        self.map_successes_dispatch(mapper, Dispatch::Parallel).await
    }

    /// Rewrite every success with an async `mapper` scheduled by `dispatch`.
    /// [`Dispatch::Auto`] compares the success count with
    /// [`config::success_parallel_threshold`].
    pub async fn map_successes_dispatch<S, F, Fut>(self, mapper: F, dispatch: Dispatch) -> Self
    where
        F: FnMut(SuccessRef) -> Fut,
        Fut: Future<Output = S>,
        S: IntoSuccessRef,
    {
        if self.is_failed() {
            return self;
        }
        let (reasons, value) = self.into_inner();
        let mapped = map_all(
            reasons.successes(),
            mapper,
            dispatch,
            config::success_parallel_threshold(),
            "successes",
        )
        .await
        .into_iter()
        .map(IntoSuccessRef::into_success_ref)
        .collect();
        Outcome::from_parts(reasons.replace_successes(mapped), value)
    }

    /// Like [`map_successes_dispatch`](Self::map_successes_dispatch),
    /// abandoning the mapping as soon as `cancel` completes.
    pub async fn map_successes_dispatch_until<S, F, Fut, C>(
        self,
        mapper: F,
        dispatch: Dispatch,
        cancel: C,
    ) -> Self
    where
        T: Clone,
        F: FnMut(SuccessRef) -> Fut,
        Fut: Future<Output = S>,
        S: IntoSuccessRef,
        C: Future,
    {
        let fallback = self.clone();
        match race_cancel(self.map_successes_dispatch(mapper, dispatch), cancel).await {
            Ok(mapped) => mapped,
            Err(cancelled) => fallback.with_error(ExceptionalError::new(cancelled)),
        }
    }
}
