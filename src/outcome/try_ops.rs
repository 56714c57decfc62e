//! Running fallible work and turning its failures into reasons
//!
//! Caller code fails in one of three ways: it returns `Err`, it panics, or
//! it loses a race against a cancellation signal. Each is converted into an
//! [`ExceptionalError`] inside a failed outcome instead of escaping:
//!
//! - `Err(x)` wraps `x` (any `Into<Box<dyn Error + Send + Sync>>`)
//! - a panic wraps [`Panicked`]
//! - cancellation wraps [`Cancelled`]
//!
//! # Examples
//!
//! ```
//! use causeway::{Outcome, ReasonQuery};
//!
//! let parsed = Outcome::try_with(|| "42".parse::<i32>());
//! assert_eq!(*parsed.value(), 42);
//!
//! let broken = Outcome::try_with(|| "forty two".parse::<i32>());
//! assert!(broken.has_exception_of::<std::num::ParseIntError>());
//! ```

use std::error::Error as StdError;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;

use futures::future::{self, Either};
use futures::FutureExt;

use super::Outcome;
use crate::reason::{Cancelled, ExceptionalError, IntoErrorRef, Panicked};
#[cfg(feature = "tracing")]
use crate::reason::Reason;
use crate::reason_list::ReasonList;

/// Boxed error accepted from caller code.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Wrap a caller failure as an exceptional error.
pub(crate) fn exceptional<X: Into<BoxError>>(failure: X) -> ExceptionalError {
    let error = ExceptionalError::from_boxed(failure.into());
    #[cfg(feature = "tracing")]
    tracing::debug!(message = error.message(), "caller failure converted into an exceptional error");
    error
}

/// Run `work`, converting a panic into an exceptional error.
pub(crate) fn guarded<R>(work: impl FnOnce() -> R) -> Result<R, ExceptionalError> {
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
        let panicked = Panicked::from_payload(payload);
        #[cfg(feature = "tracing")]
        tracing::debug!(panic = panicked.message(), "panic converted into an exceptional error");
        ExceptionalError::new(panicked)
    })
}

/// Race `work` against `cancel`. Whichever finishes first wins; the loser is
/// dropped.
pub(crate) async fn race_cancel<W, C>(work: W, cancel: C) -> Result<W::Output, Cancelled>
where
    W: Future,
    C: Future,
{
    let work = pin!(work);
    let cancel = pin!(cancel);
    match future::select(work, cancel).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right((_, _)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("work cancelled before completion");
            Err(Cancelled)
        }
    }
}

pub(crate) fn failed_with<T>(error: impl IntoErrorRef) -> Outcome<T> {
    let mut reasons = ReasonList::new();
    reasons.push_error(error);
    Outcome::from_parts(reasons, None)
}

impl<T> Outcome<T> {
    /// Run `work`; `Ok` becomes a success, `Err` an [`ExceptionalError`].
    pub fn try_with<F, X>(work: F) -> Self
    where
        F: FnOnce() -> Result<T, X>,
        X: Into<BoxError>,
    {
        Outcome::try_with_handler(work, exceptional)
    }

    /// Run `work`; `Err` is converted into an error by `handler`.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, Outcome};
    ///
    /// let outcome = Outcome::try_with_handler(
    ///     || std::fs::read_to_string("/definitely/not/here"),
    ///     |e| Error::new("config unavailable").with_metadata("kind", format!("{:?}", e.kind())),
    /// );
    /// assert!(outcome.is_failed());
    /// ```
    pub fn try_with_handler<F, X, H, E>(work: F, handler: H) -> Self
    where
        F: FnOnce() -> Result<T, X>,
        H: FnOnce(X) -> E,
        E: IntoErrorRef,
    {
        match work() {
            Ok(value) => Outcome::ok(value),
            Err(failure) => failed_with(handler(failure)),
        }
    }

    /// Run `work` that already produces an outcome; `Err` becomes an
    /// [`ExceptionalError`].
    pub fn try_outcome<F, X>(work: F) -> Self
    where
        F: FnOnce() -> Result<Outcome<T>, X>,
        X: Into<BoxError>,
    {
        match work() {
            Ok(outcome) => outcome,
            Err(failure) => failed_with(exceptional(failure)),
        }
    }

    /// Run `work`; a panic becomes an [`ExceptionalError`] wrapping
    /// [`Panicked`].
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Outcome, Panicked, ReasonQuery};
    ///
    /// let outcome = Outcome::<u32>::catch_unwind(|| panic!("index out of range"));
    /// assert!(outcome.has_exception_where(|p: &Panicked| p.message() == "index out of range"));
    /// ```
    pub fn catch_unwind<F>(work: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match guarded(work) {
            Ok(value) => Outcome::ok(value),
            Err(error) => failed_with(error),
        }
    }

    /// Await `work`; `Ok` becomes a success, `Err` an [`ExceptionalError`].
    pub async fn try_future<Fut, X>(work: Fut) -> Self
    where
        Fut: Future<Output = Result<T, X>>,
        X: Into<BoxError>,
    {
        Outcome::try_future_with_handler(work, exceptional).await
    }

    /// Await `work`; `Err` is converted into an error by `handler`.
    pub async fn try_future_with_handler<Fut, X, H, E>(work: Fut, handler: H) -> Self
    where
        Fut: Future<Output = Result<T, X>>,
        H: FnOnce(X) -> E,
        E: IntoErrorRef,
    {
        match work.await {
            Ok(value) => Outcome::ok(value),
            Err(failure) => failed_with(handler(failure)),
        }
    }

    /// Await `work` that already produces an outcome; `Err` becomes an
    /// [`ExceptionalError`].
    pub async fn try_future_outcome<Fut, X>(work: Fut) -> Self
    where
        Fut: Future<Output = Result<Outcome<T>, X>>,
        X: Into<BoxError>,
    {
        match work.await {
            Ok(outcome) => outcome,
            Err(failure) => failed_with(exceptional(failure)),
        }
    }

    /// Like [`try_future`](Self::try_future), abandoning `work` as soon as
    /// `cancel` completes. Cancellation yields an [`ExceptionalError`]
    /// wrapping [`Cancelled`].
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Cancelled, Outcome, ReasonQuery};
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let slow = async {
    ///     tokio::time::sleep(Duration::from_secs(60)).await;
    ///     Ok::<_, std::io::Error>(1)
    /// };
    /// let outcome = Outcome::try_future_until(slow, async {}).await;
    /// assert!(outcome.has_exception_of::<Cancelled>());
    /// # });
    /// ```
    pub async fn try_future_until<Fut, X, C>(work: Fut, cancel: C) -> Self
    where
        Fut: Future<Output = Result<T, X>>,
        X: Into<BoxError>,
        C: Future,
    {
        match race_cancel(Outcome::try_future(work), cancel).await {
            Ok(outcome) => outcome,
            Err(cancelled) => failed_with(ExceptionalError::new(cancelled)),
        }
    }

    /// Await `work`; a panic while polling becomes an [`ExceptionalError`]
    /// wrapping [`Panicked`].
    pub async fn catch_unwind_future<Fut>(work: Fut) -> Self
    where
        Fut: Future<Output = T>,
    {
        match AssertUnwindSafe(work).catch_unwind().await {
            Ok(value) => Outcome::ok(value),
            Err(payload) => failed_with(ExceptionalError::new(Panicked::from_payload(payload))),
        }
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use std::time::Duration;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_conversion_is_logged() {
        let _ = Outcome::<u8>::try_with(|| "x".parse::<u8>());
        assert!(logs_contain("caller failure converted into an exceptional error"));
    }

    #[test]
    #[traced_test]
    fn test_rejection_is_logged() {
        let _ = Outcome::ok(1).ensure(|v| *v > 1, "too small");
        assert!(logs_contain("ensure rejected the value"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_cancellation_is_logged() {
        let _ = Outcome::<()>::try_future_until(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, BoxError>(())
            },
            async {},
        )
        .await;
        assert!(logs_contain("work cancelled before completion"));
    }
}
