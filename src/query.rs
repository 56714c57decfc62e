//! Recursive queries over an outcome's reasons
//!
//! Error queries walk the whole cause tree: each top-level error, then its
//! causes, depth first and in attachment order. Success queries only look at
//! the top level, since successes carry no nested structure.
//!
//! Typed queries match a reason of the requested type and any reason that
//! specializes it through [`ErrorReason::base`]. An [`ExceptionalError`] or a
//! wrapper declared with [`impl_error_reason!`](crate::impl_error_reason) is
//! therefore also returned by `get_errors::<Error>()`, viewed as its inner
//! `Error`.
//!
//! # Examples
//!
//! ```
//! use causeway::{Error, Outcome, ReasonQuery};
//!
//! let root = Error::new("save failed")
//!     .caused_by(Error::new("disk full").caused_by(Error::new("quota exceeded")))
//!     .caused_by(Error::new("retry gave up"));
//!
//! let outcome = Outcome::<()>::fail(root);
//! let messages: Vec<String> = outcome
//!     .get_errors::<Error>()
//!     .iter()
//!     .map(|e| e.message().to_string())
//!     .collect();
//!
//! assert_eq!(
//!     messages,
//!     vec!["save failed", "disk full", "quota exceeded", "retry gave up"]
//! );
//! # use causeway::Reason;
//! ```

use std::error::Error as StdError;

use crate::reason::{
    metadata_matches, ErrorReason, ErrorRef, ExceptionalError, MetadataValue, Reason,
    SuccessReason, SuccessRef,
};
use crate::reason_list::ReasonList;

/// Visit `errors` and all their causes in pre-order, keeping what `select`
/// returns.
pub(crate) fn select_errors<'a, R, F>(errors: &'a [ErrorRef], mut select: F) -> Vec<R>
where
    F: FnMut(&'a ErrorRef) -> Option<R>,
{
    let mut selected = Vec::new();
    walk(errors, &mut select, &mut selected);
    selected
}

fn walk<'a, R, F>(errors: &'a [ErrorRef], select: &mut F, selected: &mut Vec<R>)
where
    F: FnMut(&'a ErrorRef) -> Option<R>,
{
    for error in errors {
        if let Some(hit) = select(error) {
            selected.push(hit);
        }
        walk(error.causes(), select, selected);
    }
}

fn exception_of<X: StdError + 'static>(error: &ErrorRef) -> Option<(&ExceptionalError, &X)> {
    let exceptional = error.as_type::<ExceptionalError>()?;
    let exception = exceptional.downcast_exception::<X>()?;
    Some((exceptional, exception))
}

fn non_empty<T>(found: Vec<T>) -> Option<Vec<T>> {
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// Queries shared by everything that owns a [`ReasonList`].
pub trait ReasonQuery {
    /// The reasons being queried.
    fn reason_list(&self) -> &ReasonList;

    /// Every error at any depth, in pre-order.
    fn all_errors(&self) -> Vec<&ErrorRef> {
        select_errors(self.reason_list().errors(), Some)
    }

    /// Errors of type `E` at any depth, in pre-order.
    fn get_errors<E: ErrorReason>(&self) -> Vec<&E> {
        self.get_errors_where(|_: &E| true)
    }

    /// Errors of type `E` at any depth that satisfy `predicate`.
    fn get_errors_where<E, P>(&self, predicate: P) -> Vec<&E>
    where
        E: ErrorReason,
        P: Fn(&E) -> bool,
    {
        select_errors(self.reason_list().errors(), |error| {
            error.as_type::<E>().filter(|e| predicate(e))
        })
    }

    /// Errors of any type at any depth that satisfy `predicate`.
    fn errors_where<P>(&self, predicate: P) -> Vec<&ErrorRef>
    where
        P: Fn(&dyn ErrorReason) -> bool,
    {
        select_errors(self.reason_list().errors(), |error| {
            Some(error).filter(|e| predicate(&***e))
        })
    }

    /// Errors of type `E` whose metadata holds `key` with exactly `value`.
    fn get_errors_with_metadata<E: ErrorReason>(
        &self,
        key: &str,
        value: impl Into<MetadataValue>,
    ) -> Vec<&E> {
        let value = value.into();
        self.get_errors_where(|e: &E| metadata_matches(e.metadata(), key, &value))
    }

    /// Errors of any type whose metadata holds `key` with exactly `value`.
    fn errors_with_metadata(&self, key: &str, value: impl Into<MetadataValue>) -> Vec<&ErrorRef> {
        let value = value.into();
        self.errors_where(|e| metadata_matches(e.metadata(), key, &value))
    }

    /// Whether an error of type `E` exists at any depth.
    fn has_error_of<E: ErrorReason>(&self) -> bool {
        !self.get_errors::<E>().is_empty()
    }

    /// Whether an error of type `E` satisfying `predicate` exists at any depth.
    fn has_error_where<E, P>(&self, predicate: P) -> bool
    where
        E: ErrorReason,
        P: Fn(&E) -> bool,
    {
        !self.get_errors_where(predicate).is_empty()
    }

    /// The matching errors, or `None` when there are none.
    fn find_errors<E, P>(&self, predicate: P) -> Option<Vec<&E>>
    where
        E: ErrorReason,
        P: Fn(&E) -> bool,
    {
        non_empty(self.get_errors_where(predicate))
    }

    /// Exceptional errors, at any depth, wrapping an `X`.
    fn get_exceptions<X: StdError + 'static>(&self) -> Vec<&ExceptionalError> {
        self.get_exceptions_where(|_| true, |_: &X| true)
    }

    /// Exceptional errors wrapping an `X`, filtered on both the error and the
    /// wrapped value.
    fn get_exceptions_where<X, P, Q>(&self, error_predicate: P, exception_predicate: Q) -> Vec<&ExceptionalError>
    where
        X: StdError + 'static,
        P: Fn(&ExceptionalError) -> bool,
        Q: Fn(&X) -> bool,
    {
        select_errors(self.reason_list().errors(), |error| {
            exception_of::<X>(error)
                .filter(|&(e, x)| error_predicate(e) && exception_predicate(x))
                .map(|(e, _)| e)
        })
    }

    /// Exceptional errors of any wrapped type that satisfy `predicate`.
    fn exceptions_where<P>(&self, predicate: P) -> Vec<&ExceptionalError>
    where
        P: Fn(&ExceptionalError) -> bool,
    {
        select_errors(self.reason_list().errors(), |error| {
            error.as_type::<ExceptionalError>().filter(|e| predicate(e))
        })
    }

    /// Exceptional errors wrapping an `X` whose metadata holds `key` with
    /// exactly `value`.
    fn get_exceptions_with_metadata<X: StdError + 'static>(
        &self,
        key: &str,
        value: impl Into<MetadataValue>,
    ) -> Vec<&ExceptionalError> {
        let value = value.into();
        self.get_exceptions_where(
            |e| metadata_matches(e.metadata(), key, &value),
            |_: &X| true,
        )
    }

    /// Exceptional errors of any wrapped type whose metadata holds `key` with
    /// exactly `value`.
    fn exceptions_with_metadata(&self, key: &str, value: impl Into<MetadataValue>) -> Vec<&ExceptionalError> {
        let value = value.into();
        self.exceptions_where(|e| metadata_matches(e.metadata(), key, &value))
    }

    /// Whether an exceptional error wrapping an `X` exists at any depth.
    fn has_exception_of<X: StdError + 'static>(&self) -> bool {
        !self.get_exceptions::<X>().is_empty()
    }

    /// Whether an exceptional error wraps an `X` satisfying `predicate`.
    fn has_exception_where<X, Q>(&self, predicate: Q) -> bool
    where
        X: StdError + 'static,
        Q: Fn(&X) -> bool,
    {
        !self.get_exceptions_where(|_| true, predicate).is_empty()
    }

    /// The matching exceptional errors, or `None` when there are none.
    fn find_exceptions<X, Q>(&self, predicate: Q) -> Option<Vec<&ExceptionalError>>
    where
        X: StdError + 'static,
        Q: Fn(&X) -> bool,
    {
        non_empty(self.get_exceptions_where(|_| true, predicate))
    }

    /// Top-level successes of type `S`.
    fn get_successes<S: SuccessReason>(&self) -> Vec<&S> {
        self.get_successes_where(|_: &S| true)
    }

    /// Top-level successes of type `S` that satisfy `predicate`.
    fn get_successes_where<S, P>(&self, predicate: P) -> Vec<&S>
    where
        S: SuccessReason,
        P: Fn(&S) -> bool,
    {
        self.reason_list()
            .iter()
            .filter_map(|reason| reason.as_success())
            .filter_map(|success| success.as_type::<S>())
            .filter(|s| predicate(s))
            .collect()
    }

    /// Top-level successes of any type that satisfy `predicate`.
    fn successes_where<P>(&self, predicate: P) -> Vec<&SuccessRef>
    where
        P: Fn(&dyn SuccessReason) -> bool,
    {
        self.reason_list()
            .iter()
            .filter_map(|reason| reason.as_success())
            .filter(|s| predicate(&***s))
            .collect()
    }

    /// Successes of type `S` whose metadata holds `key` with exactly `value`.
    fn get_successes_with_metadata<S: SuccessReason>(
        &self,
        key: &str,
        value: impl Into<MetadataValue>,
    ) -> Vec<&S> {
        let value = value.into();
        self.get_successes_where(|s: &S| metadata_matches(s.metadata(), key, &value))
    }

    /// Successes of any type whose metadata holds `key` with exactly `value`.
    fn successes_with_metadata(&self, key: &str, value: impl Into<MetadataValue>) -> Vec<&SuccessRef> {
        let value = value.into();
        self.successes_where(|s| metadata_matches(s.metadata(), key, &value))
    }

    /// Whether a top-level success of type `S` exists.
    fn has_success_of<S: SuccessReason>(&self) -> bool {
        !self.get_successes::<S>().is_empty()
    }

    /// Whether a top-level success of type `S` satisfies `predicate`.
    fn has_success_where<S, P>(&self, predicate: P) -> bool
    where
        S: SuccessReason,
        P: Fn(&S) -> bool,
    {
        !self.get_successes_where(predicate).is_empty()
    }

    /// The matching successes, or `None` when there are none.
    fn find_successes<S, P>(&self, predicate: P) -> Option<Vec<&S>>
    where
        S: SuccessReason,
        P: Fn(&S) -> bool,
    {
        non_empty(self.get_successes_where(predicate))
    }
}

impl ReasonQuery for ReasonList {
    fn reason_list(&self) -> &ReasonList {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::{AnyReason, Error, Reason, Success};
    use std::fmt;

    #[derive(Debug, Clone)]
    struct Conflict {
        inner: Error,
    }

    crate::impl_error_reason!(Conflict, inner);

    #[derive(Debug)]
    struct Refused(u16);

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused with {}", self.0)
        }
    }

    impl StdError for Refused {}

    fn tree() -> ReasonList {
        // root
        // +- a
        // |  +- conflict
        // +- b (exception)
        let root = Error::new("root")
            .caused_by(Error::new("a").caused_by(Conflict {
                inner: Error::new("conflict").with_metadata("table", "users"),
            }))
            .caused_by(ExceptionalError::new(Refused(503)).with_metadata("host", "db"));

        let mut list = ReasonList::new();
        list.push(AnyReason::success(Success::new("connected").with_metadata("pool", 4)));
        list.push(AnyReason::error(root));
        list.push(AnyReason::error(Error::new("second")));
        list
    }

    fn messages<R: Reason + ?Sized>(found: &[&R]) -> Vec<String> {
        found.iter().map(|r| r.message().to_string()).collect()
    }

    #[test]
    fn test_get_errors_is_pre_order() {
        let list = tree();
        assert_eq!(
            messages(&list.get_errors::<Error>()),
            vec!["root", "a", "conflict", "refused with 503", "second"]
        );

        let all: Vec<&str> = list.all_errors().iter().map(|e| e.message()).collect();
        assert_eq!(all, vec!["root", "a", "conflict", "refused with 503", "second"]);
    }

    #[test]
    fn test_get_errors_by_subtype() {
        let list = tree();
        let conflicts = list.get_errors::<Conflict>();
        assert_eq!(messages(&conflicts), vec!["conflict"]);
        assert!(list.has_error_of::<Conflict>());
        assert!(list.find_errors(|c: &Conflict| c.message() == "nope").is_none());
    }

    #[test]
    fn test_specialized_errors_match_their_base() {
        let list = tree();
        assert!(list.has_error_where(|e: &Error| e.message() == "conflict"));
        assert!(list.has_error_where(|e: &Error| e.message() == "refused with 503"));
        assert_eq!(list.get_errors::<ExceptionalError>().len(), 1);
        assert_eq!(list.get_errors_with_metadata::<Error>("host", "db").len(), 1);
    }

    #[test]
    fn test_errors_with_metadata() {
        let list = tree();
        assert_eq!(list.get_errors_with_metadata::<Conflict>("table", "users").len(), 1);
        assert!(list.get_errors_with_metadata::<Conflict>("table", "orders").is_empty());
        assert_eq!(list.errors_with_metadata("host", "db").len(), 1);
    }

    #[test]
    fn test_exception_queries() {
        let list = tree();
        assert_eq!(list.get_exceptions::<Refused>().len(), 1);
        assert!(list.get_exceptions::<std::io::Error>().is_empty());
        assert!(list.has_exception_where(|r: &Refused| r.0 == 503));
        assert!(!list.has_exception_where(|r: &Refused| r.0 == 404));
        assert_eq!(list.get_exceptions_with_metadata::<Refused>("host", "db").len(), 1);
        assert_eq!(list.exceptions_where(|_| true).len(), 1);
    }

    #[test]
    fn test_success_queries_are_top_level() {
        let list = tree();
        assert_eq!(list.get_successes::<Success>().len(), 1);
        assert!(list.has_success_where(|s: &Success| s.message() == "connected"));
        assert_eq!(list.successes_with_metadata("pool", 4).len(), 1);
        assert!(list.find_successes(|s: &Success| s.message() == "other").is_none());
    }

    #[test]
    fn test_errors_where_spans_types() {
        let list = tree();
        let found = list.errors_where(|e| e.message().len() > 5);
        let found: Vec<&str> = found.iter().map(|e| e.message()).collect();
        assert_eq!(found, vec!["conflict", "refused with 503", "second"]);
    }
}
