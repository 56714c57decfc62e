//! The append-only reason sequence behind every [`Outcome`](crate::Outcome)
//!
//! A [`ReasonList`] keeps the reasons in insertion order and a cache of its
//! top-level errors. The cache is rebuilt by the same call that appends, so
//! [`is_failed`](ReasonList::is_failed) is exact as soon as any mutating call
//! returns. Nested causes never count towards the failed state.
//!
//! # Examples
//!
//! ```
//! use causeway::{AnyReason, Error, ReasonList, Success};
//!
//! let mut reasons = ReasonList::new();
//! reasons.push(AnyReason::success(Success::new("loaded config")));
//! assert!(reasons.is_success());
//!
//! reasons.push(AnyReason::error(Error::new("port already in use")));
//! assert!(reasons.is_failed());
//! assert_eq!(reasons.errors().len(), 1);
//! assert_eq!(reasons.successes().len(), 1);
//! ```

use std::fmt;

use crate::reason::{AnyReason, ErrorRef, IntoErrorRef, IntoSuccessRef, SuccessRef};
use crate::render::join_reasons;

/// Ordered, append-only sequence of reasons with a cached error view.
#[derive(Debug, Clone, Default)]
pub struct ReasonList {
    reasons: Vec<AnyReason>,
    errors: Vec<ErrorRef>,
}

impl ReasonList {
    /// An empty list.
    pub fn new() -> Self {
        ReasonList::default()
    }

    /// Append a reason.
    pub fn push(&mut self, reason: impl Into<AnyReason>) {
        let reason = reason.into();
        if let AnyReason::Error(error) = &reason {
            self.errors.push(ErrorRef::clone(error));
        }
        self.reasons.push(reason);
    }

    /// Append an error.
    pub fn push_error(&mut self, error: impl IntoErrorRef) {
        self.push(AnyReason::Error(error.into_error_ref()));
    }

    /// Append a success.
    pub fn push_success(&mut self, success: impl IntoSuccessRef) {
        self.push(AnyReason::Success(success.into_success_ref()));
    }

    /// Append every reason of `other`, preserving its order.
    pub fn append(&mut self, other: ReasonList) {
        self.errors.extend(other.errors);
        self.reasons.extend(other.reasons);
    }

    /// The reasons in insertion order.
    pub fn as_slice(&self) -> &[AnyReason] {
        &self.reasons
    }

    /// Iterate the reasons in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnyReason> {
        self.reasons.iter()
    }

    /// Number of top-level reasons.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Whether no reason was ever added.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// The top-level errors, in insertion order.
    pub fn errors(&self) -> &[ErrorRef] {
        &self.errors
    }

    /// The successes, in insertion order. Computed on every call.
    pub fn successes(&self) -> Vec<SuccessRef> {
        self.reasons
            .iter()
            .filter_map(|reason| reason.as_success().cloned())
            .collect()
    }

    /// Whether any top-level reason is an error.
    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether no top-level reason is an error.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Replace each error, in order, with the next item of `mapped`.
    /// Successes stay where they were.
    pub(crate) fn replace_errors(self, mapped: Vec<ErrorRef>) -> ReasonList {
        debug_assert_eq!(mapped.len(), self.errors.len());
        let mut mapped = mapped.into_iter();
        self.reasons
            .into_iter()
            .filter_map(|reason| match reason {
                AnyReason::Error(_) => mapped.next().map(AnyReason::Error),
                success => Some(success),
            })
            .collect()
    }

    /// Replace each success, in order, with the next item of `mapped`.
    /// Errors stay where they were.
    pub(crate) fn replace_successes(self, mapped: Vec<SuccessRef>) -> ReasonList {
        let mut mapped = mapped.into_iter();
        self.reasons
            .into_iter()
            .filter_map(|reason| match reason {
                AnyReason::Success(_) => mapped.next().map(AnyReason::Success),
                error => Some(error),
            })
            .collect()
    }
}

impl fmt::Display for ReasonList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_reasons(self.reasons.iter()))
    }
}

impl AsRef<ReasonList> for ReasonList {
    fn as_ref(&self) -> &ReasonList {
        self
    }
}

impl<R: Into<AnyReason>> Extend<R> for ReasonList {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for reason in iter {
            self.push(reason);
        }
    }
}

impl<R: Into<AnyReason>> FromIterator<R> for ReasonList {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut list = ReasonList::new();
        list.extend(iter);
        list
    }
}

impl IntoIterator for ReasonList {
    type Item = AnyReason;
    type IntoIter = std::vec::IntoIter<AnyReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.reasons.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReasonList {
    type Item = &'a AnyReason;
    type IntoIter = std::slice::Iter<'a, AnyReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.reasons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::{Error, Reason, Success};
    use std::sync::Arc;

    fn error(message: &str) -> AnyReason {
        AnyReason::error(Error::new(message))
    }

    fn success(message: &str) -> AnyReason {
        AnyReason::success(Success::new(message))
    }

    #[test]
    fn test_pristine_list_is_success() {
        let list = ReasonList::new();
        assert!(list.is_empty());
        assert!(list.is_success());
        assert!(!list.is_failed());
    }

    #[test]
    fn test_failed_state_tracks_each_push() {
        let mut list = ReasonList::new();
        list.push(success("a"));
        assert!(list.is_success());
        list.push(error("b"));
        assert!(list.is_failed());
        list.push(success("c"));
        assert!(list.is_failed());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_nested_causes_do_not_fail_the_list() {
        let mut list = ReasonList::new();
        list.push(success("fine"));
        assert!(list.is_success());

        let mut other = ReasonList::new();
        other.push(AnyReason::error(Error::new("outer").caused_by(Error::new("inner"))));
        assert_eq!(other.errors().len(), 1);
    }

    #[test]
    fn test_append_keeps_cache_in_sync() {
        let mut left: ReasonList = vec![success("a"), error("b")].into_iter().collect();
        let right: ReasonList = vec![error("c"), success("d")].into_iter().collect();
        left.append(right);

        let messages: Vec<&str> = left.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["a", "b", "c", "d"]);
        let errors: Vec<&str> = left.errors().iter().map(|e| e.message()).collect();
        assert_eq!(errors, vec!["b", "c"]);
    }

    #[test]
    fn test_replace_errors_preserves_positions() {
        let list: ReasonList = vec![error("e1"), success("s1"), error("e2")]
            .into_iter()
            .collect();
        let mapped: Vec<ErrorRef> = vec![Arc::new(Error::new("E1")), Arc::new(Error::new("E2"))];
        let list = list.replace_errors(mapped);

        let messages: Vec<&str> = list.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["E1", "s1", "E2"]);
        assert_eq!(list.errors()[1].message(), "E2");
    }

    #[test]
    fn test_replace_successes_preserves_positions() {
        let list: ReasonList = vec![success("s1"), error("e1"), success("s2")]
            .into_iter()
            .collect();
        let mapped: Vec<SuccessRef> =
            vec![Arc::new(Success::new("S1")), Arc::new(Success::new("S2"))];
        let list = list.replace_successes(mapped);

        let messages: Vec<&str> = list.iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["S1", "e1", "S2"]);
    }

    #[test]
    fn test_display_joins_with_semicolon() {
        let list: ReasonList = vec![error("a"), success("b")].into_iter().collect();
        assert_eq!(
            list.to_string(),
            "Error with Message='a'; Success with Message='b'"
        );
    }
}
