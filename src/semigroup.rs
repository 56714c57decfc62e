//! Semigroup trait for associative combination
//!
//! Merging outcomes is a fold: reason lists combine by concatenation, value
//! lists by concatenation, and an outcome's failed state is the disjunction
//! of its parts. Each of those is associative, so merging in any grouping
//! gives the same result.
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use causeway::{Outcome, Semigroup};
//!
//! let left = Outcome::ok(vec![1]).with_success("left");
//! let right = Outcome::ok(vec![2, 3]).with_success("right");
//!
//! let merged = left.combine(right);
//! assert_eq!(*merged.value(), vec![1, 2, 3]);
//! assert_eq!(merged.reasons().len(), 2);
//! ```

use crate::outcome::Outcome;
use crate::reason_list::ReasonList;

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// # Note on Ownership
///
/// The `combine` method takes `self` by value, not by reference. If you need to
/// preserve the original values, you must clone them before combining.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for ReasonList {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.append(other);
        self
    }
}

// A successful side without a value counts as an empty list, so a
// successful result always holds one.
impl<T> Semigroup for Outcome<Vec<T>> {
    fn combine(self, other: Self) -> Self {
        let (left_reasons, left) = self.into_inner();
        let (right_reasons, right) = other.into_inner();
        let reasons = left_reasons.combine(right_reasons);
        let value = if reasons.is_success() {
            Some(left.unwrap_or_default().combine(right.unwrap_or_default()))
        } else {
            None
        };
        Outcome::from_parts(reasons, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Reason;

    fn messages<T>(outcome: &Outcome<T>) -> Vec<String> {
        outcome
            .reasons()
            .iter()
            .map(|r| r.message().to_string())
            .collect()
    }

    #[test]
    fn test_vec_semigroup() {
        let v1 = vec![1, 2, 3];
        let v2 = vec![4, 5, 6];
        assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_reason_list_semigroup() {
        let left: ReasonList = Outcome::ok(()).with_success("a").into_inner().0;
        let right: ReasonList = Outcome::<()>::fail("b").into_inner().0;
        let combined = left.combine(right);
        assert!(combined.is_failed());
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_outcome_failure_clears_value() {
        let combined = Outcome::ok(vec![1]).combine(Outcome::fail("boom"));
        assert!(combined.is_failed());
        assert!(combined.last_successful_value().is_none());
    }

    #[test]
    fn test_outcome_associativity() {
        let a = || Outcome::ok(vec![1]).with_success("a");
        let b = || Outcome::<Vec<i32>>::fail("b");
        let c = || Outcome::ok(vec![3]).with_success("c");

        let left = a().combine(b()).combine(c());
        let right = a().combine(b().combine(c()));

        assert_eq!(messages(&left), messages(&right));
        assert_eq!(left.is_failed(), right.is_failed());
        assert_eq!(left.last_successful_value(), right.last_successful_value());
    }

    #[test]
    fn test_outcome_associativity_all_successful() {
        let a = || Outcome::ok(vec![1]);
        let b = || Outcome::ok(vec![2]);
        let c = || Outcome::ok(vec![3]);

        let left = a().combine(b()).combine(c());
        let right = a().combine(b().combine(c()));

        assert_eq!(left.value(), right.value());
        assert_eq!(*left.value(), vec![1, 2, 3]);
    }
}
