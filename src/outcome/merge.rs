//! Folding many outcomes into one
//!
//! The merged reasons are every input's reasons, concatenated in input
//! order. The merged value is the list of input values, present only when
//! no input failed.
//!
//! # Examples
//!
//! ```
//! use causeway::Outcome;
//!
//! let merged = Outcome::merge(vec![Outcome::ok(1), Outcome::fail("x"), Outcome::ok(3)]);
//! assert!(merged.is_failed());
//! assert_eq!(merged.errors().len(), 1);
//! assert!(merged.last_successful_value().is_none());
//!
//! let all: Outcome<Vec<i32>> = (1..=3).map(Outcome::ok).collect();
//! assert_eq!(*all.value(), vec![1, 2, 3]);
//! ```

use super::Outcome;
use crate::reason_list::ReasonList;
use crate::semigroup::Semigroup;

impl<T> Outcome<T> {
    /// Merge `outcomes` into one outcome holding every value.
    pub fn merge<I>(outcomes: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        outcomes
            .into_iter()
            .map(|outcome| {
                let (reasons, value) = outcome.into_success();
                Outcome::from_parts(reasons, value.map(|value| vec![value]))
            })
            .fold(Outcome::ok(Vec::new()), Semigroup::combine)
    }

    /// Merge the reasons of `outcomes`, discarding their values.
    pub fn merge_reasons<I>(outcomes: I) -> Outcome<()>
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        let reasons = outcomes
            .into_iter()
            .map(|outcome| outcome.into_inner().0)
            .fold(ReasonList::new(), Semigroup::combine);
        Outcome::from_parts(reasons, Some(()))
    }
}

impl<T> FromIterator<Outcome<T>> for Outcome<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        Outcome::merge(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Reason;

    #[test]
    fn test_merge_empty_is_success() {
        let merged = Outcome::<u8>::merge(Vec::new());
        assert!(merged.is_success());
        assert!(merged.reasons().is_empty());
        assert!(merged.value().is_empty());
    }

    #[test]
    fn test_merge_concatenates_reasons_in_order() {
        let merged = Outcome::merge(vec![
            Outcome::ok(1).with_success("a"),
            Outcome::ok(2).with_success("b").with_success("c"),
            Outcome::ok(3),
        ]);
        let messages: Vec<&str> = merged.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert_eq!(*merged.value(), vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_failure_leaves_no_value() {
        let merged = Outcome::merge(vec![Outcome::ok(1), Outcome::fail("x"), Outcome::ok(3)]);
        assert!(merged.is_failed());
        assert_eq!(merged.errors().len(), 1);
        assert_eq!(merged.errors()[0].message(), "x");
        assert!(merged.last_successful_value().is_none());
    }

    #[test]
    fn test_merge_reasons() {
        let merged = Outcome::merge_reasons(vec![
            Outcome::ok("a").with_success("first"),
            Outcome::<&str>::fail("second"),
        ]);
        assert!(merged.is_failed());
        assert_eq!(merged.reasons().len(), 2);
    }
}
