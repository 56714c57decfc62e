//! Observers that run side effects and return the outcome unchanged.

use std::future::Future;

use super::Outcome;
use crate::reason::{ErrorRef, SuccessRef};

impl<T> Outcome<T> {
    /// Call `action` with the value when successful.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Outcome;
    ///
    /// let mut seen = None;
    /// let outcome = Outcome::ok(7).on_success(|v| seen = Some(*v));
    /// assert_eq!(seen, Some(7));
    /// assert_eq!(*outcome.value(), 7);
    /// ```
    pub fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let (true, Some(value)) = (self.is_success(), self.value.as_ref()) {
            action(value);
        }
        self
    }

    /// Call `action` with the successes when successful.
    pub fn on_success_reasons<F>(self, action: F) -> Self
    where
        F: FnOnce(&[SuccessRef]),
    {
        if self.is_success() {
            action(&self.successes());
        }
        self
    }

    /// Call `action` with the top-level errors when failed.
    pub fn on_error<F>(self, action: F) -> Self
    where
        F: FnOnce(&[ErrorRef]),
    {
        if self.is_failed() {
            action(self.errors());
        }
        self
    }

    /// Await the future `action` builds from the value when successful.
    pub async fn on_success_async<F, Fut>(self, action: F) -> Self
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let (true, Some(value)) = (self.is_success(), self.value.as_ref()) {
            action(value).await;
        }
        self
    }

    /// Await the future `action` builds from the errors when failed.
    pub async fn on_error_async<F, Fut>(self, action: F) -> Self
    where
        F: FnOnce(&[ErrorRef]) -> Fut,
        Fut: Future<Output = ()>,
    {
        if self.is_failed() {
            action(self.errors()).await;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::Reason;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_on_success_skipped_when_failed() {
        let mut called = false;
        let outcome = Outcome::ok(1).with_error("boom").on_success(|_| called = true);
        assert!(!called);
        assert!(outcome.is_failed());
    }

    #[test]
    fn test_on_error_receives_errors() {
        let mut seen = Vec::new();
        let outcome = Outcome::<()>::fail_many(["a", "b"])
            .on_error(|errors| seen.extend(errors.iter().map(|e| e.message().to_string())));
        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(outcome.errors().len(), 2);
    }

    #[test]
    fn test_on_success_reasons() {
        let mut count = 0;
        let _ = Outcome::ok(())
            .with_success("one")
            .with_success("two")
            .on_success_reasons(|successes| count = successes.len());
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_async_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&log);
        let outcome = Outcome::ok(5)
            .on_success_async(|v| {
                let entry = format!("ok {}", v);
                async move { sink.lock().unwrap().push(entry) }
            })
            .await;
        assert_eq!(*outcome.value(), 5);

        let sink = Arc::clone(&log);
        let _ = Outcome::<()>::fail("bad")
            .on_error_async(|errors| {
                let entry = format!("err {}", errors.len());
                async move { sink.lock().unwrap().push(entry) }
            })
            .await;

        assert_eq!(*log.lock().unwrap(), vec!["ok 5", "err 1"]);
    }
}
