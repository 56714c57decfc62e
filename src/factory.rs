//! Process-wide reason factories
//!
//! Every API that accepts a plain message (`Outcome::fail("..")`,
//! `with_error("..")`, `Error::caused_by("..")`, ...) builds its reason
//! through one of these factories. Replacing a factory therefore changes the
//! concrete reason type produced everywhere, without touching any call site.
//!
//! Each factory lives in its own slot guarded by a mutex. Readers clone the
//! current `Arc` under the lock and call it after releasing the lock, so a
//! factory may itself use the string based APIs.
//!
//! Tests that replace a factory must serialize with each other and restore
//! the previous factory; [`scoped_error_factory`] and friends return a guard
//! that restores it on drop, including during unwinding.
//!
//! # Examples
//!
//! ```
//! use causeway::factory;
//! use causeway::{impl_error_reason, Error, ErrorRef, Outcome};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone)]
//! struct AppError {
//!     inner: Error,
//! }
//!
//! impl_error_reason!(AppError, inner);
//!
//! {
//!     let _guard = factory::scoped_error_factory(|message: &str| -> ErrorRef {
//!         Arc::new(AppError { inner: Error::new(message) })
//!     });
//!
//!     let outcome = Outcome::<()>::fail("boom");
//!     assert!(outcome.errors()[0].is::<AppError>());
//! }
//!
//! // Restored once the guard is dropped.
//! assert!(factory::error("boom").is::<Error>());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::reason::{Error, ErrorRef, Success, SuccessRef};

/// Builds an error from a message.
pub type ErrorFactory = Arc<dyn Fn(&str) -> ErrorRef + Send + Sync>;

/// Builds a success from a message.
pub type SuccessFactory = Arc<dyn Fn(&str) -> SuccessRef + Send + Sync>;

/// Builds the error used by `ok_if` forms that are not given one.
pub type DefaultErrorFactory = Arc<dyn Fn() -> ErrorRef + Send + Sync>;

/// The error produced by `ok_if` forms when no error is supplied.
#[derive(Debug, Clone)]
pub struct OkIfPredicateError {
    inner: Error,
}

impl Default for OkIfPredicateError {
    fn default() -> Self {
        OkIfPredicateError {
            inner: Error::new("OkIf predicate returned false."),
        }
    }
}

crate::impl_error_reason!(OkIfPredicateError, inner);

struct Slot<F: ?Sized + 'static> {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
    current: LazyLock<Mutex<Arc<F>>>,
    initial: fn() -> Arc<F>,
}

impl<F: ?Sized + 'static> Slot<F> {
    fn lock(&self) -> MutexGuard<'_, Arc<F>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self) -> Arc<F> {
        Arc::clone(&self.lock())
    }

    fn replace(&self, next: Arc<F>) -> Arc<F> {
        let previous = std::mem::replace(&mut *self.lock(), next);
        #[cfg(feature = "tracing")]
        tracing::debug!(slot = self.name, "reason factory replaced");
        previous
    }

    fn reset(&self) -> Arc<F> {
        self.replace((self.initial)())
    }
}

fn initial_error_factory() -> ErrorFactory {
    Arc::new(|message: &str| -> ErrorRef { Arc::new(Error::new(message)) })
}

fn initial_success_factory() -> SuccessFactory {
    Arc::new(|message: &str| -> SuccessRef { Arc::new(Success::new(message)) })
}

fn initial_default_error_factory() -> DefaultErrorFactory {
    Arc::new(|| -> ErrorRef { Arc::new(OkIfPredicateError::default()) })
}

static ERRORS: Slot<dyn Fn(&str) -> ErrorRef + Send + Sync> = Slot {
    name: "error",
    current: LazyLock::new(|| Mutex::new(initial_error_factory())),
    initial: initial_error_factory,
};

static SUCCESSES: Slot<dyn Fn(&str) -> SuccessRef + Send + Sync> = Slot {
    name: "success",
    current: LazyLock::new(|| Mutex::new(initial_success_factory())),
    initial: initial_success_factory,
};

static DEFAULT_ERRORS: Slot<dyn Fn() -> ErrorRef + Send + Sync> = Slot {
    name: "ok_if_default_error",
    current: LazyLock::new(|| Mutex::new(initial_default_error_factory())),
    initial: initial_default_error_factory,
};

/// Build an error from a message with the current error factory.
pub fn error(message: &str) -> ErrorRef {
    let factory = ERRORS.get();
    factory(message)
}

/// Build a success from a message with the current success factory.
pub fn success(message: &str) -> SuccessRef {
    let factory = SUCCESSES.get();
    factory(message)
}

/// Build the error `ok_if` uses when the caller supplies none.
pub fn ok_if_default_error() -> ErrorRef {
    let factory = DEFAULT_ERRORS.get();
    factory()
}

/// The current error factory.
pub fn error_factory() -> ErrorFactory {
    ERRORS.get()
}

/// Replace the error factory, returning the previous one.
pub fn set_error_factory<F>(factory: F) -> ErrorFactory
where
    F: Fn(&str) -> ErrorRef + Send + Sync + 'static,
{
    ERRORS.replace(Arc::new(factory))
}

/// Restore the built-in error factory, returning the replaced one.
pub fn reset_error_factory() -> ErrorFactory {
    ERRORS.reset()
}

/// Replace the error factory until the returned guard is dropped.
pub fn scoped_error_factory<F>(factory: F) -> FactoryGuard
where
    F: Fn(&str) -> ErrorRef + Send + Sync + 'static,
{
    let previous = set_error_factory(factory);
    FactoryGuard::new("error", move || {
        ERRORS.replace(previous);
    })
}

/// The current success factory.
pub fn success_factory() -> SuccessFactory {
    SUCCESSES.get()
}

/// Replace the success factory, returning the previous one.
pub fn set_success_factory<F>(factory: F) -> SuccessFactory
where
    F: Fn(&str) -> SuccessRef + Send + Sync + 'static,
{
    SUCCESSES.replace(Arc::new(factory))
}

/// Restore the built-in success factory, returning the replaced one.
pub fn reset_success_factory() -> SuccessFactory {
    SUCCESSES.reset()
}

/// Replace the success factory until the returned guard is dropped.
pub fn scoped_success_factory<F>(factory: F) -> FactoryGuard
where
    F: Fn(&str) -> SuccessRef + Send + Sync + 'static,
{
    let previous = set_success_factory(factory);
    FactoryGuard::new("success", move || {
        SUCCESSES.replace(previous);
    })
}

/// The current `ok_if` default error factory.
pub fn ok_if_default_error_factory() -> DefaultErrorFactory {
    DEFAULT_ERRORS.get()
}

/// Replace the `ok_if` default error factory, returning the previous one.
pub fn set_ok_if_default_error_factory<F>(factory: F) -> DefaultErrorFactory
where
    F: Fn() -> ErrorRef + Send + Sync + 'static,
{
    DEFAULT_ERRORS.replace(Arc::new(factory))
}

/// Restore the built-in `ok_if` default error factory.
pub fn reset_ok_if_default_error_factory() -> DefaultErrorFactory {
    DEFAULT_ERRORS.reset()
}

/// Replace the `ok_if` default error factory until the guard is dropped.
pub fn scoped_ok_if_default_error_factory<F>(factory: F) -> FactoryGuard
where
    F: Fn() -> ErrorRef + Send + Sync + 'static,
{
    let previous = set_ok_if_default_error_factory(factory);
    FactoryGuard::new("ok_if_default_error", move || {
        DEFAULT_ERRORS.replace(previous);
    })
}

/// Restores a replaced factory when dropped.
#[must_use = "the previous factory is restored as soon as the guard is dropped"]
pub struct FactoryGuard {
    slot: &'static str,
    restore: Option<Box<dyn FnOnce() + Send>>,
}

impl FactoryGuard {
    fn new(slot: &'static str, restore: impl FnOnce() + Send + 'static) -> Self {
        FactoryGuard {
            slot,
            restore: Some(Box::new(restore)),
        }
    }
}

impl fmt::Debug for FactoryGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryGuard")
            .field("slot", &self.slot)
            .field("restore", &"<function>")
            .finish()
    }
}

impl Drop for FactoryGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}
