use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use super::{Error, ErrorReason, ErrorRef, IntoErrorRef, Metadata, MetadataValue, Reason};
use crate::render::{join_reasons, render_metadata, ReasonFormatter};

/// An error that owns a `std::error::Error` value.
///
/// This is what `Outcome::try_*` produces by default when the wrapped work
/// fails: the message is the wrapped error's `Display` output and the
/// original value stays reachable through [`exception`](Self::exception).
///
/// # Examples
///
/// ```
/// use causeway::{ExceptionalError, Reason};
///
/// let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only");
/// let error = ExceptionalError::new(io);
///
/// assert_eq!(error.message(), "read only");
/// assert!(error.downcast_exception::<std::io::Error>().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ExceptionalError {
    inner: Error,
    exception: Arc<dyn StdError + Send + Sync>,
}

impl ExceptionalError {
    /// Wrap an error value, using its `Display` output as the message.
    pub fn new<X>(exception: X) -> Self
    where
        X: StdError + Send + Sync + 'static,
    {
        let message = exception.to_string();
        ExceptionalError::with_message(message, exception)
    }

    /// Wrap an error value with an explicit message.
    pub fn with_message<X>(message: impl Into<String>, exception: X) -> Self
    where
        X: StdError + Send + Sync + 'static,
    {
        ExceptionalError {
            inner: Error::new(message),
            exception: Arc::new(exception),
        }
    }

    /// Wrap an already boxed error value.
    pub fn from_boxed(exception: Box<dyn StdError + Send + Sync>) -> Self {
        ExceptionalError {
            inner: Error::new(exception.to_string()),
            exception: Arc::from(exception),
        }
    }

    /// The wrapped error value.
    pub fn exception(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.exception
    }

    /// View the wrapped error value as a concrete type.
    pub fn downcast_exception<X: StdError + 'static>(&self) -> Option<&X> {
        self.exception.downcast_ref::<X>()
    }

    /// Append a cause.
    pub fn caused_by(mut self, cause: impl IntoErrorRef) -> Self {
        self.inner = self.inner.caused_by(cause);
        self
    }

    /// Upsert a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.inner = self.inner.with_metadata(key, value);
        self
    }
}

impl Reason for ExceptionalError {
    fn message(&self) -> &str {
        self.inner.message()
    }

    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }
}

impl ErrorReason for ExceptionalError {
    fn causes(&self) -> &[ErrorRef] {
        self.inner.causes()
    }

    fn base(&self) -> Option<&(dyn ErrorReason + 'static)> {
        Some(&self.inner)
    }

    fn render(&self) -> String {
        ReasonFormatter::new(self.type_name())
            .info("Message", self.message())
            .info("Metadata", render_metadata(self.metadata()))
            .info("Reasons", join_reasons(self.causes().iter()))
            .info("Exception", &self.exception)
            .build()
    }
}

impl fmt::Display for ExceptionalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A caught panic, converted into an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panicked {
    message: String,
}

impl Panicked {
    /// Build from a panic payload as returned by `catch_unwind`.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "panic with a non-string payload".to_string(),
            },
        };
        Panicked { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Panicked {}

/// Work abandoned because its cancellation signal fired first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation was cancelled")
    }
}

impl StdError for Cancelled {}
