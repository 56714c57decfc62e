use std::fmt;

use super::{ErrorReason, ErrorRef, ExceptionalError, IntoErrorRef, Metadata, MetadataValue, Reason};

/// The default failure reason.
///
/// An `Error` owns a message, metadata and an ordered list of causes. Causes
/// are only ever appended, so the cause tree grows downwards from the error
/// that owns it.
///
/// # Examples
///
/// ```
/// use causeway::{Error, ErrorReason, Reason};
///
/// let error = Error::with_cause("request failed", Error::new("dns lookup failed"))
///     .caused_by("retry budget exhausted")
///     .with_metadata("attempts", 3);
///
/// assert_eq!(error.causes().len(), 2);
/// assert_eq!(error.metadata()["attempts"].to_string(), "3");
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    metadata: Metadata,
    causes: Vec<ErrorRef>,
}

impl Default for Error {
    fn default() -> Self {
        Error::new("Missing Error Message.")
    }
}

impl Error {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            metadata: Metadata::new(),
            causes: Vec::new(),
        }
    }

    /// Create an error with a message and a single cause.
    pub fn with_cause(message: impl Into<String>, cause: impl IntoErrorRef) -> Self {
        Error::new(message).caused_by(cause)
    }

    /// Append a cause.
    ///
    /// Strings are converted through the process-wide error factory.
    pub fn caused_by(mut self, cause: impl IntoErrorRef) -> Self {
        self.push_cause(cause);
        self
    }

    /// Append a `std::error::Error` as an [`ExceptionalError`] cause.
    pub fn caused_by_exception<X>(self, exception: X) -> Self
    where
        X: std::error::Error + Send + Sync + 'static,
    {
        self.caused_by(ExceptionalError::new(exception))
    }

    /// Append several causes, preserving their order.
    pub fn caused_by_all<I>(mut self, causes: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoErrorRef,
    {
        self.causes
            .extend(causes.into_iter().map(IntoErrorRef::into_error_ref));
        self
    }

    /// Append a cause in place.
    pub fn push_cause(&mut self, cause: impl IntoErrorRef) {
        self.causes.push(cause.into_error_ref());
    }

    /// Upsert a metadata entry. A later value for the same key wins.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Upsert several metadata entries.
    pub fn with_metadata_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl Reason for Error {
    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl ErrorReason for Error {
    fn causes(&self) -> &[ErrorRef] {
        &self.causes
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
