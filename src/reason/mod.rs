//! Reasons: the facts an [`Outcome`](crate::Outcome) carries
//!
//! A reason is a message plus metadata. It comes in two flavours:
//!
//! - [`SuccessReason`] - a plain fact recorded on the way to a result
//! - [`ErrorReason`] - a failure, which may own a tree of causal errors
//!
//! The concrete types shipped with the crate are [`Error`], [`Success`] and
//! [`ExceptionalError`]. Your own reason types implement the traits directly
//! or delegate to a wrapped [`Error`]/[`Success`] with
//! [`impl_error_reason!`](crate::impl_error_reason) and
//! [`impl_success_reason!`](crate::impl_success_reason).
//!
//! # Examples
//!
//! ```
//! use causeway::{Error, ErrorReason, Reason};
//!
//! let error = Error::new("could not save user")
//!     .caused_by(Error::new("connection reset"))
//!     .with_metadata("user_id", 42);
//!
//! assert_eq!(error.message(), "could not save user");
//! assert_eq!(error.causes().len(), 1);
//! assert_eq!(error.causes()[0].message(), "connection reset");
//! ```

mod cast;
mod error;
mod exceptional;
mod metadata;
mod success;

pub use cast::{cast_error, cast_success, try_cast_error, try_cast_success};
pub use error::Error;
pub use exceptional::{Cancelled, ExceptionalError, Panicked};
pub use metadata::{Metadata, MetadataValue};
pub use success::Success;

pub(crate) use metadata::metadata_matches;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::factory;
use crate::render::{join_reasons, render_metadata, short_type_name, ReasonFormatter};

/// Shared handle to an error reason.
pub type ErrorRef = Arc<dyn ErrorReason>;

/// Shared handle to a success reason.
pub type SuccessRef = Arc<dyn SuccessReason>;

/// The capability shared by every reason: a message and metadata.
pub trait Reason: Any + fmt::Debug + Send + Sync {
    /// Human readable description.
    fn message(&self) -> &str;

    /// Additional context.
    fn metadata(&self) -> &Metadata;

    /// Short type name used when rendering.
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// A reason that makes an outcome fail.
pub trait ErrorReason: Reason {
    /// Errors that caused this one, in the order they were attached.
    fn causes(&self) -> &[ErrorRef] {
        &[]
    }

    /// The error this one specializes, if it wraps one.
    ///
    /// Typed queries and casts climb this chain, so a wrapper around an
    /// [`Error`] is also found as an `Error`.
    fn base(&self) -> Option<&(dyn ErrorReason + 'static)> {
        None
    }

    /// Render as `TypeName with Message='..', Metadata='..', Reasons='..'`.
    fn render(&self) -> String {
        ReasonFormatter::new(self.type_name())
            .info("Message", self.message())
            .info("Metadata", render_metadata(self.metadata()))
            .info("Reasons", join_reasons(self.causes().iter()))
            .build()
    }
}

/// A reason recorded on success. Successes have no nested structure.
pub trait SuccessReason: Reason {
    /// The success this one specializes, if it wraps one.
    fn base(&self) -> Option<&(dyn SuccessReason + 'static)> {
        None
    }

    /// Render as `TypeName with Message='..', Metadata='..'`.
    fn render(&self) -> String {
        ReasonFormatter::new(self.type_name())
            .info("Message", self.message())
            .info("Metadata", render_metadata(self.metadata()))
            .build()
    }
}

impl dyn ErrorReason {
    /// View this error as a concrete type, if it is one.
    pub fn downcast_ref<E: ErrorReason>(&self) -> Option<&E> {
        (self as &dyn Any).downcast_ref::<E>()
    }

    /// Whether this error is of the concrete type `E`.
    pub fn is<E: ErrorReason>(&self) -> bool {
        (self as &dyn Any).is::<E>()
    }

    /// View this error as `E`, either itself or one of the errors it
    /// specializes through [`ErrorReason::base`].
    pub fn as_type<E: ErrorReason>(&self) -> Option<&E> {
        let mut node: &(dyn ErrorReason + 'static) = self;
        loop {
            if let Some(found) = node.downcast_ref::<E>() {
                return Some(found);
            }
            node = node.base()?;
        }
    }

    /// Whether this error is an `E` or specializes one.
    pub fn is_type<E: ErrorReason>(&self) -> bool {
        self.as_type::<E>().is_some()
    }
}

impl dyn SuccessReason {
    /// View this success as a concrete type, if it is one.
    pub fn downcast_ref<S: SuccessReason>(&self) -> Option<&S> {
        (self as &dyn Any).downcast_ref::<S>()
    }

    /// Whether this success is of the concrete type `S`.
    pub fn is<S: SuccessReason>(&self) -> bool {
        (self as &dyn Any).is::<S>()
    }

    /// View this success as `S`, either itself or one it specializes.
    pub fn as_type<S: SuccessReason>(&self) -> Option<&S> {
        let mut node: &(dyn SuccessReason + 'static) = self;
        loop {
            if let Some(found) = node.downcast_ref::<S>() {
                return Some(found);
            }
            node = node.base()?;
        }
    }
}

impl fmt::Display for dyn ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Display for dyn SuccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Conversion into a shared error handle.
///
/// Plain strings go through the process-wide error factory
/// ([`factory::error`]), so swapping the factory changes the concrete type
/// produced by every string based API.
pub trait IntoErrorRef {
    /// Perform the conversion.
    fn into_error_ref(self) -> ErrorRef;
}

impl<E: ErrorReason> IntoErrorRef for E {
    fn into_error_ref(self) -> ErrorRef {
        Arc::new(self)
    }
}

impl IntoErrorRef for ErrorRef {
    fn into_error_ref(self) -> ErrorRef {
        self
    }
}

impl IntoErrorRef for &str {
    fn into_error_ref(self) -> ErrorRef {
        factory::error(self)
    }
}

impl IntoErrorRef for String {
    fn into_error_ref(self) -> ErrorRef {
        factory::error(&self)
    }
}

/// Conversion into a shared success handle.
///
/// Plain strings go through the process-wide success factory
/// ([`factory::success`]).
pub trait IntoSuccessRef {
    /// Perform the conversion.
    fn into_success_ref(self) -> SuccessRef;
}

impl<S: SuccessReason> IntoSuccessRef for S {
    fn into_success_ref(self) -> SuccessRef {
        Arc::new(self)
    }
}

impl IntoSuccessRef for SuccessRef {
    fn into_success_ref(self) -> SuccessRef {
        self
    }
}

impl IntoSuccessRef for &str {
    fn into_success_ref(self) -> SuccessRef {
        factory::success(self)
    }
}

impl IntoSuccessRef for String {
    fn into_success_ref(self) -> SuccessRef {
        factory::success(&self)
    }
}

/// One entry of an outcome's reason sequence.
#[derive(Debug, Clone)]
pub enum AnyReason {
    /// A success fact
    Success(SuccessRef),
    /// A failure
    Error(ErrorRef),
}

impl AnyReason {
    /// Wrap an error.
    pub fn error(error: impl IntoErrorRef) -> Self {
        AnyReason::Error(error.into_error_ref())
    }

    /// Wrap a success.
    pub fn success(success: impl IntoSuccessRef) -> Self {
        AnyReason::Success(success.into_success_ref())
    }

    /// Whether this entry is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, AnyReason::Error(_))
    }

    /// Whether this entry is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, AnyReason::Success(_))
    }

    /// The reason's message.
    pub fn message(&self) -> &str {
        match self {
            AnyReason::Success(success) => success.message(),
            AnyReason::Error(error) => error.message(),
        }
    }

    /// The reason's metadata.
    pub fn metadata(&self) -> &Metadata {
        match self {
            AnyReason::Success(success) => success.metadata(),
            AnyReason::Error(error) => error.metadata(),
        }
    }

    /// The error, if this entry is one.
    pub fn as_error(&self) -> Option<&ErrorRef> {
        match self {
            AnyReason::Error(error) => Some(error),
            AnyReason::Success(_) => None,
        }
    }

    /// The success, if this entry is one.
    pub fn as_success(&self) -> Option<&SuccessRef> {
        match self {
            AnyReason::Success(success) => Some(success),
            AnyReason::Error(_) => None,
        }
    }
}

impl fmt::Display for AnyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyReason::Success(success) => fmt::Display::fmt(&**success, f),
            AnyReason::Error(error) => fmt::Display::fmt(&**error, f),
        }
    }
}

impl From<ErrorRef> for AnyReason {
    fn from(error: ErrorRef) -> Self {
        AnyReason::Error(error)
    }
}

impl From<SuccessRef> for AnyReason {
    fn from(success: SuccessRef) -> Self {
        AnyReason::Success(success)
    }
}

/// Implement [`Reason`] and [`ErrorReason`] for a type wrapping an [`Error`].
///
/// The wrapper keeps its own type name for rendering and type-filtered
/// queries, and gains `caused_by`/`with_metadata` builders that delegate to
/// the wrapped error.
///
/// # Examples
///
/// ```
/// use causeway::{impl_error_reason, Error, Outcome, ReasonQuery};
///
/// #[derive(Debug, Clone)]
/// struct NotFound {
///     inner: Error,
/// }
///
/// impl NotFound {
///     fn new(what: &str) -> Self {
///         NotFound { inner: Error::new(format!("{} not found", what)) }
///     }
/// }
///
/// impl_error_reason!(NotFound, inner);
///
/// let outcome = Outcome::<()>::fail(NotFound::new("user").with_metadata("id", 7));
/// assert_eq!(outcome.get_errors::<NotFound>().len(), 1);
/// assert!(outcome.to_string().contains("NotFound with Message='user not found'"));
/// ```
#[macro_export]
macro_rules! impl_error_reason {
    ($ty:ty, $field:ident) => {
        impl $crate::Reason for $ty {
            fn message(&self) -> &str {
                $crate::Reason::message(&self.$field)
            }

            fn metadata(&self) -> &$crate::Metadata {
                $crate::Reason::metadata(&self.$field)
            }
        }

        impl $crate::ErrorReason for $ty {
            fn causes(&self) -> &[$crate::ErrorRef] {
                $crate::ErrorReason::causes(&self.$field)
            }

            fn base(&self) -> Option<&(dyn $crate::ErrorReason + 'static)> {
                Some(&self.$field)
            }
        }

        #[allow(dead_code)]
        impl $ty {
            /// Attach a cause to the wrapped error.
            pub fn caused_by(mut self, cause: impl $crate::IntoErrorRef) -> Self {
                self.$field = self.$field.caused_by(cause);
                self
            }

            /// Upsert a metadata entry on the wrapped error.
            pub fn with_metadata(
                mut self,
                key: impl Into<String>,
                value: impl Into<$crate::MetadataValue>,
            ) -> Self {
                self.$field = self.$field.with_metadata(key, value);
                self
            }
        }
    };
}

/// Implement [`Reason`] and [`SuccessReason`] for a type wrapping a [`Success`].
///
/// # Examples
///
/// ```
/// use causeway::{impl_success_reason, Outcome, ReasonQuery, Success};
///
/// #[derive(Debug, Clone)]
/// struct Cached {
///     inner: Success,
/// }
///
/// impl_success_reason!(Cached, inner);
///
/// let outcome = Outcome::ok(1).with_success(Cached { inner: Success::new("served from cache") });
/// assert!(outcome.has_success_of::<Cached>());
/// ```
#[macro_export]
macro_rules! impl_success_reason {
    ($ty:ty, $field:ident) => {
        impl $crate::Reason for $ty {
            fn message(&self) -> &str {
                $crate::Reason::message(&self.$field)
            }

            fn metadata(&self) -> &$crate::Metadata {
                $crate::Reason::metadata(&self.$field)
            }
        }

        impl $crate::SuccessReason for $ty {
            fn base(&self) -> Option<&(dyn $crate::SuccessReason + 'static)> {
                Some(&self.$field)
            }
        }

        #[allow(dead_code)]
        impl $ty {
            /// Upsert a metadata entry on the wrapped success.
            pub fn with_metadata(
                mut self,
                key: impl Into<String>,
                value: impl Into<$crate::MetadataValue>,
            ) -> Self {
                self.$field = self.$field.with_metadata(key, value);
                self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Timeout {
        inner: Error,
    }

    crate::impl_error_reason!(Timeout, inner);

    #[derive(Debug, Clone)]
    struct Warmed {
        inner: Success,
    }

    crate::impl_success_reason!(Warmed, inner);

    #[test]
    fn test_downcast_ref_on_dyn_error() {
        let error: ErrorRef = Arc::new(Timeout {
            inner: Error::new("slow"),
        });

        assert!(error.is::<Timeout>());
        assert!(!error.is::<Error>());
        assert_eq!(error.downcast_ref::<Timeout>().map(|t| t.message()), Some("slow"));
    }

    #[test]
    fn test_as_type_climbs_to_wrapped_error() {
        let error: ErrorRef = Arc::new(Timeout {
            inner: Error::new("slow"),
        });

        assert!(error.is_type::<Timeout>());
        assert!(error.is_type::<Error>());
        assert!(!error.is_type::<ExceptionalError>());
        assert_eq!(error.as_type::<Error>().map(|e| e.message()), Some("slow"));

        let plain: ErrorRef = Arc::new(Error::new("plain"));
        assert!(plain.as_type::<Timeout>().is_none());

        let success: SuccessRef = Arc::new(Warmed {
            inner: Success::new("cache warmed"),
        });
        assert!(success.as_type::<Success>().is_some());
    }

    #[test]
    fn test_wrapper_type_name_used_for_rendering() {
        let error = Timeout {
            inner: Error::new("slow"),
        }
        .with_metadata("ms", 500);

        assert_eq!(
            error.render(),
            "Timeout with Message='slow', Metadata='[ms, 500]'"
        );
    }

    #[test]
    fn test_wrapper_builders_delegate_causes() {
        let error = Timeout {
            inner: Error::new("slow"),
        }
        .caused_by(Error::new("network"));

        assert_eq!(error.causes().len(), 1);
        assert_eq!(error.causes()[0].message(), "network");
    }

    #[test]
    fn test_success_wrapper() {
        let success: SuccessRef = Arc::new(Warmed {
            inner: Success::new("cache warmed"),
        });

        assert!(success.is::<Warmed>());
        assert_eq!(success.to_string(), "Warmed with Message='cache warmed'");
    }

    #[test]
    fn test_any_reason_accessors() {
        let error = AnyReason::error(Error::new("bad"));
        let success = AnyReason::success(Success::new("good"));

        assert!(error.is_error());
        assert!(success.is_success());
        assert!(error.as_success().is_none());
        assert_eq!(success.message(), "good");
        assert_eq!(error.to_string(), "Error with Message='bad'");
    }
}
