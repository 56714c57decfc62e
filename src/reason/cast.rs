//! Checked casts from dynamic reasons to concrete reason types.
//!
//! A cast succeeds when the reason is the target type or specializes it
//! through its base chain. A failed cast is a programmer error, not a missing value: the `try_`
//! forms report it as [`UsageError::InvalidCast`], the plain forms panic.

use super::{ErrorReason, SuccessReason};
use crate::render::short_type_name;
use crate::usage::{raise, UsageError};

/// View `error` as `E`, or report an invalid cast.
///
/// # Examples
///
/// ```
/// use causeway::{try_cast_error, Error, ErrorRef, ExceptionalError, UsageError};
/// use std::sync::Arc;
///
/// let error: ErrorRef = Arc::new(Error::new("plain"));
/// assert!(try_cast_error::<Error>(&*error).is_ok());
/// assert!(matches!(
///     try_cast_error::<ExceptionalError>(&*error),
///     Err(UsageError::InvalidCast { .. })
/// ));
/// ```
pub fn try_cast_error<'a, E: ErrorReason>(
    error: &'a (dyn ErrorReason + 'static),
) -> Result<&'a E, UsageError> {
    error.as_type::<E>().ok_or_else(|| UsageError::InvalidCast {
        found: error.type_name(),
        expected: short_type_name(std::any::type_name::<E>()),
    })
}

/// View `error` as `E`.
///
/// # Panics
///
/// Panics with [`UsageError::InvalidCast`] when `error` is not an `E`.
pub fn cast_error<'a, E: ErrorReason>(error: &'a (dyn ErrorReason + 'static)) -> &'a E {
    match try_cast_error(error) {
        Ok(cast) => cast,
        Err(misuse) => raise(misuse),
    }
}

/// View `success` as `S`, or report an invalid cast.
pub fn try_cast_success<'a, S: SuccessReason>(
    success: &'a (dyn SuccessReason + 'static),
) -> Result<&'a S, UsageError> {
    success.as_type::<S>().ok_or_else(|| UsageError::InvalidCast {
        found: success.type_name(),
        expected: short_type_name(std::any::type_name::<S>()),
    })
}

/// View `success` as `S`.
///
/// # Panics
///
/// Panics with [`UsageError::InvalidCast`] when `success` is not an `S`.
pub fn cast_success<'a, S: SuccessReason>(success: &'a (dyn SuccessReason + 'static)) -> &'a S {
    match try_cast_success(success) {
        Ok(cast) => cast,
        Err(misuse) => raise(misuse),
    }
}
