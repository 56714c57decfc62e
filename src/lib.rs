//! # Causeway
//!
//! > *"Every outcome has its reasons"*
//!
//! A Rust library for outcomes that explain themselves.
//!
//! ## Philosophy
//!
//! An [`Outcome`] is not just "it worked" or "it didn't". It carries the full,
//! ordered list of **reasons** that led to it:
//! - **Successes** record what went right along the way
//! - **Errors** record what went wrong, each with its own tree of causes
//!
//! Whether an outcome failed is derived from its reasons, never stored: it is
//! failed exactly when one of its top-level reasons is an error. Combinators
//! such as [`bind`](Outcome::bind), [`ensure`](Outcome::ensure) and
//! [`merge`](Outcome::merge) keep every reason they see, so the final outcome
//! tells the whole story.
//!
//! ## Quick Example
//!
//! ```rust
//! use causeway::prelude::*;
//!
//! fn parse_port(raw: &str) -> Outcome<u16> {
//!     Outcome::try_with(|| raw.parse::<u16>())
//!         .map_errors(|e| Error::new(format!("invalid port {:?}", raw)).caused_by(e))
//! }
//!
//! fn reserve(port: u16) -> Outcome<u16> {
//!     Outcome::ok(port)
//!         .ensure(|p| *p >= 1024, "privileged ports are not allowed")
//!         .with_success(format!("reserved {}", port))
//! }
//!
//! let reserved = parse_port("8080").bind(reserve);
//! assert_eq!(*reserved.value(), 8080);
//! assert_eq!(reserved.successes()[0].message(), "reserved 8080");
//!
//! let rejected = parse_port("eighty").bind(reserve);
//! assert!(rejected.is_failed());
//! assert!(rejected.has_exception_of::<std::num::ParseIntError>());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for dispatch decisions, factory swaps,
//!   exception conversions, rejections and cancellations
//! - `serde`: `Serialize`/`Deserialize` for [`MetadataValue`]
//! - `proptest`: `Arbitrary` for [`Outcome`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod dispatch;
pub mod factory;
pub mod outcome;
pub mod query;
pub mod reason;
pub mod reason_list;
pub mod render;
pub mod semigroup;
pub mod testing;
pub mod usage;

// Re-exports
pub use dispatch::Dispatch;
pub use factory::{FactoryGuard, OkIfPredicateError};
pub use outcome::{Outcome, RejectedValueError};
pub use query::ReasonQuery;
pub use reason::{
    cast_error, cast_success, try_cast_error, try_cast_success, AnyReason, Cancelled, Error,
    ErrorReason, ErrorRef, ExceptionalError, IntoErrorRef, IntoSuccessRef, Metadata,
    MetadataValue, Panicked, Reason, Success, SuccessReason, SuccessRef,
};
pub use reason_list::ReasonList;
pub use semigroup::Semigroup;
pub use usage::UsageError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dispatch::Dispatch;
    pub use crate::outcome::Outcome;
    pub use crate::query::ReasonQuery;
    pub use crate::reason::{
        AnyReason, Error, ErrorReason, ErrorRef, ExceptionalError, Reason, Success,
        SuccessReason, SuccessRef,
    };
    pub use crate::semigroup::Semigroup;
}
