//! Process-wide tuning knobs
//!
//! The reason mapping combinators (`map_errors_dispatch`,
//! `map_successes_dispatch`) run their mappers concurrently once the number of
//! reasons to map exceeds a threshold. The thresholds are global, read with
//! relaxed ordering, and take effect for the next call that reads them.
//!
//! # Examples
//!
//! ```
//! use causeway::config;
//!
//! assert_eq!(config::DEFAULT_PARALLEL_THRESHOLD, 5);
//!
//! let previous = config::set_error_parallel_threshold(10);
//! assert_eq!(config::error_parallel_threshold(), 10);
//! config::set_error_parallel_threshold(previous);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

/// Threshold used until a setter is called.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 5;

static ERROR_PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);
static SUCCESS_PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Error count above which error mappers run concurrently.
pub fn error_parallel_threshold() -> usize {
    ERROR_PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the error threshold, returning the previous value.
pub fn set_error_parallel_threshold(threshold: usize) -> usize {
    let previous = ERROR_PARALLEL_THRESHOLD.swap(threshold, Ordering::Relaxed);
    #[cfg(feature = "tracing")]
    tracing::debug!(previous, threshold, "error parallel threshold changed");
    previous
}

/// Success count above which success mappers run concurrently.
pub fn success_parallel_threshold() -> usize {
    SUCCESS_PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the success threshold, returning the previous value.
pub fn set_success_parallel_threshold(threshold: usize) -> usize {
    let previous = SUCCESS_PARALLEL_THRESHOLD.swap(threshold, Ordering::Relaxed);
    #[cfg(feature = "tracing")]
    tracing::debug!(previous, threshold, "success parallel threshold changed");
    previous
}
