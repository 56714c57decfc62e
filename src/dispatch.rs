//! Parallel or sequential execution of async reason mappers
//!
//! Mapping a handful of reasons whose mappers complete immediately gains
//! nothing from fanning out, while many slow mappers gain a lot. The
//! [`Dispatch::Auto`] mode picks between the two by comparing the number of
//! reasons with a threshold from [`config`](crate::config).
//!
//! Both modes produce the mapped reasons in their original order. Sequential
//! mode also starts and completes each mapper in that order; parallel mode
//! makes no promise about either.
//!
//! # Examples
//!
//! ```
//! use causeway::Dispatch;
//!
//! assert_eq!(Dispatch::Auto.resolve(3, 5), Dispatch::Sequential);
//! assert_eq!(Dispatch::Auto.resolve(6, 5), Dispatch::Parallel);
//! assert_eq!(Dispatch::Sequential.resolve(100, 5), Dispatch::Sequential);
//! ```

use std::future::Future;

use futures::future::join_all;

/// How async mappers are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Parallel above the configured threshold, sequential otherwise.
    #[default]
    Auto,
    /// Start every mapper, then wait for all of them.
    Parallel,
    /// Await each mapper before starting the next.
    Sequential,
}

impl Dispatch {
    /// Replace `Auto` by the mode used for `count` items under `threshold`.
    pub fn resolve(self, count: usize, threshold: usize) -> Dispatch {
        match self {
            Dispatch::Auto if count > threshold => Dispatch::Parallel,
            Dispatch::Auto => Dispatch::Sequential,
            explicit => explicit,
        }
    }
}

/// Map every item through `mapper`, keeping input order in the output.
pub(crate) async fn map_all<I, O, F, Fut>(
    items: Vec<I>,
    mut mapper: F,
    dispatch: Dispatch,
    threshold: usize,
    kind: &'static str,
) -> Vec<O>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = O>,
{
    let mode = dispatch.resolve(items.len(), threshold);
    #[cfg(feature = "tracing")]
    tracing::debug!(kind, count = items.len(), threshold, ?dispatch, ?mode, "mapping reasons");
    #[cfg(not(feature = "tracing"))]
    let _ = kind;

    match mode {
        Dispatch::Parallel => join_all(items.into_iter().map(mapper)).await,
        _ => {
            let mut mapped = Vec::with_capacity(items.len());
            for item in items {
                mapped.push(mapper(item).await);
            }
            mapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn test_explicit_modes_are_kept() {
        assert_eq!(Dispatch::Parallel.resolve(0, 5), Dispatch::Parallel);
        assert_eq!(Dispatch::Sequential.resolve(50, 5), Dispatch::Sequential);
    }

    #[test]
    fn test_auto_threshold_is_exclusive() {
        assert_eq!(Dispatch::Auto.resolve(5, 5), Dispatch::Sequential);
        assert_eq!(Dispatch::Auto.resolve(6, 5), Dispatch::Parallel);
        assert_eq!(Dispatch::default(), Dispatch::Auto);
    }

    #[tokio::test]
    async fn test_sequential_starts_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mapped = map_all(
            vec![3u64, 1, 2],
            |n| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(format!("start {}", n));
                    tokio::time::sleep(Duration::from_millis(n)).await;
                    log.lock().unwrap().push(format!("end {}", n));
                    n * 10
                }
            },
            Dispatch::Sequential,
            5,
            "test",
        )
        .await;

        assert_eq!(mapped, vec![30, 10, 20]);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["start 3", "end 3", "start 1", "end 1", "start 2", "end 2"]
        );
    }

    #[tokio::test]
    async fn test_parallel_keeps_output_order() {
        let mapped = map_all(
            vec![30u64, 1, 15],
            |n| async move {
                tokio::time::sleep(Duration::from_millis(n)).await;
                n
            },
            Dispatch::Parallel,
            5,
            "test",
        )
        .await;
        assert_eq!(mapped, vec![30, 1, 15]);
    }
}
