//! # Bounded Work Pool
//!
//! Runs an async function over a list of items with at most `N` invocations in
//! flight, returning the results in input order.
//!
//! Workers share a single atomic cursor. Each one claims the next index, awaits the
//! item function, stores the result in that index's slot and loops until the cursor
//! runs past the end. Slots are preallocated and each is written exactly once.

use futures::future::join_all;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use tracing::debug;

/// Clamps a requested concurrency to at least one worker.
pub fn effective_concurrency(requested: i64) -> usize {
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Applies `f` to every item, with at most `concurrency` calls in flight.
///
/// `results[i]` is always `f(items[i], i)`, whatever order the calls complete in.
/// `f` must not fail: callers convert their errors into a value of `R`.
pub async fn run_bounded<T, R, F, Fut>(concurrency: i64, items: &[T], f: F) -> Vec<R>
where
    T: Clone,
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = R>,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }

    let workers = effective_concurrency(concurrency).min(total);
    debug!("Running {total} items on {workers} workers");

    let cursor = AtomicUsize::new(0);
    let slots: Vec<OnceLock<R>> = (0..total).map(|_| OnceLock::new()).collect();

    {
        let (cursor, slots, f) = (&cursor, &slots, &f);
        join_all((0..workers).map(|_| async move {
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                if index >= total {
                    break;
                }
                let result = f(items[index].clone(), index).await;
                // The cursor hands out each index once, so the slot is still empty.
                let _ = slots[index].set(result);
            }
        }))
        .await;
    }

    slots.into_iter().filter_map(OnceLock::into_inner).collect()
}
