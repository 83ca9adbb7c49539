// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Halyard Sort
//!
//! Task-parallel, stable merge sort with a tunable sequential cutoff.
//!
//! The recursion splits a slice in half, sorts the halves (inline below the
//! cutoff, as forked tasks above it), joins the children and then performs
//! a linear stable merge. Parallel execution runs on a scoped fork/join
//! pool from `halyard-exec`; sibling tasks operate on disjoint `&mut`
//! halves obtained via `split_at_mut`, so the only synchronization in the
//! whole algorithm is the join before each merge.
//!
//! ## Modules
//!
//! - `partition`: the recursive splitting logic and cutoff decision.
//! - `merge`: the stable linear 2-way merge with fallible buffers.
//! - `config`: `SortConfig` and its builder (threshold, worker count).
//! - `error`: the `SortError` taxonomy.
//!
//! ## Usage
//!
//! ```rust
//! use halyard_sort::{sort, SortConfig};
//!
//! let mut values = vec![5, 3, 8, 1, 9, 2];
//! let config = SortConfig::builder().threshold(1).worker_count(2).build();
//!
//! sort(&mut values, &config).expect("sorting machine integers cannot fail");
//! assert_eq!(values, vec![1, 2, 3, 5, 8, 9]);
//! ```
//!
//! ## Guarantees and limits
//!
//! On success the sorted range is a permutation of its input, ascending
//! under the comparator, and stable: equal elements keep their input order.
//! The result is identical for every valid threshold and worker count;
//! only timing differs. A sort, once started, runs to completion or fails
//! with a typed [`SortError`]; there is no cancellation. If a temporary
//! merge buffer cannot be allocated the slice may be left partially
//! merged (still a permutation, but unsorted). A panicking comparator
//! propagates to the caller after all in-flight tasks have finished.

mod config;
mod error;
mod merge;
mod partition;

pub use config::{SortConfig, SortConfigBuilder, DEFAULT_SEQUENTIAL_THRESHOLD};
pub use error::SortError;

use halyard_exec::TaskPool;
use std::cmp::Ordering;
use std::ops::Range;

/// Sorts the whole slice ascending, stably and in place.
///
/// Empty and single-element slices are a no-op.
///
/// # Errors
///
/// Returns [`SortError::Allocation`] if a temporary merge buffer cannot be
/// obtained.
pub fn sort<T>(v: &mut [T], config: &SortConfig) -> Result<(), SortError>
where
    T: Ord + Clone + Send,
{
    sort_by(v, |a, b| a.cmp(b), config)
}

/// Sorts the whole slice with a caller-supplied comparator, stably and in
/// place.
///
/// # Errors
///
/// Returns [`SortError::Allocation`] if a temporary merge buffer cannot be
/// obtained.
pub fn sort_by<T, F>(v: &mut [T], cmp: F, config: &SortConfig) -> Result<(), SortError>
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = v.len();
    sort_range_by(v, 0..len, cmp, config)
}

/// Sorts `v[range]` ascending, stably and in place; the rest of the slice
/// is neither read nor written.
///
/// # Errors
///
/// Returns [`SortError::InvalidRange`] if `range` is not a subrange of the
/// slice (an empty range is valid and sorts nothing), and
/// [`SortError::Allocation`] if a temporary merge buffer cannot be
/// obtained.
pub fn sort_range<T>(
    v: &mut [T],
    range: Range<usize>,
    config: &SortConfig,
) -> Result<(), SortError>
where
    T: Ord + Clone + Send,
{
    sort_range_by(v, range, |a, b| a.cmp(b), config)
}

/// Sorts `v[range]` with a caller-supplied comparator, stably and in place.
///
/// The range is validated synchronously, before any worker is created or
/// any element is touched.
///
/// # Errors
///
/// See [`sort_range`].
pub fn sort_range_by<T, F>(
    v: &mut [T],
    range: Range<usize>,
    cmp: F,
    config: &SortConfig,
) -> Result<(), SortError>
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = v.len();
    if range.start > range.end || range.end > len {
        return Err(SortError::InvalidRange {
            start: range.start,
            end: range.end,
            len,
        });
    }

    let target = &mut v[range];
    if target.len() <= 1 {
        return Ok(());
    }

    TaskPool::scope(config.worker_count(), |pool| {
        partition::sort_task(target, config.threshold(), pool, &cmp)
    })
}
