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

//! Recursive range splitting with a sequential cutoff.
//!
//! Each task sorts one subslice. Ranges at or below the cutoff span recurse
//! inline, bounding task-creation cost; larger ranges fork one task per
//! half and join both before merging. The two halves come from
//! `split_at_mut`, so sibling tasks hold disjoint `&mut` views by
//! construction and no index outside a task's range can be touched. Bounds
//! are captured by value when a task is created: moving the subslice into
//! the closure *is* the by-value capture.
//!
//! The join in the parallel arm is the only suspension point. It returns
//! only after both children completed and establishes the happens-before
//! edge the merge needs to observe their writes. Recursion depth is bounded
//! by log2(len / threshold), so plain call-stack recursion is fine.

use crate::error::SortError;
use crate::merge::merge_sorted_halves;
use halyard_exec::TaskPool;
use std::cmp::Ordering;

/// Sorts one subslice: split, recurse (inline or forked), join, merge.
pub(crate) fn sort_task<T, F>(
    v: &mut [T],
    threshold: usize,
    pool: &TaskPool<SortError>,
    cmp: &F,
) -> Result<(), SortError>
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    debug_assert!(
        threshold >= 1,
        "called `sort_task` with a threshold of zero"
    );

    // Base case: empty and single-element ranges are trivially sorted.
    if v.len() <= 1 {
        return Ok(());
    }

    let mid = v.len() / 2;
    let span = v.len() - 1;
    let (lower, upper) = v.split_at_mut(mid);

    if span <= threshold {
        sort_task(lower, threshold, pool, cmp)?;
        sort_task(upper, threshold, pool, cmp)?;
    } else {
        pool.fork_join(
            move || sort_task(lower, threshold, pool, cmp),
            move || sort_task(upper, threshold, pool, cmp),
        )?;
    }

    merge_sorted_halves(v, mid, cmp)
}

#[cfg(test)]
mod tests {
    use super::sort_task;
    use crate::error::SortError;
    use halyard_exec::TaskPool;
    use std::cmp::Ordering;

    fn run_sort(v: &mut [i32], threshold: usize, workers: usize) -> Result<(), SortError> {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        TaskPool::scope(workers, |pool| sort_task(v, threshold, pool, &cmp))
    }

    #[test]
    fn test_sequential_cutoff_sorts_small_ranges() {
        // span == 4 <= threshold, so no task is ever spawned.
        let mut v = vec![4, 2, 5, 1, 3];
        run_sort(&mut v, 10, 1).expect("sort should not fail");
        assert_eq!(v, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parallel_recursion_sorts_above_the_cutoff() {
        let mut v: Vec<i32> = (0..512).rev().collect();
        run_sort(&mut v, 1, 4).expect("sort should not fail");
        assert_eq!(v, (0..512).collect::<Vec<i32>>());
    }

    #[test]
    fn test_cutoff_boundary_pair_is_sorted_inline() {
        // Two elements have span 1; with threshold 1 this is the largest
        // range that still recurses sequentially.
        let mut v = vec![2, 1];
        run_sort(&mut v, 1, 2).expect("sort should not fail");
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_comparator_order_is_respected() {
        let mut v = vec![1, 3, 2, 5, 4];
        let descending = |a: &i32, b: &i32| b.cmp(a);
        TaskPool::scope(2, |pool| sort_task(&mut v, 1, pool, &descending))
            .expect("sort should not fail");
        assert_eq!(v, vec![5, 4, 3, 2, 1]);
    }
}
