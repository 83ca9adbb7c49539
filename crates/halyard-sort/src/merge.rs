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

//! Stable linear 2-way merge of two adjacent sorted runs.
//!
//! The two runs are cloned into transient buffers, then merged back into
//! the slice with two read cursors and one write cursor. Ties are always
//! taken from the left run, which is what makes the overall sort stable.
//! Buffer allocation is fallible (`Vec::try_reserve_exact`); on failure the
//! slice is left untouched by this invocation and the error propagates to
//! the caller. The buffers are plain `Vec`s, so they are released on every
//! exit path.

use crate::error::SortError;
use std::cmp::Ordering;

/// Returns `true` if `slice` is sorted ascending under `cmp`.
#[inline]
pub(crate) fn is_sorted_by<T, F>(slice: &[T], cmp: &F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    slice.windows(2).all(|w| cmp(&w[1], &w[0]) != Ordering::Less)
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into one sorted run.
///
/// Runs in O(`v.len()`) time and O(`v.len()`) transient space. Equal
/// elements keep their relative order, with the left run winning every tie.
///
/// # Errors
///
/// Returns [`SortError::Allocation`] if a temporary buffer cannot be
/// obtained; `v` is unmodified in that case.
///
/// # Panics
///
/// In debug builds, panics if either run is not sorted under `cmp`.
pub(crate) fn merge_sorted_halves<T, F>(
    v: &mut [T],
    mid: usize,
    cmp: &F,
) -> Result<(), SortError>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert!(
        mid <= v.len(),
        "called `merge_sorted_halves` with mid out of bounds: the len is {} but mid is {}",
        v.len(),
        mid
    );
    debug_assert!(
        is_sorted_by(&v[..mid], cmp),
        "called `merge_sorted_halves` with an unsorted left run"
    );
    debug_assert!(
        is_sorted_by(&v[mid..], cmp),
        "called `merge_sorted_halves` with an unsorted right run"
    );

    if mid == 0 || mid == v.len() {
        return Ok(());
    }

    // Reserve both buffers before cloning anything, so an allocation
    // failure leaves the slice untouched.
    let mut left: Vec<T> = Vec::new();
    left.try_reserve_exact(mid)?;
    let mut right: Vec<T> = Vec::new();
    right.try_reserve_exact(v.len() - mid)?;

    left.extend_from_slice(&v[..mid]);
    right.extend_from_slice(&v[mid..]);

    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    for slot in v.iter_mut() {
        let from_right = match (left.peek(), right.peek()) {
            // Strictly smaller right head wins; on a tie the left run goes
            // first, preserving the input order of equal elements.
            (Some(lhs), Some(rhs)) => cmp(rhs, lhs) == Ordering::Less,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let next = if from_right { right.next() } else { left.next() };
        match next {
            Some(value) => *slot = value,
            // Both runs exhausted; every slot has been written.
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_sorted_by, merge_sorted_halves};
    use std::cmp::Ordering;

    fn by_value(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_merge_interleaved_runs() {
        let mut v = vec![1, 3, 5, 2, 4, 6];
        merge_sorted_halves(&mut v, 3, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_left_run_entirely_smaller() {
        let mut v = vec![1, 2, 3, 4, 5, 6];
        merge_sorted_halves(&mut v, 3, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_right_run_entirely_smaller() {
        let mut v = vec![4, 5, 6, 1, 2, 3];
        merge_sorted_halves(&mut v, 3, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_with_empty_left_run_is_noop() {
        let mut v = vec![1, 2, 3];
        merge_sorted_halves(&mut v, 0, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_with_empty_right_run_is_noop() {
        let mut v = vec![1, 2, 3];
        merge_sorted_halves(&mut v, 3, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_uneven_runs() {
        let mut v = vec![7, 1, 2, 3, 4, 5, 6];
        merge_sorted_halves(&mut v, 1, &by_value).expect("merge should not fail");
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_merge_ties_prefer_the_left_run() {
        // Equal keys carry a tag so the winning side is observable.
        let mut v = vec![(2, 'a'), (2, 'b'), (1, 'x'), (2, 'c')];
        let cmp = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);

        merge_sorted_halves(&mut v, 2, &cmp).expect("merge should not fail");
        assert_eq!(v, vec![(1, 'x'), (2, 'a'), (2, 'b'), (2, 'c')]);
    }

    #[test]
    fn test_is_sorted_by_accepts_equal_runs() {
        assert!(is_sorted_by(&[1, 1, 2, 2], &by_value));
        assert!(is_sorted_by(&[] as &[i32], &by_value));
        assert!(!is_sorted_by(&[2, 1], &by_value));
    }
}
