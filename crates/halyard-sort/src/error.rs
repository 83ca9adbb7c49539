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

use std::collections::TryReserveError;

/// The error type for the sorting entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A temporary merge buffer could not be allocated.
    ///
    /// This is fatal for the enclosing sort call and propagates through all
    /// pending joins to the top-level caller. The slice may be left in a
    /// partially-merged, unsorted state; it still holds a permutation of
    /// the original elements, but no ordering is guaranteed.
    Allocation(TryReserveError),

    /// The caller-supplied range does not describe a subrange of the slice.
    ///
    /// Reported synchronously before any work begins. Note that an *empty*
    /// range (`start == end`) is valid and sorts nothing; only
    /// `start > end` or `end > len` are rejected.
    InvalidRange {
        /// Start of the rejected range (inclusive).
        start: usize,
        /// End of the rejected range (exclusive).
        end: usize,
        /// Length of the slice the range was checked against.
        len: usize,
    },
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortError::Allocation(e) => {
                write!(f, "failed to allocate a temporary merge buffer: {}", e)
            }
            SortError::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "range {}..{} is not a valid subrange of a slice of length {}",
                    start, end, len
                )
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SortError::Allocation(e) => Some(e),
            SortError::InvalidRange { .. } => None,
        }
    }
}

impl From<TryReserveError> for SortError {
    #[inline]
    fn from(e: TryReserveError) -> Self {
        SortError::Allocation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::SortError;
    use std::error::Error;

    #[test]
    fn test_invalid_range_display_names_the_bounds() {
        let e = SortError::InvalidRange {
            start: 7,
            end: 3,
            len: 10,
        };
        let message = e.to_string();
        assert!(message.contains("7..3"));
        assert!(message.contains("length 10"));
    }

    #[test]
    fn test_allocation_error_converts_and_exposes_source() {
        let mut v: Vec<u8> = Vec::new();
        let reserve_error = v
            .try_reserve_exact(usize::MAX)
            .expect_err("reserving usize::MAX bytes must fail");

        let e = SortError::from(reserve_error);
        assert!(matches!(e, SortError::Allocation(_)));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_invalid_range_has_no_source() {
        let e = SortError::InvalidRange {
            start: 0,
            end: 1,
            len: 0,
        };
        assert!(e.source().is_none());
    }
}
