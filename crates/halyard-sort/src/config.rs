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

//! Tuning knobs for one sort invocation.
//!
//! Both knobs travel as an explicit `SortConfig` value handed to the entry
//! points; nothing is configured through process-global state. The defaults
//! are a sequential cutoff of 10 000 elements of span and one worker per
//! hardware thread.

use std::num::NonZeroUsize;

/// Default subrange span at or below which recursion stays sequential.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 10_000;

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration for one sort invocation.
///
/// `threshold` is the span (`right - left` over the closed bounds, i.e.
/// subslice length minus one) at or below which a task recurses
/// sequentially instead of forking children; it bounds task-creation cost
/// for small ranges. `worker_count` sizes the execution pool, the calling
/// thread included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    threshold: usize,
    worker_count: usize,
}

impl Default for SortConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SortConfig {
    /// Creates a configuration with the default threshold and one worker
    /// per available hardware thread.
    #[inline]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            worker_count: default_worker_count(),
        }
    }

    /// Returns a builder initialized with the defaults.
    #[inline]
    pub fn builder() -> SortConfigBuilder {
        SortConfigBuilder::new()
    }

    /// The sequential cutoff span.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The size of the execution pool, calling thread included.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

/// Builder for [`SortConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfigBuilder {
    threshold: usize,
    worker_count: usize,
}

impl Default for SortConfigBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SortConfigBuilder {
    /// Creates a new builder initialized with the defaults.
    #[inline]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            worker_count: default_worker_count(),
        }
    }

    /// Sets the sequential cutoff span.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is zero.
    #[inline]
    pub fn threshold(mut self, threshold: usize) -> Self {
        assert!(
            threshold >= 1,
            "called `SortConfigBuilder::threshold` with a threshold of zero"
        );
        self.threshold = threshold;
        self
    }

    /// Sets the size of the execution pool.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero.
    #[inline]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        assert!(
            worker_count >= 1,
            "called `SortConfigBuilder::worker_count` with a worker count of zero"
        );
        self.worker_count = worker_count;
        self
    }

    /// Builds the `SortConfig` instance.
    #[inline]
    pub fn build(self) -> SortConfig {
        SortConfig {
            threshold: self.threshold,
            worker_count: self.worker_count,
        }
    }
}
