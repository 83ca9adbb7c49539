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

//! # Halyard Exec
//!
//! A minimal fork/join execution primitive for recursive divide-and-conquer
//! workloads: a scoped pool of workers, a non-blocking `spawn` returning a
//! joinable handle, and a `join` that blocks until a set of units has
//! completed while helping with queued work.
//!
//! ## Modules
//!
//! - `pool`: the `TaskPool` with `scope`, `spawn`, `join` and the
//!   borrowed-data `fork_join` variant.
//! - `task`: units of work and their completion cells (`TaskHandle`).
//! - `queue`: the shared FIFO injector queue.
//!
//! ## Purpose
//!
//! This crate intentionally stops short of a general work-stealing
//! scheduler. Fork/join recursion has a single synchronization point per
//! task, the join before its combine step, and the helping-join design
//! covers exactly that with a fraction of the machinery.
//!
//! See `pool` for the detailed execution and memory-visibility contract.

pub mod pool;

mod queue;
mod task;

pub use pool::TaskPool;
pub use task::TaskHandle;
