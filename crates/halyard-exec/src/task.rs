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

//! Units of work and their completion cells.
//!
//! A `Task` pairs a boxed closure with a shared `TaskCell`. Running the task
//! executes the closure exactly once, catches any unwind so a worker thread
//! never dies mid-pool, and publishes the outcome into the cell. The
//! `TaskHandle` half of the pair is what a joining task holds: it can check
//! for completion, block on it, and finally take the outcome.
//!
//! The cell is a `Mutex<Option<..>>` plus a `Condvar`. Publishing under the
//! mutex and reading under the same mutex is what gives `join` its
//! happens-before edge: every write the unit performed before completing is
//! visible to whoever observes the filled slot.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};

/// A type-erased unit of work executed by the pool.
///
/// The `'static` bound is what the queue stores; `TaskPool::fork_join`
/// erases shorter lifetimes before boxing, under a completion-before-return
/// guarantee.
pub(crate) type Job<E> = Box<dyn FnOnce() -> Result<(), E> + Send + 'static>;

/// The outcome of one executed unit of work.
pub(crate) enum TaskOutcome<E> {
    /// The closure ran to completion and returned this result.
    Finished(Result<(), E>),
    /// The closure panicked; the payload is re-thrown at the join point.
    Panicked(Box<dyn Any + Send>),
}

/// Shared completion cell between a running task and its join handle.
pub(crate) struct TaskCell<E> {
    outcome: Mutex<Option<TaskOutcome<E>>>,
    completed: Condvar,
}

impl<E> TaskCell<E> {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            completed: Condvar::new(),
        }
    }

    /// Publishes the outcome and wakes every thread blocked in `wait`.
    fn complete(&self, outcome: TaskOutcome<E>) {
        let mut slot = self.outcome.lock().unwrap();
        debug_assert!(
            slot.is_none(),
            "called `TaskCell::complete` twice for the same task"
        );
        *slot = Some(outcome);
        self.completed.notify_all();
    }

    fn is_complete(&self) -> bool {
        self.outcome.lock().unwrap().is_some()
    }

    fn wait(&self) {
        let mut slot = self.outcome.lock().unwrap();
        while slot.is_none() {
            slot = self.completed.wait(slot).unwrap();
        }
    }

    fn take(&self) -> TaskOutcome<E> {
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("called `TaskCell::take` before the task completed")
    }
}

/// A queued unit of work, ready to be executed by any worker.
pub(crate) struct Task<E> {
    job: Job<E>,
    cell: Arc<TaskCell<E>>,
}

impl<E> Task<E> {
    /// Wraps a job and returns the task together with its join handle.
    pub(crate) fn new(job: Job<E>) -> (Self, TaskHandle<E>) {
        let cell = Arc::new(TaskCell::new());
        let task = Task {
            job,
            cell: Arc::clone(&cell),
        };
        (task, TaskHandle { cell })
    }

    /// Runs the job to completion and publishes its outcome.
    ///
    /// Unwinds from the job are captured here rather than allowed to tear
    /// down the worker thread; the payload is resumed on whichever thread
    /// joins this task.
    pub(crate) fn run(self) {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(self.job)) {
            Ok(result) => TaskOutcome::Finished(result),
            Err(payload) => TaskOutcome::Panicked(payload),
        };
        self.cell.complete(outcome);
    }
}

/// A handle referencing one spawned unit of work.
///
/// Handles are consumed by `TaskPool::join`; each outcome can be taken
/// exactly once.
pub struct TaskHandle<E> {
    cell: Arc<TaskCell<E>>,
}

impl<E> TaskHandle<E> {
    /// Returns `true` once the referenced unit has published its outcome.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cell.is_complete()
    }

    /// Blocks the calling thread until the referenced unit has completed.
    pub(crate) fn wait(&self) {
        self.cell.wait();
    }

    /// Takes the published outcome.
    ///
    /// # Panics
    ///
    /// Panics if the unit has not completed yet.
    pub(crate) fn take(&self) -> TaskOutcome<E> {
        self.cell.take()
    }
}

impl<E> std::fmt::Debug for TaskHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("complete", &self.is_complete())
            .finish()
    }
}
