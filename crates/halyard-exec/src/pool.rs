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

//! # Fork/Join Task Pool
//!
//! A deliberately small execution primitive for recursive divide-and-conquer
//! work: non-blocking `spawn`, a `join` that blocks until a set of spawned
//! units has completed, and a `fork_join` convenience for the two-children
//! case that allows the closures to borrow local data.
//!
//! ## Motivation
//!
//! Divide-and-conquer recursion needs exactly one synchronization point per
//! task: the join before the combine step. A general work-stealing runtime
//! is overkill for that shape; a shared injector queue plus helping joins
//! covers it with far less machinery.
//!
//! ## Highlights
//!
//! - Scoped lifetime: `TaskPool::scope` owns the worker threads
//!   (`std::thread::scope`), so a pool can never outlive the data its tasks
//!   borrow. The calling thread is worker zero and `worker_count - 1`
//!   helper threads are spawned, the way an OpenMP-style team counts its
//!   initial thread.
//! - Helping joins: a task blocked in `join` first drains pending tasks
//!   from the queue and runs them inline. A fixed-size pool therefore
//!   cannot deadlock on nested joins; some thread is always executing a
//!   leaf.
//! - Happens-before: completion is published under the handle's mutex and
//!   observed under the same mutex, so every write a joined unit made is
//!   visible after `join` returns.
//! - Panic transparency: a unit that panics poisons nothing; the payload is
//!   re-thrown on the joining thread once all joined units have finished.
//!
//! Cycle freedom is structural, not checked at runtime: units only ever
//! join units they spawned themselves, and recursion always descends into
//! strictly smaller subproblems.

use crate::queue::TaskQueue;
use crate::task::{Job, Task, TaskHandle, TaskOutcome};
use std::panic;

/// A fork/join pool executing units of work that return `Result<(), E>`.
///
/// The pool is created for the duration of one top-level computation via
/// [`TaskPool::scope`] and is configured with an explicit worker count;
/// there is no process-global state.
pub struct TaskPool<E> {
    queue: TaskQueue<E>,
}

/// Closes the queue when the root computation finishes or unwinds, so the
/// worker threads always exit and `thread::scope` can complete.
struct CloseGuard<'a, E>(&'a TaskQueue<E>);

impl<E> Drop for CloseGuard<'_, E> {
    fn drop(&mut self) {
        self.0.close();
    }
}

impl<E> TaskPool<E>
where
    E: Send + 'static,
{
    /// Runs `root` against a pool of `worker_count` workers and returns its
    /// value.
    ///
    /// The calling thread executes `root` itself and participates in task
    /// execution whenever it blocks in a join, so `worker_count` is the
    /// total degree of parallelism: a count of one spawns no threads at all
    /// and degrades to ordinary sequential recursion.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero. Panics escaping `root` or any
    /// spawned unit are propagated to the caller.
    pub fn scope<R>(worker_count: usize, root: impl FnOnce(&Self) -> R) -> R {
        assert!(
            worker_count >= 1,
            "called `TaskPool::scope` with a worker count of zero"
        );

        let pool = TaskPool {
            queue: TaskQueue::new(),
        };

        std::thread::scope(|scope| {
            for _ in 1..worker_count {
                scope.spawn(|| pool.worker_loop());
            }

            let _close = CloseGuard(&pool.queue);
            root(&pool)
        })
    }

    /// Registers a unit of work for execution and returns its handle.
    ///
    /// Spawning never blocks; the unit may start running on another worker
    /// before this call returns, or sit in the queue until one is free.
    pub fn spawn<F>(&self, work: F) -> TaskHandle<E>
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
    {
        self.spawn_job(Box::new(work))
    }

    /// Blocks until every referenced unit has completed, then returns the
    /// first error among them, if any.
    ///
    /// While waiting, the calling task executes pending tasks from the
    /// queue. Completion of each unit is observed through its handle's
    /// mutex, which establishes the happens-before edge required before
    /// reading anything the units wrote.
    ///
    /// # Panics
    ///
    /// If any joined unit panicked, the panic is resumed here, but only
    /// after all referenced units have completed.
    pub fn join<I>(&self, handles: I) -> Result<(), E>
    where
        I: IntoIterator<Item = TaskHandle<E>>,
    {
        let handles: Vec<TaskHandle<E>> = handles.into_iter().collect();

        for handle in &handles {
            while !handle.is_complete() {
                match self.queue.try_pop() {
                    Some(task) => task.run(),
                    None => handle.wait(),
                }
            }
        }

        // Collect only after every unit finished, so a failure in one child
        // never lets the caller resume while a sibling is still writing.
        let mut first_error = None;
        let mut panic_payload = None;
        for handle in handles {
            match handle.take() {
                TaskOutcome::Finished(Ok(())) => {}
                TaskOutcome::Finished(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                TaskOutcome::Panicked(payload) => {
                    if panic_payload.is_none() {
                        panic_payload = Some(payload);
                    }
                }
            }
        }

        if let Some(payload) = panic_payload {
            panic::resume_unwind(payload);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Spawns two units of work and joins both, returning the first error.
    ///
    /// Unlike [`spawn`](Self::spawn), the closures may borrow local data
    /// (for example two disjoint `&mut` halves of a slice): because this
    /// call does not return until both units have completed, no borrow can
    /// escape it.
    pub fn fork_join<A, B>(&self, a: A, b: B) -> Result<(), E>
    where
        A: FnOnce() -> Result<(), E> + Send,
        B: FnOnce() -> Result<(), E> + Send,
    {
        let a: Box<dyn FnOnce() -> Result<(), E> + Send + '_> = Box::new(a);
        let b: Box<dyn FnOnce() -> Result<(), E> + Send + '_> = Box::new(b);

        // SAFETY: the queue stores `'static` jobs, but `join` below blocks
        // until both units have completed, on success, error and panic
        // alike. Neither closure can therefore run, or even exist, after
        // this call returns, so extending their lifetimes is sound.
        let (a, b) = unsafe { (erase_job_lifetime(a), erase_job_lifetime(b)) };

        let first = self.spawn_job(a);
        let second = self.spawn_job(b);
        self.join([first, second])
    }

    fn spawn_job(&self, job: Job<E>) -> TaskHandle<E> {
        let (task, handle) = Task::new(job);
        self.queue.push(task);
        handle
    }

    fn worker_loop(&self) {
        while let Some(task) = self.queue.pop_blocking() {
            task.run();
        }
    }
}

/// Pretends a boxed job lives for `'static`.
///
/// # Safety
///
/// The caller must guarantee the job has been executed (or dropped) before
/// any lifetime it captures ends. `fork_join` upholds this by joining both
/// jobs before returning.
unsafe fn erase_job_lifetime<'a, E>(
    job: Box<dyn FnOnce() -> Result<(), E> + Send + 'a>,
) -> Job<E> {
    unsafe { std::mem::transmute(job) }
}
