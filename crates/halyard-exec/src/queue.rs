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

//! Shared FIFO injector queue for the fork/join pool.
//!
//! A single mutex-guarded `VecDeque` is plenty here: tasks are coarse
//! (an entire sub-sort each), the queue only sees traffic above the
//! sequential cutoff, and contention is bounded by the worker count.
//! Workers block on the condvar when the queue is empty and drain any
//! remaining tasks after the queue has been closed.

use crate::task::Task;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct QueueState<E> {
    tasks: VecDeque<Task<E>>,
    closed: bool,
}

/// FIFO queue of pending tasks shared between the pool's workers.
pub(crate) struct TaskQueue<E> {
    state: Mutex<QueueState<E>>,
    task_ready: Condvar,
}

impl<E> TaskQueue<E> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                closed: false,
            }),
            task_ready: Condvar::new(),
        }
    }

    /// Enqueues a task and wakes one idle worker.
    pub(crate) fn push(&self, task: Task<E>) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(
            !state.closed,
            "called `TaskQueue::push` on a closed queue"
        );
        state.tasks.push_back(task);
        self.task_ready.notify_one();
    }

    /// Pops the oldest pending task without blocking.
    pub(crate) fn try_pop(&self) -> Option<Task<E>> {
        self.state.lock().unwrap().tasks.pop_front()
    }

    /// Pops the oldest pending task, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue has been closed and fully drained,
    /// which is the worker's signal to exit.
    pub(crate) fn pop_blocking(&self) -> Option<Task<E>> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            if state.closed {
                return None;
            }
            state = self.task_ready.wait(state).unwrap();
        }
    }

    /// Closes the queue and wakes every blocked worker.
    ///
    /// Already-queued tasks remain poppable; only blocking on an empty
    /// queue is affected.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.task_ready.notify_all();
    }
}
