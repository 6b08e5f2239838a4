// Copyright 2025 the Ferry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-threaded deferred-task queue driven by a host clock.

use std::time::Duration;

/// Handle of a scheduled task, used for cancellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Deferred tasks keyed by a monotonic host time.
///
/// Time only moves when [`Scheduler::advance`] is called. A task scheduled
/// with a zero delay is due at the current time but is only handed out by the
/// next `advance`, which makes "on the next turn" expressible.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The time of the last [`advance`](Self::advance).
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            task,
        });
        id
    }

    /// Drop a pending task. Returns the task if it had not run yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let idx = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(idx).task)
    }

    /// Returns true if `id` is scheduled and has not run.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock to `now` and take every task that is due.
    ///
    /// Tasks come out in deadline order, ties broken by scheduling order. A
    /// `now` earlier than the current time is clamped, so the clock never runs
    /// backwards.
    pub fn advance(&mut self, now: Duration) -> Vec<(TaskId, T)> {
        self.now = self.now.max(now);
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= self.now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.id));
        due.into_iter().map(|p| (p.id, p.task)).collect()
    }
}
