//! Cancellable delayed transitions on a virtual clock.
//!
//! The engine owns no timers. Delayed work (the un-reveal after a pair is
//! shown, the one-second timer tick) is queued here with a due time in
//! milliseconds, and the host drives the clock forward. Tasks come out in
//! due-time order; tasks due at the same instant come out in the order they
//! were scheduled.
//!
//! ```
//! use flag_match::schedule::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let hide = scheduler.schedule(1000, "hide");
//! scheduler.schedule(500, "tick");
//!
//! assert!(scheduler.cancel(hide));
//!
//! let due = scheduler.pop_due(2000).unwrap();
//! assert_eq!(due.task, "tick");
//! assert_eq!(scheduler.now_ms(), 500);
//! assert!(scheduler.pop_due(2000).is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A task that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Due<T> {
    /// Handle it was scheduled under.
    pub id: TaskId,
    /// Virtual time it was due at.
    pub due_ms: u64,
    /// The task itself.
    pub task: T,
}

/// Queue of delayed tasks keyed by `(due_ms, id)`.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `task` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.insert((self.now_ms.saturating_add(delay_ms), id.0), task);
        id
    }

    /// Drop a pending task. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|&(_, seq), _| seq != id.0);
        self.queue.len() != before
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Remove and return the earliest task due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Due<T>> {
        let (&(due_ms, seq), _) = self.queue.iter().next()?;
        if due_ms > until {
            return None;
        }
        let task = self.queue.remove(&(due_ms, seq))?;
        self.now_ms = self.now_ms.max(due_ms);
        Some(Due {
            id: TaskId(seq),
            due_ms,
            task,
        })
    }

    /// Move the clock forward. Never moves it back.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
