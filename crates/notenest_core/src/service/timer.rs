//! Cancellable scheduled callbacks owned by a controller.
//!
//! # Invariants
//! - A task fires at most once, and never after it was cancelled.
//! - Due tasks fire ordered by due time, then by scheduling order.

/// Handle returned by `TimerQueue::schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due_ms: i64,
    task: T,
}

/// Pending tasks keyed by epoch-millisecond due time.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: i64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms, task });
        id
    }

    /// Returns whether a pending task was removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drops every pending task and returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    /// Removes and returns the tasks due at `now_ms`.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<(TimerId, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_ms <= now_ms);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due_ms, entry.id));
        due.into_iter().map(|entry| (entry.id, entry.task)).collect()
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<i64> {
        self.entries.iter().map(|entry| entry.due_ms).min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
