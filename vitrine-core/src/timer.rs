//! Deferred work on a host-driven clock.
//!
//! Hosts report elapsed time since page load through `advance`; nothing here
//! reads a wall clock, which keeps staggered animations deterministic.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// A queue of tasks that become due at a point on the page clock.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: Duration,
    seq: u64,
    queue: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: Vec::new(),
        }
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed from the current clock.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq: self.seq,
            task,
        });
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock to `now` (never backwards) and return the tasks that
    /// became due, ordered by due time and then by scheduling order.
    pub fn advance(&mut self, now: Duration) -> Vec<T> {
        self.now = self.now.max(now);
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = pending;
        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.task).collect()
    }
}
