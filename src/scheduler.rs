use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Deferred one-shot tasks keyed by a simulated millisecond clock.
///
/// Tasks are drained at the top of each tick, so callers control time
/// explicitly and tests never wait on a real timer.
#[derive(Debug)]
pub struct Scheduler<T> {
    heap: BinaryHeap<Reverse<Scheduled<T>>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Scheduled<T> {
    fire_at: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fire_at, self.seq).cmp(&(other.fire_at, other.seq))
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` to fire once the clock reaches `fire_at`.
    pub fn schedule(&mut self, fire_at: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled { fire_at, seq, task }));
    }

    /// Pops the earliest task due at `now`. Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: u64) -> Option<T> {
        let due = self
            .heap
            .peek()
            .map_or(false, |Reverse(next)| next.fire_at <= now);
        if !due {
            return None;
        }
        self.heap.pop().map(|Reverse(scheduled)| scheduled.task)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(next)| next.fire_at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
