//! Cooperative timer queue.
//!
//! Timers are plain entries in a min-heap keyed by wall-clock deadline. The
//! host advances wall time and pops whatever is due. Cancellation never
//! touches the heap: each timer captures the generation of its kind at arming
//! time, cancelling bumps that generation, and stale entries are dropped when
//! they surface.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Recurring clock tick
    Tick,
    /// One-shot application of the event at this timeline index
    Event(usize),
}

/// A timer popped from the queue with a live generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub due: Duration,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    due: Duration,
    seq: u64,
    generation: u64,
    kind: TimerKind,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; earliest deadline, then earliest armed, wins
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
    tick_generation: u64,
    event_generation: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, due: Duration, kind: TimerKind) {
        let generation = self.generation_of(kind);
        self.heap.push(Entry {
            due,
            seq: self.next_seq,
            generation,
            kind,
        });
        self.next_seq += 1;
    }

    pub fn cancel_events(&mut self) {
        self.event_generation += 1;
        self.compact();
    }

    pub fn cancel_all(&mut self) {
        self.tick_generation += 1;
        self.event_generation += 1;
        self.heap.clear();
    }

    /// Pop the earliest live timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer> {
        while let Some(top) = self.heap.peek() {
            if top.due > now {
                return None;
            }
            let entry = self.heap.pop()?;
            if self.is_live(&entry) {
                return Some(FiredTimer {
                    due: entry.due,
                    kind: entry.kind,
                });
            }
        }
        None
    }

    /// Pop every live event timer due exactly at `due`, in arming order.
    /// Ticks sharing the deadline stay queued.
    pub fn pop_events_at(&mut self, due: Duration) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut ticks = Vec::new();
        while self.heap.peek().is_some_and(|top| top.due == due) {
            let Some(entry) = self.heap.pop() else {
                break;
            };
            match entry.kind {
                TimerKind::Event(index) if self.is_live(&entry) => indices.push(index),
                TimerKind::Event(_) => {}
                TimerKind::Tick => ticks.push(entry),
            }
        }
        self.heap.extend(ticks);
        indices
    }

    /// Deadline of the earliest live timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.heap
            .iter()
            .filter(|e| self.is_live(e))
            .map(|e| e.due)
            .min()
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.heap.iter().filter(|e| self.is_live(e)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_tick(&self) -> bool {
        self.heap
            .iter()
            .any(|e| e.kind == TimerKind::Tick && self.is_live(e))
    }

    fn generation_of(&self, kind: TimerKind) -> u64 {
        match kind {
            TimerKind::Tick => self.tick_generation,
            TimerKind::Event(_) => self.event_generation,
        }
    }

    fn is_live(&self, entry: &Entry) -> bool {
        entry.generation == self.generation_of(entry.kind)
    }

    fn compact(&mut self) {
        let tick = self.tick_generation;
        let event = self.event_generation;
        self.heap.retain(|e| match e.kind {
            TimerKind::Tick => e.generation == tick,
            TimerKind::Event(_) => e.generation == event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(300), TimerKind::Event(2));
        queue.arm(ms(100), TimerKind::Event(0));
        queue.arm(ms(200), TimerKind::Tick);

        let kinds: Vec<TimerKind> =
            std::iter::from_fn(|| queue.pop_due(ms(1000)).map(|t| t.kind)).collect();
        assert_eq!(
            kinds,
            vec![TimerKind::Event(0), TimerKind::Tick, TimerKind::Event(2)]
        );
    }

    #[test]
    fn equal_deadlines_fire_in_arming_order() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(100), TimerKind::Event(5));
        queue.arm(ms(100), TimerKind::Event(1));
        assert_eq!(queue.pop_due(ms(100)).unwrap().kind, TimerKind::Event(5));
        assert_eq!(queue.pop_due(ms(100)).unwrap().kind, TimerKind::Event(1));
    }

    #[test]
    fn events_sharing_a_deadline_pop_together() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(100), TimerKind::Event(1));
        queue.arm(ms(100), TimerKind::Tick);
        queue.arm(ms(100), TimerKind::Event(2));
        queue.arm(ms(200), TimerKind::Event(3));

        let first = queue.pop_due(ms(100)).unwrap();
        assert_eq!(first.kind, TimerKind::Event(1));
        assert_eq!(queue.pop_events_at(first.due), vec![2]);
        // the tick at the same deadline is still queued
        assert_eq!(queue.pop_due(ms(100)).unwrap().kind, TimerKind::Tick);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(100), TimerKind::Tick);
        assert!(queue.pop_due(ms(99)).is_none());
        assert_eq!(queue.next_due(), Some(ms(100)));
    }

    #[test]
    fn cancelled_events_never_fire() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(100), TimerKind::Tick);
        queue.arm(ms(50), TimerKind::Event(0));
        queue.cancel_events();

        assert_eq!(queue.len(), 1);
        assert!(queue.has_tick());
        assert_eq!(queue.pop_due(ms(1000)).unwrap().kind, TimerKind::Tick);
        assert!(queue.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn timers_armed_after_cancel_are_live() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(10), TimerKind::Event(0));
        queue.cancel_events();
        queue.arm(ms(20), TimerKind::Event(1));
        assert_eq!(queue.pop_due(ms(100)).unwrap().kind, TimerKind::Event(1));
    }

    #[test]
    fn cancel_all_empties_queue() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(10), TimerKind::Tick);
        queue.arm(ms(10), TimerKind::Event(0));
        queue.cancel_all();
        assert!(queue.is_empty());
        assert_eq!(queue.next_due(), None);
        assert!(!queue.has_tick());
    }
}
