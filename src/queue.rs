/// Deterministic event queue.
///
/// Uses a `BinaryHeap` with reversed `Ord` on `Event` to act as a
/// min-heap keyed by `(time, seq)`. Because sequence numbers are strictly
/// increasing and the tie-break is an explicit field, two runs over the
/// same workload always pop events in the same order.

use std::collections::BinaryHeap;

use crate::event::{Event, EventKind, EventSeq, EventSeqGen};
use crate::time::SimTime;

/// Time-ordered priority structure feeding the engine.
///
/// Owns the heap and the sequence generator. All event creation goes
/// through this struct to ensure monotonic sequence numbers and
/// deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    /// Min-heap (via reversed Ord on Event).
    heap: BinaryHeap<Event>,

    /// Monotonic tie-break generator.
    seq_gen: EventSeqGen,
}

impl EventQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        EventQueue {
            heap: BinaryHeap::new(),
            seq_gen: EventSeqGen::new(),
        }
    }

    /// Queue a new event at the given time.
    ///
    /// Returns the `EventSeq` assigned to this event.
    pub fn push(&mut self, at: SimTime, kind: EventKind, slot: usize) -> EventSeq {
        let seq = self.seq_gen.next_seq();
        self.heap.push(Event::new(seq, at, kind, slot));
        seq
    }

    /// Pop the next event (earliest time, lowest seq).
    ///
    /// Returns `None` when the queue is empty.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek()
    }

    /// Fire time of the next event, if any.
    pub fn next_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|e| e.at)
    }

    /// Returns `true` if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_at_same_time() {
        let mut q = EventQueue::new();

        q.push(SimTime::new(10), EventKind::Arrival, 0);
        q.push(SimTime::new(10), EventKind::Arrival, 1);
        q.push(SimTime::new(10), EventKind::Arrival, 2);

        let e1 = q.pop().unwrap();
        let e2 = q.pop().unwrap();
        let e3 = q.pop().unwrap();

        // Same time → ordered by ascending seq (creation order).
        assert!(e1.seq < e2.seq);
        assert!(e2.seq < e3.seq);
        assert_eq!((e1.slot, e2.slot, e3.slot), (0, 1, 2));
    }

    #[test]
    fn test_time_ordering() {
        let mut q = EventQueue::new();

        q.push(SimTime::new(30), EventKind::Arrival, 0);
        q.push(SimTime::new(10), EventKind::Arrival, 1);
        q.push(SimTime::new(20), EventKind::IoComplete, 2);

        assert_eq!(q.pop().unwrap().at, SimTime::new(10));
        assert_eq!(q.pop().unwrap().at, SimTime::new(20));
        assert_eq!(q.pop().unwrap().at, SimTime::new(30));
    }

    #[test]
    fn test_next_time() {
        let mut q = EventQueue::new();
        assert_eq!(q.next_time(), None);
        q.push(SimTime::new(50), EventKind::Arrival, 0);
        q.push(SimTime::new(5), EventKind::Arrival, 1);
        assert_eq!(q.next_time(), Some(SimTime::new(5)));
    }

    #[test]
    fn test_empty_queue() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.pop().is_none());
    }

    #[test]
    fn test_determinism_across_runs() {
        // Two independent queues with the same insertion order must
        // produce the same pop order.
        fn build_order() -> Vec<(u64, u64)> {
            let mut q = EventQueue::new();
            q.push(SimTime::new(5), EventKind::Arrival, 0);
            q.push(SimTime::new(3), EventKind::Arrival, 1);
            q.push(SimTime::new(5), EventKind::IoComplete, 2);
            q.push(SimTime::new(1), EventKind::Arrival, 3);
            q.push(SimTime::new(3), EventKind::IoComplete, 4);

            let mut order = Vec::new();
            while let Some(e) = q.pop() {
                order.push((e.at.ticks(), e.seq.raw()));
            }
            order
        }

        let run1 = build_order();
        let run2 = build_order();
        assert_eq!(run1, run2);

        // And the order itself is sorted by (time, seq).
        for window in run1.windows(2) {
            assert!(window[0] <= window[1], "events out of order: {:?}", run1);
        }
    }
}
