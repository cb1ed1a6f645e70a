/// Timed events for the discrete-event engine.
///
/// An `Event` marks a process arrival or an I/O completion at a point in
/// simulated time. Events carry an explicit, strictly-increasing sequence
/// number so that two events at the same instant always resolve in
/// creation order — never by the arbitrary internal order of a heap.

use std::cmp::Ordering;

use crate::time::SimTime;

// ── Event sequence number ─────────────────────────────────────────────

/// A strictly-increasing tie-break key for events.
///
/// Two events scheduled at the same `SimTime` are ordered by `EventSeq`,
/// which corresponds to creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EventSeq(u64);

impl EventSeq {
    /// Wrap a raw u64 into an `EventSeq`.
    #[inline]
    pub fn new(raw: u64) -> Self {
        EventSeq(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E#{}", self.0)
    }
}

// ── Sequence generator ────────────────────────────────────────────────

/// Deterministic, strictly-increasing sequence generator.
///
/// Each event queue owns exactly one of these. The run is single-threaded
/// with no shared mutable state, so the counter is trivially deterministic.
#[derive(Debug, Clone, Default)]
pub struct EventSeqGen {
    next: u64,
}

impl EventSeqGen {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        EventSeqGen { next: 0 }
    }

    /// Mint the next sequence number.
    pub fn next_seq(&mut self) -> EventSeq {
        let seq = EventSeq(self.next);
        self.next += 1;
        seq
    }
}

// ── Event kind ────────────────────────────────────────────────────────

/// What an event signifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A process reaches its arrival time and joins the ready set.
    Arrival,
    /// A waiting process finishes its single I/O burst and terminates.
    IoComplete,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Arrival => write!(f, "Arrival"),
            EventKind::IoComplete => write!(f, "IoComplete"),
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────

/// A single queued occurrence: `kind` happens to the process in arena
/// slot `slot` at time `at`.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Creation-order tie-break (monotonically increasing).
    pub seq: EventSeq,
    /// When the event fires.
    pub at: SimTime,
    /// What happens.
    pub kind: EventKind,
    /// Arena slot of the process this event concerns.
    pub slot: usize,
}

impl Event {
    /// Convenience constructor.
    pub fn new(seq: EventSeq, at: SimTime, kind: EventKind, slot: usize) -> Self {
        Event { seq, at, kind, slot }
    }
}

/// Ordering: smallest `(at, seq)` first.
///
/// Rust's `BinaryHeap` is a *max*-heap, so the natural ordering is
/// **reversed** here to turn it into a min-heap.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
