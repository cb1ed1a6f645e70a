/// Simulated time for the deterministic scheduling engine.
///
/// Represents a logical timestamp with no dependency on `std::time`.
/// The clock advances only when the engine executes a CPU slice, charges
/// context-switch overhead, or skips an idle gap — never from wall-clock
/// observation.

/// A point in simulated time, measured in abstract ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(u64);

impl SimTime {
    /// The zero-point of simulated time.
    pub const ZERO: SimTime = SimTime(0);

    /// Create a new `SimTime` from a raw tick value.
    #[inline]
    pub fn new(ticks: u64) -> Self {
        SimTime(ticks)
    }

    /// Return the raw tick value.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// The instant `delta` ticks after `self`.
    /// Returns `None` on overflow (should never happen in practice).
    #[inline]
    pub fn plus(self, delta: u64) -> Option<SimTime> {
        self.0.checked_add(delta).map(SimTime)
    }

    /// The duration (in ticks) since `earlier`.
    /// Returns `None` if `earlier` is actually later than `self`.
    #[inline]
    pub fn duration_since(self, earlier: SimTime) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}
