//! Shortest Job First / Shortest Remaining Time First.

use crate::process::ProcessTable;
use crate::time::SimTime;

use super::{select_min_by, SchedulingPolicy};

/// SJF selects the lowest total CPU burst; the preemptive form (SRTF)
/// selects the lowest *remaining* time instead. Ties break by lowest
/// process ID.
///
/// "Preemptive" changes only the selection key: the engine re-evaluates
/// scheduling at event boundaries (completions and quantum expiries), so
/// a running process is never yanked the instant a shorter job arrives.
#[derive(Debug, Clone, Copy)]
pub struct Sjf {
    preemptive: bool,
}

impl Sjf {
    /// Non-preemptive SJF.
    pub fn new() -> Self {
        Sjf { preemptive: false }
    }

    /// Preemptive variant (SRTF).
    pub fn preemptive() -> Self {
        Sjf { preemptive: true }
    }
}

impl Default for Sjf {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        if self.preemptive {
            "SRTF"
        } else {
            "SJF"
        }
    }

    fn select_next(
        &mut self,
        ready: &[usize],
        table: &mut ProcessTable,
        _now: SimTime,
    ) -> Option<usize> {
        if self.preemptive {
            select_min_by(ready, table, |p| p.remaining_time)
        } else {
            select_min_by(ready, table, |p| p.cpu_burst_time)
        }
    }
}
