//! Priority scheduling.

use crate::process::ProcessTable;
use crate::time::SimTime;

use super::{select_min_by, SchedulingPolicy};

/// Lowest numeric priority runs first (lower = more urgent), ties broken
/// by lowest process ID.
///
/// The preemptive flag labels the variant but does not change selection:
/// the engine only reschedules at event boundaries, so both forms behave
/// identically under this engine. Kept for configuration parity.
#[derive(Debug, Clone, Copy)]
pub struct Priority {
    preemptive: bool,
}

impl Priority {
    /// Non-preemptive priority scheduling.
    pub fn new() -> Self {
        Priority { preemptive: false }
    }

    /// Preemptive variant.
    pub fn preemptive() -> Self {
        Priority { preemptive: true }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for Priority {
    fn name(&self) -> &'static str {
        if self.preemptive {
            "Priority (preemptive)"
        } else {
            "Priority"
        }
    }

    fn select_next(
        &mut self,
        ready: &[usize],
        table: &mut ProcessTable,
        _now: SimTime,
    ) -> Option<usize> {
        select_min_by(ready, table, |p| p.priority as u64)
    }
}
