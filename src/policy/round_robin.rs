//! Round Robin.

use crate::error::{SimError, SimResult};
use crate::process::{Process, ProcessTable};
use crate::time::SimTime;

use super::SchedulingPolicy;

/// FIFO selection with a fixed time quantum.
///
/// The engine keeps the ready vector in arrival/requeue order and pushes
/// expired processes to the tail, so taking the head preserves circular
/// fairness without the policy holding any queue of its own.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: u64,
}

impl RoundRobin {
    /// Create a Round Robin policy. Rejects `quantum == 0`.
    pub fn new(quantum: u64) -> SimResult<Self> {
        if quantum == 0 {
            return Err(SimError::ZeroQuantum);
        }
        Ok(RoundRobin { quantum })
    }

    /// The configured quantum.
    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select_next(
        &mut self,
        ready: &[usize],
        _table: &mut ProcessTable,
        _now: SimTime,
    ) -> Option<usize> {
        ready.first().copied()
    }

    fn time_slice(&self, _process: &Process) -> Option<u64> {
        Some(self.quantum)
    }
}
