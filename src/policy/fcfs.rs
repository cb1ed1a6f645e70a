//! First-Come, First-Served.

use crate::process::ProcessTable;
use crate::time::SimTime;

use super::{select_min_by, SchedulingPolicy};

/// Non-preemptive FCFS: earliest arrival runs first, ties broken by
/// lowest process ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select_next(
        &mut self,
        ready: &[usize],
        table: &mut ProcessTable,
        _now: SimTime,
    ) -> Option<usize> {
        select_min_by(ready, table, |p| p.arrival_time.ticks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Process, ProcessId};

    #[test]
    fn test_earliest_arrival_wins() {
        let mut table = ProcessTable::from_workload(vec![
            Process::new(ProcessId::new(0), SimTime::new(8), 5, 0, 1).unwrap(),
            Process::new(ProcessId::new(1), SimTime::new(3), 5, 0, 1).unwrap(),
        ])
        .unwrap();

        let mut policy = Fcfs;
        let ready = vec![0, 1];
        assert_eq!(policy.select_next(&ready, &mut table, SimTime::new(10)), Some(1));
        // Selection must not shrink the ready set.
        assert_eq!(ready.len(), 2);
    }

    #[test]
    fn test_not_time_sliced() {
        let p = Process::new(ProcessId::new(0), SimTime::ZERO, 5, 0, 1).unwrap();
        assert_eq!(Fcfs.time_slice(&p), None);
    }
}
