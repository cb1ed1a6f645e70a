//! Multilevel Feedback Queue.

use std::collections::VecDeque;

use crate::error::{SimError, SimResult};
use crate::process::{Process, ProcessTable};
use crate::time::SimTime;

use super::SchedulingPolicy;

/// MLFQ with per-level FIFO queues, per-level quanta, and a periodic
/// priority boost against starvation.
///
/// The level queues mirror the engine's ready set: `on_ready` files a
/// process under its (clamped) level, `on_dispatch` removes it again, so
/// no process is ever counted ready in two places. Selection returns the
/// front of the lowest-numbered non-empty level without popping it — the
/// engine performs removal, like every other policy.
///
/// Every `boost_interval` ticks (checked at selection time), every queued
/// process not already at level 0 moves up one level and its
/// `time_in_level` resets.
///
/// Known limitation, preserved deliberately: a running process whose
/// level quantum expires is requeued at its *current* level — there is no
/// demotion. Deeper levels are therefore only ever populated by processes
/// that enter the run with a non-zero `queue_level`.
#[derive(Debug, Clone)]
pub struct Mlfq {
    quanta: Vec<u64>,
    boost_interval: u64,
    queues: Vec<VecDeque<usize>>,
    last_boost: SimTime,
}

impl Mlfq {
    /// Create an MLFQ policy.
    ///
    /// `quanta` must hold one positive quantum per level, non-increasing
    /// from level 0 down; `boost_interval` must be positive.
    pub fn new(num_levels: usize, quanta: Vec<u64>, boost_interval: u64) -> SimResult<Self> {
        if num_levels == 0 {
            return Err(SimError::NoLevels);
        }
        if quanta.len() != num_levels {
            return Err(SimError::QuantaCountMismatch {
                levels: num_levels,
                quanta: quanta.len(),
            });
        }
        for (level, &q) in quanta.iter().enumerate() {
            if q == 0 {
                return Err(SimError::ZeroLevelQuantum { level });
            }
            if level > 0 && q > quanta[level - 1] {
                return Err(SimError::IncreasingQuanta { level });
            }
        }
        if boost_interval == 0 {
            return Err(SimError::ZeroBoostInterval);
        }
        Ok(Mlfq {
            quanta,
            boost_interval,
            queues: vec![VecDeque::new(); num_levels],
            last_boost: SimTime::ZERO,
        })
    }

    /// Convenience constructor matching the classic 3-level setup.
    pub fn classic() -> Self {
        // Validated inputs; cannot fail.
        match Mlfq::new(3, vec![100, 50, 25], 500) {
            Ok(p) => p,
            Err(_) => unreachable!("classic MLFQ configuration is valid"),
        }
    }

    /// Number of queue levels.
    pub fn num_levels(&self) -> usize {
        self.quanta.len()
    }

    fn clamp_level(&self, level: usize) -> usize {
        level.min(self.quanta.len() - 1)
    }

    /// Move every queued process not at level 0 up one level, preserving
    /// FIFO order within each source level.
    fn boost(&mut self, table: &mut ProcessTable) {
        for level in 1..self.queues.len() {
            let moved: Vec<usize> = self.queues[level].drain(..).collect();
            for slot in moved {
                let p = table.get_mut(slot);
                p.queue_level = level - 1;
                p.time_in_level = 0;
                self.queues[level - 1].push_back(slot);
            }
        }
    }
}

impl SchedulingPolicy for Mlfq {
    fn name(&self) -> &'static str {
        "MLFQ"
    }

    fn on_ready(&mut self, slot: usize, table: &mut ProcessTable, _now: SimTime) {
        let p = table.get_mut(slot);
        let level = self.clamp_level(p.queue_level);
        p.queue_level = level;
        self.queues[level].push_back(slot);
    }

    fn select_next(
        &mut self,
        _ready: &[usize],
        table: &mut ProcessTable,
        now: SimTime,
    ) -> Option<usize> {
        if now.duration_since(self.last_boost).unwrap_or(0) >= self.boost_interval {
            self.boost(table);
            self.last_boost = now;
        }
        self.queues
            .iter()
            .find(|q| !q.is_empty())
            .and_then(|q| q.front().copied())
    }

    fn on_dispatch(&mut self, slot: usize, table: &mut ProcessTable, _now: SimTime) {
        let p = table.get_mut(slot);
        p.time_in_level = 0;
        let level = p.queue_level;
        if let Some(pos) = self.queues[level].iter().position(|&s| s == slot) {
            self.queues[level].remove(pos);
        }
    }

    fn time_slice(&self, process: &Process) -> Option<u64> {
        Some(self.quanta[self.clamp_level(process.queue_level)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Process, ProcessId};

    fn table(n: u64) -> ProcessTable {
        let procs = (0..n)
            .map(|id| Process::new(ProcessId::new(id), SimTime::ZERO, 10, 0, 1).unwrap())
            .collect();
        ProcessTable::from_workload(procs).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(Mlfq::new(0, vec![], 10).err(), Some(SimError::NoLevels));
        assert_eq!(
            Mlfq::new(2, vec![8], 10).err(),
            Some(SimError::QuantaCountMismatch { levels: 2, quanta: 1 })
        );
        assert_eq!(
            Mlfq::new(2, vec![8, 0], 10).err(),
            Some(SimError::ZeroLevelQuantum { level: 1 })
        );
        assert_eq!(
            Mlfq::new(2, vec![4, 8], 10).err(),
            Some(SimError::IncreasingQuanta { level: 1 })
        );
        assert_eq!(
            Mlfq::new(2, vec![8, 4], 0).err(),
            Some(SimError::ZeroBoostInterval)
        );
        assert!(Mlfq::new(2, vec![8, 8], 10).is_ok()); // ties allowed
    }

    #[test]
    fn test_fifo_within_lowest_level() {
        let mut t = table(3);
        let mut policy = Mlfq::new(2, vec![8, 4], 100).unwrap();

        policy.on_ready(1, &mut t, SimTime::ZERO);
        policy.on_ready(0, &mut t, SimTime::ZERO);
        policy.on_ready(2, &mut t, SimTime::ZERO);

        // FIFO: slot 1 was filed first.
        assert_eq!(policy.select_next(&[1, 0, 2], &mut t, SimTime::new(1)), Some(1));
        policy.on_dispatch(1, &mut t, SimTime::new(1));
        assert_eq!(policy.select_next(&[0, 2], &mut t, SimTime::new(2)), Some(0));
    }

    #[test]
    fn test_lower_level_outranks_deeper_level() {
        let mut t = table(2);
        t.get_mut(0).queue_level = 1;
        let mut policy = Mlfq::new(2, vec![8, 4], 100).unwrap();

        policy.on_ready(0, &mut t, SimTime::ZERO); // level 1
        policy.on_ready(1, &mut t, SimTime::ZERO); // level 0

        assert_eq!(policy.select_next(&[0, 1], &mut t, SimTime::new(1)), Some(1));
    }

    #[test]
    fn test_level_clamped_on_ready() {
        let mut t = table(1);
        t.get_mut(0).queue_level = 99;
        let mut policy = Mlfq::new(3, vec![8, 4, 2], 100).unwrap();

        policy.on_ready(0, &mut t, SimTime::ZERO);
        assert_eq!(t.get(0).queue_level, 2);
        assert_eq!(policy.time_slice(t.get(0)), Some(2));
    }

    #[test]
    fn test_boost_promotes_one_level() {
        let mut t = table(2);
        t.get_mut(0).queue_level = 2;
        t.get_mut(1).queue_level = 1;
        let mut policy = Mlfq::new(3, vec![8, 4, 2], 50).unwrap();

        policy.on_ready(0, &mut t, SimTime::ZERO);
        policy.on_ready(1, &mut t, SimTime::ZERO);

        // Before the interval: no boost, level-1 process is selected.
        assert_eq!(policy.select_next(&[0, 1], &mut t, SimTime::new(49)), Some(1));
        assert_eq!(t.get(0).queue_level, 2);

        // At the interval: both move up exactly one level.
        policy.select_next(&[0, 1], &mut t, SimTime::new(50));
        assert_eq!(t.get(1).queue_level, 0);
        assert_eq!(t.get(0).queue_level, 1);
        assert_eq!(t.get(0).time_in_level, 0);

        // The next boost can only fire a full interval later.
        policy.select_next(&[0, 1], &mut t, SimTime::new(60));
        assert_eq!(t.get(0).queue_level, 1);
        policy.select_next(&[0, 1], &mut t, SimTime::new(100));
        assert_eq!(t.get(0).queue_level, 0);
    }

    #[test]
    fn test_select_does_not_pop() {
        let mut t = table(1);
        let mut policy = Mlfq::new(2, vec![8, 4], 100).unwrap();
        policy.on_ready(0, &mut t, SimTime::ZERO);

        assert_eq!(policy.select_next(&[0], &mut t, SimTime::new(1)), Some(0));
        // Still selectable until the engine confirms the dispatch.
        assert_eq!(policy.select_next(&[0], &mut t, SimTime::new(2)), Some(0));
        policy.on_dispatch(0, &mut t, SimTime::new(2));
        assert_eq!(policy.select_next(&[], &mut t, SimTime::new(3)), None);
    }
}
