//! Pluggable scheduling policies.
//!
//! A policy decides *which* ready process runs next; the engine owns every
//! other timing rule (slices, quanta expiry, context switches). Policies
//! never share mutable base state — each variant carries only its own
//! configuration plus, for MLFQ, its private level queues.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`fcfs`] | [`Fcfs`] — earliest arrival first |
//! | [`sjf`] | [`Sjf`] — shortest job / shortest remaining time first |
//! | [`round_robin`] | [`RoundRobin`] — FIFO with a fixed quantum |
//! | [`priority`] | [`Priority`] — lowest numeric priority first |
//! | [`mlfq`] | [`Mlfq`] — multilevel feedback queue with periodic boost |

pub mod fcfs;
pub mod mlfq;
pub mod priority;
pub mod round_robin;
pub mod sjf;

// Flat re-exports so external callers can use `kronos::policy::Fcfs` etc.
pub use fcfs::Fcfs;
pub use mlfq::Mlfq;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

use crate::process::{Process, ProcessTable};
use crate::time::SimTime;

/// Trait implemented by every scheduling policy.
///
/// # Contract
///
/// - `select_next` is *pure selection*: it must return a slot that is
///   currently in `ready` and must not change ready-set membership. The
///   engine removes the chosen slot itself and then calls `on_dispatch`.
/// - `on_ready`/`on_dispatch` are the hand-off points for policies that
///   mirror the ready set in private structures (MLFQ's level queues);
///   the engine's ready vector stays authoritative for membership.
/// - Implementations must be deterministic for equal inputs: equal-key
///   candidates resolve by lowest process ID or by FIFO position, never
///   by iteration order of an unordered structure.
pub trait SchedulingPolicy {
    /// Human-readable policy name, for reports and demos.
    fn name(&self) -> &'static str;

    /// Called whenever a process enters the ready set (arrival or
    /// quantum expiry).
    fn on_ready(&mut self, _slot: usize, _table: &mut ProcessTable, _now: SimTime) {}

    /// Choose the next process to run from `ready`, or `None` if the
    /// policy declines to dispatch.
    fn select_next(
        &mut self,
        ready: &[usize],
        table: &mut ProcessTable,
        now: SimTime,
    ) -> Option<usize>;

    /// Called after the engine has removed the chosen slot from the
    /// ready set.
    fn on_dispatch(&mut self, _slot: usize, _table: &mut ProcessTable, _now: SimTime) {}

    /// Quantum governing `process` while it runs, or `None` if this
    /// policy is not time-sliced.
    fn time_slice(&self, _process: &Process) -> Option<u64> {
        None
    }
}

/// Pick the ready slot minimizing `key`, breaking ties by lowest
/// process ID. Shared by every sorted-selection policy.
pub(crate) fn select_min_by<F>(ready: &[usize], table: &ProcessTable, key: F) -> Option<usize>
where
    F: Fn(&Process) -> u64,
{
    ready.iter().copied().min_by_key(|&slot| {
        let p = table.get(slot);
        (key(p), p.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Process, ProcessId, ProcessTable};

    fn table(specs: &[(u64, u64, u64, u32)]) -> ProcessTable {
        let procs = specs
            .iter()
            .map(|&(id, arrival, cpu, prio)| {
                Process::new(ProcessId::new(id), SimTime::new(arrival), cpu, 0, prio).unwrap()
            })
            .collect();
        ProcessTable::from_workload(procs).unwrap()
    }

    #[test]
    fn test_select_min_by_key() {
        let t = table(&[(0, 9, 4, 1), (1, 2, 4, 1), (2, 5, 4, 1)]);
        let slot = select_min_by(&[0, 1, 2], &t, |p| p.arrival_time.ticks());
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn test_select_min_by_ties_on_lowest_id() {
        let t = table(&[(7, 3, 4, 1), (2, 3, 4, 1), (5, 3, 4, 1)]);
        let slot = select_min_by(&[0, 1, 2], &t, |p| p.arrival_time.ticks());
        // All keys equal → lowest ID (P2, slot 1) wins.
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn test_select_min_by_empty() {
        let t = table(&[]);
        assert_eq!(select_min_by(&[], &t, |p| p.priority as u64), None);
    }
}
