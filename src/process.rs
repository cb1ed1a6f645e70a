//! Process records and the arena that backs every engine collection.
//!
//! A [`Process`] is the mutable entity a run works on: immutable workload
//! parameters plus runtime state the engine updates in place. All engine
//! collections (ready set, waiting set, running slot, completed list) hold
//! `usize` slots into a single [`ProcessTable`] arena, so a process can
//! never be referenced from two places with diverging state.

use crate::error::{SimError, SimResult};
use crate::time::SimTime;

// ── Process ID ────────────────────────────────────────────────────────

/// A unique identifier for a simulated process.
///
/// `ProcessId` is intentionally a newtype around `u64` rather than a bare
/// integer to prevent accidental confusion with other u64 values (tick
/// counts, burst lengths, arena slots) at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessId(u64);

impl ProcessId {
    /// Create a process ID from a raw integer.
    #[inline]
    pub fn new(id: u64) -> Self {
        ProcessId(id)
    }

    /// Return the underlying integer.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ── Process state ─────────────────────────────────────────────────────

/// Lifecycle state of a process.
///
/// These are data labels, not suspended executions: "Waiting" means an
/// I/O-completion event is pending for the process, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessState {
    Ready,
    Running,
    Waiting,
    Terminated,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Terminated => "TERMINATED",
        };
        write!(f, "{}", s)
    }
}

// ── Process ───────────────────────────────────────────────────────────

/// One simulated process: workload parameters plus runtime state.
///
/// Invariants maintained by the engine:
/// - `cpu_time_used + remaining_time == cpu_burst_time` at all times.
/// - `first_run_time` is assigned exactly once, at the first dispatch.
/// - After termination, `turnaround_time == completion_time − arrival_time`
///   and `waiting_time == turnaround_time − cpu_time_used`. The latter
///   folds queue wait and I/O wait into one figure; downstream consumers
///   depend on that exact formula.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Process {
    /// Caller-assigned identity, unique within a workload.
    pub id: ProcessId,
    /// When the process becomes visible to the engine.
    pub arrival_time: SimTime,
    /// Total CPU demand. Always positive.
    pub cpu_burst_time: u64,
    /// Length of the single I/O phase after the CPU burst; zero means the
    /// process terminates directly at CPU completion.
    pub io_burst_time: u64,
    /// Scheduling priority. Lower is more urgent.
    pub priority: u32,

    /// Current lifecycle state.
    pub state: ProcessState,
    /// CPU time still owed. Starts at `cpu_burst_time`.
    pub remaining_time: u64,
    /// CPU time consumed so far.
    pub cpu_time_used: u64,
    /// Instant of the first dispatch, set once.
    pub first_run_time: Option<SimTime>,
    /// Instant of the most recent dispatch; anchors quantum accounting.
    pub last_dispatch_time: SimTime,
    /// Instant the process reached `Terminated`.
    pub completion_time: SimTime,

    /// `completion_time − arrival_time`, set at termination.
    pub turnaround_time: u64,
    /// `turnaround_time − cpu_time_used`, set at termination.
    pub waiting_time: u64,
    /// `first_run_time − arrival_time`, set at first dispatch.
    pub response_time: u64,

    /// MLFQ queue level; 0 is the most urgent level.
    pub queue_level: usize,
    /// Ticks spent at the current MLFQ level; reset on boost and dispatch.
    pub time_in_level: u64,
}

impl Process {
    /// Create a process record in the `Ready` state, not yet visible to
    /// any engine.
    ///
    /// Rejects `cpu_burst_time == 0`; negative arrival times are
    /// unrepresentable by construction.
    pub fn new(
        id: ProcessId,
        arrival_time: SimTime,
        cpu_burst_time: u64,
        io_burst_time: u64,
        priority: u32,
    ) -> SimResult<Self> {
        if cpu_burst_time == 0 {
            return Err(SimError::ZeroCpuBurst(id));
        }
        Ok(Process {
            id,
            arrival_time,
            cpu_burst_time,
            io_burst_time,
            priority,
            state: ProcessState::Ready,
            remaining_time: cpu_burst_time,
            cpu_time_used: 0,
            first_run_time: None,
            last_dispatch_time: SimTime::ZERO,
            completion_time: SimTime::ZERO,
            turnaround_time: 0,
            waiting_time: 0,
            response_time: 0,
            queue_level: 0,
            time_in_level: 0,
        })
    }

    /// Move the process to `Terminated` at `now` and fix its terminal
    /// metrics.
    pub(crate) fn terminate(&mut self, now: SimTime) {
        self.state = ProcessState::Terminated;
        self.completion_time = now;
        self.turnaround_time = now.duration_since(self.arrival_time).unwrap_or(0);
        self.waiting_time = self.turnaround_time - self.cpu_time_used;
    }
}

// ── Process table ─────────────────────────────────────────────────────

/// Arena of process records for one run.
///
/// Built from the caller's workload; validated once, then indexed by slot
/// (position in the original workload order) for the rest of the run.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    procs: Vec<Process>,
}

impl ProcessTable {
    /// Validate a workload and take ownership of it.
    ///
    /// Rejects duplicate process IDs and re-checks the positive-burst
    /// invariant, so a record mutated after construction cannot smuggle an
    /// invalid value into a run.
    pub fn from_workload(workload: Vec<Process>) -> SimResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for p in &workload {
            if p.cpu_burst_time == 0 {
                return Err(SimError::ZeroCpuBurst(p.id));
            }
            if !seen.insert(p.id) {
                return Err(SimError::DuplicateProcessId(p.id));
            }
        }
        Ok(ProcessTable { procs: workload })
    }

    /// Number of processes in the arena.
    pub fn len(&self) -> usize {
        self.procs.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// Borrow the process at `slot`.
    pub fn get(&self, slot: usize) -> &Process {
        &self.procs[slot]
    }

    /// Mutably borrow the process at `slot`.
    pub fn get_mut(&mut self, slot: usize) -> &mut Process {
        &mut self.procs[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(id: u64, arrival: u64, cpu: u64) -> Process {
        Process::new(ProcessId::new(id), SimTime::new(arrival), cpu, 0, 1).unwrap()
    }

    #[test]
    fn test_new_initial_state() {
        let p = proc(1, 5, 10);
        assert_eq!(p.state, ProcessState::Ready);
        assert_eq!(p.remaining_time, 10);
        assert_eq!(p.cpu_time_used, 0);
        assert!(p.first_run_time.is_none());
        assert_eq!(p.queue_level, 0);
    }

    #[test]
    fn test_zero_cpu_burst_rejected() {
        let err = Process::new(ProcessId::new(0), SimTime::ZERO, 0, 0, 1);
        assert_eq!(err, Err(SimError::ZeroCpuBurst(ProcessId::new(0))));
    }

    #[test]
    fn test_terminate_metrics() {
        let mut p = proc(0, 3, 10);
        p.cpu_time_used = 10;
        p.remaining_time = 0;
        p.terminate(SimTime::new(25));
        assert_eq!(p.state, ProcessState::Terminated);
        assert_eq!(p.completion_time, SimTime::new(25));
        assert_eq!(p.turnaround_time, 22);
        assert_eq!(p.waiting_time, 12);
    }

    #[test]
    fn test_table_rejects_duplicate_ids() {
        let err = ProcessTable::from_workload(vec![proc(4, 0, 1), proc(4, 1, 1)]);
        assert!(matches!(err, Err(SimError::DuplicateProcessId(id)) if id.raw() == 4));
    }

    #[test]
    fn test_table_recheck_burst() {
        let mut p = proc(0, 0, 1);
        p.cpu_burst_time = 0; // mutated after construction
        let err = ProcessTable::from_workload(vec![p]);
        assert_eq!(err.err(), Some(SimError::ZeroCpuBurst(ProcessId::new(0))));
    }

    #[test]
    fn test_table_indexing() {
        let table = ProcessTable::from_workload(vec![proc(7, 0, 2), proc(9, 1, 3)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).id.raw(), 7);
        assert_eq!(table.get(1).id.raw(), 9);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ProcessId::new(12)), "P12");
        assert_eq!(format!("{}", ProcessState::Waiting), "WAITING");
    }
}
