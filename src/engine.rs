/// Discrete-event simulation engine.
///
/// Owns the clock, the event queue, the ready/waiting/completed
/// collections and the single running slot, and drives the configured
/// scheduling policy. The loop is purely synchronous and single-threaded
/// — determinism is trivial: a run is a pure function of the workload,
/// the policy configuration, and the context-switch overhead.
///
/// Timing rules enforced here (the policy only ever picks a process):
/// - A running process executes in slices bounded by its remaining CPU
///   demand, the next queued event, and — for time-sliced policies — the
///   remainder of its quantum.
/// - Context-switch overhead is charged once per dispatch, before the
///   policy selects, and never for the very first dispatch at T=0.
/// - A preemptive policy is consulted only when the CPU frees up
///   (completion or quantum expiry), so preemption takes effect at event
///   boundaries, never mid-slice.

use crate::error::SimResult;
use crate::event::EventKind;
use crate::process::{Process, ProcessState, ProcessTable};
use crate::policy::SchedulingPolicy;
use crate::queue::EventQueue;
use crate::time::SimTime;
use crate::trace::{RunTrace, Slice};

// ── Run report ────────────────────────────────────────────────────────

/// Everything a finished run produces.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Name of the policy that drove the run.
    pub policy: &'static str,
    /// Completed process records, in completion order.
    pub processes: Vec<Process>,
    /// Final clock value.
    pub total_time: SimTime,
    /// Accumulated ticks during which the CPU had nothing to run.
    pub idle_time: u64,
    /// Number of dispatches that charged context-switch overhead.
    pub context_switches: u64,
    /// Scheduling history, one slice per contiguous CPU grant.
    pub trace: RunTrace,
}

// ── Engine ────────────────────────────────────────────────────────────

/// The simulation engine. One engine performs exactly one run and is
/// consumed by it; callers sweeping parameters must supply a fresh
/// workload copy per run, since records are mutated in place.
pub struct Engine {
    clock: SimTime,
    events: EventQueue,
    ready: Vec<usize>,
    running: Option<usize>,
    waiting: Vec<usize>,
    completed: Vec<usize>,
    policy: Box<dyn SchedulingPolicy>,
    context_switch_time: u64,
    idle_time: u64,
    context_switches: u64,
    trace: RunTrace,
}

impl Engine {
    /// Create an engine for one run.
    pub fn new(policy: Box<dyn SchedulingPolicy>, context_switch_time: u64) -> Self {
        Engine {
            clock: SimTime::ZERO,
            events: EventQueue::new(),
            ready: Vec::new(),
            running: None,
            waiting: Vec::new(),
            completed: Vec::new(),
            policy,
            context_switch_time,
            idle_time: 0,
            context_switches: 0,
            trace: RunTrace::new(),
        }
    }

    /// Execute the workload to completion.
    ///
    /// Validates the workload (positive bursts, unique IDs), seeds one
    /// arrival event per process, then loops until nothing is pending.
    /// An empty workload is a valid, trivial run.
    pub fn run(mut self, workload: Vec<Process>) -> SimResult<RunReport> {
        let mut table = ProcessTable::from_workload(workload)?;

        for slot in 0..table.len() {
            let at = table.get(slot).arrival_time;
            self.events.push(at, EventKind::Arrival, slot);
        }

        while self.pending() {
            if self.running.is_some() {
                self.execute_slice(&mut table);
            } else if let Some(next) = self.events.next_time() {
                // CPU idle: skip ahead to the next event.
                if let Some(gap) = next.duration_since(self.clock) {
                    self.idle_time += gap;
                    self.clock = next;
                }
            }

            self.drain_events(&mut table);
            self.dispatch(&mut table);
        }

        assert!(
            self.completed.len() == table.len(),
            "run ended with unfinished processes"
        );

        let processes = self
            .completed
            .iter()
            .map(|&slot| table.get(slot).clone())
            .collect();

        Ok(RunReport {
            policy: self.policy.name(),
            processes,
            total_time: self.clock,
            idle_time: self.idle_time,
            context_switches: self.context_switches,
            trace: self.trace,
        })
    }

    /// Anything left to do?
    fn pending(&self) -> bool {
        !self.events.is_empty()
            || !self.ready.is_empty()
            || self.running.is_some()
            || !self.waiting.is_empty()
    }

    /// Run the current process for one slice and handle what ended it.
    fn execute_slice(&mut self, table: &mut ProcessTable) {
        let slot = match self.running {
            Some(slot) => slot,
            None => return,
        };

        let mut slice = table.get(slot).remaining_time;
        if let Some(next) = self.events.next_time() {
            slice = slice.min(next.ticks().saturating_sub(self.clock.ticks()));
        }
        if let Some(quantum) = self.policy.time_slice(table.get(slot)) {
            let used = self.quantum_used(table.get(slot));
            slice = slice.min(quantum.saturating_sub(used));
        }

        // A zero slice means an event is already due (context-switch
        // overhead can push the clock past a queued event); fall through
        // and let the drain handle it.
        if slice > 0 {
            let start = self.clock;
            self.clock = self.clock.plus(slice).expect("simulation clock overflow");
            let p = table.get_mut(slot);
            p.remaining_time -= slice;
            p.cpu_time_used += slice;
            let id = p.id;
            self.trace.record(Slice {
                process: id,
                start,
                end: self.clock,
            });
        }

        if table.get(slot).remaining_time == 0 {
            self.complete_running(table);
        } else if let Some(quantum) = self.policy.time_slice(table.get(slot)) {
            if self.quantum_used(table.get(slot)) >= quantum {
                self.expire_quantum(table);
            }
        }
    }

    /// Ticks the running process has held the CPU in its current grant.
    fn quantum_used(&self, process: &Process) -> u64 {
        self.clock
            .duration_since(process.last_dispatch_time)
            .unwrap_or(0)
    }

    /// The running process finished its CPU burst: send it to I/O or
    /// terminate it, then try to dispatch a successor.
    fn complete_running(&mut self, table: &mut ProcessTable) {
        let slot = match self.running.take() {
            Some(slot) => slot,
            None => return,
        };

        let now = self.clock;
        let io = table.get(slot).io_burst_time;
        if io > 0 {
            table.get_mut(slot).state = ProcessState::Waiting;
            let due = now.plus(io).expect("simulation clock overflow");
            self.events.push(due, EventKind::IoComplete, slot);
            self.waiting.push(slot);
        } else {
            table.get_mut(slot).terminate(now);
            self.completed.push(slot);
        }

        self.dispatch(table);
    }

    /// The running process exhausted its quantum: back to the tail of the
    /// ready set, then try to dispatch a successor.
    fn expire_quantum(&mut self, table: &mut ProcessTable) {
        let slot = match self.running.take() {
            Some(slot) => slot,
            None => return,
        };

        table.get_mut(slot).state = ProcessState::Ready;
        self.ready.push(slot);
        self.policy.on_ready(slot, table, self.clock);

        self.dispatch(table);
    }

    /// Apply every queued event whose time has come.
    fn drain_events(&mut self, table: &mut ProcessTable) {
        while self
            .events
            .next_time()
            .is_some_and(|t| t <= self.clock)
        {
            let event = match self.events.pop() {
                Some(event) => event,
                None => break,
            };
            match event.kind {
                EventKind::Arrival => {
                    table.get_mut(event.slot).state = ProcessState::Ready;
                    self.ready.push(event.slot);
                    self.policy.on_ready(event.slot, table, self.clock);
                    // A free CPU takes an arrival immediately.
                    if self.running.is_none() {
                        self.dispatch(table);
                    }
                }
                EventKind::IoComplete => {
                    // Single I/O burst per process: finishing it terminates.
                    if let Some(pos) = self.waiting.iter().position(|&s| s == event.slot) {
                        self.waiting.remove(pos);
                        table.get_mut(event.slot).terminate(self.clock);
                        self.completed.push(event.slot);
                    }
                }
            }
        }
    }

    /// If the CPU is free and anything is ready, charge the switch
    /// overhead, let the policy pick, and start the chosen process.
    fn dispatch(&mut self, table: &mut ProcessTable) {
        if self.running.is_some() || self.ready.is_empty() {
            return;
        }

        if self.clock.ticks() > 0 {
            self.clock = self
                .clock
                .plus(self.context_switch_time)
                .expect("simulation clock overflow");
            self.context_switches += 1;
        }

        let slot = match self.policy.select_next(&self.ready, table, self.clock) {
            Some(slot) => slot,
            None => return,
        };
        let pos = match self.ready.iter().position(|&s| s == slot) {
            Some(pos) => pos,
            None => panic!(
                "policy {} selected {} which is not in the ready set",
                self.policy.name(),
                table.get(slot).id
            ),
        };
        self.ready.remove(pos);
        self.policy.on_dispatch(slot, table, self.clock);

        let now = self.clock;
        let p = table.get_mut(slot);
        p.state = ProcessState::Running;
        p.last_dispatch_time = now;
        if p.first_run_time.is_none() {
            p.first_run_time = Some(now);
            p.response_time = now.duration_since(p.arrival_time).unwrap_or(0);
        }
        self.running = Some(slot);
    }
}
