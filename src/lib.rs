//! # Kronos — Deterministic CPU Scheduling Simulator
//!
//! A discrete-event simulator for preemptive and non-preemptive CPU
//! scheduling disciplines. No threads, no wall-clock time — just a pure
//! state machine driven by a simulated clock, so every run is
//! reproducible bit-for-bit.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │        Engine             │ ← event loop, timing rules
//! │  ┌────────────────────┐  │
//! │  │ SchedulingPolicy    │  │ ← FCFS / SJF / RR / Priority / MLFQ
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │ EventQueue          │  │ ← deterministic min-heap
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │ ProcessTable        │  │ ← arena of process records
//! │  └────────────────────┘  │
//! │  ┌────────────────────┐  │
//! │  │ SimTime             │  │ ← logical clock
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! An external generator supplies `Process` records; `Engine::run`
//! consumes them and emits a [`RunReport`] with the completed records,
//! scalar totals, and a [`RunTrace`] of scheduling intervals for
//! downstream statistics and visualization.

pub mod engine;
pub mod error;
pub mod event;
pub mod policy;
pub mod process;
pub mod queue;
pub mod time;
pub mod trace;

// Re-exports for convenience.
pub use engine::{Engine, RunReport};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind, EventSeq, EventSeqGen};
pub use policy::{Fcfs, Mlfq, Priority, RoundRobin, SchedulingPolicy, Sjf};
pub use process::{Process, ProcessId, ProcessState, ProcessTable};
pub use queue::EventQueue;
pub use time::SimTime;
pub use trace::{traces_match, RunTrace, Slice};
