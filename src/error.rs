//! Structured error types for kronos.
//!
//! All fallible public APIs return `Result<T, SimError>`. Every error here
//! is a construction-time validation failure: invalid process parameters or
//! invalid policy configuration are rejected before a run starts, never
//! silently coerced mid-run.

use crate::process::ProcessId;

/// The top-level error type for the scheduling simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    // ── Workload errors ───────────────────────────────────

    /// A process was declared with a zero-length CPU burst.
    ZeroCpuBurst(ProcessId),

    /// Two processes in the same workload share an ID.
    DuplicateProcessId(ProcessId),

    // ── Policy configuration errors ───────────────────────

    /// Round Robin was configured with a zero time quantum.
    ZeroQuantum,

    /// MLFQ was configured with no queue levels.
    NoLevels,

    /// MLFQ's quanta list does not match its level count.
    QuantaCountMismatch { levels: usize, quanta: usize },

    /// An MLFQ level was given a zero quantum.
    ZeroLevelQuantum { level: usize },

    /// MLFQ quanta must not increase with queue depth.
    IncreasingQuanta { level: usize },

    /// MLFQ was configured with a zero boost interval.
    ZeroBoostInterval,
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::ZeroCpuBurst(id) => {
                write!(f, "process {} has a zero CPU burst", id)
            }
            SimError::DuplicateProcessId(id) => {
                write!(f, "duplicate process ID {} in workload", id)
            }
            SimError::ZeroQuantum => write!(f, "time quantum must be positive"),
            SimError::NoLevels => write!(f, "MLFQ needs at least one queue level"),
            SimError::QuantaCountMismatch { levels, quanta } => write!(
                f,
                "MLFQ has {} levels but {} quanta",
                levels, quanta
            ),
            SimError::ZeroLevelQuantum { level } => {
                write!(f, "MLFQ level {} has a zero quantum", level)
            }
            SimError::IncreasingQuanta { level } => write!(
                f,
                "MLFQ quantum at level {} is larger than the level above it",
                level
            ),
            SimError::ZeroBoostInterval => {
                write!(f, "MLFQ boost interval must be positive")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessId;

    #[test]
    fn test_display_zero_cpu_burst() {
        let e = SimError::ZeroCpuBurst(ProcessId::new(3));
        assert_eq!(e.to_string(), "process P3 has a zero CPU burst");
    }

    #[test]
    fn test_display_quanta_mismatch() {
        let e = SimError::QuantaCountMismatch { levels: 3, quanta: 2 };
        assert!(e.to_string().contains("3 levels"));
        assert!(e.to_string().contains("2 quanta"));
    }

    #[test]
    fn test_error_is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(SimError::ZeroQuantum);
        assert!(!e.to_string().is_empty());
    }

    #[test]
    fn test_sim_result_err() {
        let r: SimResult<u32> = Err(SimError::ZeroBoostInterval);
        assert!(r.is_err());
    }
}
