/// Scheduling history and replay verification.
///
/// Every CPU slice the engine executes is appended to a `RunTrace` in
/// dispatch order. The trace supports a deterministic chain hash and a
/// line-oriented text export/import, so two runs can be compared
/// byte-for-byte without keeping both in memory.

use std::io::{self, BufRead, Write};

use crate::process::ProcessId;
use crate::time::SimTime;

// ── Hash utility ──────────────────────────────────────────────────────

/// Combine two u64 hashes deterministically.
pub fn hash_combine(a: u64, b: u64) -> u64 {
    let mut h = a;
    h = h.wrapping_mul(0x517cc1b727220a95);
    h = h.wrapping_add(b);
    h ^= h >> 32;
    h
}

// ── Slice ─────────────────────────────────────────────────────────────

/// One contiguous interval of CPU time granted to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    /// The process that held the CPU.
    pub process: ProcessId,
    /// Start of the interval (inclusive).
    pub start: SimTime,
    /// End of the interval (exclusive).
    pub end: SimTime,
}

impl Slice {
    /// Length of the interval in ticks.
    pub fn duration(&self) -> u64 {
        self.end.duration_since(self.start).unwrap_or(0)
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}..{}]",
            self.process,
            self.start.ticks(),
            self.end.ticks()
        )
    }
}

// ── Run trace ─────────────────────────────────────────────────────────

/// Append-only sequence of scheduling intervals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTrace {
    slices: Vec<Slice>,
}

impl RunTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        RunTrace { slices: Vec::new() }
    }

    /// Record a slice.
    pub fn record(&mut self, slice: Slice) {
        self.slices.push(slice);
    }

    /// Access the recorded slices in dispatch order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Number of recorded slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the trace is empty.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Total CPU-busy time: the sum of all slice durations.
    pub fn busy_time(&self) -> u64 {
        self.slices.iter().map(|s| s.duration()).sum()
    }

    /// Compute a deterministic hash of the entire trace.
    pub fn trace_hash(&self) -> u64 {
        let mut h: u64 = 0;
        for s in &self.slices {
            h = hash_combine(h, s.process.raw());
            h = hash_combine(h, s.start.ticks());
            h = hash_combine(h, s.end.ticks());
        }
        h
    }

    // ── Export / Import ───────────────────────────────────────────

    /// Export the trace to a writer in a deterministic text format.
    pub fn export<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "# KRONOS TRACE v1")?;
        writeln!(w, "# slices: {}", self.slices.len())?;
        for s in &self.slices {
            writeln!(
                w,
                "S {} {} {}",
                s.process.raw(),
                s.start.ticks(),
                s.end.ticks()
            )?;
        }
        Ok(())
    }

    /// Export to a file path.
    pub fn export_to_file(&self, path: &str) -> io::Result<()> {
        let mut f = std::fs::File::create(path)?;
        self.export(&mut f)
    }

    /// Import a trace from a reader.
    pub fn import<R: BufRead>(r: R) -> io::Result<Self> {
        let mut slices = Vec::new();
        for line in r.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let slice = parse_slice(line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            slices.push(slice);
        }
        Ok(RunTrace { slices })
    }

    /// Import from a file path.
    pub fn import_from_file(path: &str) -> io::Result<Self> {
        let f = std::fs::File::open(path)?;
        Self::import(io::BufReader::new(f))
    }
}

/// Compare two traces for identical slice sequences.
pub fn traces_match(a: &RunTrace, b: &RunTrace) -> bool {
    a.slices == b.slices
}

fn parse_slice(line: &str) -> Result<Slice, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 || parts[0] != "S" {
        return Err(format!("invalid slice line: {}", line));
    }
    let field = |i: usize| -> Result<u64, String> {
        parts[i]
            .parse::<u64>()
            .map_err(|e| format!("bad number in slice line {:?}: {}", line, e))
    };
    Ok(Slice {
        process: ProcessId::new(field(1)?),
        start: SimTime::new(field(2)?),
        end: SimTime::new(field(3)?),
    })
}
