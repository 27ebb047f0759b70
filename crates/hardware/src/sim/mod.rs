//! Simulation driver, program loading and trace output.
//!
//! This module ties the core together into a runnable simulation. It provides:
//! 1. **Program:** Splitting raw words into instructions and data.
//! 2. **Loader:** Reading the binary-text program format.
//! 3. **Simulator:** The cycle orchestrator.
//! 4. **Trace:** Per-cycle snapshots and the sinks that record them.

/// Program text parsing.
pub mod loader;

/// Decoded program image.
pub mod program;

/// Cycle orchestrator.
pub mod simulator;

/// Snapshots and trace sinks.
pub mod trace;

pub use self::program::Program;
pub use self::simulator::{CycleReport, RunPhase, Simulator};
pub use self::trace::{JsonTrace, NullTrace, Snapshot, TextTrace, TraceSink};
