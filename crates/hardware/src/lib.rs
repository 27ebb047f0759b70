//! Cycle-level MIPS-style pipeline simulator library.
//!
//! This crate models a small in-order pipeline fed through a write-back cache:
//! 1. **Core:** Fetch, Issue, Execute, Memory and WriteBack stages, the
//!    inter-stage buffers and the register file.
//! 2. **Memory:** A flat program/data image behind a 4-set, 2-way cache.
//! 3. **ISA:** Decoding and disassembly of the 32-bit instruction format.
//! 4. **Simulation:** Loader, cycle orchestrator, trace output and statistics.

/// Common types and constants (errors, geometry).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// CPU core (register file, memory image, pipeline, functional units).
pub mod core;
/// Instruction set (opcodes, decode, disassembly).
pub mod isa;
/// Program loading, orchestration and traces.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error type and result alias used across the crate.
pub use crate::common::{Result, SimError};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Machine state shared by the pipeline stages.
pub use crate::core::Cpu;
/// Loaded program and the cycle orchestrator.
pub use crate::sim::{Program, Simulator};
