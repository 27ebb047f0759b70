//! Core processor implementation.
//!
//! This module contains the machine state and the pipeline that advances it.

/// Architectural state (register file).
pub mod arch;

/// Shared machine state owned by the orchestrator.
pub mod cpu;

/// Flat program and data memory.
pub mod memory;

/// Instruction pipeline (latches, signals, stages).
pub mod pipeline;

/// Functional units (ALU, cache).
pub mod units;

pub use self::cpu::Cpu;
