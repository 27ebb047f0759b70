//! Simulator error definitions.
//!
//! This module defines the error type shared by every fallible operation in the
//! simulator. It provides:
//! 1. **Input Errors:** Malformed instruction/data words in a program image.
//! 2. **Addressing Errors:** Accesses that fall outside the loaded image or that
//!    would modify the read-only instruction region.
//! 3. **Run Errors:** Invalid configuration and runaway simulations.
//!
//! Cache misses and stalled ALU slots are ordinary pipeline backpressure and are
//! never reported through this type.

use thiserror::Error;

/// Errors raised while loading or simulating a program.
#[derive(Debug, Error)]
pub enum SimError {
    /// An input line is not a 32-digit binary word.
    #[error("malformed word on line {line}: {content:?}")]
    MalformedWord {
        /// One-based line number in the input text.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A memory or cache access outside the loaded program and data image.
    #[error("address {addr} is outside the loaded image")]
    AddressOutOfRange {
        /// Byte address of the rejected access.
        addr: u32,
    },

    /// A store aimed at the instruction region of the memory image.
    #[error("refusing to write instruction region at address {addr}")]
    InstructionRegionWrite {
        /// Byte address of the rejected store.
        addr: u32,
    },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The orchestrator hit the configured cycle cap before the program halted.
    #[error("cycle limit of {0} exceeded before halt")]
    CycleLimitExceeded(u64),

    /// Underlying I/O failure (program, config or trace files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure for configuration or trace output.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the simulator.
pub type Result<T> = std::result::Result<T, SimError>;
