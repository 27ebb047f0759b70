//! Architectural state.
//!
//! Holds the programmer-visible register file.

/// General-purpose register file.
pub mod gpr;

pub use gpr::RegisterFile;
