//! Functional units.
//!
//! 1. **Cache:** The set-associative write-back cache shared by Fetch and Memory.
//! 2. **ALU:** Arithmetic for the operations the execute stage completes.

/// Integer arithmetic unit.
pub mod alu;

/// Set-associative write-back cache.
pub mod cache;
