//! Instruction pipeline implementation.
//!
//! This module contains the in-order, single-issue pipeline. It includes:
//! 1. **Latches:** Pre-issue, pre-ALU, post-ALU, pre-MEM and post-MEM buffers.
//! 2. **Signals:** Execute-stage control derived from decoded instructions.
//! 3. **Stages:** Fetch, Issue, Execute, Memory and Writeback.
//! 4. **Traits:** The common stage interface and its state contract.

/// Inter-stage queues and latches.
pub mod latches;

/// Control signals for the execute stage.
pub mod signals;

/// Pipeline stage implementations.
pub mod stages;

/// Stage interface.
pub mod traits;
