//! Pipeline stage implementations.
//!
//! This module contains the five stages of the pipeline. It includes:
//! 1. **Fetch:** Reads the word at the PC through the cache into the pre-issue buffer.
//! 2. **Issue:** Moves the pre-issue head into the pre-ALU queue.
//! 3. **Execute:** Completes `ADD`/`ADDI` from pre-ALU slot 0 into the post-ALU latch.
//! 4. **Memory:** Reserved memory path; never changes state.
//! 5. **Writeback:** Commits the post-ALU latch to the register file.
//!
//! Within a cycle the orchestrator runs them in reverse pipeline order
//! (WB, EX, MEM, IS, IF), so each stage sees only what earlier cycles left.

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Issue stage implementation.
pub mod issue;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Execute stage entry point (EX stage).
pub use execute::{Execute, ExecuteOutcome, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::{Fetch, FetchOutcome, fetch_stage};
/// Issue stage entry point.
pub use issue::{Issue, IssueOutcome, issue_stage};
/// Memory stage entry point (MEM stage).
pub use memory::{Memory, MemoryOutcome, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::{Writeback, WritebackOutcome, wb_stage};
