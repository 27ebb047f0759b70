//! Pipeline stage interface.
//!
//! Every stage runs once per cycle against the shared [`Cpu`] state and reports
//! a structured outcome. Each stage also declares which pieces of state it
//! consumes and which it produces, so the per-cycle ordering requirements can be
//! read off (and tested) without digging through stage bodies.

use crate::common::Result;
use crate::core::Cpu;

/// A piece of shared machine state a stage touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Program counter.
    Pc,
    /// Pre-issue buffer.
    PreIssue,
    /// Pre-ALU queue.
    PreAlu,
    /// Post-ALU latch.
    PostAlu,
    /// Pre-MEM queue.
    PreMem,
    /// Post-MEM latch.
    PostMem,
    /// Register file.
    Registers,
    /// Cache lines, recency bits and refill requests.
    Cache,
}

/// A stage in the instruction pipeline.
pub trait PipelineStage {
    /// Short stage name for logs.
    const NAME: &'static str;

    /// State this stage reads or drains.
    const CONSUMES: &'static [Resource];

    /// State this stage fills or updates. Each buffer has exactly one producer.
    const PRODUCES: &'static [Resource];

    /// What the stage did this cycle.
    type Outcome;

    /// Executes one cycle of the stage.
    fn tick(cpu: &mut Cpu) -> Result<Self::Outcome>;
}
