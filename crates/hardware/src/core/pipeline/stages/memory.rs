//! Memory Access (MEM) Stage.
//!
//! Reserved for load/store address generation and cache routing. No supported
//! instruction is ever issued to the pre-MEM queue, so the stage only reports
//! what it sees there and never changes state.

use crate::common::Result;
use crate::core::Cpu;
use crate::core::pipeline::latches::InstId;
use crate::core::pipeline::traits::{PipelineStage, Resource};

/// What Memory did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOutcome {
    /// An instruction sits in pre-MEM slot 0 and is left there.
    Waiting {
        /// The resident instruction.
        inst: InstId,
    },
    /// Pre-MEM queue is empty.
    Idle,
}

/// Memory stage.
#[derive(Debug)]
pub struct Memory;

impl PipelineStage for Memory {
    const NAME: &'static str = "MEM";
    const CONSUMES: &'static [Resource] = &[Resource::PreMem, Resource::Cache];
    const PRODUCES: &'static [Resource] = &[Resource::PostMem];
    type Outcome = MemoryOutcome;

    fn tick(cpu: &mut Cpu) -> Result<MemoryOutcome> {
        Ok(mem_stage(cpu))
    }
}

/// Executes the memory stage.
pub fn mem_stage(cpu: &Cpu) -> MemoryOutcome {
    // Loads and stores would go through `Cache::access` here; Issue never
    // routes anything to pre-MEM.
    cpu.buffers
        .pre_mem
        .head()
        .map_or(MemoryOutcome::Idle, |inst| MemoryOutcome::Waiting { inst })
}
