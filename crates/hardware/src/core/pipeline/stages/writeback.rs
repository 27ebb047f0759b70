//! Writeback (WB) Stage.
//!
//! Consumes the post-ALU latch and writes its value into the register file. An
//! empty latch means no register write this cycle.

use tracing::debug;

use crate::common::Result;
use crate::core::Cpu;
use crate::core::pipeline::latches::AluResult;
use crate::core::pipeline::traits::{PipelineStage, Resource};

/// What WriteBack did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritebackOutcome {
    /// The latched result was written to its destination register.
    Wrote(AluResult),
    /// The latch was empty.
    Idle,
}

/// Writeback stage.
#[derive(Debug)]
pub struct Writeback;

impl PipelineStage for Writeback {
    const NAME: &'static str = "WB";
    const CONSUMES: &'static [Resource] = &[Resource::PostAlu, Resource::PostMem];
    const PRODUCES: &'static [Resource] = &[Resource::Registers];
    type Outcome = WritebackOutcome;

    fn tick(cpu: &mut Cpu) -> Result<WritebackOutcome> {
        Ok(wb_stage(cpu))
    }
}

/// Executes the writeback stage.
pub fn wb_stage(cpu: &mut Cpu) -> WritebackOutcome {
    let Some(result) = cpu.buffers.post_alu.take() else {
        return WritebackOutcome::Idle;
    };
    cpu.regs.write(result.rd, result.value);
    debug!(rd = result.rd, value = result.value, "WB  register written");
    WritebackOutcome::Wrote(result)
}
