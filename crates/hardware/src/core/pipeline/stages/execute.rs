//! Execute (EX) Stage.
//!
//! Works on pre-ALU slot 0 only. When the ALU completes the instruction there,
//! the result is placed in the post-ALU latch (replacing whatever it held) and
//! slot 1 shifts down into slot 0. An instruction the ALU does not complete stays
//! in slot 0 and blocks the queue behind it for the rest of the run.
//!
//! Overwriting the latch is safe only because WriteBack runs earlier in the same
//! cycle and has already consumed the previous result.

use tracing::debug;

use crate::common::Result;
use crate::core::Cpu;
use crate::core::pipeline::latches::{AluResult, InstId};
use crate::core::pipeline::signals::{ControlSignals, OpBSrc};
use crate::core::pipeline::traits::{PipelineStage, Resource};
use crate::core::units::alu::Alu;

/// What Execute did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// The instruction in pre-ALU slot 0 completed.
    Completed(AluResult),
    /// The instruction in pre-ALU slot 0 is not handled by the ALU and stays put.
    Stalled {
        /// The resident instruction.
        inst: InstId,
    },
    /// Pre-ALU slot 0 is empty.
    Idle,
}

/// Execute stage.
#[derive(Debug)]
pub struct Execute;

impl PipelineStage for Execute {
    const NAME: &'static str = "EX";
    const CONSUMES: &'static [Resource] = &[Resource::PreAlu, Resource::Registers];
    const PRODUCES: &'static [Resource] = &[Resource::PostAlu];
    type Outcome = ExecuteOutcome;

    fn tick(cpu: &mut Cpu) -> Result<ExecuteOutcome> {
        Ok(execute_stage(cpu))
    }
}

/// Executes the execute stage.
pub fn execute_stage(cpu: &mut Cpu) -> ExecuteOutcome {
    let Some(inst) = cpu.buffers.pre_alu.head() else {
        return ExecuteOutcome::Idle;
    };
    let Some(ctrl) = cpu.instruction(inst).and_then(ControlSignals::for_instruction) else {
        debug!(mnemonic = cpu.mnemonic(inst), "EX  unsupported operation, stalled");
        return ExecuteOutcome::Stalled { inst };
    };

    let a = cpu.regs.read(ctrl.rs);
    let b = match ctrl.op_b {
        OpBSrc::Reg(r) => cpu.regs.read(r),
        OpBSrc::Imm(imm) => imm,
    };
    let result = AluResult {
        inst,
        rd: ctrl.rd,
        value: Alu::execute(ctrl.alu, a, b),
    };

    cpu.buffers.post_alu = Some(result);
    let _ = cpu.buffers.pre_alu.pop_front();
    debug!(
        mnemonic = cpu.mnemonic(inst),
        rd = result.rd,
        value = result.value,
        "EX  completed"
    );
    ExecuteOutcome::Completed(result)
}
