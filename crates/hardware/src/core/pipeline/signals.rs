//! Pipeline control signals.
//!
//! This module derives the signals that drive the execute stage from a decoded
//! instruction. It performs:
//! 1. **Operation Selection:** Maps an instruction to an [`AluOp`], if the ALU
//!    completes it.
//! 2. **Operand Selection:** Chooses between a second register and the immediate.
//! 3. **Destination Selection:** `rd` for register-register forms, `rt` for
//!    immediate forms.

use crate::core::units::alu::AluOp;
use crate::isa::instruction::{Instruction, Operation};

/// Source of the ALU's second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBSrc {
    /// Register value.
    Reg(usize),
    /// Sign-extended immediate.
    Imm(i32),
}

/// Control signals for an instruction the ALU completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlSignals {
    /// Operation to perform.
    pub alu: AluOp,
    /// First operand register.
    pub rs: usize,
    /// Second operand.
    pub op_b: OpBSrc,
    /// Destination register.
    pub rd: usize,
}

impl ControlSignals {
    /// Derives the execute-stage signals for `inst`.
    ///
    /// Returns `None` for every operation the ALU does not complete; those
    /// instructions remain in the pre-ALU queue.
    pub const fn for_instruction(inst: &Instruction) -> Option<Self> {
        let o = &inst.operands;
        match inst.op {
            Operation::Add => Some(Self {
                alu: AluOp::Add,
                rs: o.rs,
                op_b: OpBSrc::Reg(o.rt),
                rd: o.rd,
            }),
            Operation::Addi => Some(Self {
                alu: AluOp::Add,
                rs: o.rs,
                op_b: OpBSrc::Imm(o.imm),
                rd: o.rt,
            }),
            _ => None,
        }
    }
}
