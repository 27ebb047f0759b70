//! Arithmetic Logic Unit (ALU).
//!
//! Integer arithmetic used by the execute stage. Only addition is wired to an
//! instruction today (`ADD` and `ADDI`); every other operation stays resident in
//! the pre-ALU queue.

use serde::Serialize;

/// ALU operation selected by the control signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// Two's-complement addition with wraparound.
    Add,
}

/// Arithmetic Logic Unit for 32-bit integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 5), 10);
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// ```
    pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
        }
    }
}
