//! General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`R0`-`R31`).
//! 2. **Access:** Plain reads and writes; `R0` is an ordinary register here and
//!    is not hard-wired to zero.
//! 3. **Debugging:** Row-oriented views for trace output.

use serde::Serialize;

use crate::common::constants::{NUM_REGISTERS, REGISTERS_PER_ROW};

/// General-purpose register file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterFile {
    regs: [i32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file with all registers set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 32`. Register indices come from 5-bit instruction
    /// fields and are always in range.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes `val` into register `idx`. Writes to `R0` are kept.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// All register values in index order.
    pub fn values(&self) -> &[i32; NUM_REGISTERS] {
        &self.regs
    }

    /// Registers grouped into trace rows of eight, with the index of each row's first register.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[i32])> {
        self.regs
            .chunks(REGISTERS_PER_ROW)
            .enumerate()
            .map(|(row, chunk)| (row * REGISTERS_PER_ROW, chunk))
    }
}
