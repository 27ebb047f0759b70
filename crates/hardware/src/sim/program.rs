//! Loaded program image.
//!
//! A program is the decoded instruction stream followed by raw data words.
//! Every word up to and including the first `BREAK` is an instruction; every
//! word after it is data.

use crate::common::constants::WORD_BYTES;
use crate::isa::decode::{self, decode};
use crate::isa::disasm;
use crate::isa::instruction::Instruction;

/// Decoded instructions and data words at a load address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    /// Byte address of the first instruction.
    pub load_address: u32,
    /// Instruction records in address order.
    pub instructions: Vec<Instruction>,
    /// Signed data words following the last instruction.
    pub data: Vec<i32>,
}

impl Program {
    /// Splits raw words into instructions and data and decodes the instructions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::sim::program::Program;
    ///
    /// // ADDI R1, R0, #5; BREAK; then two data words.
    /// let program = Program::from_words(&[0xA001_0005, 0x8000_000D, 7, 0xFFFF_FFFF], 96);
    /// assert_eq!(program.instructions.len(), 2);
    /// assert_eq!(program.data, vec![7, -1]);
    /// assert_eq!(program.data_start(), 104);
    /// ```
    pub fn from_words(words: &[u32], load_address: u32) -> Self {
        let split = words
            .iter()
            .position(|&w| decode::is_halt(w))
            .map_or(words.len(), |i| i + 1);
        let (code, data) = words.split_at(split);

        let instructions = code
            .iter()
            .enumerate()
            .map(|(i, &raw)| decode(load_address + i as u32 * WORD_BYTES, raw))
            .collect();

        Self {
            load_address,
            instructions,
            data: data.iter().map(|&w| w as i32).collect(),
        }
    }

    /// Byte address of the first data word.
    pub fn data_start(&self) -> u32 {
        self.load_address + self.instructions.len() as u32 * WORD_BYTES
    }

    /// Whether the instruction stream ends in the halt sentinel.
    pub fn has_halt(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_halt)
    }

    /// The disassembly listing for this program.
    pub fn listing(&self) -> String {
        disasm::listing(&self.instructions, self.data_start(), &self.data)
    }
}
