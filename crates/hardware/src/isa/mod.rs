//! Instruction set definitions.
//!
//! This module contains everything needed to turn raw program words into
//! instruction records:
//! 1. **Opcodes:** Opcode and function-code constants.
//! 2. **Instruction:** Field extraction and the decoded record.
//! 3. **Decode:** The `(opcode, function)` dispatch table.
//! 4. **Disasm:** Mnemonic text and program listings.

/// Instruction decoder.
pub mod decode;

/// Disassembler and listing output.
pub mod disasm;

/// Instruction record and bit-field extraction.
pub mod instruction;

/// Opcode and function-code constants.
pub mod opcodes;

pub use instruction::{Instruction, InstructionBits, Operands, Operation};
