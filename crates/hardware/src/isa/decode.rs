//! Instruction Decoder.
//!
//! Turns raw 32-bit words into [`Instruction`] records. Decoding is a pure,
//! table-driven function of the word: the `(opcode, function)` pair selects an
//! [`Operation`], the field extractors in [`InstructionBits`] fill the
//! operands, and the disassembler renders the mnemonic.

use crate::isa::disasm;
use crate::isa::instruction::{Instruction, InstructionBits, Operands, Operation};
use crate::isa::opcodes::{
    OP_ADDI, OP_BEQ, OP_BLTZ, OP_J, OP_LW, OP_SPECIAL, OP_SPECIAL2, OP_SW, funct, funct2,
};

/// Scale from a jump target field to a byte address.
const TARGET_SCALE: u32 = 4;

/// Looks up the operation for an `(opcode, function)` pair.
///
/// The function code only participates for the two register-register groups;
/// for every other opcode it is ignored.
pub const fn lookup(opcode: u32, function: u32) -> Operation {
    match (opcode, function) {
        (OP_SPECIAL, funct::SLL) => Operation::Sll,
        (OP_SPECIAL, funct::SRL) => Operation::Srl,
        (OP_SPECIAL, funct::JR) => Operation::Jr,
        (OP_SPECIAL, funct::MOVZ) => Operation::Movz,
        (OP_SPECIAL, funct::BREAK) => Operation::Break,
        (OP_SPECIAL, funct::ADD) => Operation::Add,
        (OP_SPECIAL, funct::SUB) => Operation::Sub,
        (OP_SPECIAL, funct::AND) => Operation::And,
        (OP_SPECIAL, funct::OR) => Operation::Or,
        (OP_SPECIAL2, funct2::MUL) => Operation::Mul,
        (OP_SPECIAL | OP_SPECIAL2, _) => Operation::Invalid,
        (OP_J, _) => Operation::J,
        (OP_BLTZ, _) => Operation::Bltz,
        (OP_LW, _) => Operation::Lw,
        (OP_BEQ, _) => Operation::Beq,
        (OP_ADDI, _) => Operation::Addi,
        (OP_SW, _) => Operation::Sw,
        _ => Operation::Invalid,
    }
}

/// Decodes the operation of a raw word, honouring the valid flag.
pub fn operation(raw: u32) -> Operation {
    if raw == 0 {
        Operation::Nop
    } else if !raw.valid() {
        Operation::Invalid
    } else {
        lookup(raw.opcode(), raw.funct())
    }
}

/// Returns true when `raw` is the halt sentinel (valid, special opcode, `BREAK` function).
pub fn is_halt(raw: u32) -> bool {
    raw.valid() && raw.opcode() == OP_SPECIAL && raw.funct() == funct::BREAK
}

/// Extracts every operand field from a raw word.
pub fn operands(raw: u32) -> Operands {
    Operands {
        rs: raw.rs(),
        rt: raw.rt(),
        rd: raw.rd(),
        shamt: raw.shamt(),
        imm: raw.imm(),
        target: raw.target().wrapping_mul(TARGET_SCALE),
    }
}

/// Decodes the word at `address` into an immutable instruction record.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::decode::decode;
/// use pipesim_core::isa::instruction::Operation;
///
/// // ADDI R1, R0, #5
/// let inst = decode(96, 0xA001_0005);
/// assert_eq!(inst.op, Operation::Addi);
/// assert_eq!(inst.operands.rt, 1);
/// assert_eq!(inst.operands.imm, 5);
/// assert_eq!(inst.mnemonic, "ADDI\tR1, R0, #5");
/// ```
pub fn decode(address: u32, raw: u32) -> Instruction {
    let op = operation(raw);
    let operands = operands(raw);
    Instruction {
        address,
        raw,
        op,
        operands,
        mnemonic: disasm::mnemonic(op, &operands),
    }
}
