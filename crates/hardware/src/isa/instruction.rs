//! Instruction encoding and the decoded instruction record.
//!
//! Provides bit extraction for the 32-bit word format and the immutable
//! [`Instruction`] record produced once per word at load time.
//!
//! Word layout, most significant bit first:
//!
//! ```text
//!  31   30..26  25..21  20..16  15..11  10..6   5..0
//! [v] [opcode] [  rs ] [  rt ] [  rd ] [shamt] [funct]
//!                              [     immediate 15..0  ]
//!              [            jump target 25..0         ]
//! ```

use serde::Serialize;

/// Bit position of the valid flag.
const VALID_SHIFT: u32 = 31;
/// Bit shift for the opcode field.
const OPCODE_SHIFT: u32 = 26;
/// Mask for the 5-bit opcode field.
pub const OPCODE_MASK: u32 = 0x1F;
/// Bit shift for the rs field.
const RS_SHIFT: u32 = 21;
/// Bit shift for the rt field.
const RT_SHIFT: u32 = 16;
/// Bit shift for the rd field.
const RD_SHIFT: u32 = 11;
/// Bit shift for the shift-amount field.
const SHAMT_SHIFT: u32 = 6;
/// Mask for any 5-bit register or shift-amount field.
pub const REG_MASK: u32 = 0x1F;
/// Mask for the 6-bit function code.
pub const FUNCT_MASK: u32 = 0x3F;
/// Mask for the 16-bit immediate.
pub const IMM_MASK: u32 = 0xFFFF;
/// Mask for the 26-bit jump target.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Field extraction for encoded instruction words.
pub trait InstructionBits {
    /// Valid flag (bit 31). Words with this bit clear never execute.
    fn valid(&self) -> bool;
    /// Opcode field (bits 30..26).
    fn opcode(&self) -> u32;
    /// First source register (bits 25..21).
    fn rs(&self) -> usize;
    /// Second source / immediate destination register (bits 20..16).
    fn rt(&self) -> usize;
    /// Register-register destination (bits 15..11).
    fn rd(&self) -> usize;
    /// Shift amount (bits 10..6).
    fn shamt(&self) -> u32;
    /// Function code (bits 5..0).
    fn funct(&self) -> u32;
    /// Sign-extended 16-bit immediate (bits 15..0).
    fn imm(&self) -> i32;
    /// Jump target field (bits 25..0).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn valid(&self) -> bool {
        (self >> VALID_SHIFT) & 1 == 1
    }

    #[inline]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & REG_MASK
    }

    #[inline]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline]
    fn imm(&self) -> i32 {
        i32::from((self & IMM_MASK) as u16 as i16)
    }

    #[inline]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Operation selected by the `(opcode, function)` dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// `rd = rs + rt`
    Add,
    /// `rt = rs + imm`
    Addi,
    /// `rd = rs - rt`
    Sub,
    /// `rd = rs & rt`
    And,
    /// `rd = rs | rt`
    Or,
    /// `rd = rt << shamt`
    Sll,
    /// `rd = rt >> shamt` (logical)
    Srl,
    /// `rd = rs * rt`
    Mul,
    /// `if rt == 0 { rd = rs }`
    Movz,
    /// Jump to the address in `rs`.
    Jr,
    /// Jump to `target * 4`.
    J,
    /// Branch if `rs == rt`.
    Beq,
    /// Branch if `rs < 0`.
    Bltz,
    /// Load word.
    Lw,
    /// Store word.
    Sw,
    /// Halt sentinel.
    Break,
    /// All-zero word.
    Nop,
    /// Valid flag clear, or an encoding missing from the dispatch table.
    Invalid,
}

impl Operation {
    /// Upper-case mnemonic used in listings and traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Addi => "ADDI",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Sll => "SLL",
            Self::Srl => "SRL",
            Self::Mul => "MUL",
            Self::Movz => "MOVZ",
            Self::Jr => "JR",
            Self::J => "J",
            Self::Beq => "BEQ",
            Self::Bltz => "BLTZ",
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Break => "BREAK",
            Self::Nop => "NOP",
            Self::Invalid => "Invalid Instruction",
        }
    }
}

/// Register and immediate operands extracted from a word.
///
/// All fields are populated regardless of format; the operation decides which
/// ones are meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Operands {
    /// First source register.
    pub rs: usize,
    /// Second source register, or destination for immediate forms.
    pub rt: usize,
    /// Destination register for register-register forms.
    pub rd: usize,
    /// Shift amount.
    pub shamt: u32,
    /// Sign-extended 16-bit immediate.
    pub imm: i32,
    /// Jump target byte address (`target * 4`).
    pub target: u32,
}

/// A decoded instruction, created once at load time and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Byte address of the word in the memory image.
    pub address: u32,
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Operation,
    /// Operand fields.
    pub operands: Operands,
    /// Assembly text, e.g. `ADD\tR3, R1, R2`.
    pub mnemonic: String,
}

impl Instruction {
    /// Whether this is the halt sentinel.
    pub fn is_halt(&self) -> bool {
        self.op == Operation::Break
    }
}
