//! Opcode and function-code values.
//!
//! Opcodes occupy bits 30..26 of an instruction word (bit 31 is the valid
//! flag). Register-register operations share opcode [`OP_SPECIAL`] and are
//! distinguished by the function code in bits 5..0.

/// Register-register operations (`ADD`, `SUB`, shifts, `JR`, `BREAK`, ...).
pub const OP_SPECIAL: u32 = 0;
/// `BLTZ rs, offset`.
pub const OP_BLTZ: u32 = 1;
/// `J target`.
pub const OP_J: u32 = 2;
/// `LW rt, offset(rs)`.
pub const OP_LW: u32 = 3;
/// `BEQ rs, rt, offset`.
pub const OP_BEQ: u32 = 4;
/// `ADDI rt, rs, imm`.
pub const OP_ADDI: u32 = 8;
/// `SW rt, offset(rs)`.
pub const OP_SW: u32 = 11;
/// Second register-register group (`MUL`).
pub const OP_SPECIAL2: u32 = 28;

/// Function codes under [`OP_SPECIAL`].
pub mod funct {
    /// Shift left logical.
    pub const SLL: u32 = 0;
    /// Shift right logical.
    pub const SRL: u32 = 2;
    /// Jump register.
    pub const JR: u32 = 8;
    /// Move if zero.
    pub const MOVZ: u32 = 10;
    /// Halt sentinel.
    pub const BREAK: u32 = 13;
    /// Add.
    pub const ADD: u32 = 32;
    /// Subtract.
    pub const SUB: u32 = 34;
    /// Bitwise and.
    pub const AND: u32 = 36;
    /// Bitwise or.
    pub const OR: u32 = 37;
}

/// Function codes under [`OP_SPECIAL2`].
pub mod funct2 {
    /// Multiply.
    pub const MUL: u32 = 2;
}
