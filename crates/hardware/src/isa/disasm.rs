//! Instruction disassembler.
//!
//! Renders decoded instructions as assembly text and produces the program
//! listing written next to the pipeline trace.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::disasm::mnemonic;
//! use pipesim_core::isa::instruction::{Operands, Operation};
//!
//! let ops = Operands { rs: 1, rt: 2, rd: 3, ..Operands::default() };
//! assert_eq!(mnemonic(Operation::Add, &ops), "ADD\tR3, R1, R2");
//! ```

use std::fmt::Write;

use crate::isa::instruction::{Instruction, Operands, Operation};

/// Bit-field widths used when printing an instruction word in spaced groups:
/// valid, opcode, rs, rt, rd, shamt, function.
const FIELD_WIDTHS: [usize; 7] = [1, 5, 5, 5, 5, 5, 6];

/// Formats the assembly text for an operation and its operands.
pub fn mnemonic(op: Operation, o: &Operands) -> String {
    let name = op.name();
    match op {
        Operation::Add | Operation::Sub | Operation::And | Operation::Or | Operation::Mul
        | Operation::Movz => format!("{name}\tR{}, R{}, R{}", o.rd, o.rs, o.rt),
        Operation::Sll | Operation::Srl => {
            format!("{name}\tR{}, R{}, #{}", o.rd, o.rt, o.shamt)
        }
        Operation::Addi => format!("{name}\tR{}, R{}, #{}", o.rt, o.rs, o.imm),
        Operation::Lw | Operation::Sw => format!("{name}\tR{}, {}(R{})", o.rt, o.imm, o.rs),
        Operation::Beq => format!("{name}\tR{}, R{}, #{}", o.rs, o.rt, o.imm),
        Operation::Bltz => format!("{name}\tR{}, #{}", o.rs, o.imm),
        Operation::Jr => format!("{name}\tR{}", o.rs),
        Operation::J => format!("{name}\t#{}", o.target),
        Operation::Break | Operation::Nop | Operation::Invalid => name.to_string(),
    }
}

/// Formats a word as 32 binary digits.
pub fn bits(raw: u32) -> String {
    format!("{raw:032b}")
}

/// Formats a word as binary digits split into its instruction fields.
///
/// ```
/// use pipesim_core::isa::disasm::spaced_bits;
///
/// assert_eq!(
///     spaced_bits(0x8000_000D),
///     "1 00000 00000 00000 00000 00000 001101"
/// );
/// ```
pub fn spaced_bits(raw: u32) -> String {
    let digits = bits(raw);
    let mut out = String::with_capacity(digits.len() + FIELD_WIDTHS.len());
    let mut start = 0;
    for (i, width) in FIELD_WIDTHS.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&digits[start..start + width]);
        start += width;
    }
    out
}

/// Produces the program listing: one line per instruction, then one per data word.
///
/// Instruction lines are `<spaced bits>\t<address>\t<mnemonic>`; data lines are
/// `<bits>\t<address>\t<signed value>`.
pub fn listing(instructions: &[Instruction], data_start: u32, data: &[i32]) -> String {
    let mut out = String::new();
    for inst in instructions {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            spaced_bits(inst.raw),
            inst.address,
            inst.mnemonic
        );
    }
    let mut addr = data_start;
    for &value in data {
        let _ = writeln!(out, "{}\t{addr}\t{value}", bits(value as u32));
        addr = addr.wrapping_add(4);
    }
    out
}
