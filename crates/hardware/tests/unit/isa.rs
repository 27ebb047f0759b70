//! Decoder and disassembler tests.
//!
//! Encodings are built with the instruction builder and checked against the
//! decoded operation, operand fields and rendered mnemonic.

use pipesim_core::isa::decode::{decode, is_halt, operation};
use pipesim_core::isa::disasm::{listing, spaced_bits};
use pipesim_core::isa::instruction::{InstructionBits, Operation};
use pipesim_core::isa::opcodes::{
    OP_BEQ, OP_BLTZ, OP_J, OP_LW, OP_SPECIAL, OP_SPECIAL2, OP_SW, funct, funct2,
};
use pipesim_core::sim::program::Program;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::InstructionBuilder as I;

#[rstest]
#[case::add(I::add(3, 1, 2), Operation::Add, "ADD\tR3, R1, R2")]
#[case::sub(I::sub(3, 1, 2), Operation::Sub, "SUB\tR3, R1, R2")]
#[case::and(I::and(6, 4, 5), Operation::And, "AND\tR6, R4, R5")]
#[case::addi(I::addi(1, 0, 5), Operation::Addi, "ADDI\tR1, R0, #5")]
#[case::addi_negative(I::addi(2, 1, -4), Operation::Addi, "ADDI\tR2, R1, #-4")]
#[case::sll(
    I::new().opcode(OP_SPECIAL).rt(2).rd(5).shamt(3).funct(funct::SLL).build(),
    Operation::Sll,
    "SLL\tR5, R2, #3"
)]
#[case::mul(
    I::new().opcode(OP_SPECIAL2).rs(1).rt(2).rd(3).funct(funct2::MUL).build(),
    Operation::Mul,
    "MUL\tR3, R1, R2"
)]
#[case::lw(I::new().opcode(OP_LW).rs(0).rt(4).imm(172).build(), Operation::Lw, "LW\tR4, 172(R0)")]
#[case::sw(I::new().opcode(OP_SW).rs(2).rt(5).imm(-8).build(), Operation::Sw, "SW\tR5, -8(R2)")]
#[case::beq(I::new().opcode(OP_BEQ).rs(1).rt(2).imm(3).build(), Operation::Beq, "BEQ\tR1, R2, #3")]
#[case::bltz(I::new().opcode(OP_BLTZ).rs(7).imm(-2).build(), Operation::Bltz, "BLTZ\tR7, #-2")]
#[case::jr(I::new().opcode(OP_SPECIAL).rs(31).funct(funct::JR).build(), Operation::Jr, "JR\tR31")]
#[case::brk(I::brk(), Operation::Break, "BREAK")]
#[case::nop(0, Operation::Nop, "NOP")]
fn decodes_operation_and_mnemonic(
    #[case] raw: u32,
    #[case] op: Operation,
    #[case] text: &str,
) {
    let inst = decode(96, raw);
    assert_eq!(inst.op, op);
    assert_eq!(inst.mnemonic, text);
    assert_eq!(inst.address, 96);
}

#[test]
fn jump_target_is_scaled_to_bytes() {
    // Target field 30 addresses byte 120.
    let raw = I::new().opcode(OP_J).build() | 30;
    let inst = decode(96, raw);
    assert_eq!(inst.op, Operation::J);
    assert_eq!(inst.operands.target, 120);
    assert_eq!(inst.mnemonic, "J\t#120");
}

#[test]
fn word_without_valid_flag_is_invalid() {
    let raw = I::new().invalid().opcode(OP_SPECIAL).rs(1).rt(2).rd(3).funct(funct::ADD).build();
    assert!(!raw.valid());
    assert_eq!(operation(raw), Operation::Invalid);
    assert!(!is_halt(raw));
}

#[test]
fn unknown_function_code_is_invalid() {
    let raw = I::new().opcode(OP_SPECIAL).funct(0x3F).build();
    assert_eq!(operation(raw), Operation::Invalid);
}

#[test]
fn field_extraction() {
    let raw = I::addi(17, 9, -1);
    assert_eq!(raw.opcode(), 8);
    assert_eq!(raw.rs(), 9);
    assert_eq!(raw.rt(), 17);
    assert_eq!(raw.imm(), -1);
}

#[test]
fn halt_sentinel_is_recognised() {
    assert!(is_halt(I::brk()));
    assert!(!is_halt(I::add(0, 0, 0)));
}

#[test]
fn spaced_bits_follow_field_boundaries() {
    assert_eq!(
        spaced_bits(I::addi(1, 0, 5)),
        "1 01000 00000 00001 00000 00000 000101"
    );
}

#[test]
fn program_listing_shows_instructions_then_data() {
    let words = [I::addi(1, 0, 5), I::brk(), 7, (-3_i32) as u32];
    let program = Program::from_words(&words, 96);

    let expected = "\
1 01000 00000 00001 00000 00000 000101\t96\tADDI\tR1, R0, #5
1 00000 00000 00000 00000 00000 001101\t100\tBREAK
00000000000000000000000000000111\t104\t7
11111111111111111111111111111101\t108\t-3
";
    assert_eq!(program.listing(), expected);
    assert_eq!(
        listing(&program.instructions, program.data_start(), &program.data),
        expected
    );
}
