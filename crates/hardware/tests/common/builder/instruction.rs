use pipesim_core::isa::opcodes::{OP_ADDI, OP_SPECIAL, funct};

/// Valid flag (bit 31).
const VALID: u32 = 1 << 31;

pub struct InstructionBuilder {
    valid: bool,
    opcode: u32,
    rs: u32,
    rt: u32,
    rd: u32,
    shamt: u32,
    funct: u32,
    imm: Option<i32>,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            valid: true,
            opcode: 0,
            rs: 0,
            rt: 0,
            rd: 0,
            shamt: 0,
            funct: 0,
            imm: None,
        }
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rs(mut self, rs: u32) -> Self {
        self.rs = rs;
        self
    }

    pub fn rt(mut self, rt: u32) -> Self {
        self.rt = rt;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn shamt(mut self, shamt: u32) -> Self {
        self.shamt = shamt;
        self
    }

    pub fn funct(mut self, funct: u32) -> Self {
        self.funct = funct;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = Some(imm);
        self
    }

    /// Encodes the word. An immediate, when set, replaces the rd/shamt/funct fields.
    pub fn build(self) -> u32 {
        let mut word = (self.opcode & 0x1F) << 26 | (self.rs & 0x1F) << 21 | (self.rt & 0x1F) << 16;
        word |= match self.imm {
            Some(imm) => imm as u32 & 0xFFFF,
            None => (self.rd & 0x1F) << 11 | (self.shamt & 0x1F) << 6 | (self.funct & 0x3F),
        };
        if self.valid { word | VALID } else { word }
    }

    // Common instruction shortcuts.

    pub fn add(rd: u32, rs: u32, rt: u32) -> u32 {
        Self::special(funct::ADD, rd, rs, rt)
    }

    pub fn sub(rd: u32, rs: u32, rt: u32) -> u32 {
        Self::special(funct::SUB, rd, rs, rt)
    }

    pub fn and(rd: u32, rs: u32, rt: u32) -> u32 {
        Self::special(funct::AND, rd, rs, rt)
    }

    pub fn addi(rt: u32, rs: u32, imm: i32) -> u32 {
        Self::new().opcode(OP_ADDI).rs(rs).rt(rt).imm(imm).build()
    }

    pub fn brk() -> u32 {
        Self::new().opcode(OP_SPECIAL).funct(funct::BREAK).build()
    }

    fn special(function: u32, rd: u32, rs: u32, rt: u32) -> u32 {
        Self::new()
            .opcode(OP_SPECIAL)
            .rs(rs)
            .rt(rt)
            .rd(rd)
            .funct(function)
            .build()
    }
}
