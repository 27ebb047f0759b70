//! CPU state shared by the pipeline stages.
//!
//! [`Cpu`] is the single owner of every piece of mutable machine state: the
//! program counter, register file, inter-stage buffers, cache and memory image.
//! Each stage function borrows it mutably for its turn in the cycle; the
//! orchestrator decides the order.

use crate::common::constants::WORD_BYTES;
use crate::core::arch::RegisterFile;
use crate::core::memory::MemoryImage;
use crate::core::pipeline::latches::{InstId, PipelineBuffers};
use crate::core::units::cache::Cache;
use crate::isa::instruction::Instruction;
use crate::sim::program::Program;

/// Machine state for one simulation.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Byte address of the next instruction to fetch.
    pub pc: u32,
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Inter-stage queues and latches.
    pub buffers: PipelineBuffers,
    /// Write-back cache serving Fetch and Memory.
    pub cache: Cache,
    /// Program and data words.
    pub mem: MemoryImage,
    instructions: Vec<Instruction>,
}

impl Cpu {
    /// Builds the initial machine state for `program`: PC at the load address,
    /// registers zeroed, buffers empty, cache cold.
    pub fn new(program: &Program) -> Self {
        let raw: Vec<u32> = program.instructions.iter().map(|i| i.raw).collect();
        Self {
            pc: program.load_address,
            regs: RegisterFile::new(),
            buffers: PipelineBuffers::default(),
            cache: Cache::new(),
            mem: MemoryImage::new(program.load_address, &raw, &program.data),
            instructions: program.instructions.clone(),
        }
    }

    /// The decoded instruction for an in-flight index.
    pub fn instruction(&self, id: InstId) -> Option<&Instruction> {
        self.instructions.get(id.0)
    }

    /// Mnemonic text for an in-flight index, as shown in traces.
    pub fn mnemonic(&self, id: InstId) -> &str {
        self.instruction(id).map_or("", |i| i.mnemonic.as_str())
    }

    /// Line index of the word at `pc`, or `None` below the load address.
    pub const fn line_of(&self, pc: u32) -> Option<usize> {
        match pc.checked_sub(self.mem.base()) {
            Some(offset) => Some((offset / WORD_BYTES) as usize),
            None => None,
        }
    }
}
