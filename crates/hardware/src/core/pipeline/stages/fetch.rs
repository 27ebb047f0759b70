//! Instruction Fetch (IF) Stage.
//!
//! Reads the word at the PC through the cache and appends its instruction index
//! to the pre-issue buffer. A cache miss leaves the PC and buffer untouched, so
//! the same PC is fetched again next cycle. Fetching the halt word ends the
//! fetch stream.

use tracing::debug;

use crate::common::constants::WORD_BYTES;
use crate::common::{Result, SimError};
use crate::core::Cpu;
use crate::core::pipeline::latches::InstId;
use crate::core::pipeline::traits::{PipelineStage, Resource};
use crate::core::units::cache::CacheRequest;
use crate::isa::decode;

/// What Fetch did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// An instruction entered the pre-issue buffer at `slot`.
    Fetched {
        /// Fetched instruction.
        inst: InstId,
        /// Pre-issue slot it landed in.
        slot: usize,
    },
    /// The halt word was fetched into `slot`; no further fetches follow.
    Halted {
        /// The halt instruction.
        inst: InstId,
        /// Pre-issue slot it landed in.
        slot: usize,
    },
    /// The cache reported a miss for `pc`.
    CacheMiss {
        /// PC that will be retried.
        pc: u32,
    },
    /// The pre-issue buffer had no empty slot; the cache was not accessed.
    BufferFull,
}

impl FetchOutcome {
    /// Whether the orchestrator should keep fetching.
    pub const fn continue_running(&self) -> bool {
        !matches!(self, Self::Halted { .. })
    }
}

/// Fetch stage.
#[derive(Debug)]
pub struct Fetch;

impl PipelineStage for Fetch {
    const NAME: &'static str = "IF";
    const CONSUMES: &'static [Resource] = &[Resource::Pc, Resource::Cache];
    const PRODUCES: &'static [Resource] = &[Resource::Pc, Resource::PreIssue, Resource::Cache];
    type Outcome = FetchOutcome;

    fn tick(cpu: &mut Cpu) -> Result<FetchOutcome> {
        fetch_stage(cpu)
    }
}

/// Executes the instruction fetch stage.
///
/// # Errors
///
/// [`SimError::AddressOutOfRange`] when the PC is outside the loaded image.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<FetchOutcome> {
    let pc = cpu.pc;
    if cpu.buffers.pre_issue.is_full() {
        debug!(pc, "IF  pre-issue buffer full");
        return Ok(FetchOutcome::BufferFull);
    }

    let line = cpu
        .line_of(pc)
        .ok_or(SimError::AddressOutOfRange { addr: pc })?;
    let access = cpu.cache.access(&mut cpu.mem, line, CacheRequest::Read)?;
    if !access.hit {
        debug!(pc, "IF  cache miss");
        return Ok(FetchOutcome::CacheMiss { pc });
    }

    let inst = InstId(line);
    let Some(slot) = cpu.buffers.pre_issue.push(inst) else {
        return Ok(FetchOutcome::BufferFull);
    };
    cpu.pc = pc + WORD_BYTES;

    if decode::is_halt(access.word as u32) {
        debug!(pc, slot, "IF  halt word fetched");
        Ok(FetchOutcome::Halted { inst, slot })
    } else {
        debug!(pc, slot, mnemonic = cpu.mnemonic(inst), "IF  fetched");
        Ok(FetchOutcome::Fetched { inst, slot })
    }
}
