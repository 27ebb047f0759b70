//! Issue Stage.
//!
//! Moves the head of the pre-issue buffer into the lowest empty pre-ALU slot.
//! Admission depends only on buffer occupancy: there is no register dependency
//! or structural hazard check.

use tracing::debug;

use crate::common::Result;
use crate::core::Cpu;
use crate::core::pipeline::latches::InstId;
use crate::core::pipeline::traits::{PipelineStage, Resource};

/// What Issue did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The pre-issue head moved into pre-ALU `slot`.
    Issued {
        /// Issued instruction.
        inst: InstId,
        /// Pre-ALU slot it landed in.
        slot: usize,
    },
    /// The pre-ALU queue was full.
    Blocked {
        /// Instruction left at the pre-issue head.
        inst: InstId,
    },
    /// Nothing to issue.
    Idle,
}

/// Issue stage.
#[derive(Debug)]
pub struct Issue;

impl PipelineStage for Issue {
    const NAME: &'static str = "IS";
    const CONSUMES: &'static [Resource] = &[Resource::PreIssue];
    const PRODUCES: &'static [Resource] = &[Resource::PreAlu];
    type Outcome = IssueOutcome;

    fn tick(cpu: &mut Cpu) -> Result<IssueOutcome> {
        Ok(issue_stage(cpu))
    }
}

/// Executes the issue stage.
pub fn issue_stage(cpu: &mut Cpu) -> IssueOutcome {
    let Some(inst) = cpu.buffers.pre_issue.head() else {
        return IssueOutcome::Idle;
    };
    let Some(slot) = cpu.buffers.pre_alu.push(inst) else {
        debug!(mnemonic = cpu.mnemonic(inst), "IS  pre-ALU queue full");
        return IssueOutcome::Blocked { inst };
    };
    let _ = cpu.buffers.pre_issue.pop_front();
    debug!(slot, mnemonic = cpu.mnemonic(inst), "IS  issued");
    IssueOutcome::Issued { inst, slot }
}
