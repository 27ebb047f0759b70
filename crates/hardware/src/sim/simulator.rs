//! Simulator: owns the CPU state and drives the pipeline one cycle at a time.
//!
//! Within a cycle the stages run in the fixed order WriteBack, Execute, Memory,
//! Issue, Fetch. Each stage observes only what previous cycles (and the stages
//! already run this cycle) left behind, which gives every buffer exactly one
//! writer per cycle.
//!
//! Fetching the halt word ends the fetch stream. With `drain_on_halt` the back
//! end keeps cycling until a cycle changes nothing; otherwise the run ends in
//! the halt cycle.
//!
//! A fetching cycle that changes nothing can only happen when an unsupported
//! instruction holds pre-ALU slot 0 and every buffer behind it is full. Every
//! later cycle would be identical, so the run ends there instead of spinning
//! to the cycle cap.

use tracing::{debug, info, warn};

use crate::common::{Result, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::stages::{
    Execute, ExecuteOutcome, Fetch, FetchOutcome, Issue, IssueOutcome, Memory, MemoryOutcome,
    Writeback, WritebackOutcome,
};
use crate::core::pipeline::traits::PipelineStage;
use crate::sim::program::Program;
use crate::sim::trace::{Snapshot, TraceSink};
use crate::stats::SimStats;

/// Stage outcomes for one cycle, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// One-based cycle number.
    pub cycle: u64,
    /// WriteBack result.
    pub writeback: WritebackOutcome,
    /// Execute result.
    pub execute: ExecuteOutcome,
    /// Memory result.
    pub memory: MemoryOutcome,
    /// Issue result.
    pub issue: IssueOutcome,
    /// Fetch result; `None` once the fetch stream has ended.
    pub fetch: Option<FetchOutcome>,
}

impl CycleReport {
    /// Whether any stage changed machine state this cycle.
    ///
    /// A fetch miss counts: it records a refill request.
    pub const fn made_progress(&self) -> bool {
        matches!(self.writeback, WritebackOutcome::Wrote(_))
            || matches!(self.execute, ExecuteOutcome::Completed(_))
            || matches!(self.issue, IssueOutcome::Issued { .. })
            || matches!(
                self.fetch,
                Some(
                    FetchOutcome::Fetched { .. }
                        | FetchOutcome::Halted { .. }
                        | FetchOutcome::CacheMiss { .. }
                )
            )
    }
}

/// Where the run is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Fetch is active.
    Fetching,
    /// The halt word has been fetched; the back end is emptying.
    Draining,
    /// No further cycles will be simulated.
    Finished,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// Machine state.
    pub cpu: Cpu,
    /// Run statistics.
    pub stats: SimStats,
    config: Config,
    cycle: u64,
    phase: RunPhase,
}

impl Simulator {
    /// Creates a simulator with the PC at the program's load address.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] when `config` fails validation.
    pub fn new(program: &Program, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cpu: Cpu::new(program),
            stats: SimStats::default(),
            config: config.clone(),
            cycle: 0,
            phase: RunPhase::Fetching,
        })
    }

    /// Cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current run phase.
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Whether the halt word has been fetched.
    pub const fn is_halted(&self) -> bool {
        self.stats.halt_cycle.is_some()
    }

    /// Whether the run is over.
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, RunPhase::Finished)
    }

    /// Captures the current machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.cycle, &self.cpu)
    }

    /// Advances the machine by one cycle.
    ///
    /// # Errors
    ///
    /// [`SimError::CycleLimitExceeded`] past `general.max_cycles` while the
    /// pipeline is still moving, and any
    /// addressing error raised by Fetch.
    pub fn tick(&mut self) -> Result<CycleReport> {
        let limit = self.config.general.max_cycles;
        if self.cycle >= limit {
            return Err(SimError::CycleLimitExceeded(limit));
        }
        self.cycle += 1;
        let fetching = self.phase == RunPhase::Fetching;

        let cpu = &mut self.cpu;
        let writeback = Writeback::tick(cpu)?;
        let execute = Execute::tick(cpu)?;
        let memory = Memory::tick(cpu)?;
        let issue = Issue::tick(cpu)?;
        let fetch = if fetching {
            Some(Fetch::tick(cpu)?)
        } else {
            None
        };

        let report = CycleReport {
            cycle: self.cycle,
            writeback,
            execute,
            memory,
            issue,
            fetch,
        };
        if self.config.general.trace_stages {
            debug!(cycle = self.cycle, ?report, "cycle complete");
        }

        self.phase = match (self.phase, fetch) {
            (RunPhase::Fetching, Some(FetchOutcome::Halted { .. })) => {
                info!(cycle = self.cycle, "halt word fetched");
                if self.config.pipeline.drain_on_halt {
                    RunPhase::Draining
                } else {
                    RunPhase::Finished
                }
            }
            (RunPhase::Fetching, _) if !report.made_progress() => {
                warn!(cycle = self.cycle, "pipeline blocked behind an unsupported instruction");
                self.stats.blocked_cycle = Some(self.cycle);
                RunPhase::Finished
            }
            (RunPhase::Draining, _) if !report.made_progress() => RunPhase::Finished,
            (phase, _) => phase,
        };

        self.stats.record(&report, self.cpu.cache.stats());
        Ok(report)
    }

    /// Runs to completion, handing a snapshot of every cycle to `sink`.
    ///
    /// # Errors
    ///
    /// Any error from [`tick`](Self::tick) or from the sink.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> Result<&SimStats> {
        while !self.is_finished() {
            let _ = self.tick()?;
            sink.record(&self.snapshot())?;
        }
        sink.finish()?;
        self.cpu.cache.flush();
        info!(
            cycles = self.cycle,
            halt_cycle = ?self.stats.halt_cycle,
            blocked_cycle = ?self.stats.blocked_cycle,
            "simulation finished"
        );
        Ok(&self.stats)
    }
}
