//! Simulation statistics collection and reporting.
//!
//! This module tracks what the pipeline did over a run. It provides:
//! 1. **Cycles:** Total cycles, the halt cycle and cycles spent draining after it.
//! 2. **Stage activity:** Instructions fetched, issued, executed and written back.
//! 3. **Stalls:** Fetch cache misses, full pre-issue/pre-ALU buffers and ALU stalls.
//! 4. **Cache:** Hit, miss, refill and write-back counters.

use std::time::Instant;

use crate::core::pipeline::stages::{ExecuteOutcome, FetchOutcome, IssueOutcome, WritebackOutcome};
use crate::core::units::cache::CacheStats;
use crate::sim::simulator::CycleReport;

/// Simulation statistics structure tracking pipeline activity.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Cycle in which the halt word was fetched.
    pub halt_cycle: Option<u64>,
    /// Cycles run after the halt cycle.
    pub drain_cycles: u64,
    /// Cycle in which fetching stopped because nothing could move.
    pub blocked_cycle: Option<u64>,

    /// Instructions placed in the pre-issue buffer (including the halt word).
    pub instructions_fetched: u64,
    /// Instructions moved into the pre-ALU queue.
    pub instructions_issued: u64,
    /// Instructions completed by the ALU.
    pub instructions_executed: u64,
    /// Register file writes.
    pub register_writes: u64,

    /// Fetch cycles lost to cache misses.
    pub stalls_fetch_miss: u64,
    /// Fetch cycles lost to a full pre-issue buffer.
    pub stalls_buffer_full: u64,
    /// Issue cycles lost to a full pre-ALU queue.
    pub stalls_issue: u64,
    /// Cycles in which pre-ALU slot 0 held an instruction the ALU does not run.
    pub stalls_alu: u64,

    /// Cache counters copied at the end of every cycle.
    pub cache: CacheStats,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            halt_cycle: None,
            drain_cycles: 0,
            blocked_cycle: None,
            instructions_fetched: 0,
            instructions_issued: 0,
            instructions_executed: 0,
            register_writes: 0,
            stalls_fetch_miss: 0,
            stalls_buffer_full: 0,
            stalls_issue: 0,
            stalls_alu: 0,
            cache: CacheStats::default(),
        }
    }
}

impl SimStats {
    /// Folds one cycle's stage outcomes into the counters.
    pub fn record(&mut self, report: &CycleReport, cache: &CacheStats) {
        self.cycles = report.cycle;
        if self.halt_cycle.is_some() {
            self.drain_cycles += 1;
        }

        if let WritebackOutcome::Wrote(_) = report.writeback {
            self.register_writes += 1;
        }
        match report.execute {
            ExecuteOutcome::Completed(_) => self.instructions_executed += 1,
            ExecuteOutcome::Stalled { .. } => self.stalls_alu += 1,
            ExecuteOutcome::Idle => {}
        }
        match report.issue {
            IssueOutcome::Issued { .. } => self.instructions_issued += 1,
            IssueOutcome::Blocked { .. } => self.stalls_issue += 1,
            IssueOutcome::Idle => {}
        }
        match report.fetch {
            Some(FetchOutcome::Fetched { .. }) => self.instructions_fetched += 1,
            Some(FetchOutcome::Halted { .. }) => {
                self.instructions_fetched += 1;
                self.halt_cycle = Some(report.cycle);
            }
            Some(FetchOutcome::CacheMiss { .. }) => self.stalls_fetch_miss += 1,
            Some(FetchOutcome::BufferFull) => self.stalls_buffer_full += 1,
            None => {}
        }

        self.cache = *cache;
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        match self.halt_cycle {
            Some(c) => println!("sim_halt_cycle           {}", c),
            None => println!("sim_halt_cycle           -"),
        }
        println!("sim_drain_cycles         {}", self.drain_cycles);
        if let Some(c) = self.blocked_cycle {
            println!("sim_blocked_cycle        {}", c);
        }
        println!(
            "sim_ipc                  {:.4}",
            self.instructions_executed as f64 / cyc as f64
        );
        println!("----------------------------------------------------------");
        println!("STAGE ACTIVITY");
        println!("  if.fetched             {}", self.instructions_fetched);
        println!("  is.issued              {}", self.instructions_issued);
        println!("  ex.executed            {}", self.instructions_executed);
        println!("  wb.register_writes     {}", self.register_writes);
        println!("----------------------------------------------------------");
        println!("STALLS");
        println!(
            "  stalls.fetch_miss      {} ({:.2}%)",
            self.stalls_fetch_miss,
            pct(self.stalls_fetch_miss)
        );
        println!(
            "  stalls.buffer_full     {} ({:.2}%)",
            self.stalls_buffer_full,
            pct(self.stalls_buffer_full)
        );
        println!(
            "  stalls.issue           {} ({:.2}%)",
            self.stalls_issue,
            pct(self.stalls_issue)
        );
        println!(
            "  stalls.alu             {} ({:.2}%)",
            self.stalls_alu,
            pct(self.stalls_alu)
        );
        println!("----------------------------------------------------------");
        let total = self.cache.hits + self.cache.misses;
        let miss_rate = if total > 0 {
            (self.cache.misses as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("CACHE");
        println!(
            "  accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
            total, self.cache.hits, miss_rate
        );
        println!("  refills                {}", self.cache.refills);
        println!("  writebacks             {}", self.cache.writebacks);
        println!(
            "  writebacks.suppressed  {}",
            self.cache.suppressed_writebacks
        );
        println!("==========================================================");
    }
}
