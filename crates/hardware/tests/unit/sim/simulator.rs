//! Orchestrator Tests.
//!
//! Whole programs run through `Simulator`, checking cycle-by-cycle stage
//! outcomes, final machine state and run termination.

use pipesim_core::SimError;
use pipesim_core::config::Config;
use pipesim_core::core::pipeline::latches::{AluResult, InstId};
use pipesim_core::core::pipeline::stages::{
    ExecuteOutcome, FetchOutcome, IssueOutcome, WritebackOutcome,
};
use pipesim_core::sim::simulator::RunPhase;
use pipesim_core::sim::trace::NullTrace;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::TestContext;

/// `ADDI R1, R0, #5; ADD R2, R1, R1; BREAK`
fn add_program() -> Vec<u32> {
    vec![I::addi(1, 0, 5), I::add(2, 1, 1), I::brk()]
}

fn no_drain() -> Config {
    let mut config = Config::default();
    config.pipeline.drain_on_halt = false;
    config
}

#[test]
fn dependent_add_sees_written_back_value() {
    let mut ctx = TestContext::new(&add_program());

    let trace = ctx.run();

    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(2), 10);
    assert_eq!(trace.len(), 7);
    assert_eq!(ctx.sim.stats.halt_cycle, Some(5));
    assert_eq!(ctx.sim.phase(), RunPhase::Finished);
}

#[test]
fn cycle_reports_follow_stage_order() {
    let mut ctx = TestContext::new(&add_program());

    let c1 = ctx.tick();
    assert_eq!(c1.fetch, Some(FetchOutcome::CacheMiss { pc: 96 }));

    let c2 = ctx.tick();
    assert_eq!(
        c2.fetch,
        Some(FetchOutcome::Fetched {
            inst: InstId(0),
            slot: 0
        })
    );
    assert_eq!(c2.issue, IssueOutcome::Idle, "issue ran before fetch filled the buffer");

    let c3 = ctx.tick();
    assert_eq!(
        c3.issue,
        IssueOutcome::Issued {
            inst: InstId(0),
            slot: 0
        }
    );
    assert_eq!(c3.execute, ExecuteOutcome::Idle);
    assert_eq!(
        c3.fetch,
        Some(FetchOutcome::Fetched {
            inst: InstId(1),
            slot: 0
        })
    );

    let c4 = ctx.tick();
    let addi = AluResult {
        inst: InstId(0),
        rd: 1,
        value: 5,
    };
    assert_eq!(c4.execute, ExecuteOutcome::Completed(addi));
    assert_eq!(c4.writeback, WritebackOutcome::Idle);
    assert_eq!(c4.fetch, Some(FetchOutcome::CacheMiss { pc: 104 }));

    let c5 = ctx.tick();
    assert_eq!(c5.writeback, WritebackOutcome::Wrote(addi));
    assert_eq!(
        c5.execute,
        ExecuteOutcome::Completed(AluResult {
            inst: InstId(1),
            rd: 2,
            value: 10
        })
    );
    assert_eq!(
        c5.fetch,
        Some(FetchOutcome::Halted {
            inst: InstId(2),
            slot: 0
        })
    );
    assert!(ctx.sim.is_halted());
    assert_eq!(ctx.sim.phase(), RunPhase::Draining);

    let c6 = ctx.tick();
    assert_eq!(c6.fetch, None, "no fetch after halt");
    assert!(matches!(c6.writeback, WritebackOutcome::Wrote(_)));
    assert!(c6.made_progress());

    let c7 = ctx.tick();
    assert_eq!(c7.execute, ExecuteOutcome::Stalled { inst: InstId(2) });
    assert!(!c7.made_progress());
    assert!(ctx.sim.is_finished());
}

#[test]
fn run_without_drain_stops_on_halt_cycle() {
    let mut ctx = TestContext::with_config(&add_program(), no_drain());

    let trace = ctx.run();

    assert_eq!(trace.len(), 5);
    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.get_reg(2), 0);
    let last = trace.last().unwrap();
    assert_eq!(last.post_alu.as_deref(), Some("ADD\tR2, R1, R1"));
    assert_eq!(last.pre_issue[0].as_deref(), Some("BREAK"));
}

#[test]
fn unsupported_instruction_stays_in_pre_alu_slot_zero() {
    let mut ctx = TestContext::new(&[I::sub(3, 1, 2), I::brk()]);

    let trace = ctx.run();

    assert_eq!(trace.len(), 5);
    for snap in &trace[2..] {
        assert_eq!(
            snap.pre_alu[0].as_deref(),
            Some("SUB\tR3, R1, R2"),
            "cycle {}",
            snap.cycle
        );
    }
    let last = trace.last().unwrap();
    assert_eq!(last.pre_alu[1].as_deref(), Some("BREAK"));
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.sim.stats.stalls_alu, 2);
}

#[test]
fn blocked_pipeline_finishes_without_reaching_the_cycle_cap() {
    let mut words = vec![I::sub(3, 1, 2)];
    words.extend((0..6).map(|i| I::addi(4 + i, 0, 1)));
    words.push(I::brk());
    let mut ctx = TestContext::new(&words);

    let trace = ctx.run();

    let stats = &ctx.sim.stats;
    assert_eq!(ctx.sim.phase(), RunPhase::Finished);
    assert_eq!(stats.halt_cycle, None);
    assert!(!ctx.sim.is_halted());
    assert_eq!(stats.blocked_cycle, Some(ctx.sim.cycle()));
    assert!(ctx.sim.cycle() < 50, "ran {} cycles", ctx.sim.cycle());
    assert!(stats.stalls_buffer_full > 0);
    assert!(ctx.cpu().buffers.pre_issue.is_full());
    assert!(ctx.cpu().buffers.pre_alu.is_full());

    let last = trace.last().unwrap();
    assert_eq!(last.cycle, ctx.sim.cycle());
    assert_eq!(last.pre_alu[0].as_deref(), Some("SUB\tR3, R1, R2"));
    assert_eq!(ctx.get_reg(3), 0);
}

#[test]
fn cycle_cap_stops_a_run_that_is_still_moving() {
    let mut config = Config::default();
    config.general.max_cycles = 3;
    let mut ctx = TestContext::with_config(&add_program(), config);

    let err = ctx.sim.run(&mut NullTrace).unwrap_err();

    assert!(matches!(err, SimError::CycleLimitExceeded(3)), "got {err:?}");
    assert_eq!(ctx.sim.cycle(), 3);
    assert_eq!(ctx.sim.stats.blocked_cycle, None);
}

#[test]
fn running_off_the_image_is_an_error() {
    let mut ctx = TestContext::new(&[I::addi(1, 0, 5)]);

    let err = ctx.sim.run(&mut NullTrace).unwrap_err();

    assert!(matches!(err, SimError::AddressOutOfRange { addr: 100 }), "got {err:?}");
}

#[test]
fn data_region_is_untouched_by_alu_programs() {
    let mut words = add_program();
    words.extend([11, 22, (-33_i32) as u32]);
    let mut ctx = TestContext::new(&words);

    let trace = ctx.run();

    assert_eq!(trace.last().unwrap().data, vec![11, 22, -33]);
    assert_eq!(ctx.cpu().mem.data_start(), 108);
}

#[test]
fn stats_count_stage_activity() {
    let mut ctx = TestContext::new(&add_program());
    let _ = ctx.run();
    let stats = &ctx.sim.stats;

    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.drain_cycles, 2);
    assert_eq!(stats.instructions_fetched, 3);
    assert_eq!(stats.instructions_issued, 3);
    assert_eq!(stats.instructions_executed, 2);
    assert_eq!(stats.register_writes, 2);
    assert_eq!(stats.stalls_fetch_miss, 2);
    assert_eq!(stats.stalls_alu, 1);
    assert_eq!(stats.cache.misses, 2);
    assert_eq!(stats.cache.refills, 2);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut config = Config::default();
    config.general.max_cycles = 0;
    let program = pipesim_core::sim::program::Program::from_words(&add_program(), 96);

    let err = pipesim_core::Simulator::new(&program, &config).unwrap_err();

    assert!(matches!(err, SimError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn each_instruction_occupies_one_slot_per_cycle() {
    let mut words = vec![I::addi(1, 0, 1), I::sub(3, 1, 2)];
    words.extend((0..5).map(|i| I::add(4 + i, 1, 1)));
    words.push(I::brk());
    let mut config = Config::default();
    config.general.max_cycles = 30;
    let mut ctx = TestContext::with_config(&words, config);

    while !ctx.sim.is_finished() {
        let _ = ctx.tick();
        let mut ids = ctx.cpu().buffers.in_flight();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "duplicate slot at cycle {}", ctx.sim.cycle());
        assert!(ctx.cpu().buffers.pre_issue.is_packed());
        assert!(ctx.cpu().buffers.pre_alu.is_packed());
    }
}
