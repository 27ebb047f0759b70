//! Per-cycle machine snapshots and trace sinks.
//!
//! A [`Snapshot`] is an owned copy of everything the cycle trace shows: the
//! pipeline buffers (as mnemonics), the register file, the cache sets and the
//! data region. Sinks decide how snapshots are kept or written.

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::common::Result;
use crate::common::constants::{DATA_WORDS_PER_ROW, REGISTERS_PER_ROW, WORD_BYTES};
use crate::core::Cpu;
use crate::core::pipeline::latches::{InstId, SlotQueue};
use crate::core::units::cache::CacheSet;

/// Separator line opening every cycle block in text traces.
const CYCLE_SEPARATOR: &str = "--------------------";

/// Machine state at the end of one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// One-based cycle number.
    pub cycle: u64,
    /// Pre-issue buffer slots.
    pub pre_issue: Vec<Option<String>>,
    /// Pre-ALU queue slots.
    pub pre_alu: Vec<Option<String>>,
    /// Post-ALU latch.
    pub post_alu: Option<String>,
    /// Pre-MEM queue slots.
    pub pre_mem: Vec<Option<String>>,
    /// Post-MEM latch.
    pub post_mem: Option<String>,
    /// Register values `R0`..`R31`.
    pub registers: Vec<i32>,
    /// Cache sets in index order.
    pub cache: Vec<CacheSet>,
    /// Address of the first data word.
    pub data_start: u32,
    /// Data region values.
    pub data: Vec<i32>,
}

fn slot_names<const N: usize>(cpu: &Cpu, queue: &SlotQueue<N>) -> Vec<Option<String>> {
    queue
        .slots()
        .iter()
        .map(|s| s.map(|id| mnemonic(cpu, id)))
        .collect()
}

fn mnemonic(cpu: &Cpu, id: InstId) -> String {
    cpu.mnemonic(id).to_string()
}

impl Snapshot {
    /// Copies the traced state out of `cpu`.
    pub fn capture(cycle: u64, cpu: &Cpu) -> Self {
        let buffers = &cpu.buffers;
        Self {
            cycle,
            pre_issue: slot_names(cpu, &buffers.pre_issue),
            pre_alu: slot_names(cpu, &buffers.pre_alu),
            post_alu: buffers.post_alu.map(|r| mnemonic(cpu, r.inst)),
            pre_mem: slot_names(cpu, &buffers.pre_mem),
            post_mem: buffers.post_mem.map(|r| mnemonic(cpu, r.inst)),
            registers: cpu.regs.values().to_vec(),
            cache: cpu.cache.sets().to_vec(),
            data_start: cpu.mem.data_start(),
            data: cpu.mem.data().map(|(_, v)| v).collect(),
        }
    }

    /// Renders the snapshot in the cycle trace text layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{CYCLE_SEPARATOR}");
        let _ = writeln!(out, "Cycle:{}", self.cycle);
        out.push('\n');

        render_slots(&mut out, "Pre-Issue Buffer:", &self.pre_issue);
        render_slots(&mut out, "Pre_ALU Queue:", &self.pre_alu);
        render_slots(&mut out, "Post_ALU Queue:", std::slice::from_ref(&self.post_alu));
        render_slots(&mut out, "Pre_MEM Queue:", &self.pre_mem);
        render_slots(&mut out, "Post_MEM Queue:", std::slice::from_ref(&self.post_mem));
        out.push('\n');

        out.push_str("Registers\n");
        for (row, values) in self.registers.chunks(REGISTERS_PER_ROW).enumerate() {
            let _ = write!(out, "R{:02}:", row * REGISTERS_PER_ROW);
            for v in values {
                let _ = write!(out, "\t{v}");
            }
            out.push('\n');
        }
        out.push('\n');

        out.push_str("Cache\n");
        for (i, set) in self.cache.iter().enumerate() {
            let _ = writeln!(out, "Set {i}: LRU={}", set.lru);
            for (way, line) in set.lines.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "\tEntry {way}:[({},{},{})<{},{}>]",
                    u8::from(line.valid),
                    u8::from(line.dirty),
                    line.tag,
                    line.words[0],
                    line.words[1]
                );
            }
        }
        out.push('\n');

        out.push_str("Data\n");
        for (row, values) in self.data.chunks(DATA_WORDS_PER_ROW).enumerate() {
            let addr = self.data_start + (row * DATA_WORDS_PER_ROW) as u32 * WORD_BYTES;
            let _ = write!(out, "{addr}:");
            for v in values {
                let _ = write!(out, "\t{v}");
            }
            out.push('\n');
        }
        out
    }
}

fn render_slots(out: &mut String, title: &str, slots: &[Option<String>]) {
    out.push_str(title);
    out.push('\n');
    for (i, slot) in slots.iter().enumerate() {
        match slot {
            Some(m) => {
                let _ = writeln!(out, "\tEntry {i}:\t[{m}]");
            }
            None => {
                let _ = writeln!(out, "\tEntry {i}:");
            }
        }
    }
}

/// Receives one snapshot per simulated cycle.
pub trait TraceSink {
    /// Records the state at the end of a cycle.
    fn record(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Called once after the last cycle.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
impl TraceSink for Vec<Snapshot> {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.push(snapshot.clone());
        Ok(())
    }
}

/// Discards snapshots.
#[derive(Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

/// Writes the text cycle trace.
#[derive(Debug)]
pub struct TextTrace<W: Write> {
    out: W,
}

impl<W: Write> TextTrace<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TextTrace<W> {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.out.write_all(snapshot.render().as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per cycle, newline separated.
#[derive(Debug)]
pub struct JsonTrace<W: Write> {
    out: W,
}

impl<W: Write> JsonTrace<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for JsonTrace<W> {
    fn record(&mut self, snapshot: &Snapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
