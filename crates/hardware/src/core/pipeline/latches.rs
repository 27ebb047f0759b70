//! Pipeline buffers for inter-stage communication.
//!
//! This module defines the queues and latches shared between stages:
//! Fetch → Pre-Issue (4) → Issue → Pre-ALU (2) → Execute → Post-ALU (1) → WriteBack.
//! The Pre-MEM (2) and Post-MEM (1) buffers exist for the memory path and are
//! shown in traces, but no supported instruction reaches them.
//!
//! 1. **Slots:** Each slot is empty or holds the index of one in-flight
//!    instruction; an instruction index lives in exactly one slot at a time.
//! 2. **Packing:** Queues are filled at the lowest empty slot and drained from
//!    slot 0 with a left shift, so no empty slot precedes an occupied one.

use serde::Serialize;

use crate::common::constants::{PRE_ALU_SLOTS, PRE_ISSUE_SLOTS, PRE_MEM_SLOTS};

/// Index of an instruction in the loaded program (its line index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstId(pub usize);

/// A fixed-capacity, left-packed instruction queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotQueue<const N: usize> {
    slots: [Option<InstId>; N],
}

impl<const N: usize> Default for SlotQueue<N> {
    fn default() -> Self {
        Self { slots: [None; N] }
    }
}

impl<const N: usize> SlotQueue<N> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// All slots in order.
    pub const fn slots(&self) -> &[Option<InstId>; N] {
        &self.slots
    }

    /// The entry at slot `i`.
    pub fn get(&self, i: usize) -> Option<InstId> {
        self.slots.get(i).copied().flatten()
    }

    /// The entry at slot 0.
    pub fn head(&self) -> Option<InstId> {
        self.slots[0]
    }

    /// Index of the lowest empty slot.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Places `id` in the lowest empty slot, returning the slot index, or
    /// `None` (leaving the queue unchanged) when the queue is full.
    pub fn push(&mut self, id: InstId) -> Option<usize> {
        let slot = self.first_empty()?;
        self.slots[slot] = Some(id);
        Some(slot)
    }

    /// Removes the entry at slot 0 and shifts the remaining entries down,
    /// vacating the tail.
    pub fn pop_front(&mut self) -> Option<InstId> {
        let head = self.slots[0].take();
        self.slots.rotate_left(1);
        head
    }

    /// Whether no empty slot precedes an occupied one.
    pub fn is_packed(&self) -> bool {
        let filled = self.occupied();
        self.slots[..filled].iter().all(Option::is_some)
    }

    /// Occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = InstId> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }
}

/// Fetched, not yet issued instructions.
pub type PreIssueBuffer = SlotQueue<PRE_ISSUE_SLOTS>;

/// Issued instructions waiting for the ALU.
pub type PreAluQueue = SlotQueue<PRE_ALU_SLOTS>;

/// Issued memory instructions waiting for the memory stage.
pub type PreMemQueue = SlotQueue<PRE_MEM_SLOTS>;

/// Result held in the post-ALU latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AluResult {
    /// Instruction that produced the value.
    pub inst: InstId,
    /// Destination register.
    pub rd: usize,
    /// Computed value.
    pub value: i32,
}

/// Memory-stage result held in the post-MEM latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemResult {
    /// Instruction that produced the value.
    pub inst: InstId,
    /// Destination register.
    pub rd: usize,
    /// Loaded value.
    pub value: i32,
}

/// All inter-stage buffers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineBuffers {
    /// Written by Fetch, drained by Issue.
    pub pre_issue: PreIssueBuffer,
    /// Written by Issue, drained by Execute.
    pub pre_alu: PreAluQueue,
    /// Written by Execute, consumed by WriteBack.
    pub post_alu: Option<AluResult>,
    /// Reserved for the memory path.
    pub pre_mem: PreMemQueue,
    /// Reserved for the memory path.
    pub post_mem: Option<MemResult>,
}

impl PipelineBuffers {
    /// Whether no instruction is in flight anywhere.
    pub fn is_empty(&self) -> bool {
        self.pre_issue.is_empty()
            && self.pre_alu.is_empty()
            && self.post_alu.is_none()
            && self.pre_mem.is_empty()
            && self.post_mem.is_none()
    }

    /// Every instruction index currently held, in pipeline order.
    pub fn in_flight(&self) -> Vec<InstId> {
        let mut ids: Vec<InstId> = self.pre_issue.iter().collect();
        ids.extend(self.pre_alu.iter());
        ids.extend(self.post_alu.map(|r| r.inst));
        ids.extend(self.pre_mem.iter());
        ids.extend(self.post_mem.map(|r| r.inst));
        ids
    }
}
