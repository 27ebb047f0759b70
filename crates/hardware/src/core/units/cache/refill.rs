//! Per-address refill request tracking.
//!
//! A miss is served one access later: the first miss records the address as
//! awaiting refill and reports a miss, the repeated access to the same address
//! finds it ready and performs the fill. Requests are per word address, so a
//! pending miss on one word does not fill the block for its neighbour. Entries
//! are removed as soon as the fill completes (or the address hits in the
//! meantime), so the table only holds outstanding requests.

use std::collections::HashMap;

/// Progress of a refill request for one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillState {
    /// No miss has been recorded for the address.
    NotRequested,
    /// A miss was reported; the next access performs the fill.
    AwaitingRefill,
    /// The fill is being performed on this access.
    Ready,
}

/// Outstanding refill requests keyed by word address.
#[derive(Clone, Debug, Default)]
pub struct RefillTracker {
    pending: HashMap<u32, RefillState>,
}

impl RefillTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `addr`.
    pub fn state(&self, addr: u32) -> RefillState {
        self.pending
            .get(&addr)
            .copied()
            .unwrap_or(RefillState::NotRequested)
    }

    /// Records a missing access to `addr` and returns the new state.
    ///
    /// `NotRequested` moves to `AwaitingRefill`; `AwaitingRefill` moves to `Ready`.
    pub fn request(&mut self, addr: u32) -> RefillState {
        let next = match self.state(addr) {
            RefillState::NotRequested => RefillState::AwaitingRefill,
            RefillState::AwaitingRefill | RefillState::Ready => RefillState::Ready,
        };
        let _ = self.pending.insert(addr, next);
        next
    }

    /// Drops the request for `addr` once its fill has been installed or it hits.
    pub fn complete(&mut self, addr: u32) {
        let _ = self.pending.remove(&addr);
    }

    /// Number of addresses with an outstanding request.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }
}
