//! Two-way set-associative write-back cache.
//!
//! This module implements the cache shared by Fetch and Memory. It models:
//! 1. **Geometry:** 4 sets of 2 lines, each line holding one 8-byte block
//!    (two words). Set index is address bits \[4:3\]; the tag is `address >> 5`.
//! 2. **Lookup:** Only the line the set's recency bit points away from (the
//!    most recently installed or touched line) is compared against the request.
//!    The other way is never searched.
//! 3. **Latency:** A miss is reported once and filled on the repeated access
//!    (see [`refill`]).
//! 4. **Write-back:** Dirty victims are written to the memory image, except when
//!    their block lies below the data region.
//!
//! The recency bit names the victim way. It flips on every fill and on read
//! hits; write hits leave it alone.

/// Refill request tracking.
pub mod refill;

use serde::Serialize;
use tracing::trace;

use self::refill::{RefillState, RefillTracker};
use crate::common::Result;
use crate::common::constants::{
    BLOCK_ALIGN_MASK, BLOCK_OFFSET_BITS, CACHE_SETS, CACHE_WAYS, SET_INDEX_MASK, TAG_SHIFT,
    WORD_BYTES, WORDS_PER_BLOCK,
};
use crate::core::memory::MemoryImage;

/// A single cache line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Line holds a block.
    pub valid: bool,
    /// Line differs from the memory image.
    pub dirty: bool,
    /// High address bits (`address >> 5`).
    pub tag: u32,
    /// The block's two words.
    pub words: [i32; WORDS_PER_BLOCK],
}

/// One set: two lines and the recency bit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheSet {
    /// Lines (ways) of the set.
    pub lines: [CacheLine; CACHE_WAYS],
    /// Recency bit: index of the way to evict next.
    pub lru: u8,
}

impl CacheSet {
    /// Way evicted by the next fill.
    pub const fn victim_way(&self) -> usize {
        self.lru as usize
    }

    /// Way compared by the hit test.
    pub const fn probed_way(&self) -> usize {
        1 - self.lru as usize
    }

    fn flip(&mut self) {
        self.lru ^= 1;
    }
}

/// Decomposition of a byte address into cache coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockAddress {
    /// Address of the block's first word.
    pub block: u32,
    /// Set index (bits \[4:3\]).
    pub set: usize,
    /// Tag (`address >> 5`).
    pub tag: u32,
    /// Word within the block (0 or 1).
    pub offset: usize,
}

impl BlockAddress {
    /// Splits `addr` into block, set, tag and word offset.
    pub const fn of(addr: u32) -> Self {
        Self {
            block: addr & BLOCK_ALIGN_MASK,
            set: ((addr >> BLOCK_OFFSET_BITS) & SET_INDEX_MASK) as usize,
            tag: addr >> TAG_SHIFT,
            offset: ((addr / WORD_BYTES) % WORDS_PER_BLOCK as u32) as usize,
        }
    }

    /// Rebuilds the block address a line with `tag` represents in `set`.
    pub const fn reconstruct(tag: u32, set: usize) -> u32 {
        (tag << TAG_SHIFT) | ((set as u32) << BLOCK_OFFSET_BITS)
    }
}

/// Kind of cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheRequest {
    /// Read the addressed word.
    Read,
    /// Write the given value into the addressed word.
    Write(i32),
}

/// Result of a cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheAccess {
    /// Whether the word is available this cycle.
    pub hit: bool,
    /// The addressed word on a hit (the written value for writes); zero on a miss.
    pub word: i32,
}

impl CacheAccess {
    const fn hit(word: i32) -> Self {
        Self { hit: true, word }
    }

    const fn miss() -> Self {
        Self {
            hit: false,
            word: 0,
        }
    }
}

/// Event counters kept by the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that hit the probed line.
    pub hits: u64,
    /// Accesses reported as misses.
    pub misses: u64,
    /// Fills performed.
    pub refills: u64,
    /// Dirty victims written to the memory image.
    pub writebacks: u64,
    /// Dirty victims dropped because their block lies below the data region.
    pub suppressed_writebacks: u64,
}

/// The 4-set, 2-way write-back cache.
#[derive(Clone, Debug, Default)]
pub struct Cache {
    sets: [CacheSet; CACHE_SETS],
    refills: RefillTracker,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache with every line invalid and every recency bit clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache sets, in index order.
    pub const fn sets(&self) -> &[CacheSet; CACHE_SETS] {
        &self.sets
    }

    /// Event counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Outstanding refill requests.
    pub const fn refills(&self) -> &RefillTracker {
        &self.refills
    }

    /// Accesses the word at line index `line` (byte address `base + line * 4`).
    ///
    /// The block's two words are taken from the memory image as nominal
    /// contents and, for writes, the addressed word is replaced by the written
    /// value before any cache state changes.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`](crate::common::SimError::AddressOutOfRange)
    /// when the addressed word is outside the image, and any error from writing
    /// a dirty victim back.
    pub fn access(
        &mut self,
        mem: &mut MemoryImage,
        line: usize,
        req: CacheRequest,
    ) -> Result<CacheAccess> {
        let addr = mem.address_of(line);
        let _ = mem.read(addr)?;
        let loc = BlockAddress::of(addr);

        let mut words = [
            mem.get(loc.block).unwrap_or(0),
            mem.get(loc.block + WORD_BYTES).unwrap_or(0),
        ];
        if let CacheRequest::Write(value) = req {
            words[loc.offset] = value;
        }

        let set = &mut self.sets[loc.set];
        let probed = set.probed_way();
        let candidate = set.lines[probed];
        if candidate.valid && BlockAddress::reconstruct(candidate.tag, loc.set) == loc.block {
            self.stats.hits += 1;
            let word = match req {
                CacheRequest::Read => {
                    set.flip();
                    candidate.words[loc.offset]
                }
                CacheRequest::Write(value) => {
                    let line = &mut set.lines[probed];
                    line.words[loc.offset] = value;
                    line.dirty = true;
                    value
                }
            };
            self.refills.complete(addr);
            trace!(addr, set = loc.set, way = probed, "cache hit");
            return Ok(CacheAccess::hit(word));
        }

        match self.refills.request(addr) {
            RefillState::Ready => {}
            RefillState::NotRequested | RefillState::AwaitingRefill => {
                self.stats.misses += 1;
                trace!(addr, "cache miss, refill requested");
                return Ok(CacheAccess::miss());
            }
        }

        self.evict(mem, loc.set)?;
        let set = &mut self.sets[loc.set];
        let way = set.victim_way();
        set.lines[way] = CacheLine {
            valid: true,
            dirty: matches!(req, CacheRequest::Write(_)),
            tag: loc.tag,
            words,
        };
        set.flip();
        self.refills.complete(addr);
        self.stats.refills += 1;
        trace!(addr, set = loc.set, way, tag = loc.tag, "cache refill");

        Ok(CacheAccess::hit(words[loc.offset]))
    }

    /// Writes the victim line of `set` back to memory if it is dirty.
    ///
    /// Blocks whose reconstructed address is below the data region are never
    /// written, so instruction words cannot be overwritten.
    fn evict(&mut self, mem: &mut MemoryImage, set: usize) -> Result<()> {
        let victim = self.sets[set].lines[self.sets[set].victim_way()];
        if !(victim.valid && victim.dirty) {
            return Ok(());
        }
        let addr = BlockAddress::reconstruct(victim.tag, set);
        if !mem.is_data_address(addr) {
            self.stats.suppressed_writebacks += 1;
            trace!(addr, "dirty victim below data region dropped");
            return Ok(());
        }
        for (i, &word) in victim.words.iter().enumerate() {
            let target = addr + i as u32 * WORD_BYTES;
            if mem.get(target).is_some() {
                mem.write(target, word)?;
            }
        }
        self.stats.writebacks += 1;
        trace!(addr, "dirty victim written back");
        Ok(())
    }

    /// End-of-run flush.
    ///
    /// Intentionally does nothing: dirty lines still resident when the run ends
    /// are not written to the memory image, and the final data dump shows the
    /// image as last written by evictions.
    pub const fn flush(&mut self) {}
}
