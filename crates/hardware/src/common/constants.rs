//! System-wide constants.
//!
//! Geometry of the machine that is fixed by the instruction set and cache design
//! rather than by configuration.

/// Size of one machine word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Registers shown per row in the register dump.
pub const REGISTERS_PER_ROW: usize = 8;

/// Data words shown per row in the data-region dump.
pub const DATA_WORDS_PER_ROW: usize = 8;

/// Number of cache sets.
pub const CACHE_SETS: usize = 4;

/// Number of ways (lines) per cache set.
pub const CACHE_WAYS: usize = 2;

/// Words held by one cache block.
pub const WORDS_PER_BLOCK: usize = 2;

/// Address bits below the set index (8-byte blocks).
pub const BLOCK_OFFSET_BITS: u32 = 3;

/// Mask applied after shifting out the block offset to obtain the set index (bits \[4:3\]).
pub const SET_INDEX_MASK: u32 = 0b11;

/// Shift that yields the tag from a byte address.
pub const TAG_SHIFT: u32 = 5;

/// Mask that aligns a byte address down to its block.
pub const BLOCK_ALIGN_MASK: u32 = !((1 << BLOCK_OFFSET_BITS) - 1);

/// Capacity of the pre-issue buffer.
pub const PRE_ISSUE_SLOTS: usize = 4;

/// Capacity of the pre-ALU queue.
pub const PRE_ALU_SLOTS: usize = 2;

/// Capacity of the pre-MEM queue.
pub const PRE_MEM_SLOTS: usize = 2;
