//! Flat memory image.
//!
//! The image is a contiguous run of 32-bit words starting at the program load
//! address: first the instruction words, then the data words. Instruction words
//! are read-only once loaded; data words change only through cache write-back.

use crate::common::constants::WORD_BYTES;
use crate::common::{Result, SimError};

/// Word-addressable program and data store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryImage {
    base: u32,
    data_start: u32,
    words: Vec<i32>,
}

impl MemoryImage {
    /// Builds an image from instruction words followed by data words.
    pub fn new(base: u32, instructions: &[u32], data: &[i32]) -> Self {
        let mut words = Vec::with_capacity(instructions.len() + data.len());
        words.extend(instructions.iter().map(|&raw| raw as i32));
        words.extend_from_slice(data);
        Self {
            base,
            data_start: base + instructions.len() as u32 * WORD_BYTES,
            words,
        }
    }

    /// Byte address of the first word.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Byte address of the first data word (one past the last instruction).
    pub const fn data_start(&self) -> u32 {
        self.data_start
    }

    /// Byte address one past the last word.
    pub fn end(&self) -> u32 {
        self.base + self.words.len() as u32 * WORD_BYTES
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `addr` lies in the writable data region.
    pub fn is_data_address(&self, addr: u32) -> bool {
        addr >= self.data_start
    }

    /// Byte address of the word at line index `line`.
    pub const fn address_of(&self, line: usize) -> u32 {
        self.base + line as u32 * WORD_BYTES
    }

    fn index_of(&self, addr: u32) -> Option<usize> {
        if addr < self.base || addr % WORD_BYTES != 0 {
            return None;
        }
        let idx = ((addr - self.base) / WORD_BYTES) as usize;
        (idx < self.words.len()).then_some(idx)
    }

    /// Reads the word at `addr`, or `None` outside the image.
    pub fn get(&self, addr: u32) -> Option<i32> {
        self.index_of(addr).map(|idx| self.words[idx])
    }

    /// Reads the word at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] when `addr` is outside the image.
    pub fn read(&self, addr: u32) -> Result<i32> {
        self.get(addr).ok_or(SimError::AddressOutOfRange { addr })
    }

    /// Writes the word at `addr` in the data region.
    ///
    /// # Errors
    ///
    /// [`SimError::InstructionRegionWrite`] below the data region and
    /// [`SimError::AddressOutOfRange`] outside the image.
    pub fn write(&mut self, addr: u32, value: i32) -> Result<()> {
        if !self.is_data_address(addr) {
            return Err(SimError::InstructionRegionWrite { addr });
        }
        let idx = self
            .index_of(addr)
            .ok_or(SimError::AddressOutOfRange { addr })?;
        self.words[idx] = value;
        Ok(())
    }

    /// The data region as `(address, value)` pairs.
    pub fn data(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        let first = ((self.data_start - self.base) / WORD_BYTES) as usize;
        self.words[first..]
            .iter()
            .enumerate()
            .map(move |(i, &v)| (self.data_start + i as u32 * WORD_BYTES, v))
    }
}
