//! Common types and constants shared by every simulator component.
//!
//! This module provides:
//! 1. **Constants:** Word size, register count, cache and buffer geometry.
//! 2. **Error Handling:** The [`SimError`] type and [`Result`] alias.

/// Machine geometry constants.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{Result, SimError};
