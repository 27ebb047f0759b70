//! Program loader.
//!
//! Reads program images written as text, one 32-digit binary word per line.
//! Characters after the 32nd on a line are ignored and blank lines are skipped.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::{Result, SimError};
use crate::config::Config;
use crate::sim::program::Program;

/// Number of binary digits per word.
const WORD_DIGITS: usize = 32;

/// Parses the binary-text format into raw words.
///
/// # Errors
///
/// [`SimError::MalformedWord`] for a line that does not start with 32 binary digits.
///
/// # Examples
///
/// ```
/// use pipesim_core::sim::loader::parse_words;
///
/// let words = parse_words("10000000000000000000000000001101\r\n").unwrap();
/// assert_eq!(words, vec![0x8000_000D]);
/// ```
pub fn parse_words(text: &str) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let malformed = || SimError::MalformedWord {
            line: i + 1,
            content: trimmed.to_string(),
        };
        let digits = trimmed.get(..WORD_DIGITS).ok_or_else(malformed)?;
        if !digits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(malformed());
        }
        words.push(u32::from_str_radix(digits, 2).map_err(|_| malformed())?);
    }
    Ok(words)
}

/// Parses program text and places it at the configured load address.
pub fn load_program_str(text: &str, config: &Config) -> Result<Program> {
    let words = parse_words(text)?;
    Ok(Program::from_words(&words, config.memory.load_address))
}

/// Reads a program file and places it at the configured load address.
///
/// # Errors
///
/// I/O errors reading `path` and [`SimError::MalformedWord`] for bad lines.
pub fn load_program(path: impl AsRef<Path>, config: &Config) -> Result<Program> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let program = load_program_str(&text, config)?;
    info!(
        path = %path.display(),
        instructions = program.instructions.len(),
        data_words = program.data.len(),
        "program loaded"
    );
    Ok(program)
}
