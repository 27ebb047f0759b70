//! # Program Loading Tests
//!
//! Parsing of the binary-text format and loading from disk.

use std::io::Write;

use pipesim_core::SimError;
use pipesim_core::config::Config;
use pipesim_core::isa::instruction::Operation;
use pipesim_core::sim::loader::{load_program, load_program_str, parse_words};
use tempfile::NamedTempFile;

const ADDI_R1_R0_5: &str = "10100000000000010000000000000101";
const BREAK: &str = "10000000000000000000000000001101";
const SEVEN: &str = "00000000000000000000000000000111";
const MINUS_ONE: &str = "11111111111111111111111111111111";

fn create_temp_program(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn parses_one_word_per_line() {
    let text = format!("{ADDI_R1_R0_5}\n{BREAK}\n");
    assert_eq!(parse_words(&text).unwrap(), vec![0xA001_0005, 0x8000_000D]);
}

#[test]
fn ignores_blank_lines_and_trailing_characters() {
    let text = format!("{ADDI_R1_R0_5}\t# addi\n\n   \r\n{BREAK}   \r\n");
    assert_eq!(parse_words(&text).unwrap(), vec![0xA001_0005, 0x8000_000D]);
}

#[test]
fn short_line_is_malformed() {
    let text = format!("{BREAK}\n0101\n");
    let err = parse_words(&text).unwrap_err();
    assert!(
        matches!(err, SimError::MalformedWord { line: 2, ref content } if content == "0101"),
        "got {err:?}"
    );
}

#[test]
fn non_binary_digit_is_malformed() {
    let text = "1000000000000000000000000000110x\n";
    let err = parse_words(text).unwrap_err();
    assert!(matches!(err, SimError::MalformedWord { line: 1, .. }), "got {err:?}");
}

#[test]
fn words_after_halt_are_data() {
    let text = format!("{ADDI_R1_R0_5}\n{BREAK}\n{SEVEN}\n{MINUS_ONE}\n");
    let program = load_program_str(&text, &Config::default()).unwrap();

    assert_eq!(program.load_address, 96);
    assert_eq!(program.instructions.len(), 2);
    assert_eq!(program.instructions[0].op, Operation::Addi);
    assert_eq!(program.instructions[1].address, 100);
    assert!(program.has_halt());
    assert_eq!(program.data, vec![7, -1]);
    assert_eq!(program.data_start(), 104);
}

#[test]
fn program_without_halt_is_all_instructions() {
    let text = format!("{ADDI_R1_R0_5}\n{SEVEN}\n");
    let program = load_program_str(&text, &Config::default()).unwrap();

    assert!(!program.has_halt());
    assert_eq!(program.instructions.len(), 2);
    assert!(program.data.is_empty());
}

#[test]
fn load_from_file_uses_configured_address() {
    let file = create_temp_program(&format!("{ADDI_R1_R0_5}\n{BREAK}\n{SEVEN}\n"));
    let config = Config::from_json_str(r#"{ "memory": { "load_address": 256 } }"#).unwrap();

    let program = load_program(file.path(), &config).unwrap();

    assert_eq!(program.load_address, 256);
    assert_eq!(program.instructions[1].address, 260);
    assert_eq!(program.data_start(), 264);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_program(dir.path().join("absent.txt"), &Config::default()).unwrap_err();
    assert!(matches!(err, SimError::Io(_)), "got {err:?}");
}
