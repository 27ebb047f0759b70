//! Pipeline simulator CLI.
//!
//! This binary loads a binary-text program and performs:
//! 1. **Disassembly:** Writes `<prefix>_dis.txt` with one line per word.
//! 2. **Simulation:** Runs the pipeline to completion and writes the cycle trace
//!    to `<prefix>_pipeline.txt` (or `<prefix>_pipeline.jsonl` with `--format json`).
//! 3. **Statistics:** Optionally prints run statistics to stdout.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pipesim_core::config::Config;
use pipesim_core::sim::loader;
use pipesim_core::sim::trace::{JsonTrace, TextTrace, TraceSink};
use pipesim_core::{Result, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-level MIPS-style pipeline and cache simulator",
    long_about = "Disassemble a binary-text program and simulate it on a five-stage pipeline with a 4-set, 2-way write-back cache.\n\nExamples:\n  pipesim -i sample.txt -o out\n  pipesim -i sample.txt -o out --format json --stats"
)]
struct Cli {
    /// Program file: one 32-digit binary word per line.
    #[arg(short, long)]
    input: PathBuf,

    /// Output prefix; `_dis.txt` and `_pipeline.txt` are appended.
    #[arg(short, long)]
    output: String,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cycle trace format.
    #[arg(long, value_enum, default_value_t = TraceFormat::Text)]
    format: TraceFormat,

    /// Print run statistics when the simulation ends.
    #[arg(long)]
    stats: bool,

    /// Log every stage outcome (same as `RUST_LOG=debug`).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TraceFormat {
    /// Human-readable cycle blocks.
    Text,
    /// One JSON object per cycle.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the program, writes the disassembly, then simulates and writes the trace.
fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.trace_stages |= cli.verbose;

    let program = loader::load_program(&cli.input, &config)?;
    if !program.has_halt() {
        warn!("program has no BREAK; the run will end when fetch leaves the image");
    }

    let dis_path = format!("{}_dis.txt", cli.output);
    fs::write(&dis_path, program.listing())?;
    info!(path = %dis_path, "disassembly written");

    let mut sim = Simulator::new(&program, &config)?;
    let (trace_path, mut sink): (String, Box<dyn TraceSink>) = match cli.format {
        TraceFormat::Text => {
            let path = format!("{}_pipeline.txt", cli.output);
            let out = BufWriter::new(File::create(&path)?);
            (path, Box::new(TextTrace::new(out)))
        }
        TraceFormat::Json => {
            let path = format!("{}_pipeline.jsonl", cli.output);
            let out = BufWriter::new(File::create(&path)?);
            (path, Box::new(JsonTrace::new(out)))
        }
    };

    let stats = sim.run(sink.as_mut())?;
    info!(path = %trace_path, cycles = stats.cycles, "trace written");
    if cli.stats {
        stats.print();
    }
    Ok(())
}
