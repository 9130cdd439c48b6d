//! Command-line driver for the rvpipe core.
//!
//! This binary provides two entry points:
//! 1. **Run:** Build the core from a JSON config (or defaults), hold reset, run the
//!    cycle budget, and print the run summary with the final GPIO and UART state.
//! 2. **Disassemble:** Write a word image as a `pc,word,asm` CSV listing.
//!
//! Logging goes through `tracing`; set `RUST_LOG` to filter, or pass `--trace` to
//! see every retired instruction and per-cycle bus record.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvpipe_core::common::SimError;
use rvpipe_core::common::constants::DEFAULT_LANE_DEPTH;
use rvpipe_core::config::{Config, ImageSource};
use rvpipe_core::isa::disasm::write_listing;
use rvpipe_core::sim::loader;
use rvpipe_core::sim::{LogSink, Testbench};

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Cycle-stepped 3-stage RV32I pipeline core",
    long_about = "Run the core testbench or disassemble a memory image.\n\nExamples:\n  rvpipe run\n  rvpipe run --config sim.json --cycles 5000\n  rvpipe run --imem-words prog.hex --gpio-in 0xc --trace\n  rvpipe disasm prog.hex -o prog.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reset the core, run it, and print the run summary.
    Run {
        /// JSON configuration file (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget after reset is released.
        #[arg(long)]
        cycles: Option<u64>,

        /// Load instruction memory from a single 32-bit word image.
        #[arg(long)]
        imem_words: Option<PathBuf>,

        /// Level driven on the general-purpose input pins.
        #[arg(long, value_parser = parse_u8)]
        gpio_in: Option<u8>,

        /// Log retired instructions and per-cycle bus records.
        #[arg(long)]
        trace: bool,
    },

    /// Disassemble a 32-bit word image.
    Disasm {
        /// Word image to disassemble.
        file: PathBuf,

        /// Address of the first word.
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        start_addr: u32,

        /// CSV output path (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_logging(trace);

    let result = match cli.command {
        Commands::Run {
            config,
            cycles,
            imem_words,
            gpio_in,
            trace,
        } => cmd_run(config, cycles, imem_words, gpio_in, trace),
        Commands::Disasm {
            file,
            start_addr,
            output,
        } => cmd_disasm(&file, start_addr, output.as_deref()),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

/// Installs the log subscriber; `RUST_LOG` wins over the default level.
fn init_logging(trace: bool) {
    let default = if trace { "rvpipe_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the testbench and prints the summary.
///
/// Exits with 1 when the run ended on an access fault, 0 otherwise.
fn cmd_run(
    config_path: Option<PathBuf>,
    cycles: Option<u64>,
    imem_words: Option<PathBuf>,
    gpio_in: Option<u8>,
    trace: bool,
) -> Result<i32, SimError> {
    let mut config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    if let Some(cycles) = cycles {
        config.general.cycles = cycles;
    }
    if let Some(path) = imem_words {
        config.memory.imem = ImageSource::Words(path);
    }
    if let Some(level) = gpio_in {
        config.pins.gpio_in = level;
    }
    config.validate()?;
    tracing::debug!(?config, "effective configuration");

    let mut bench = Testbench::from_config(&config)?;
    if trace {
        bench.add_sink(Box::new(LogSink));
    }

    let summary = bench.run();
    println!("{summary}");

    if summary.fault.is_some() {
        bench.core().dump_state();
        return Ok(1);
    }
    Ok(0)
}

/// Writes the CSV listing of a word image to `output`, or stdout.
fn cmd_disasm(path: &Path, start_addr: u32, output: Option<&Path>) -> Result<i32, SimError> {
    let words = loader::read_word_image(path, DEFAULT_LANE_DEPTH)?;
    let written = match output {
        Some(out_path) => File::create(out_path)
            .and_then(|file| write_listing(&mut BufWriter::new(file), &words, start_addr))
            .map_err(|source| SimError::Output {
                path: out_path.to_path_buf(),
                source,
            }),
        None => write_listing(&mut io::stdout().lock(), &words, start_addr).map_err(|source| {
            SimError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            }
        }),
    };
    written?;
    Ok(0)
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
fn parse_u32(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{text}': {e}"))
}

fn parse_u8(text: &str) -> Result<u8, String> {
    let value = parse_u32(text)?;
    u8::try_from(value).map_err(|_| format!("'{text}' does not fit in 8 bits"))
}
