//! restep CLI — converts recorded waveform traces into replayable test
//! harnesses.
//!
//! Provides `restep gen` for generating a harness from a VCD trace (with an
//! optional netlist for authoritative input classification) and
//! `restep check` for validating a generated instruction data file.

#![warn(missing_docs)]

mod check;
mod gen;
mod template;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use restep_config::{EncodingKind, HarnessStyle};

/// restep — replay recorded circuit traces as test harnesses.
#[derive(Parser, Debug)]
#[command(name = "restep", version, about = "Waveform trace to test harness converter")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `restep.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a test harness from a recorded trace.
    Gen(GenArgs),
    /// Validate an instruction data file.
    Check(CheckArgs),
}

/// Arguments for the `restep gen` subcommand.
#[derive(Parser, Debug)]
pub struct GenArgs {
    /// Input trace file (`.vcd`, or `.vcd.gz` for gzip-compressed traces).
    pub trace: String,

    /// Output harness source file path.
    pub output: String,

    /// Netlist file authoritatively labeling circuit inputs. Without it,
    /// inputs are guessed from the signal naming convention.
    #[arg(short, long)]
    pub netlist: Option<String>,

    /// Override the module name (default: inferred from the netlist file
    /// stem or the trace's root scope).
    #[arg(long)]
    pub top: Option<String>,

    /// Harness flavor to generate.
    #[arg(long, value_enum)]
    pub style: Option<StyleOpt>,

    /// Instruction encoding to produce.
    #[arg(long, value_enum)]
    pub encoding: Option<EncodingOpt>,

    /// Embed this source file in the harness instead of importing the
    /// module's package (interp style only).
    #[arg(long)]
    pub dut: Option<String>,

    /// Reset cycles applied before replay begins (stepped style only).
    #[arg(long)]
    pub reset_cycles: Option<u32>,
}

/// Arguments for the `restep check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Instruction data file to validate.
    pub file: String,

    /// Output format for the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Harness flavor selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StyleOpt {
    /// Stepped HW-I/O tester subclass (bare decimal values).
    Stepped,
    /// Circuit-interpreter test spec (`BigInt` literal values).
    Interp,
}

impl From<StyleOpt> for HarnessStyle {
    fn from(opt: StyleOpt) -> Self {
        match opt {
            StyleOpt::Stepped => HarnessStyle::Stepped,
            StyleOpt::Interp => HarnessStyle::Interp,
        }
    }
}

/// Instruction encoding selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EncodingOpt {
    /// Instructions inline in the harness body.
    Inline,
    /// Instructions in a side-car data file.
    DataFile,
}

impl From<EncodingOpt> for EncodingKind {
    fn from(opt: EncodingOpt) -> Self {
        match opt {
            EncodingOpt::Inline => EncodingKind::Inline,
            EncodingOpt::DataFile => EncodingKind::DataFile,
        }
    }
}

/// Summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Gen(ref args) => gen::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
