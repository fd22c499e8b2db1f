//! Argument parsing for the `qc` interpreter.

use clap::Parser;
use std::path::PathBuf;

/// Interprets a `qc` source file, printing each statement's value.
///
/// Disables clap's automatic `-V` so `--version` keeps the lowercase `-v`
/// this language's flag surface specifies; the flag itself is declared below.
#[derive(Parser)]
#[command(name = "qc", disable_version_flag = true)]
#[command(about = "Interpreter for the qc quantum-computation language", long_about = None)]
pub struct Cli {
    /// Source file to interpret.
    #[arg(short, long, default_value = "./program.qc")]
    pub file: PathBuf,

    /// Print the compiled form of each statement before evaluating it.
    #[arg(short, long)]
    pub dump: bool,

    /// Print version information and exit.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}
