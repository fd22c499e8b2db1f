//! `qc` - standalone binary.
//!
//! Thin wrapper around [`qc_cli::run_cli`]; all interpretation logic lives
//! in the library crate so it stays testable without spawning a subprocess.

fn main() {
    std::process::exit(qc_cli::run_cli());
}
