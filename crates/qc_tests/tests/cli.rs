//! CLI-level exit-code behavior, driven as a real subprocess.
//!
//! `qc` is small enough that a hand-rolled `std::process::Command` check
//! covers what's needed here; no external test-harness crate is warranted
//! for a single binary with four flags.

use std::io::Write;
use std::process::Command;

fn qc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_qc"))
}

#[test]
fn help_flag_exits_zero() {
    let output = qc_bin().arg("--help").output().expect("failed to run qc");
    assert!(output.status.success());
}

#[test]
fn version_flag_exits_zero() {
    let output = qc_bin().arg("--version").output().expect("failed to run qc");
    assert!(output.status.success());
}

#[test]
fn malformed_program_exits_nonzero_with_error_on_stderr() {
    let file = tempfile_with("a;");
    let output = qc_bin()
        .arg("--file")
        .arg(file.path())
        .output()
        .expect("failed to run qc");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Undefined variable a"), "stderr was: {stderr}");
}

#[test]
fn valid_program_exits_zero_and_prints_values() {
    let file = tempfile_with("1 + 2;");
    let output = qc_bin()
        .arg("--file")
        .arg(file.path())
        .output()
        .expect("failed to run qc");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("value: 3"), "stdout was: {stdout}");
}

/// A minimal scratch source file, removed on drop. Avoids pulling in
/// `tempfile` for four lines' worth of behavior.
struct ScratchFile {
    path: std::path::PathBuf,
}

impl ScratchFile {
    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn tempfile_with(contents: &str) -> ScratchFile {
    let mut path = std::env::temp_dir();
    path.push(format!("qc_cli_test_{}_{}.qc", std::process::id(), contents.len()));
    let mut f = std::fs::File::create(&path).expect("create scratch file");
    f.write_all(contents.as_bytes()).expect("write scratch file");
    ScratchFile { path }
}
