//! # qc (CLI)
//!
//! Thin driver over [`qc_lang::compile`] and [`qc_eval::Processor`]: reads a
//! source file, compiles it once, then evaluates each top-level statement in
//! turn, printing its value annotated with the source line it came from.
//!
//! Kept as a library + thin `main.rs` the way the teacher splits its own CLI,
//! so the argument-parsing and rendering logic stay unit-testable without a
//! subprocess.

pub mod cli;

use cli::Cli;
use qc_base::{Interner, Result};
use qc_eval::{Processor, Value};
use qc_lang::Command;
use qc_mx::{fmt_complex, write_bra, write_ket, write_matrix, Matrix};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Renders a single value the way the language reports it: a bare scalar for
/// `Int`/`Complex`, Dirac notation for a column or row matrix, and the full
/// cell grid otherwise.
fn render_value(v: &Value) -> String {
    match v {
        Value::Int(i, _) => i.to_string(),
        Value::Complex(c, _) => fmt_complex(*c),
        Value::Matrix(m, _) => render_matrix(m),
        Value::List(items, _) => items.iter().map(render_value).collect::<Vec<_>>().join(", "),
    }
}

fn render_matrix(m: &Matrix) -> String {
    if m.rows() == 1 && m.cols() == 1 {
        fmt_complex(m.at(0, 0))
    } else if m.cols() == 1 {
        write_ket(m)
    } else if m.rows() == 1 {
        write_bra(m)
    } else {
        write_matrix(m)
    }
}

fn run_statement(stm: &Command, proc: &mut Processor, dump: bool) -> Result<()> {
    if dump {
        println!("{stm}");
    }
    let value = stm.eval(proc)?;
    println!("{}", stm.source().render(&format!("value: {}", render_value(&value))));
    Ok(())
}

fn interpret(path: &Path, dump: bool) -> Result<()> {
    let file = File::open(path).map_err(|e| {
        qc_base::Error::exec(
            qc_base::SourceContext::new(path.display().to_string(), "", 0, 0),
            format!("Could not open {}: {e}", path.display()),
        )
    })?;

    log::debug!("qc: interpreting {}", path.display());
    let mut interner = Interner::new();
    let root = qc_lang::compile(BufReader::new(file), &mut interner)?;
    let mut proc = Processor::new();

    let items = match root {
        Command::List { items, .. } => items,
        _ => unreachable!("compile() always produces a List of top-level statements"),
    };
    for stm in &items {
        run_statement(stm, &mut proc, dump)?;
    }
    log::debug!("qc: evaluation complete");
    Ok(())
}

/// Parses CLI arguments and runs the interpreter. Returns the process exit
/// code: `0` on success, `1` if a `qc_base::Error` surfaced (already printed
/// to stderr).
pub fn run_cli() -> i32 {
    env_logger::init();
    let cli = Cli::parse();
    match interpret(&cli.file, cli.dump) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}
