//! Shared test harness: compiles and evaluates `qc` source in-process (no
//! subprocess, no Rust codegen step — `qc` is a tree-walking interpreter
//! end to end, unlike the cross-compiling teacher this corpus also offers).

use qc_base::{Interner, Result};
use qc_eval::{Processor, Value};
use std::io::Cursor;

/// Compiles and evaluates `source`, returning the value of every top-level
/// statement in order.
pub fn eval_program(source: &str) -> Result<Vec<Value>> {
    let mut interner = Interner::new();
    let root = qc_lang::compile(Cursor::new(source.as_bytes()), &mut interner)?;
    let mut proc = Processor::new();
    match root.eval(&mut proc)? {
        Value::List(items, _) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Renders a value the way the scenario table in this crate's tests
/// expresses expected output: bare integers, `(re,im)` tuples for complex
/// numbers. Distinct from `qc_cli`'s Dirac-notation rendering, which is a
/// display concern rather than a test-comparison one.
pub fn render(v: &Value) -> String {
    match v {
        Value::Int(i, _) => i.to_string(),
        Value::Complex(c, _) => format!("({},{})", c.re, c.im),
        Value::Matrix(m, _) => format!("{m:?}"),
        Value::List(items, _) => items.iter().map(render).collect::<Vec<_>>().join(", "),
    }
}

/// Evaluates a single-statement program and returns its one value.
pub fn eval_one(source: &str) -> Result<Value> {
    Ok(eval_program(source)?.into_iter().next().expect("expected at least one statement"))
}
