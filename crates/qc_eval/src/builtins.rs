//! The canonical built-in function registry: name, arity, and
//! implementation, in one place. This is the single source of truth both
//! for the evaluator's `callFunction` and for `qc_lang`'s parse-time arity
//! check (`<function>` in the grammar's action table) — `qc_lang` depends on
//! this crate to read it; this crate has no knowledge of `qc_lang` at all.
//!
//! Names and arities match `QU_PROCESSOR_FUNCTIONS` in the reference
//! implementation exactly.

use crate::value::Value;
use qc_base::{Error, Result, SourceContext};
use qc_mx::{gates, Matrix, C64};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The signature every builtin implements: the call-site source context
/// (for error reporting) and the already-evaluated argument list.
pub type BuiltinFn = fn(&SourceContext, &[Value]) -> Result<Value>;

struct BuiltinDef {
    arity: usize,
    func: BuiltinFn,
}

fn registry() -> &'static HashMap<&'static str, BuiltinDef> {
    static REGISTRY: OnceLock<HashMap<&'static str, BuiltinDef>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut m = HashMap::new();
        m.insert("sqrt", BuiltinDef { arity: 1, func: sqrt });
        m.insert("normalise", BuiltinDef { arity: 1, func: normalise });
        m.insert("ary", BuiltinDef { arity: 2, func: ary });
        m.insert("sim", BuiltinDef { arity: 2, func: sim });
        m.insert("eps", BuiltinDef { arity: 2, func: eps });
        m.insert("I", BuiltinDef { arity: 1, func: i_gate });
        m.insert("H", BuiltinDef { arity: 1, func: h_gate });
        m.insert("S", BuiltinDef { arity: 1, func: s_gate });
        m.insert("T", BuiltinDef { arity: 1, func: t_gate });
        m.insert("X", BuiltinDef { arity: 1, func: x_gate });
        m.insert("Y", BuiltinDef { arity: 1, func: y_gate });
        m.insert("Z", BuiltinDef { arity: 1, func: z_gate });
        m.insert("CNOT", BuiltinDef { arity: 2, func: cnot });
        m.insert("SWAP", BuiltinDef { arity: 2, func: swap });
        m.insert("CCNOT", BuiltinDef { arity: 3, func: ccnot });
        m.insert("qubit0", BuiltinDef { arity: 2, func: qubit0 });
        m.insert("qubit1", BuiltinDef { arity: 2, func: qubit1 });
        m
    })
}

/// The arity declared for `name`, if it names a builtin.
pub fn arity_of(name: &str) -> Option<usize> {
    registry().get(name).map(|d| d.arity)
}

/// All builtin names, for building the grammar's `IdIn(function_names)` terminal.
pub fn names() -> impl Iterator<Item = &'static str> {
    registry().keys().copied()
}

/// Looks up and invokes `name` with `args`. Callers (the evaluator) are
/// responsible for having already checked arity at compile time; a wrong
/// arity here is a programming error, not a user-facing one.
pub fn call(name: &str, source: &SourceContext, args: &[Value]) -> Result<Value> {
    let def = registry()
        .get(name)
        .unwrap_or_else(|| panic!("unknown builtin function {name}"));
    (def.func)(source, args)
}

fn mx_err(source: &SourceContext, e: qc_mx::MxError) -> Error {
    Error::exec(source.clone(), e.to_string())
}

fn expect_int(source: &SourceContext, v: &Value) -> Result<i32> {
    v.as_int().ok_or_else(|| Error::exec(source.clone(), format!("Unexpected argument {}", v.sort())))
}

fn expect_int_pair(source: &SourceContext, a: &Value, b: &Value) -> Result<(i32, i32)> {
    match (a.as_int(), b.as_int()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(Error::exec(source.clone(), format!("Unexpected arguments {}, {}", a.sort(), b.sort()))),
    }
}

fn sqrt(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let c = match &args[0] {
        Value::Int(i, _) => C64::new(*i as f64, 0.0),
        Value::Complex(c, _) => *c,
        other => return Err(Error::exec(source.clone(), format!("Unexpected argument {}", other.sort()))),
    };
    Ok(Value::Complex(c.sqrt(), source.clone()))
}

fn normalise(source: &SourceContext, args: &[Value]) -> Result<Value> {
    match &args[0] {
        Value::Int(_, _) => Ok(Value::Int(1, source.clone())),
        Value::Complex(c, _) => Ok(Value::Complex(c / c.norm(), source.clone())),
        Value::Matrix(m, _) => Ok(Value::Matrix(m.clone(), source.clone())),
        other => Err(Error::exec(source.clone(), format!("Unexpected argument {}", other.sort()))),
    }
}

fn ary(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (i, j) = expect_int_pair(source, &args[0], &args[1])?;
    Ok(Value::Matrix(Matrix::ary(i as usize, j as usize), source.clone()))
}

fn sim(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (i, j) = expect_int_pair(source, &args[0], &args[1])?;
    Ok(Value::Matrix(Matrix::sim(i as usize, j as usize), source.clone()))
}

fn eps(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (i, j) = expect_int_pair(source, &args[0], &args[1])?;
    Ok(Value::Matrix(Matrix::eps(i as usize, j as usize), source.clone()))
}

macro_rules! single_qubit_builtin {
    ($name:ident, $gate:path) => {
        fn $name(source: &SourceContext, args: &[Value]) -> Result<Value> {
            let bit = expect_int(source, &args[0])?;
            let gate = $gate(bit as usize).map_err(|e| mx_err(source, e))?;
            Ok(Value::Matrix(gate, source.clone()))
        }
    };
}

single_qubit_builtin!(i_gate, gates::i_gate);
single_qubit_builtin!(h_gate, gates::h_gate);
single_qubit_builtin!(s_gate, gates::s_gate);
single_qubit_builtin!(t_gate, gates::t_gate);
single_qubit_builtin!(x_gate, gates::x_gate);
single_qubit_builtin!(y_gate, gates::y_gate);
single_qubit_builtin!(z_gate, gates::z_gate);

fn cnot(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (data, control) = expect_int_pair(source, &args[0], &args[1])?;
    let gate = gates::cnot(data as usize, control as usize).map_err(|e| mx_err(source, e))?;
    Ok(Value::Matrix(gate, source.clone()))
}

fn swap(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (d0, d1) = expect_int_pair(source, &args[0], &args[1])?;
    let gate = gates::swap(d0 as usize, d1 as usize).map_err(|e| mx_err(source, e))?;
    Ok(Value::Matrix(gate, source.clone()))
}

/// Unlike the other 2-argument builtins, `CCNOT` checks all three of its
/// arguments itself and reports all three sorts in one message, matching
/// the reference's bespoke `ccnotMapper` check.
fn ccnot(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (data, control0, control1) = (&args[0], &args[1], &args[2]);
    match (data.as_int(), control0.as_int(), control1.as_int()) {
        (Some(d), Some(c0), Some(c1)) => {
            let gate = gates::ccnot(d as usize, c0 as usize, c1 as usize).map_err(|e| mx_err(source, e))?;
            Ok(Value::Matrix(gate, source.clone()))
        }
        _ => Err(Error::exec(
            source.clone(),
            format!("Unexpected arguments {}, {}, {}", data.sort(), control0.sort(), control1.sort()),
        )),
    }
}

fn qubit0(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (index, num_qubits) = expect_int_pair(source, &args[0], &args[1])?;
    Ok(Value::Matrix(Matrix::qubit0(index as usize, num_qubits as usize), source.clone()))
}

fn qubit1(source: &SourceContext, args: &[Value]) -> Result<Value> {
    let (index, num_qubits) = expect_int_pair(source, &args[0], &args[1])?;
    Ok(Value::Matrix(Matrix::qubit1(index as usize, num_qubits as usize), source.clone()))
}
