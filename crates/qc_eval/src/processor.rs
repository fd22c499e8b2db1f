//! The evaluator: owns variable bindings and exposes the operations every
//! `Command::eval` (in `qc_lang`) delegates to.

use crate::value::Value;
use crate::{builtins, ops};
use qc_base::{Error, Result, SourceContext, Symbol};
use std::collections::HashMap;

/// Per-invocation evaluator state. Variables are keyed by the `Symbol`
/// the compiler already interned the identifier to, not by `String` —
/// giving `qc_base::Interner` a real call site and avoiding repeated string
/// hashing on every variable reference.
#[derive(Default)]
pub struct Processor {
    variables: HashMap<Symbol, Value>,
}

impl Processor {
    pub fn new() -> Self {
        Processor::default()
    }

    /// `Int -> Matrix(ketBase(v))`.
    pub fn int2_ket(&self, source: &SourceContext, v: Value) -> Result<Value> {
        ops::int2_ket(source, v)
    }

    /// `Int -> Int` (identity), `Complex -> conjugate`, `Matrix -> dagger`.
    pub fn dagger(&self, source: &SourceContext, v: Value) -> Result<Value> {
        ops::dagger(source, v)
    }

    /// Sort-preserving negation.
    pub fn neg(&self, source: &SourceContext, v: Value) -> Result<Value> {
        ops::neg(source, v)
    }

    /// Stores `v` under `symbol`, replacing any prior binding, and returns
    /// a clone rebound to `source` so chained uses (`let a = 1; a;`) see
    /// the assigned value at their own position.
    pub fn assign(&mut self, source: &SourceContext, symbol: Symbol, v: Value) -> Value {
        self.variables.insert(symbol, v);
        self.variables[&symbol].with_context(source.clone())
    }

    /// Returns a context-rebound clone of the binding for `symbol`, or an
    /// exec error naming `display_name` if unbound.
    pub fn retrieve_var(&self, source: &SourceContext, symbol: Symbol, display_name: &str) -> Result<Value> {
        self.variables
            .get(&symbol)
            .map(|v| v.with_context(source.clone()))
            .ok_or_else(|| Error::exec(source.clone(), format!("Undefined variable {display_name}")))
    }

    /// Empties the variable map; returns `Int(0)`.
    pub fn clear(&mut self, source: &SourceContext) -> Value {
        self.variables.clear();
        Value::Int(0, source.clone())
    }

    /// Dispatches through the builtin function registry.
    pub fn call_function(&self, name: &str, source: &SourceContext, args: &[Value]) -> Result<Value> {
        builtins::call(name, source, args)
    }

    /// Both operands must be `Matrix`; returns their Kronecker product.
    pub fn cross(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::cross(source, l, r)
    }

    /// The `.` multiply (zero-pad extension on `Matrix x Matrix`).
    pub fn mul(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::mul(source, l, r)
    }

    /// The `*` multiply (identity-cross extension on `Matrix x Matrix`).
    pub fn mul_star(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::mul_star(source, l, r)
    }

    pub fn div(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::div(source, l, r)
    }

    pub fn add(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::add(source, l, r)
    }

    pub fn sub(&self, source: &SourceContext, l: Value, r: Value) -> Result<Value> {
        ops::sub(source, l, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_base::Interner;

    fn ctx() -> SourceContext {
        SourceContext::new("x", "x", 1, 0)
    }

    #[test]
    fn assign_then_retrieve_sees_stored_value() {
        let mut interner = Interner::new();
        let sym = interner.intern("a");
        let mut proc = Processor::new();
        proc.assign(&ctx(), sym, Value::Int(7, ctx()));
        let got = proc.retrieve_var(&ctx(), sym, "a").unwrap();
        assert_eq!(got.as_int(), Some(7));
    }

    #[test]
    fn retrieve_var_reports_undefined_variable_by_name() {
        let mut interner = Interner::new();
        let sym = interner.intern("unbound");
        let proc = Processor::new();
        let err = proc.retrieve_var(&ctx(), sym, "unbound").unwrap_err();
        assert!(err.to_string().contains("Undefined variable unbound"));
    }

    #[test]
    fn clear_empties_bindings_and_returns_zero() {
        let mut interner = Interner::new();
        let sym = interner.intern("a");
        let mut proc = Processor::new();
        proc.assign(&ctx(), sym, Value::Int(1, ctx()));
        let cleared = proc.clear(&ctx());
        assert_eq!(cleared.as_int(), Some(0));
        let err = proc.retrieve_var(&ctx(), sym, "a").unwrap_err();
        assert!(err.to_string().contains("Undefined variable a"));
    }

    #[test]
    fn reassigning_replaces_prior_binding() {
        let mut interner = Interner::new();
        let sym = interner.intern("a");
        let mut proc = Processor::new();
        proc.assign(&ctx(), sym, Value::Int(1, ctx()));
        proc.assign(&ctx(), sym, Value::Int(2, ctx()));
        let got = proc.retrieve_var(&ctx(), sym, "a").unwrap();
        assert_eq!(got.as_int(), Some(2));
    }
}
