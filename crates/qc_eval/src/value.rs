//! The dynamically-typed value domain: `Int | Complex | Matrix | List`.

use qc_base::SourceContext;
use qc_mx::{Matrix, C64};

/// A runtime value, always carrying the source position it was produced
/// from so errors from deep inside an expression point at the offending
/// subterm.
///
/// `Clone` is derived uniformly, including for `List` — unlike the
/// reference implementation's `ListValue`, which forbids cloning to avoid a
/// double-free under exclusive pointer ownership. Rust's `Clone` deep-clones
/// a `Vec<Value>` with no such hazard, and `List` values are never stored in
/// a variable binding by construction, so the restriction has no work to do
/// here.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i32, SourceContext),
    Complex(C64, SourceContext),
    Matrix(Matrix, SourceContext),
    List(Vec<Value>, SourceContext),
}

impl Value {
    /// The human-readable sort name used in dispatch error messages
    /// (`"Unexpected argument <sort>"`).
    pub fn sort(&self) -> &'static str {
        match self {
            Value::Int(..) => "integer",
            Value::Complex(..) => "complex",
            Value::Matrix(..) => "matrix",
            Value::List(..) => "list",
        }
    }

    pub fn context(&self) -> &SourceContext {
        match self {
            Value::Int(_, ctx) => ctx,
            Value::Complex(_, ctx) => ctx,
            Value::Matrix(_, ctx) => ctx,
            Value::List(_, ctx) => ctx,
        }
    }

    /// Returns a copy of this value rebound to `ctx`, leaving the payload
    /// untouched. `retrieveVar` and `assign` use this so a variable's
    /// evaluated value keeps pointing at the use site, not its definition.
    pub fn with_context(&self, ctx: SourceContext) -> Value {
        match self {
            Value::Int(i, _) => Value::Int(*i, ctx),
            Value::Complex(c, _) => Value::Complex(*c, ctx),
            Value::Matrix(m, _) => Value::Matrix(m.clone(), ctx),
            Value::List(items, _) => Value::List(items.clone(), ctx),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i, _) => Some(*i),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m, _) => Some(m),
            _ => None,
        }
    }
}
