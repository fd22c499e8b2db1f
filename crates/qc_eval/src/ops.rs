//! Operator dispatch, as a direct match on the argument sort(s).
//!
//! The reference implementation builds a chain-of-responsibility object per
//! operator, registering one handler per argument-type tuple and falling
//! through a chain of `ChainUnaryOperator`/`ChainBinaryOperator` links to a
//! terminal error link. A match on `(left.sort(), right.sort())` is
//! equivalent and clearer, so that's what every function here does. Arm
//! ordering mirrors the reference's registration order (Matrix x Matrix
//! first, scalars last) even though a `match` doesn't actually care about
//! order for disjoint patterns — it keeps the two readable side by side.

use crate::value::Value;
use qc_base::{Error, Result, SourceContext};
use qc_mx::{Matrix, C64};

fn mx_err(source: &SourceContext, e: qc_mx::MxError) -> Error {
    Error::exec(source.clone(), e.to_string())
}

fn unexpected1(source: &SourceContext, v: &Value) -> Error {
    Error::exec(source.clone(), format!("Unexpected argument {}", v.sort()))
}

fn unexpected2(source: &SourceContext, l: &Value, r: &Value) -> Error {
    Error::exec(source.clone(), format!("Unexpected arguments {}, {}", l.sort(), r.sort()))
}

fn int_to_c64(i: i32) -> C64 {
    C64::new(i as f64, 0.0)
}

/// `Int -> Int` (identity), `Complex -> conjugate`, `Matrix -> dagger`.
pub fn dagger(source: &SourceContext, v: Value) -> Result<Value> {
    match v {
        Value::Int(i, _) => Ok(Value::Int(i, source.clone())),
        Value::Complex(c, _) => Ok(Value::Complex(c.conj(), source.clone())),
        Value::Matrix(m, _) => Ok(Value::Matrix(m.dagger(), source.clone())),
        other => Err(unexpected1(source, &other)),
    }
}

/// Sort-preserving negation.
pub fn neg(source: &SourceContext, v: Value) -> Result<Value> {
    match v {
        Value::Int(i, _) => Ok(Value::Int(-i, source.clone())),
        Value::Complex(c, _) => Ok(Value::Complex(-c, source.clone())),
        Value::Matrix(m, _) => Ok(Value::Matrix(m.neg(), source.clone())),
        other => Err(unexpected1(source, &other)),
    }
}

/// `Int -> Matrix(ketBase(v))`; requires a non-negative integer.
pub fn int2_ket(source: &SourceContext, v: Value) -> Result<Value> {
    match v {
        Value::Int(i, _) if i >= 0 => Ok(Value::Matrix(Matrix::ket_base(i as usize), source.clone())),
        Value::Int(i, _) => Err(Error::exec(source.clone(), format!("Invalid ket index {i}"))),
        other => Err(unexpected1(source, &other)),
    }
}

/// Both operands must be `Matrix`; returns their Kronecker product.
pub fn cross(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Matrix(b, _)) => Ok(Value::Matrix(a.cross(&b), source.clone())),
        (l, r) => Err(unexpected2(source, &l, &r)),
    }
}

/// The `.` multiply: `Matrix x Matrix` via [`Matrix::multiply`] (zero-pad
/// extension), plus scalar scaling and numeric product.
pub fn mul(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Matrix(b, _)) => {
            Ok(Value::Matrix(a.multiply(&b).map_err(|e| mx_err(source, e))?, source.clone()))
        }
        (Value::Matrix(a, _), Value::Complex(c, _)) => Ok(Value::Matrix(a.scale(c), source.clone())),
        (Value::Matrix(a, _), Value::Int(i, _)) => Ok(Value::Matrix(a.scale(int_to_c64(i)), source.clone())),
        (Value::Complex(a, _), Value::Complex(b, _)) => Ok(Value::Complex(a * b, source.clone())),
        (Value::Complex(a, _), Value::Int(b, _)) => Ok(Value::Complex(a * int_to_c64(b), source.clone())),
        (Value::Int(a, _), Value::Complex(b, _)) => Ok(Value::Complex(int_to_c64(a) * b, source.clone())),
        (Value::Int(a, _), Value::Int(b, _)) => Ok(Value::Int(a * b, source.clone())),
        (l, r) => Err(unexpected2(source, &l, &r)),
    }
}

/// The `*` multiply: identical to [`mul`] except `Matrix x Matrix` uses
/// [`Matrix::multiply_star`] (identity-cross extension). Distinct from
/// `mul`; both are load-bearing (spec.md §9 point 4).
pub fn mul_star(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Matrix(b, _)) => {
            Ok(Value::Matrix(a.multiply_star(&b).map_err(|e| mx_err(source, e))?, source.clone()))
        }
        (l, r) => mul(source, l, r),
    }
}

/// `Int / Int` stays `Int` when exact, else becomes `Complex`. Matrix /
/// Matrix is not defined. Division by zero is an exec error.
pub fn div(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Complex(c, _)) => Ok(Value::Matrix(a.div_scalar(c), source.clone())),
        (Value::Matrix(a, _), Value::Int(i, _)) => Ok(Value::Matrix(a.div_scalar(int_to_c64(i)), source.clone())),
        (Value::Complex(a, _), Value::Complex(b, _)) => Ok(Value::Complex(a / b, source.clone())),
        (Value::Complex(a, _), Value::Int(b, _)) => Ok(Value::Complex(a / int_to_c64(b), source.clone())),
        (Value::Int(a, _), Value::Complex(b, _)) => Ok(Value::Complex(int_to_c64(a) / b, source.clone())),
        (Value::Int(a, _), Value::Int(b, _)) => {
            if b == 0 {
                return Err(Error::exec(source.clone(), "Division by zero".to_string()));
            }
            if a % b == 0 {
                Ok(Value::Int(a / b, source.clone()))
            } else {
                Ok(Value::Complex(int_to_c64(a) / int_to_c64(b), source.clone()))
            }
        }
        (l, r) => Err(unexpected2(source, &l, &r)),
    }
}

/// `Matrix+-Matrix`, `Complex+-Complex`, `Complex+-Int`/`Int+-Complex`,
/// `Int+-Int` (stays `Int`). Matrix +- scalar is not defined.
pub fn add(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Matrix(b, _)) => Ok(Value::Matrix(a.add(&b), source.clone())),
        (Value::Complex(a, _), Value::Complex(b, _)) => Ok(Value::Complex(a + b, source.clone())),
        (Value::Complex(a, _), Value::Int(b, _)) => Ok(Value::Complex(a + int_to_c64(b), source.clone())),
        (Value::Int(a, _), Value::Complex(b, _)) => Ok(Value::Complex(int_to_c64(a) + b, source.clone())),
        (Value::Int(a, _), Value::Int(b, _)) => Ok(Value::Int(a + b, source.clone())),
        (l, r) => Err(unexpected2(source, &l, &r)),
    }
}

pub fn sub(source: &SourceContext, l: Value, r: Value) -> Result<Value> {
    match (l, r) {
        (Value::Matrix(a, _), Value::Matrix(b, _)) => Ok(Value::Matrix(a.sub(&b), source.clone())),
        (Value::Complex(a, _), Value::Complex(b, _)) => Ok(Value::Complex(a - b, source.clone())),
        (Value::Complex(a, _), Value::Int(b, _)) => Ok(Value::Complex(a - int_to_c64(b), source.clone())),
        (Value::Int(a, _), Value::Complex(b, _)) => Ok(Value::Complex(int_to_c64(a) - b, source.clone())),
        (Value::Int(a, _), Value::Int(b, _)) => Ok(Value::Int(a - b, source.clone())),
        (l, r) => Err(unexpected2(source, &l, &r)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SourceContext {
        SourceContext::new("x", "x", 1, 0)
    }

    #[test]
    fn dagger_conjugates_complex() {
        let v = dagger(&ctx(), Value::Complex(C64::new(1.0, 2.0), ctx())).unwrap();
        match v {
            Value::Complex(c, _) => assert_eq!(c, C64::new(1.0, -2.0)),
            _ => panic!("expected complex"),
        }
    }

    #[test]
    fn int_div_int_exact_stays_int() {
        let v = div(&ctx(), Value::Int(6, ctx()), Value::Int(2, ctx())).unwrap();
        assert_eq!(v.as_int(), Some(3));
    }

    #[test]
    fn int_div_int_inexact_becomes_complex() {
        let v = div(&ctx(), Value::Int(3, ctx()), Value::Int(2, ctx())).unwrap();
        match v {
            Value::Complex(c, _) => assert_eq!(c, C64::new(1.5, 0.0)),
            _ => panic!("expected complex"),
        }
    }

    #[test]
    fn div_by_zero_is_exec_error() {
        let err = div(&ctx(), Value::Int(1, ctx()), Value::Int(0, ctx())).unwrap_err();
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn add_matrix_matrix_zero_pads() {
        let a = Value::Matrix(Matrix::new(1, 1, vec![C64::new(1.0, 0.0)]).unwrap(), ctx());
        let b = Value::Matrix(Matrix::new(2, 1, vec![C64::new(0.0, 0.0), C64::new(1.0, 0.0)]).unwrap(), ctx());
        let sum = add(&ctx(), a, b).unwrap();
        assert_eq!(sum.as_matrix().unwrap().rows(), 2);
    }

    #[test]
    fn add_matrix_scalar_is_unexpected_arguments() {
        let a = Value::Matrix(Matrix::identity(2), ctx());
        let err = add(&ctx(), a, Value::Int(1, ctx())).unwrap_err();
        assert!(err.to_string().contains("Unexpected arguments matrix, integer"));
    }

    #[test]
    fn cross_requires_both_matrices() {
        let err = cross(&ctx(), Value::Int(1, ctx()), Value::Int(2, ctx())).unwrap_err();
        assert!(err.to_string().contains("Unexpected arguments integer, integer"));
    }
}
