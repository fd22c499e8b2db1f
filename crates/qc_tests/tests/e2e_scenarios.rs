//! End-to-end input -> output scenarios for the `qc` pipeline, covering
//! arithmetic precedence, division sort-switching, kets, bras, assignment,
//! gate construction, and the error-reporting paths (parse-time arity,
//! exec-time undefined variable, exec-time gate argument validation).

mod common;

use common::{eval_one, eval_program, render};

#[test]
fn integer_addition() {
    let v = eval_one("1+2;").unwrap();
    assert_eq!(render(&v), "3");
}

#[test]
fn inexact_division_becomes_complex() {
    let v = eval_one("3/2;").unwrap();
    assert_eq!(render(&v), "(1.5,0)");
}

#[test]
fn exact_division_stays_integer() {
    let v = eval_one("6/2;").unwrap();
    assert_eq!(render(&v), "3");
}

#[test]
fn ket_sum_is_a_four_row_column_vector() {
    let v = eval_one("|0> + |3>;").unwrap();
    let m = v.as_matrix().unwrap();
    assert_eq!((m.rows(), m.cols()), (4, 1));
    let ones: Vec<f64> = (0..4).map(|i| m.at(i, 0).re).collect();
    assert_eq!(ones, vec![1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn bra_zero_times_ket_i_is_one_over_root_two() {
    // A bra times a ket contracts to a 1x1 matrix: the value stays a
    // `Value::Matrix`, but renders identically to a scalar (see
    // `qc_mx::fmt`'s shape dispatch), matching the original's own
    // `operator<<` treatment of 1x1 matrices.
    let v = eval_one("<0| * |i>;").unwrap();
    let m = v.as_matrix().unwrap();
    assert_eq!((m.rows(), m.cols()), (1, 1));
    assert!((m.at(0, 0).re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    assert_eq!(m.at(0, 0).im, 0.0);
}

#[test]
fn assigned_ket_plus_is_reported_identically_on_retrieval() {
    let values = eval_program("let a = |+>; a;").unwrap();
    assert_eq!(values.len(), 2);
    for v in &values {
        let m = v.as_matrix().unwrap();
        assert!((m.at(0, 0).re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((m.at(1, 0).re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}

#[test]
fn cnot_builds_the_four_by_four_gate() {
    let v = eval_one("CNOT(0,1);").unwrap();
    let m = v.as_matrix().unwrap();
    assert_eq!((m.rows(), m.cols()), (4, 4));
}

#[test]
fn cnot_with_duplicate_indices_is_an_exec_error() {
    let err = eval_one("CNOT(0,0);").unwrap_err();
    assert!(err.to_string().contains("Expected all different indices [0, 0]"));
}

#[test]
fn wrong_arity_call_is_a_parse_error() {
    let err = eval_one("sqrt(1,2);").unwrap_err();
    assert!(err.to_string().contains("sqrt requires 1 arguments: actual (2)"));
}

#[test]
fn unbound_variable_is_an_exec_error() {
    let err = eval_one("a;").unwrap_err();
    assert!(err.to_string().contains("Undefined variable a"));
}
