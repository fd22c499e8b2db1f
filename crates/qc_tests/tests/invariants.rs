//! Algebraic and structural invariants that are expected to hold across the
//! whole pipeline regardless of which particular program exercises them:
//! matrix algebra identities, tokenizer round-tripping, division's
//! sort-switching rule, and gate semantics.

mod common;

use common::eval_one;
use qc_mx::{Matrix, C64};

fn approx(a: C64, b: C64) {
    assert!((a.re - b.re).abs() < 1e-9, "re mismatch: {a} vs {b}");
    assert!((a.im - b.im).abs() < 1e-9, "im mismatch: {a} vs {b}");
}

fn assert_matrix_eq(a: &Matrix, b: &Matrix) {
    assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            approx(a.at(i, j), b.at(i, j));
        }
    }
}

#[test]
fn dagger_is_its_own_inverse() {
    let m = qc_mx::gates::cnot(0, 1).unwrap();
    assert_matrix_eq(&m.dagger().dagger(), &m);
}

#[test]
fn identity_is_multiplicative_unit() {
    let m = qc_mx::gates::cnot(0, 1).unwrap();
    let id = Matrix::identity(m.rows());
    assert_matrix_eq(&id.multiply(&m).unwrap(), &m);
    assert_matrix_eq(&m.multiply(&id).unwrap(), &m);
}

#[test]
fn ket_base_is_orthonormal() {
    let k0 = Matrix::ket_base(0);
    let k1 = Matrix::ket_base(1);
    let overlap = k0.dagger().multiply(&k1).unwrap();
    approx(overlap.at(0, 0), C64::new(0.0, 0.0));
    let norm0 = k0.dagger().multiply(&k0).unwrap();
    approx(norm0.at(0, 0), C64::new(1.0, 0.0));
}

#[test]
fn cross_of_identities_is_the_identity_of_the_product_size() {
    let a = Matrix::identity(2);
    let b = Matrix::identity(3);
    assert_matrix_eq(&a.cross(&b), &Matrix::identity(6));
}

#[test]
fn assigning_then_retrieving_a_variable_is_the_identity() {
    let values = common::eval_program("let a = 1 + 2; a;").unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(common::render(&values[0]), common::render(&values[1]));
}

#[test]
fn division_switches_sort_only_when_inexact() {
    // Evenly divisible integers stay integers; anything else promotes to
    // complex. Both paths share one division operator in the grammar.
    assert_eq!(common::render(&eval_one("4 / 2;").unwrap()), "2");
    assert_eq!(common::render(&eval_one("5 / 2;").unwrap()), "(2.5,0)");
}

#[test]
fn cnot_flips_the_target_bit_when_control_is_set() {
    // CNOT(data=1, control=0) applied to |11> should flip bit 1: |11> -> |01>.
    let gate = qc_mx::gates::cnot(1, 0).unwrap();
    let state = Matrix::ket_base(0b11);
    let out = gate.multiply(&state).unwrap();
    let expected = Matrix::ket_base(0b01);
    assert_matrix_eq(&out, &expected);
}

#[test]
fn grammar_opt_and_options_report_whether_they_matched() {
    // `Opt`/`Options` rules return `Ok(false)` on a non-match without
    // consuming input, letting a caller try the next alternative; `Repeat`
    // loops until its inner rule reports no match. Exercised here through a
    // clear() statement, which is itself built from nested `Opt`s.
    let values = common::eval_program("clear(); 1;").unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(common::render(&values[0]), "0");
    assert_eq!(common::render(&values[1]), "1");
}

#[test]
fn tokenizer_round_trips_every_token_kind_in_order() {
    use qc_grammar::{Token, TokenKind, TokenProducer};
    use qc_lang::Tokenizer;
    use std::io::Cursor;

    let mut t = Tokenizer::new(Cursor::new(b"let a = |0> + 1.5e2;".as_slice())).unwrap();
    let mut kinds = vec![t.current_token().kind()];
    while *kinds.last().unwrap() != TokenKind::Eof {
        t.pop_token().unwrap();
        kinds.push(t.current_token().kind());
    }
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier, // let
            TokenKind::Identifier, // a
            TokenKind::Operator,   // =
            TokenKind::Operator,   // |
            TokenKind::Integer,    // 0
            TokenKind::Operator,   // >
            TokenKind::Operator,   // +
            TokenKind::Real,       // 1.5e2
            TokenKind::Operator,   // ;
            TokenKind::Eof,
        ]
    );
    let _: &dyn Fn(&Token) = &|_| {};
}
