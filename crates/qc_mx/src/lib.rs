//! # qc-mx
//!
//! Complex-valued dense matrix kernel: element-wise vector primitives, the
//! `Matrix` type with its shape-polymorphic operators, and the quantum gate
//! constructors (`I,X,Y,Z,H,S,T,CNOT,SWAP,CCNOT`, `qubit0`, `qubit1`) built
//! on top of a generic bit-permutation → state-permutation → sandwich
//! construction.
//!
//! This crate has no knowledge of the `qc` language's grammar, tokens, or
//! evaluator — it is pure numerics over `num_complex::Complex64`.

pub mod fmt;
pub mod gates;
pub mod matrix;
pub mod vector;

pub use fmt::{fmt_complex, write_bra, write_ket, write_matrix};
pub use matrix::{Matrix, MxError, MxResult};

/// A double-precision complex number, the scalar unit of the whole kernel.
pub type C64 = num_complex::Complex64;
