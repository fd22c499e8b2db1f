//! Fixed base-gate matrices and the gate-factory functions built from them.
//!
//! Every factory here goes through [`Matrix::create_gate`] with a small base
//! matrix, so the only gate-specific knowledge in this module is which base
//! matrix to use — the bit-mapping machinery is shared.

use crate::matrix::{Matrix, MxResult};
use crate::C64;
use std::sync::OnceLock;

fn half_sqrt2() -> f64 {
    std::f64::consts::FRAC_1_SQRT_2
}

fn re(x: f64) -> C64 {
    C64::new(x, 0.0)
}

fn im(x: f64) -> C64 {
    C64::new(0.0, x)
}

/// `|+> = (|0> + |1>) / sqrt(2)`.
pub fn plus_ket() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 1, vec![re(h), re(h)]).expect("fixed shape")
}

/// `|-> = (|0> - |1>) / sqrt(2)`.
pub fn minus_ket() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 1, vec![re(h), re(-h)]).expect("fixed shape")
}

/// `|i> = (|0> + i|1>) / sqrt(2)`.
pub fn i_ket() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 1, vec![re(h), im(h)]).expect("fixed shape")
}

/// `|-i> = (|0> - i|1>) / sqrt(2)`.
pub fn minus_i_ket() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 1, vec![re(h), im(-h)]).expect("fixed shape")
}

fn x_base() -> Matrix {
    Matrix::new(2, 2, vec![re(0.0), re(1.0), re(1.0), re(0.0)]).expect("fixed shape")
}

fn y_base() -> Matrix {
    Matrix::new(2, 2, vec![re(0.0), im(-1.0), im(1.0), re(0.0)]).expect("fixed shape")
}

fn z_base() -> Matrix {
    Matrix::new(2, 2, vec![re(1.0), re(0.0), re(0.0), re(-1.0)]).expect("fixed shape")
}

fn h_base() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 2, vec![re(h), re(h), re(h), re(-h)]).expect("fixed shape")
}

fn s_base() -> Matrix {
    Matrix::new(2, 2, vec![re(1.0), re(0.0), re(0.0), im(1.0)]).expect("fixed shape")
}

fn t_base() -> Matrix {
    let h = half_sqrt2();
    Matrix::new(2, 2, vec![re(1.0), re(0.0), re(0.0), C64::new(h, h)]).expect("fixed shape")
}

fn cnot_base() -> Matrix {
    #[rustfmt::skip]
    let cells = vec![
        re(1.0), re(0.0), re(0.0), re(0.0),
        re(0.0), re(1.0), re(0.0), re(0.0),
        re(0.0), re(0.0), re(0.0), re(1.0),
        re(0.0), re(0.0), re(1.0), re(0.0),
    ];
    Matrix::new(4, 4, cells).expect("fixed shape")
}

fn swap_base() -> Matrix {
    #[rustfmt::skip]
    let cells = vec![
        re(1.0), re(0.0), re(0.0), re(0.0),
        re(0.0), re(0.0), re(1.0), re(0.0),
        re(0.0), re(1.0), re(0.0), re(0.0),
        re(0.0), re(0.0), re(0.0), re(1.0),
    ];
    Matrix::new(4, 4, cells).expect("fixed shape")
}

fn ccnot_base() -> Matrix {
    // Swaps basis states 6 and 7: toggles the data bit (bit 0) exactly when
    // both control bits (1 and 2) are set.
    Matrix::permute(&[0, 1, 2, 3, 4, 5, 7, 6])
}

macro_rules! single_qubit_gate {
    ($name:ident, $base:ident) => {
        #[doc = concat!("`", stringify!($name), "` acting on qubit `bit` of the register.")]
        pub fn $name(bit: usize) -> MxResult<Matrix> {
            Matrix::create_gate(&$base(), &[bit])
        }
    };
}

single_qubit_gate!(i_gate, identity_base);
single_qubit_gate!(x_gate, x_base);
single_qubit_gate!(y_gate, y_base);
single_qubit_gate!(z_gate, z_base);
single_qubit_gate!(h_gate, h_base);
single_qubit_gate!(s_gate, s_base);
single_qubit_gate!(t_gate, t_base);

fn identity_base() -> Matrix {
    Matrix::identity(2)
}

/// `CNOT` with the flip target `data` and control `control`.
pub fn cnot(data: usize, control: usize) -> MxResult<Matrix> {
    Matrix::create_gate(&cnot_base(), &[data, control])
}

/// `SWAP` exchanging `data0` and `data1`.
pub fn swap(data0: usize, data1: usize) -> MxResult<Matrix> {
    Matrix::create_gate(&swap_base(), &[data0, data1])
}

/// `CCNOT` (Toffoli) with flip target `data` and controls `control0`, `control1`.
pub fn ccnot(data: usize, control0: usize, control1: usize) -> MxResult<Matrix> {
    Matrix::create_gate(&ccnot_base(), &[data, control0, control1])
}

/// Process-wide immutable cache of the four named ket constants
/// (`|+>, |->, |i>, |-i>`), constructed once on first use.
static KET_CONSTANTS: OnceLock<[Matrix; 4]> = OnceLock::new();

fn ket_constants() -> &'static [Matrix; 4] {
    KET_CONSTANTS.get_or_init(|| [plus_ket(), minus_ket(), i_ket(), minus_i_ket()])
}

/// The `|+>` constant, built once and shared.
pub fn plus() -> Matrix {
    ket_constants()[0].clone()
}

/// The `|->` constant, built once and shared.
pub fn minus() -> Matrix {
    ket_constants()[1].clone()
}

/// The `|i>` constant, built once and shared.
pub fn i_state() -> Matrix {
    ket_constants()[2].clone()
}

/// The `|-i>` constant, built once and shared.
pub fn minus_i_state() -> Matrix {
    ket_constants()[3].clone()
}
