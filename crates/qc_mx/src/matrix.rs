//! Dense complex matrices with shape-polymorphic operators.
//!
//! Ported from the reference `Matrix` class: row-major dense storage,
//! zero-pad extension for `+`/`-`/`multiply`, identity-cross extension for
//! `multiplyStar`, and the bit-permutation sandwich used to build gates that
//! act on arbitrary qubit indices.
//!
//! Unlike the reference implementation, [`Matrix::transpose`] performs a
//! real cell reorder (`out[j,i] = in[i,j]`) rather than reusing the cell
//! vector unchanged — the reference's shortcut only happens to be correct
//! for row/column vectors.

use crate::vector;
use crate::C64;
use std::collections::HashSet;
use std::fmt;

/// A shape or index failure from the matrix kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxError(pub String);

impl fmt::Display for MxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MxError {}

/// Alias for `std::result::Result<T, MxError>`.
pub type MxResult<T> = std::result::Result<T, MxError>;

/// A dense, row-major complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<C64>,
}

impl Matrix {
    /// Builds a matrix from row-major cells. Fails if `cells.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, cells: Vec<C64>) -> MxResult<Matrix> {
        if cells.len() != rows * cols {
            return Err(MxError(format!(
                "Invalid matrix cells: expected {rows}x{cols}={} got {}",
                rows * cols,
                cells.len()
            )));
        }
        Ok(Matrix { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[C64] {
        &self.cells
    }

    /// Bounds-checked element read.
    pub fn at(&self, i: usize, j: usize) -> C64 {
        assert!(i < self.rows && j < self.cols, "matrix index ({i},{j}) out of bounds for {}x{}", self.rows, self.cols);
        self.cells[i * self.cols + j]
    }

    /// A true transpose: `out[j,i] = in[i,j]`.
    pub fn transpose(&self) -> Matrix {
        let mut cells = vec![C64::new(0.0, 0.0); self.cells.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                cells[j * self.rows + i] = self.at(i, j);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Element-wise complex conjugate.
    pub fn conj(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: vector::conj(&self.cells),
        }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Matrix {
        self.transpose().conj()
    }

    /// Element-wise negation.
    pub fn neg(&self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: vector::neg(&self.cells),
        }
    }

    /// Scalar multiply.
    pub fn scale(&self, lambda: C64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: vector::scale(lambda, &self.cells),
        }
    }

    /// Scalar divide.
    pub fn div_scalar(&self, lambda: C64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: vector::div_scalar(&self.cells, lambda),
        }
    }

    /// Appends zero rows until `self.rows >= num_rows`; a no-op otherwise.
    pub fn extends_rows(&self, num_rows: usize) -> Matrix {
        if self.rows >= num_rows {
            return self.clone();
        }
        let mut cells = self.cells.clone();
        cells.resize((num_rows - self.rows) * self.cols + cells.len(), C64::new(0.0, 0.0));
        Matrix {
            rows: num_rows,
            cols: self.cols,
            cells,
        }
    }

    /// Inserts zero columns after each row's existing entries until
    /// `self.cols >= num_cols`; a no-op otherwise.
    pub fn extends_cols(&self, num_cols: usize) -> Matrix {
        if self.cols >= num_cols {
            return self.clone();
        }
        let mut cells = Vec::with_capacity(self.rows * num_cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                cells.push(self.at(i, j));
            }
            cells.resize(cells.len() + (num_cols - self.cols), C64::new(0.0, 0.0));
        }
        Matrix {
            rows: self.rows,
            cols: num_cols,
            cells,
        }
    }

    /// Zero-pads to `(rows, cols)` in both dimensions.
    pub fn extends0(&self, rows: usize, cols: usize) -> Matrix {
        self.extends_rows(rows).extends_cols(cols)
    }

    /// Extends a ket (zero-pad rows), a bra (zero-pad columns), or a square
    /// matrix via `identity(size/rows) (x) self` when `size` is a multiple
    /// of `rows`. Fails on a non-square, non-vector shape mismatch.
    pub fn extends_cross(&self, size: usize) -> MxResult<Matrix> {
        if self.cols == 1 {
            return Ok(self.extends_rows(size));
        }
        if self.rows == 1 {
            return Ok(self.extends_cols(size));
        }
        if self.rows != self.cols {
            return Err(MxError("Expected square matrix".to_string()));
        }
        if self.rows == size {
            return Ok(self.clone());
        }
        if size % self.rows != 0 {
            return Err(MxError(format!("Expected size multiple of {}, got {size}", self.rows)));
        }
        let q = size / self.rows;
        Ok(Matrix::identity(q).cross(self))
    }

    /// Ordinary matrix multiply: fails unless `left.cols == right.rows`.
    fn base_multiply(left: &Matrix, right: &Matrix) -> MxResult<Matrix> {
        if left.cols != right.rows {
            return Err(MxError(format!(
                "Invalid matrix multiplication {}x{} by {}x{}",
                left.rows, left.cols, right.rows, right.cols
            )));
        }
        let mut cells = vec![C64::new(0.0, 0.0); left.rows * right.cols];
        vector::part_mul(&mut cells, 0, left.rows, right.cols, &left.cells, 0, left.cols, &right.cells, 0, right.cols);
        Ok(Matrix {
            rows: left.rows,
            cols: right.cols,
            cells,
        })
    }

    /// Matrix addition with zero-pad extension to the bounding shape.
    /// Never fails on shape mismatch — treat this as a deliberate language
    /// feature, not an oversight.
    pub fn add(&self, other: &Matrix) -> Matrix {
        let n = self.rows.max(other.rows);
        let m = self.cols.max(other.cols);
        let a = self.extends0(n, m);
        let b = other.extends0(n, m);
        Matrix {
            rows: n,
            cols: m,
            cells: vector::add(&a.cells, &b.cells),
        }
    }

    /// Matrix subtraction, same extension rule as [`Matrix::add`].
    pub fn sub(&self, other: &Matrix) -> Matrix {
        let n = self.rows.max(other.rows);
        let m = self.cols.max(other.cols);
        let a = self.extends0(n, m);
        let b = other.extends0(n, m);
        Matrix {
            rows: n,
            cols: m,
            cells: vector::sub(&a.cells, &b.cells),
        }
    }

    /// Matrix multiply (the `.` token): inner-dimension mismatch is resolved
    /// by zero-extending the smaller side.
    pub fn multiply(&self, right: &Matrix) -> MxResult<Matrix> {
        use std::cmp::Ordering::*;
        match self.cols.cmp(&right.rows) {
            Less => Self::base_multiply(&self.extends_cols(right.rows), right),
            Greater => Self::base_multiply(self, &right.extends_rows(self.cols)),
            Equal => Self::base_multiply(self, right),
        }
    }

    /// Matrix multiply (the `*` token): inner-dimension mismatch is resolved
    /// by identity-cross-extending a square side (`I_q (x) M`) rather than
    /// zero-padding. Distinct from [`Matrix::multiply`]; both are
    /// load-bearing.
    pub fn multiply_star(&self, right: &Matrix) -> MxResult<Matrix> {
        use std::cmp::Ordering::*;
        match self.cols.cmp(&right.rows) {
            Less => {
                let left = self.extends_cross(right.rows)?;
                Self::base_multiply(&left, right)
            }
            Greater => {
                let right_ext = right.extends_cross(self.cols)?;
                Self::base_multiply(self, &right_ext)
            }
            Equal => Self::base_multiply(self, right),
        }
    }

    /// Kronecker (tensor) product.
    pub fn cross(&self, right: &Matrix) -> Matrix {
        let rows = self.rows * right.rows;
        let cols = self.cols * right.cols;
        let mut cells = Vec::with_capacity(rows * cols);
        for i in 0..self.rows {
            for j in 0..right.rows {
                for k in 0..self.cols {
                    for l in 0..right.cols {
                        cells.push(self.at(i, k) * right.at(j, l));
                    }
                }
            }
        }
        Matrix { rows, cols, cells }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Matrix {
        let mut cells = vec![C64::new(0.0, 0.0); n * n];
        for i in 0..n {
            cells[i * n + i] = C64::new(1.0, 0.0);
        }
        Matrix { rows: n, cols: n, cells }
    }

    /// The column vector with a `1` at row `k`, length `2^bits(k)` (at least 2).
    pub fn ket_base(k: usize) -> Matrix {
        let n = 1usize << vector::num_bits_by_state(k);
        let mut cells = vec![C64::new(0.0, 0.0); n];
        cells[k] = C64::new(1.0, 0.0);
        Matrix { rows: n, cols: 1, cells }
    }

    fn basis_dim(i: usize, j: usize) -> usize {
        1usize << vector::num_bits_by_state(i.max(j))
    }

    /// Single-entry basis matrix: `1` at `(i,j)`, zero elsewhere.
    pub fn ary(i: usize, j: usize) -> Matrix {
        let n = Self::basis_dim(i, j);
        let mut cells = vec![C64::new(0.0, 0.0); n * n];
        cells[i * n + j] = C64::new(1.0, 0.0);
        Matrix { rows: n, cols: n, cells }
    }

    /// Symmetric basis matrix: `1` at `(i,j)` and `(j,i)`.
    pub fn sim(i: usize, j: usize) -> Matrix {
        let n = Self::basis_dim(i, j);
        let mut cells = vec![C64::new(0.0, 0.0); n * n];
        cells[i * n + j] = C64::new(1.0, 0.0);
        cells[j * n + i] = C64::new(1.0, 0.0);
        Matrix { rows: n, cols: n, cells }
    }

    /// Antisymmetric basis matrix: `+-1` at `(min,max)`/`(max,min)`, all
    /// zero when `i == j`.
    pub fn eps(i: usize, j: usize) -> Matrix {
        let n = Self::basis_dim(i, j);
        let mut cells = vec![C64::new(0.0, 0.0); n * n];
        if i != j {
            let lo = i.min(j);
            let hi = i.max(j);
            let sign = if (lo + hi) % 2 == 0 { 1.0 } else { -1.0 };
            cells[lo * n + hi] = C64::new(sign, 0.0);
            cells[hi * n + lo] = C64::new(-sign, 0.0);
        }
        Matrix { rows: n, cols: n, cells }
    }

    /// The permutation matrix sending basis state `j` to `permutation[j]`.
    pub fn permute(permutation: &[usize]) -> Matrix {
        let n = permutation.len();
        let mut cells = vec![C64::new(0.0, 0.0); n * n];
        for (j, &target) in permutation.iter().enumerate() {
            cells[target * n + j] = C64::new(1.0, 0.0);
        }
        Matrix { rows: n, cols: n, cells }
    }

    fn validate_bit_map(bit_map: &[usize]) -> MxResult<()> {
        let mut seen = HashSet::with_capacity(bit_map.len());
        for &b in bit_map {
            if !seen.insert(b) {
                return Err(MxError(format!("Expected all different indices {bit_map:?}")));
            }
        }
        Ok(())
    }

    /// Builds the bit permutation for a `k`-input base gate mapped onto the
    /// circuit bits named by `bit_map`: gate input `m` drives circuit bit
    /// `bit_map[m]`; untouched circuit bits map to the lowest unused output
    /// bit.
    pub fn compute_bits_permutation(bit_map: &[usize]) -> MxResult<Vec<usize>> {
        Self::validate_bit_map(bit_map)?;
        let m = bit_map.len();
        let max_elem = bit_map.iter().copied().max().unwrap_or(0);
        let num_bits = m.max(max_elem + 1);

        let mut result = vec![0usize; num_bits];
        let mut gate_mapped = vec![false; num_bits];
        let mut in_mapped = vec![false; num_bits];

        for (i, &b) in bit_map.iter().enumerate() {
            result[b] = i;
            gate_mapped[b] = true;
            in_mapped[i] = true;
        }
        for i in m..num_bits {
            if !gate_mapped[i] {
                gate_mapped[i] = true;
                in_mapped[i] = true;
                result[i] = i;
            }
        }
        for i in m..num_bits {
            if !in_mapped[i] {
                let free = (0..num_bits).find(|&f| !gate_mapped[f]).expect("free output bit must exist");
                result[free] = i;
                gate_mapped[free] = true;
                in_mapped[i] = true;
            }
        }
        Ok(result)
    }

    /// Expands a bit permutation into the permutation of `2^bits` basis states.
    pub fn compute_state_permutation(bit_permutation: &[usize]) -> Vec<usize> {
        let n = 1usize << bit_permutation.len();
        let mut result = vec![0usize; n];
        for s in 0..n {
            let mut mapped = 0usize;
            for (i, &target) in bit_permutation.iter().enumerate() {
                if (s >> i) & 1 == 1 {
                    mapped |= 1 << target;
                }
            }
            result[s] = mapped;
        }
        result
    }

    /// Inverts a permutation given as `perm[i] = image of i`.
    pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
        let mut reverse = vec![0usize; perm.len()];
        for (i, &p) in perm.iter().enumerate() {
            reverse[p] = i;
        }
        reverse
    }

    /// Builds the register-wide gate `P(s_out) . base . P(s_in)` for a base
    /// gate acting on the circuit bits named by `bit_map`.
    pub fn create_gate(base: &Matrix, bit_map: &[usize]) -> MxResult<Matrix> {
        let bit_perm = Self::compute_bits_permutation(bit_map)?;
        let state_permute_in = Self::compute_state_permutation(&bit_perm);
        let state_permute_out = Self::inverse_permutation(&state_permute_in);
        let p_in = Matrix::permute(&state_permute_in);
        let p_out = Matrix::permute(&state_permute_out);
        p_out.multiply_star(base)?.multiply_star(&p_in)
    }

    fn qubit_projector(index: usize, num_qubits: usize, want_one: bool) -> Matrix {
        let n_bits = (index + 1).max(num_qubits);
        let n_states = 1usize << n_bits;
        let mask = 1usize << index;
        let mut cells = vec![C64::new(0.0, 0.0); n_states * n_states];
        for i in 0..n_states {
            if ((i & mask) != 0) == want_one {
                cells[i * n_states + i] = C64::new(1.0, 0.0);
            }
        }
        Matrix {
            rows: n_states,
            cols: n_states,
            cells,
        }
    }

    /// Diagonal projector selecting states whose bit `index` is 0.
    pub fn qubit0(index: usize, num_qubits: usize) -> Matrix {
        Self::qubit_projector(index, num_qubits, false)
    }

    /// Diagonal projector selecting states whose bit `index` is 1.
    pub fn qubit1(index: usize, num_qubits: usize) -> Matrix {
        Self::qubit_projector(index, num_qubits, true)
    }
}
