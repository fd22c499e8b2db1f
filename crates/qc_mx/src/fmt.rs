//! Human-readable rendering of complex numbers and matrices.

use crate::matrix::Matrix;
use crate::C64;

/// Formats a complex number the way the language prints scalars:
///
/// - Pure real: `<real>`.
/// - Pure imaginary `+-1`: `i` / `-i`; other pure imaginary: `<im> i`.
/// - Mixed: `<real> +<im> i` (positive imaginary) or `<real> <im> i`
///   (negative; the minus sign is carried by the imaginary part itself).
pub fn fmt_complex(c: C64) -> String {
    let re = c.re;
    let im = c.im;
    if im == 0.0 {
        return format!("{re}");
    }
    if re == 0.0 {
        if im == 1.0 {
            return "i".to_string();
        }
        if im == -1.0 {
            return "-i".to_string();
        }
        return format!("{im} i");
    }
    if im == 1.0 {
        return format!("{re} +i");
    }
    if im > 0.0 {
        format!("{re} +{im} i")
    } else {
        format!("{re} {im} i")
    }
}

/// Renders an `N x 1` ket: `(c0) |0> + (c1) |1> + ...` over non-zero
/// entries, or `(0.0) |N-1>` when every entry is zero.
pub fn write_ket(m: &Matrix) -> String {
    write_dirac(m, true)
}

/// Renders a `1 x N` bra, analogous to [`write_ket`].
pub fn write_bra(m: &Matrix) -> String {
    write_dirac(m, false)
}

fn write_dirac(m: &Matrix, is_ket: bool) -> String {
    let n = if is_ket { m.rows() } else { m.cols() };
    let get = |i: usize| -> C64 {
        if is_ket {
            m.at(i, 0)
        } else {
            m.at(0, i)
        }
    };
    let (open, close) = if is_ket { ("|", ">") } else { ("<", "|") };
    let terms: Vec<String> = (0..n)
        .filter(|&i| get(i) != C64::new(0.0, 0.0))
        .map(|i| format!("({}) {open}{i}{close}", fmt_complex(get(i))))
        .collect();
    if terms.is_empty() {
        format!("(0.0) {open}{}{close}", n.saturating_sub(1))
    } else {
        terms.join(" + ")
    }
}

/// Renders an `N x M` matrix as `[ row0\n  row1\n ... ]`, cells right-padded
/// to the widest column.
pub fn write_matrix(m: &Matrix) -> String {
    let rendered: Vec<Vec<String>> = (0..m.rows())
        .map(|i| (0..m.cols()).map(|j| fmt_complex(m.at(i, j))).collect())
        .collect();
    let width = rendered.iter().flatten().map(|s| s.len()).max().unwrap_or(0);
    let mut out = String::from("[ ");
    for (i, row) in rendered.iter().enumerate() {
        if i > 0 {
            out.push_str("\n  ");
        }
        let cells: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        out.push_str(&cells.join(" "));
    }
    out.push_str(" ]");
    out
}
