// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Complex linear algebra utilities (C1): matrix multiply, conjugate transpose,
//! unitarity check, and tolerance-aware near-equality.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use num_traits::Zero;

use crate::error::DecompError;

/// Compare two floats the way the rest of this crate compares everything:
/// `|a - b| <= tol * max(1, |a|, |b|)`, never bare `==`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * 1.0_f64.max(a.abs()).max(b.abs())
}

/// Conjugate transpose (adjoint).
pub fn conj_transpose(m: ArrayView2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|x| x.conj())
}

/// `||A - B||_F`, the Frobenius norm of the difference.
pub fn frobenius_distance(a: ArrayView2<Complex64>, b: ArrayView2<Complex64>) -> f64 {
    let mut acc = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let d = x - y;
        acc += d.norm_sqr();
    }
    acc.sqrt()
}

/// Validate that `u` is square, has side a power of two, and is unitary within `tolerance`.
/// Returns the side `d` on success.
pub fn validate_unitary(u: ArrayView2<Complex64>, tolerance: f64) -> Result<usize, DecompError> {
    let (rows, cols) = u.dim();
    if rows != cols || rows == 0 || !rows.is_power_of_two() {
        return Err(DecompError::Shape { rows, cols });
    }
    let ident = Array2::<Complex64>::eye(rows);
    let product = u.dot(&conj_transpose(u));
    let residual = frobenius_distance(product.view(), ident.view());
    if residual > tolerance {
        return Err(DecompError::NotUnitary {
            residual,
            tolerance,
        });
    }
    Ok(rows)
}

/// `log2` of a power-of-two dimension, i.e. the number of qubits in a `d x d` register.
pub fn num_qubits(d: usize) -> usize {
    d.trailing_zeros() as usize
}

/// Build the dense unitary for a single-qubit gate acting on `qubit` within an
/// `n`-qubit register. Qubit indices are bit positions of the computational-basis
/// index (qubit 0 is the least significant bit) — the same convention `target =
/// diff.trailing_zeros()` establishes in fully-controlled synthesis, so this is just
/// [`embed_fully_controlled`] with no controls.
pub fn embed_single_qubit(
    local: &[[Complex64; 2]; 2],
    qubit: usize,
    n: usize,
) -> Array2<Complex64> {
    embed_fully_controlled(local, &[], qubit, n)
}

/// Embed a fully-controlled single-qubit gate: `inner` is applied to `target` only
/// when every qubit in `controls` reads |1>.
pub fn embed_fully_controlled(
    inner: &[[Complex64; 2]; 2],
    controls: &[usize],
    target: usize,
    n: usize,
) -> Array2<Complex64> {
    let d = 1usize << n;
    let mut out = Array2::<Complex64>::zeros((d, d));
    for col in 0..d {
        let controls_on = controls.iter().all(|&c| (col >> c) & 1 == 1);
        if !controls_on {
            out[[col, col]] = Complex64::new(1.0, 0.0);
            continue;
        }
        let bit = (col >> target) & 1;
        for new_bit in 0..2 {
            let amp = inner[new_bit][bit];
            if amp.is_zero() {
                continue;
            }
            let row = (col & !(1 << target)) | (new_bit << target);
            out[[row, col]] = amp;
        }
    }
    out
}

/// Kronecker product, `ndarray::linalg::kron` with a complex element type (mirrors the
/// import used for the same purpose elsewhere in this numeric stack).
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    ndarray::linalg::kron(a, b)
}
