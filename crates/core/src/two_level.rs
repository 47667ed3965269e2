// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Two-level decomposition (C2): factor a d x d unitary as an ordered product of
//! two-level unitaries, each differing from identity only on a 2x2 subblock.

use ndarray::Array2;
use num_complex::Complex64;

use crate::types::TwoLevel;

fn mat2_conj_transpose(m: &[[Complex64; 2]; 2]) -> [[Complex64; 2]; 2] {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

fn is_identity2(m: &[[Complex64; 2]; 2], tol: f64) -> bool {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    (m[0][0] - one).norm() < tol
        && (m[1][1] - one).norm() < tol
        && (m[0][1] - zero).norm() < tol
        && (m[1][0] - zero).norm() < tol
}

/// Apply a two-level unitary `m` (acting on rows/cols `(c, r)`) to `mat` from the left,
/// in place.
fn apply_left(mat: &mut Array2<Complex64>, c: usize, r: usize, m: &[[Complex64; 2]; 2]) {
    let ncols = mat.ncols();
    for col in 0..ncols {
        let top = mat[[c, col]];
        let bot = mat[[r, col]];
        mat[[c, col]] = m[0][0] * top + m[0][1] * bot;
        mat[[r, col]] = m[1][0] * top + m[1][1] * bot;
    }
}

/// Factor `u` into two-level unitaries `[T_1, .., T_k]` with `T_k * .. * T_1 = u`
/// (application order: `T_1` first). Length bound: `k <= d(d-1)/2`.
pub fn two_level_decompose(u: &Array2<Complex64>, tol: f64) -> Vec<TwoLevel> {
    let d = u.nrows();
    let mut work = u.clone();
    // Eliminators applied from the left, in processing order; their inverses become
    // gates applied *after* the phase-absorbing diagonal factors, in reverse order.
    let mut eliminators: Vec<TwoLevel> = Vec::new();

    for c in 0..d.saturating_sub(1) {
        for r in (c + 1)..d {
            let a = work[[c, c]];
            let b = work[[r, c]];
            if b.norm() < tol {
                continue;
            }
            let norm = (a.norm_sqr() + b.norm_sqr()).sqrt();
            let g: [[Complex64; 2]; 2] = [
                [a.conj() / norm, b.conj() / norm],
                [b / norm, -a / norm],
            ];
            apply_left(&mut work, c, r, &g);
            eliminators.push(TwoLevel::new(c, r, g));
        }
    }

    // Every Givens-like eliminator above leaves its pivot real and non-negative (its
    // top-left entry is `sqrt(|a|^2 + |b|^2)`), so after processing column `c` the
    // diagonal entry `work[c, c]` is real, non-negative, and unit-modulus — i.e.
    // exactly 1. Only the last index, which is never a pivot, can retain a nontrivial
    // phase. So at most one phase-absorbing factor is ever needed.
    let mut out: Vec<TwoLevel> = Vec::new();
    if d >= 2 {
        let last = work[[d - 1, d - 1]];
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let m = [[one, zero], [zero, last]];
        if !is_identity2(&m, tol) {
            out.push(TwoLevel::new(0, d - 1, m));
        }
    }

    // The eliminators were applied in processing order G_1, .., G_m with
    // G_m .. G_1 . u = D, so u = G_1^-1 .. G_m^-1 . D. Applied to a state (D first,
    // then G_m^-1, .., G_1^-1 last) that is exactly the reverse of processing order,
    // each replaced by its inverse (conjugate transpose, since each G is unitary).
    for elim in eliminators.into_iter().rev() {
        let inv = mat2_conj_transpose(&elim.matrix);
        out.push(TwoLevel::new(elim.i, elim.j, inv));
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linalg::frobenius_distance;
    use approx::assert_abs_diff_eq;

    fn rebuild(factors: &[TwoLevel], d: usize) -> Array2<Complex64> {
        let mut acc = Array2::<Complex64>::eye(d);
        for f in factors {
            acc = f.to_dense(d).dot(&acc);
        }
        acc
    }

    #[test]
    fn identity_yields_no_factors() {
        let u = Array2::<Complex64>::eye(4);
        let factors = two_level_decompose(&u, 1e-9);
        assert!(factors.is_empty());
    }

    #[test]
    fn swap_round_trips() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let u = Array2::from_shape_vec(
            (4, 4),
            vec![
                one, zero, zero, zero, //
                zero, zero, one, zero, //
                zero, one, zero, zero, //
                zero, zero, zero, one,
            ],
        )
        .unwrap();
        let factors = two_level_decompose(&u, 1e-9);
        assert!(factors.len() <= 4 * 3 / 2 + 1);
        let back = rebuild(&factors, 4);
        assert_abs_diff_eq!(frobenius_distance(back.view(), u.view()), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn factor_count_bounded() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let u = Array2::from_shape_vec(
            (2, 2),
            vec![
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(-s, 0.0),
            ],
        )
        .unwrap();
        let factors = two_level_decompose(&u, 1e-9);
        assert!(factors.len() <= 2 * 1 / 2 + 1);
        let back = rebuild(&factors, 2);
        assert_abs_diff_eq!(frobenius_distance(back.view(), u.view()), 0.0, epsilon = 1e-9);
    }
}
