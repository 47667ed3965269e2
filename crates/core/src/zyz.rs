// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Single-qubit ZYZ decomposition (C5): express any 2x2 unitary as
//! `e^{i phi} . Rz(alpha) . Ry(theta) . Rz(beta)`.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::types::Gate;

/// Angles of a ZYZ decomposition, plus the overall global phase `phi` such that
/// `M = e^{i phi} Rz(alpha) Ry(theta) Rz(beta)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZyzAngles {
    pub phi: f64,
    pub alpha: f64,
    pub theta: f64,
    pub beta: f64,
}

/// Decompose a 2x2 unitary `m` into ZYZ angles.
///
/// `phi = arg(det(M))/2`; dividing `M` by `e^{i phi}` gives a special-unitary `V`, from
/// which `alpha = arg(V11) + arg(V10)`, `beta = arg(V11) - arg(V10)`,
/// `theta = 2 atan2(|V10|, |V11|)`. The degenerate case `|V10| < tol` (diagonal `V`) sets
/// `beta = 0`, `alpha = 2 arg(V11)`.
pub fn zyz_decompose(m: &[[Complex64; 2]; 2], tol: f64) -> ZyzAngles {
    let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
    let phi = det.arg() / 2.0;
    let phase = Complex64::new(0.0, phi).exp();
    let v10 = m[1][0] / phase;
    let v11 = m[1][1] / phase;

    if v10.norm() < tol {
        let alpha = 2.0 * v11.arg();
        return ZyzAngles {
            phi,
            alpha,
            theta: 0.0,
            beta: 0.0,
        };
    }

    let alpha = v11.arg() + v10.arg();
    let beta = v11.arg() - v10.arg();
    let theta = 2.0 * v10.norm().atan2(v11.norm());
    ZyzAngles {
        phi,
        alpha,
        theta,
        beta,
    }
}

/// Render a `ZyzAngles` value as the gate sequence `{Rz(alpha), Ry(theta), Rz(beta)}` on
/// `qubit`, applied in that order (beta first, since gates are application-ordered and
/// `M = Rz(alpha) Ry(theta) Rz(beta)` applies `Rz(beta)` to the state first).
///
/// When `emit_phase` is set, [`global_phase_gates`] is prepended to also carry the
/// overall scalar phase `e^{i phi}` — required whenever this decomposition sits inside a
/// `FullyControlled` gate (or stands alone as a full circuit), where global phase becomes
/// observable.
pub fn zyz_to_gates(angles: &ZyzAngles, qubit: usize, tol: f64, emit_phase: bool) -> Vec<Gate> {
    let mut gates = Vec::with_capacity(8);
    if emit_phase {
        gates.extend(global_phase_gates(angles.phi, qubit, tol));
    }
    if angles.beta.abs() > tol {
        gates.push(Gate::rz(angles.beta, qubit));
    }
    if angles.theta.abs() > tol {
        gates.push(Gate::ry(angles.theta, qubit));
    }
    if angles.alpha.abs() > tol {
        gates.push(Gate::rz(angles.alpha, qubit));
    }
    gates
}

/// Realize the scalar `e^{i phi} . I` as a gate sequence on `qubit`, using only the two
/// primitives this crate already has (`R1`, `X`): `R1(phi)` gives `diag(1, e^{i phi})`;
/// conjugating it by `X` gives `diag(e^{i phi}, 1)`; their product is `e^{i phi} . I`
/// regardless of `qubit`'s state. A plain `R1(phi)` gate is *not* equivalent to this —
/// it only phases the `|1>` component, not the whole space — so this four-gate form is
/// the one place genuine global phase can be carried by a qubit-indexed gate stream.
pub fn global_phase_gates(phi: f64, qubit: usize, tol: f64) -> Vec<Gate> {
    let reduced = phi.rem_euclid(2.0 * PI);
    if reduced.abs() < tol || (2.0 * PI - reduced).abs() < tol {
        return Vec::new();
    }
    vec![
        Gate::r1(phi, qubit),
        Gate::x(qubit),
        Gate::r1(phi, qubit),
        Gate::x(qubit),
    ]
}

pub fn rz_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    let half = theta / 2.0;
    let neg = Complex64::new(0.0, -half).exp();
    let pos = Complex64::new(0.0, half).exp();
    [
        [neg, Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), pos],
    ]
}

pub fn ry_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    let half = theta / 2.0;
    let (s, c) = (half.sin(), half.cos());
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

/// Not produced by this crate's own decomposition (C5 only ever emits `Rz`/`Ry`), but
/// `Axis::Rx` is part of the gate vocabulary so callers constructing gates by hand get
/// a real rotation matrix rather than a silent alias of `Rz`.
pub fn rx_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    let half = theta / 2.0;
    let (s, c) = (half.sin(), half.cos());
    let ic = Complex64::new(0.0, -s);
    [[Complex64::new(c, 0.0), ic], [ic, Complex64::new(c, 0.0)]]
}

pub fn r1_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    [
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, theta).exp()],
    ]
}

pub fn x_matrix() -> [[Complex64; 2]; 2] {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    [[zero, one], [one, zero]]
}

/// Reconstruct the 2x2 matrix (up to the tested tolerance) from ZYZ angles, ignoring
/// global phase — used by round-trip tests.
pub fn zyz_matrix(angles: &ZyzAngles) -> [[Complex64; 2]; 2] {
    let rz_b = rz_matrix(angles.beta);
    let ry_t = ry_matrix(angles.theta);
    let rz_a = rz_matrix(angles.alpha);
    let phase = Complex64::new(0.0, angles.phi).exp();
    mat2_mul(&mat2_mul(&rz_a, &ry_t), &rz_b).map(|row| row.map(|x| x * phase))
}

fn mat2_mul(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) -> [[Complex64; 2]; 2] {
    let mut out = [[Complex64::new(0.0, 0.0); 2]; 2];
    for r in 0..2 {
        for c in 0..2 {
            out[r][c] = a[r][0] * b[0][c] + a[r][1] * b[1][c];
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_close(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2], tol: f64) {
        for r in 0..2 {
            for c in 0..2 {
                assert_abs_diff_eq!(a[r][c].re, b[r][c].re, epsilon = tol);
                assert_abs_diff_eq!(a[r][c].im, b[r][c].im, epsilon = tol);
            }
        }
    }

    #[test]
    fn hadamard_round_trips() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let h = [
            [Complex64::new(s, 0.0), Complex64::new(s, 0.0)],
            [Complex64::new(s, 0.0), Complex64::new(-s, 0.0)],
        ];
        let angles = zyz_decompose(&h, 1e-9);
        let back = zyz_matrix(&angles);
        assert_mat_close(&back, &h, 1e-12);
    }

    #[test]
    fn x_round_trips() {
        let x = x_matrix();
        let angles = zyz_decompose(&x, 1e-9);
        let back = zyz_matrix(&angles);
        assert_mat_close(&back, &x, 1e-9);
    }

    #[test]
    fn diagonal_matrix_hits_degenerate_branch() {
        let m = r1_matrix(0.7);
        let angles = zyz_decompose(&m, 1e-9);
        assert_abs_diff_eq!(angles.beta, 0.0, epsilon = 1e-12);
        let back = zyz_matrix(&angles);
        assert_mat_close(&back, &m, 1e-9);
    }

    fn apply_gates_to_mat2(gates: &[Gate]) -> [[Complex64; 2]; 2] {
        let mut acc = [
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ];
        for g in gates {
            let m = match g {
                Gate::Single {
                    axis, angle, ..
                } => match axis {
                    crate::types::Axis::X => x_matrix(),
                    crate::types::Axis::Rz => rz_matrix(*angle),
                    crate::types::Axis::Ry => ry_matrix(*angle),
                    crate::types::Axis::R1 => r1_matrix(*angle),
                    crate::types::Axis::Rx => unreachable!(),
                },
                Gate::FullyControlled { .. } => unreachable!(),
            };
            acc = mat2_mul(&m, &acc);
        }
        acc
    }

    #[test]
    fn global_phase_gates_realize_scalar_phase() {
        let phi = 0.83;
        let gates = global_phase_gates(phi, 0, 1e-9);
        let m = apply_gates_to_mat2(&gates);
        let expect = Complex64::new(0.0, phi).exp();
        assert_mat_close(
            &m,
            &[
                [expect, Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), expect],
            ],
            1e-9,
        );
    }

    #[test]
    fn zyz_to_gates_with_phase_reconstructs_full_matrix_exactly() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let phase = Complex64::new(0.0, 0.55).exp();
        let h = [
            [
                phase * Complex64::new(s, 0.0),
                phase * Complex64::new(s, 0.0),
            ],
            [
                phase * Complex64::new(s, 0.0),
                phase * Complex64::new(-s, 0.0),
            ],
        ];
        let angles = zyz_decompose(&h, 1e-9);
        let gates = zyz_to_gates(&angles, 0, 1e-9, true);
        let back = apply_gates_to_mat2(&gates);
        assert_mat_close(&back, &h, 1e-9);
    }
}
