// This code is part of a quantum circuit synthesis toolkit.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Optimal two-qubit synthesis (C7): a dedicated Magic-basis / Weyl-chamber path for
//! 4x4 unitaries, producing at most 3 fully-controlled X gates instead of whatever
//! count the general two-level pipeline would need.
//!
//! The construction (magic-basis transform, complex-symmetric eigendecomposition with
//! a bounded randomized retry for degenerate eigenvalues, Weyl-chamber reduction) is
//! ported from the Weyl decomposition this numeric stack already carries for two-qubit
//! gate counting; only the final step — expressing the canonical interaction
//! `exp(i(a XX + b YY + c ZZ))` as a 3-CNOT circuit — has no direct counterpart there,
//! since that code only ever emits it as an opaque two-qubit primitive for fidelity
//! estimation. The circuit used below is the standard Rz/Ry-sandwiched three-CNOT
//! realization (Vatan & Williams 2004).

use std::f64::consts::PI;

use faer::prelude::*;
use faer::Side::Lower;
use faer::{IntoNdarray, Mat};
use ndarray::{array, s, Array1, Array2, ArrayView2};
use num_complex::Complex64;
use rand::prelude::*;
use rand_distr::StandardNormal;
use rand_pcg::Pcg64Mcg;

use crate::error::DecompError;
use crate::types::Gate;
use crate::zyz::{global_phase_gates, zyz_decompose, zyz_to_gates};

const PI2: f64 = PI / 2.0;
const PI4: f64 = PI / 4.0;
const PI32: f64 = 3.0 * PI2;
const TWO_PI: f64 = 2.0 * PI;

/// Retries for the real/imaginary mixing used to diagonalize the complex-symmetric
/// `M2` matrix. The seed is fixed so a failure is reproducible; its value isn't
/// otherwise significant.
const REALIFICATION_ATTEMPTS: usize = 100;
const REALIFICATION_SEED: u64 = 2023;
const REALIFICATION_TOLERANCE: f64 = 1e-13;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn eye2() -> Array2<Complex64> {
    array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]]
}

fn conj_transpose2(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|x| x.conj())
}

fn det2(m: ArrayView2<Complex64>) -> Complex64 {
    m[[0, 0]] * m[[1, 1]] - m[[0, 1]] * m[[1, 0]]
}

/// Determinant via cofactor expansion along the first row. Only ever called with
/// `n == 4` here; written generically since there's nothing 4x4-specific about it.
fn det_n(m: ArrayView2<Complex64>) -> Complex64 {
    let n = m.nrows();
    if n == 1 {
        return m[[0, 0]];
    }
    if n == 2 {
        return det2(m);
    }
    let mut total = c(0.0, 0.0);
    for col in 0..n {
        let mut minor = Array2::<Complex64>::zeros((n - 1, n - 1));
        for (mi, i) in (1..n).enumerate() {
            let mut mj = 0;
            for j in 0..n {
                if j == col {
                    continue;
                }
                minor[[mi, mj]] = m[[i, j]];
                mj += 1;
            }
        }
        let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
        total += c(sign, 0.0) * m[[0, col]] * det_n(minor.view());
    }
    total
}

/// The (unnormalized) magic basis change and its inverse, as used throughout this
/// numeric stack's Weyl-chamber machinery: `B B^dagger / 2 = I`.
fn magic_basis_pair() -> (Array2<Complex64>, Array2<Complex64>) {
    let i = c(0.0, 1.0);
    let o = c(1.0, 0.0);
    let z = c(0.0, 0.0);
    let b = array![
        [o, i, z, z],
        [z, z, i, o],
        [z, z, i, -o],
        [o, -i, z, z],
    ];
    let bd = conj_transpose2(&b).mapv(|x| x * c(0.5, 0.0));
    (b, bd)
}

fn transform_from_magic_basis(u: &Array2<Complex64>, reverse: bool) -> Array2<Complex64> {
    let (b, bd) = magic_basis_pair();
    if reverse {
        bd.dot(u).dot(&b)
    } else {
        b.dot(u).dot(&bd)
    }
}

/// Split a 4x4 special unitary that is (up to global phase) a tensor product
/// `k_left kron k_right` into its two 2x2 factors plus the residual scalar phase.
fn decompose_product_gate(m: &Array2<Complex64>) -> (Array2<Complex64>, Array2<Complex64>, f64) {
    let mut r = m.slice(s![..2, ..2]).to_owned();
    let mut det_r = det2(r.view());
    if det_r.norm() < 0.1 {
        r = m.slice(s![2.., ..2]).to_owned();
        det_r = det2(r.view());
    }
    r.mapv_inplace(|x| x / det_r.sqrt());

    let r_dag = conj_transpose2(&r);
    let temp_inner = crate::linalg::kron(&eye2(), &r_dag);
    let temp = m.dot(&temp_inner);
    let mut l = temp.slice(s![..;2, ..;2]).to_owned();
    let det_l = det2(l.view());
    l.mapv_inplace(|x| x / det_l.sqrt());
    let phase = det_l.arg() / 2.0;
    (l, r, phase)
}

fn rot_ipy() -> Array2<Complex64> {
    array![
        [c(0.0, 0.0), c(1.0, 0.0)],
        [c(-1.0, 0.0), c(0.0, 0.0)],
    ]
}

fn rot_ipx() -> Array2<Complex64> {
    let i = c(0.0, 1.0);
    array![[c(0.0, 0.0), i], [i, c(0.0, 0.0)]]
}

fn rot_ipz() -> Array2<Complex64> {
    let i = c(0.0, 1.0);
    array![[i, c(0.0, 0.0)], [c(0.0, 0.0), -i]]
}

fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap());
    idx
}

/// Result of the Magic-basis Weyl decomposition of a 4x4 unitary: local single-qubit
/// corrections `K1*`/`K2*` sandwiching the canonical interaction `exp(i(a XX + b YY +
/// c ZZ))`, plus the scalar phase left over once everything else is accounted for.
/// `K2r`/`K1r` act on qubit 0 (the least significant bit); `K2l`/`K1l` act on qubit 1.
/// Application order: `K2r`/`K2l` first, then the interaction, then `K1r`/`K1l`.
pub struct WeylDecomposition {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub global_phase: f64,
    pub k1l: Array2<Complex64>,
    pub k1r: Array2<Complex64>,
    pub k2l: Array2<Complex64>,
    pub k2r: Array2<Complex64>,
}

pub fn weyl_decompose(u: &Array2<Complex64>) -> Result<WeylDecomposition, DecompError> {
    let det_u = det_n(u.view());
    let mut global_phase = det_u.arg() / 4.0;
    let scale = Complex64::from_polar(1.0, -det_u.arg() / 4.0);
    let u_scaled = u.mapv(|x| x * scale);

    let u_p = transform_from_magic_basis(&u_scaled, true);
    let m2 = u_p.t().to_owned().dot(&u_p);

    let mut state = Pcg64Mcg::seed_from_u64(REALIFICATION_SEED);
    let mut found = false;
    let mut p = Array2::<Complex64>::zeros((0, 0));
    let mut d = Array1::<Complex64>::zeros(0);
    for _ in 0..REALIFICATION_ATTEMPTS {
        let rand_a: f64 = state.sample(StandardNormal);
        let rand_b: f64 = state.sample(StandardNormal);
        let m2_real = Mat::<f64>::from_fn(4, 4, |i, j| {
            let v = m2[[i, j]];
            rand_a * v.re + rand_b * v.im
        });
        let p_real: Array2<f64> = m2_real
            .selfadjoint_eigendecomposition(Lower)
            .u()
            .into_ndarray()
            .to_owned();
        let p_candidate = p_real.mapv(Complex64::from);
        let d_candidate = p_candidate.t().to_owned().dot(&m2).dot(&p_candidate).diag().to_owned();
        let mut diag_d = Array2::<Complex64>::zeros((4, 4));
        for (idx, v) in d_candidate.iter().enumerate() {
            diag_d[[idx, idx]] = *v;
        }
        let reconstructed = p_candidate.dot(&diag_d).dot(&p_candidate.t());
        let residual = crate::linalg::frobenius_distance(reconstructed.view(), m2.view());
        p = p_candidate;
        d = d_candidate;
        if residual < REALIFICATION_TOLERANCE {
            found = true;
            break;
        }
    }
    if !found {
        return Err(DecompError::Numerical {
            stage: "two_qubit_weyl_realification",
            residual: f64::INFINITY,
        });
    }

    let mut d: Array1<f64> = d.mapv(|x| -x.arg() / 2.0);
    d[3] = -d[0] - d[1] - d[2];
    let mut cs: Vec<f64> = (0..3)
        .map(|i| ((d[i] + d[3]) / 2.0).rem_euclid(TWO_PI))
        .collect();
    let cstemp: Vec<f64> = cs
        .iter()
        .map(|x| x.rem_euclid(PI2))
        .map(|x| x.min(PI2 - x))
        .collect();
    let mut order = argsort(&cstemp);
    let rotated = (order[1], order[2], order[0]);
    (order[0], order[1], order[2]) = rotated;
    let cs_reordered: Vec<f64> = order.iter().map(|&i| cs[i]).collect();
    cs[0] = cs_reordered[0];
    cs[1] = cs_reordered[1];
    cs[2] = cs_reordered[2];
    let d_reordered: Vec<f64> = order.iter().map(|&i| d[i]).collect();
    d[0] = d_reordered[0];
    d[1] = d_reordered[1];
    d[2] = d_reordered[2];

    let mut p_new = Array2::<Complex64>::zeros((4, 4));
    for i in 0..3 {
        let col = p.column(order[i]).to_owned();
        p_new.column_mut(i).assign(&col);
    }
    p_new.column_mut(3).assign(&p.column(3));
    let mut p = p_new;
    if det_n(p.view()).re < 0.0 {
        let negated = p.column(3).mapv(|x| -x);
        p.column_mut(3).assign(&negated);
    }

    let mut phase_diag = Array2::<Complex64>::zeros((4, 4));
    for (idx, &dv) in d.iter().enumerate().take(4) {
        phase_diag[[idx, idx]] = Complex64::from_polar(1.0, dv);
    }
    let k1 = transform_from_magic_basis(&u_p.dot(&p).dot(&phase_diag), false);
    let k2 = transform_from_magic_basis(&p.t().to_owned(), false);

    let (mut k1l, mut k1r, phase_l) = decompose_product_gate(&k1);
    let (mut k2l, mut k2r, phase_r) = decompose_product_gate(&k2);
    global_phase += phase_l + phase_r;

    let ipy = rot_ipy();
    let ipx = rot_ipx();
    let ipz = rot_ipz();

    if cs[0] > PI2 {
        cs[0] -= PI32;
        k1l = k1l.dot(&ipy);
        k1r = k1r.dot(&ipy);
        global_phase += PI2;
    }
    if cs[1] > PI2 {
        cs[1] -= PI32;
        k1l = k1l.dot(&ipx);
        k1r = k1r.dot(&ipx);
        global_phase += PI2;
    }
    let mut conjs = 0;
    if cs[0] > PI4 {
        cs[0] = PI2 - cs[0];
        k1l = k1l.dot(&ipy);
        k2r = ipy.dot(&k2r);
        conjs += 1;
        global_phase -= PI2;
    }
    if cs[1] > PI4 {
        cs[1] = PI2 - cs[1];
        conjs += 1;
        k1l = k1l.dot(&ipx);
        k2r = ipx.dot(&k2r);
        conjs += 1;
        global_phase += PI2;
        if conjs == 1 {
            global_phase -= PI;
        }
    }
    if cs[2] > PI2 {
        cs[2] -= PI32;
        k1l = k1l.dot(&ipz);
        k1r = k1r.dot(&ipz);
        global_phase += PI2;
        if conjs == 1 {
            global_phase -= PI;
        }
    }
    if conjs == 1 {
        cs[2] = PI2 - cs[2];
        k1l = k1l.dot(&ipz);
        k2r = ipz.dot(&k2r);
        global_phase += PI2;
    }
    if cs[2] > PI4 {
        cs[2] -= PI2;
        k1l = k1l.dot(&ipz);
        k1r = k1r.dot(&ipz);
        global_phase -= PI2;
    }

    let (a, b, cc) = (cs[1], cs[0], cs[2]);

    Ok(WeylDecomposition {
        a,
        b,
        c: cc,
        global_phase,
        k1l,
        k1r,
        k2l,
        k2r,
    })
}

fn mat2_to_array(m: &Array2<Complex64>) -> [[Complex64; 2]; 2] {
    [[m[[0, 0]], m[[0, 1]]], [m[[1, 0]], m[[1, 1]]]]
}

/// The canonical interaction `exp(i(a XX + b YY + c ZZ))` as a 3-CNOT circuit on
/// `(qubit0, qubit1)`, the standard Rz/Ry-sandwiched construction: two CNOTs
/// controlled on qubit 1 bracket a CNOT controlled on qubit 0, with single-qubit
/// rotations between them carrying the `a`, `b`, `c` parameters.
fn canonical_interaction_gates(a: f64, b: f64, cc: f64, qubit0: usize, qubit1: usize) -> Vec<Gate> {
    let theta_z = 2.0 * cc - PI2;
    let theta_y1 = PI2 - 2.0 * a;
    let theta_y2 = 2.0 * b - PI2;
    vec![
        Gate::fully_controlled(Gate::x(qubit0), vec![qubit1], qubit0),
        Gate::rz(theta_z, qubit0),
        Gate::ry(theta_y1, qubit1),
        Gate::fully_controlled(Gate::x(qubit1), vec![qubit0], qubit1),
        Gate::ry(theta_y2, qubit1),
        Gate::fully_controlled(Gate::x(qubit0), vec![qubit1], qubit0),
    ]
}

/// Full gate-stream synthesis of a 4x4 unitary via the Magic-basis Weyl
/// decomposition: at most 3 fully-controlled X gates plus single-qubit corrections.
pub fn synthesize_optimal_two_qubit(u: &Array2<Complex64>, tol: f64) -> Result<Vec<Gate>, DecompError> {
    let weyl = weyl_decompose(u)?;

    let mut gates = Vec::new();
    gates.extend(zyz_to_gates(
        &zyz_decompose(&mat2_to_array(&weyl.k2r), tol),
        0,
        tol,
        true,
    ));
    gates.extend(zyz_to_gates(
        &zyz_decompose(&mat2_to_array(&weyl.k2l), tol),
        1,
        tol,
        true,
    ));
    gates.extend(canonical_interaction_gates(weyl.a, weyl.b, weyl.c, 0, 1));
    gates.extend(zyz_to_gates(
        &zyz_decompose(&mat2_to_array(&weyl.k1r), tol),
        0,
        tol,
        true,
    ));
    gates.extend(zyz_to_gates(
        &zyz_decompose(&mat2_to_array(&weyl.k1l), tol),
        1,
        tol,
        true,
    ));
    gates.extend(global_phase_gates(weyl.global_phase, 0, tol));

    Ok(gates)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reconstruct(gates: &[Gate]) -> Array2<Complex64> {
        let mut acc = Array2::<Complex64>::eye(4);
        for g in gates {
            let m = match g {
                Gate::Single { axis, angle, qubit } => {
                    let local = match axis {
                        crate::types::Axis::X => crate::zyz::x_matrix(),
                        crate::types::Axis::Rx => crate::zyz::rx_matrix(*angle),
                        crate::types::Axis::Ry => crate::zyz::ry_matrix(*angle),
                        crate::types::Axis::Rz => crate::zyz::rz_matrix(*angle),
                        crate::types::Axis::R1 => crate::zyz::r1_matrix(*angle),
                    };
                    crate::linalg::embed_single_qubit(&local, *qubit, 2)
                }
                Gate::FullyControlled {
                    inner,
                    controls,
                    target,
                } => {
                    let local = match inner.as_ref() {
                        Gate::Single { axis, angle, .. } => match axis {
                            crate::types::Axis::X => crate::zyz::x_matrix(),
                            crate::types::Axis::Rx => crate::zyz::rx_matrix(*angle),
                            crate::types::Axis::Ry => crate::zyz::ry_matrix(*angle),
                            crate::types::Axis::Rz => crate::zyz::rz_matrix(*angle),
                            crate::types::Axis::R1 => crate::zyz::r1_matrix(*angle),
                        },
                        Gate::FullyControlled { .. } => unreachable!(),
                    };
                    crate::linalg::embed_fully_controlled(&local, controls, *target, 2)
                }
            };
            acc = m.dot(&acc);
        }
        acc
    }

    #[test]
    fn decomposes_identity() {
        let u = Array2::<Complex64>::eye(4);
        let gates = synthesize_optimal_two_qubit(&u, 1e-9).unwrap();
        let back = reconstruct(&gates);
        assert_abs_diff_eq!(
            crate::linalg::frobenius_distance(back.view(), u.view()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn cnot_has_at_most_three_controlled_x_gates() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let cnot = Array2::from_shape_vec(
            (4, 4),
            vec![
                one, zero, zero, zero, //
                zero, one, zero, zero, //
                zero, zero, zero, one, //
                zero, zero, one, zero,
            ],
        )
        .unwrap();
        let gates = synthesize_optimal_two_qubit(&cnot, 1e-9).unwrap();
        let controlled_x = gates
            .iter()
            .filter(|g| {
                matches!(
                    g,
                    Gate::FullyControlled { inner, .. }
                        if matches!(inner.as_ref(), Gate::Single { axis: crate::types::Axis::X, .. })
                )
            })
            .count();
        assert!(controlled_x <= 3);
    }
}
